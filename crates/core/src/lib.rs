pub mod game;
pub mod journal;
pub mod level_file;
pub mod mapgen;
pub mod replay;
pub mod state;
pub mod types;

pub use game::Game;
pub use game::pathfinding::{reachable_from, shortest_path};
pub use game::visibility::reveal_around;
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use level_file::{LevelFile, LevelFileError, SpriteLayer};
pub use mapgen::{GeneratedLevel, LevelGenerator, generate_level};
pub use replay::{ReplayError, ReplayResult, replay_to_end};
pub use state::{GameState, Map, Player};
pub use types::*;
