//! Procedural level generation: walls, treasures, and the magnet item,
//! with every placement guaranteed reachable from the spawn.

pub mod model;

mod generator;
mod seed;

pub use generator::LevelGenerator;
pub use model::GeneratedLevel;

pub fn generate_level(run_seed: u64, level: u32) -> GeneratedLevel {
    LevelGenerator::new(run_seed).generate(level)
}
