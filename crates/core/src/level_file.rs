//! JSON level-file codec shared with the level editor.
//!
//! The on-disk shape is:
//! - `name`: optional display name (always written on save).
//! - `player`: optional spawn override; the default spawn applies when absent.
//! - `map`: row-major grid of tile codes (1=floor, 2=wall, 3=treasure,
//!   4=magnet item). Grids smaller than 16x16 pad with floor; cells beyond
//!   the grid are ignored.
//! - `spriteLayer`: the editor's optional per-cell sprite-reference overlay,
//!   preserved through load/save and ignored by the simulation.
//!
//! Parsing never touches live game state; a level is applied only after the
//! whole file validated.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::state::{GameState, Map};
use crate::types::*;

/// Per-cell optional sprite references, `GRID` rows of `GRID` entries.
pub type SpriteLayer = Vec<Vec<Option<String>>>;

// ---------------------------------------------------------------------------
// File format structs
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct RawLevel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    player: Option<RawPlayer>,
    map: Vec<Vec<i64>>,
    #[serde(rename = "spriteLayer", default, skip_serializing_if = "Option::is_none")]
    sprite_layer: Option<Vec<Vec<Option<String>>>>,
}

#[derive(Serialize, Deserialize)]
struct RawPlayer {
    x: i32,
    y: i32,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Describes why a level file could not be loaded.
#[derive(Debug)]
pub enum LevelFileError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// The file is not valid JSON or misses the required `map` field.
    Parse { message: String },
    /// A map cell carries a code outside the closed 1..=4 range.
    InvalidTileCode { x: usize, y: usize, code: i64 },
    /// The player field points outside the grid.
    PlayerOutOfBounds { x: i32, y: i32 },
}

impl fmt::Display for LevelFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "level file I/O error: {e}"),
            Self::Parse { message } => write!(f, "invalid level file: {message}"),
            Self::InvalidTileCode { x, y, code } => {
                write!(f, "invalid tile code {code} at ({x}, {y})")
            }
            Self::PlayerOutOfBounds { x, y } => {
                write!(f, "player position ({x}, {y}) is outside the {GRID}x{GRID} grid")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Level model
// ---------------------------------------------------------------------------

/// A fully validated level, reconciled to the fixed grid size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelFile {
    pub name: Option<String>,
    pub player: Pos,
    pub tiles: Vec<TileKind>,
    pub sprite_layer: Option<SpriteLayer>,
}

impl LevelFile {
    /// Validate a JSON document. The world stays untouched on failure.
    pub fn parse(json: &str) -> Result<Self, LevelFileError> {
        let raw: RawLevel = serde_json::from_str(json)
            .map_err(|e| LevelFileError::Parse { message: e.to_string() })?;

        let player = match raw.player {
            Some(RawPlayer { x, y }) => {
                if x < 0 || y < 0 || x as usize >= GRID || y as usize >= GRID {
                    return Err(LevelFileError::PlayerOutOfBounds { x, y });
                }
                Pos { y, x }
            }
            None => PLAYER_SPAWN,
        };

        let mut tiles = vec![TileKind::Floor; GRID * GRID];
        for (y, row) in raw.map.iter().take(GRID).enumerate() {
            for (x, &code) in row.iter().take(GRID).enumerate() {
                tiles[y * GRID + x] = TileKind::from_code(code)
                    .ok_or(LevelFileError::InvalidTileCode { x, y, code })?;
            }
        }

        let sprite_layer = raw.sprite_layer.map(|layer| {
            let mut grid = vec![vec![None; GRID]; GRID];
            for (y, row) in layer.into_iter().take(GRID).enumerate() {
                for (x, cell) in row.into_iter().take(GRID).enumerate() {
                    grid[y][x] = cell;
                }
            }
            grid
        });

        Ok(Self { name: raw.name, player, tiles, sprite_layer })
    }

    pub fn load(path: &Path) -> Result<Self, LevelFileError> {
        let json = fs::read_to_string(path).map_err(LevelFileError::Io)?;
        Self::parse(&json)
    }

    pub fn to_json(&self) -> Result<String, LevelFileError> {
        let rows = (0..GRID)
            .map(|y| (0..GRID).map(|x| i64::from(self.tiles[y * GRID + x].code())).collect())
            .collect();
        let raw = RawLevel {
            name: self.name.clone(),
            player: Some(RawPlayer { x: self.player.x, y: self.player.y }),
            map: rows,
            sprite_layer: self.sprite_layer.clone(),
        };
        serde_json::to_string_pretty(&raw)
            .map_err(|e| LevelFileError::Parse { message: e.to_string() })
    }

    pub fn save(&self, path: &Path) -> Result<(), LevelFileError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(LevelFileError::Io)
    }

    /// Snapshot the current world into the save shape.
    pub fn from_state(name: &str, state: &GameState) -> Self {
        Self {
            name: Some(name.to_string()),
            player: state.player.pos,
            tiles: state.map.tiles.clone(),
            sprite_layer: None,
        }
    }

    /// Loaded levels carry no fog; everything starts revealed.
    pub fn to_map(&self) -> Map {
        Map { tiles: self.tiles.clone(), revealed: vec![true; GRID * GRID] }
    }

    pub fn treasure_count(&self) -> u32 {
        self.tiles.iter().filter(|&&t| t == TileKind::Treasure).count() as u32
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
