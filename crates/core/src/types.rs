use std::fmt;

/// Side length of the square playfield, in tiles.
pub const GRID: usize = 16;

/// Reveal radius around the player, in tiles (squared-distance circle).
pub const REVEAL_RADIUS: i32 = 3;

/// Radius within which an active magnet pulls treasures, in tiles.
pub const ATTRACT_RADIUS: i32 = 3;

/// Default player spawn, also used when a level file omits the player field.
pub const PLAYER_SPAWN: Pos = Pos { y: 1, x: GRID as i32 / 2 };

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Floor,
    Wall,
    Treasure,
    Magnet,
}

impl TileKind {
    /// Wire code used by the level-file format.
    pub fn code(self) -> u8 {
        match self {
            Self::Floor => 1,
            Self::Wall => 2,
            Self::Treasure => 3,
            Self::Magnet => 4,
        }
    }

    /// Inverse of [`TileKind::code`]. Codes outside 1..=4 have no meaning.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Floor),
            2 => Some(Self::Wall),
            3 => Some(Self::Treasure),
            4 => Some(Self::Magnet),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

/// Coordinate outside the `[0, GRID)` range on either axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfBounds {
    pub pos: Pos,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coordinate ({}, {}) is outside the {GRID}x{GRID} grid", self.pos.x, self.pos.y)
    }
}

/// Notifications emitted by the simulation for the UI layer to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    TreasureCollected { total: u32 },
    MagnetAcquired,
    LevelCompleted { level: u32 },
    LevelLoaded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_codes_round_trip() {
        for tile in [TileKind::Floor, TileKind::Wall, TileKind::Treasure, TileKind::Magnet] {
            assert_eq!(TileKind::from_code(i64::from(tile.code())), Some(tile));
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        for code in [0, 5, -1, 255] {
            assert_eq!(TileKind::from_code(code), None);
        }
    }
}
