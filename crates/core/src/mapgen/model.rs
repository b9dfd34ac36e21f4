//! Public data model for generated levels.

use crate::state::Map;
use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub map: Map,
    pub spawn: Pos,
    pub treasure_count: u32,
}

impl GeneratedLevel {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.spawn.y.to_le_bytes());
        bytes.extend(self.spawn.x.to_le_bytes());
        bytes.extend(self.treasure_count.to_le_bytes());
        for tile in &self.map.tiles {
            bytes.push(tile.code());
        }
        for &revealed in &self.map.revealed {
            bytes.push(u8::from(revealed));
        }
        bytes
    }
}
