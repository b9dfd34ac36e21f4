//! Recorded player inputs for deterministic replay.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPayload {
    /// One manual step by the given delta.
    Step { dx: i32, dy: i32 },
    /// Click-to-move request toward the given cell.
    Travel { x: i32, y: i32 },
    /// Abandon the in-flight travel, if any.
    CancelTravel,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self { format_version: 1, seed, inputs: Vec::new() }
    }

    pub fn append(&mut self, payload: InputPayload) {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, payload });
    }
}
