//! Headless re-execution of an input journal against a fresh game.
//!
//! Travel requests are drained synchronously; the wall-clock cadence the
//! scheduler adds in the real app does not affect world state, so a replay
//! lands on the same snapshot hash the original session produced.

use std::fmt;

use crate::game::Game;
use crate::journal::{InputJournal, InputPayload};
use crate::types::Pos;

#[derive(Debug, PartialEq, Eq)]
pub enum ReplayError {
    SeqOutOfOrder { expected: u64, found: u64 },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeqOutOfOrder { expected, found } => {
                write!(f, "journal sequence out of order: expected {expected}, found {found}")
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_snapshot_hash: u64,
    pub final_score: u32,
    pub final_level: u32,
}

pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    let mut game = Game::new(journal.seed);

    for (index, record) in journal.inputs.iter().enumerate() {
        let expected = index as u64;
        if record.seq != expected {
            return Err(ReplayError::SeqOutOfOrder { expected, found: record.seq });
        }
        match record.payload {
            InputPayload::Step { dx, dy } => {
                game.attempt_move(dx, dy);
                game.end_step_window();
            }
            InputPayload::Travel { x, y } => {
                if game.travel_to(Pos { y, x }) {
                    while game.step_path() {
                        game.end_step_window();
                    }
                }
            }
            InputPayload::CancelTravel => game.cancel_travel(),
        }
    }

    Ok(ReplayResult {
        final_snapshot_hash: game.snapshot_hash(),
        final_score: game.state().score,
        final_level: game.state().level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::InputRecord;

    #[test]
    fn replay_matches_a_directly_driven_game() {
        let mut journal = InputJournal::new(4242);
        journal.append(InputPayload::Step { dx: 0, dy: 1 });
        journal.append(InputPayload::Travel { x: 8, y: 8 });
        journal.append(InputPayload::Step { dx: 1, dy: 0 });

        let mut game = Game::new(4242);
        game.attempt_move(0, 1);
        game.end_step_window();
        if game.travel_to(Pos { y: 8, x: 8 }) {
            while game.step_path() {
                game.end_step_window();
            }
        }
        game.attempt_move(1, 0);
        game.end_step_window();

        let result = replay_to_end(&journal).expect("replay succeeds");
        assert_eq!(result.final_snapshot_hash, game.snapshot_hash());
        assert_eq!(result.final_score, game.state().score);
    }

    #[test]
    fn out_of_order_sequence_numbers_are_rejected() {
        let mut journal = InputJournal::new(1);
        journal.inputs.push(InputRecord { seq: 5, payload: InputPayload::CancelTravel });

        assert_eq!(
            replay_to_end(&journal),
            Err(ReplayError::SeqOutOfOrder { expected: 0, found: 5 })
        );
    }
}
