//! Turn resolution and session lifecycle.
//!
//! One turn = one applied step: reveal, pickup, attraction, in that order,
//! synchronously. Path-following is a resumable queue the external scheduler
//! drains at its own cadence via [`Game::step_path`]; there are no internal
//! timers and never two movement sequences in flight.

use std::collections::VecDeque;

use crate::level_file::LevelFile;
use crate::mapgen::{self, GeneratedLevel};
use crate::state::{GameState, Player};
use crate::types::*;

mod attraction;
mod movement;
pub mod pathfinding;
pub mod visibility;

use movement::StepOutcome;
use pathfinding::shortest_path;

pub struct Game {
    seed: u64,
    state: GameState,
    log: Vec<LogEvent>,
    pending_path: Option<PathFollow>,
}

/// Remaining waypoints of a click-to-move request. Replaced wholesale when a
/// new request supersedes it; there is no queued resumption.
struct PathFollow {
    steps: VecDeque<Pos>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        let generated = mapgen::generate_level(seed, 1);
        Self {
            seed,
            state: fresh_state(generated, 1, 0, true),
            log: Vec::new(),
            pending_path: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Move the player one tile. Cancels any in-flight path-follow, even when
    /// the step itself is blocked. Returns whether the player moved.
    pub fn attempt_move(&mut self, dx: i32, dy: i32) -> bool {
        if !self.state.running {
            return false;
        }
        self.pending_path = None;
        let outcome = movement::apply_step(&mut self.state, &mut self.log, dx, dy);
        self.finish_turn(&outcome);
        outcome.moved
    }

    /// Plan a path to `goal` and install it for step-wise following,
    /// superseding any in-flight path. Returns false when the goal is not
    /// walkable, unreachable, or already under the player.
    pub fn travel_to(&mut self, goal: Pos) -> bool {
        if !self.state.running || !self.state.map.is_walkable(goal) {
            return false;
        }
        match shortest_path(&self.state.map, self.state.player.pos, goal) {
            Some(path) if !path.is_empty() => {
                self.pending_path = Some(PathFollow { steps: path.into() });
                true
            }
            _ => false,
        }
    }

    /// Apply the next pending waypoint. The external scheduler calls this
    /// once per step delay. Returns false when there is nothing to do; a
    /// waypoint that became unwalkable cancels the rest of the path.
    pub fn step_path(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        let Some(follow) = &mut self.pending_path else {
            return false;
        };
        let Some(waypoint) = follow.steps.pop_front() else {
            self.pending_path = None;
            return false;
        };
        if follow.steps.is_empty() {
            self.pending_path = None;
        }

        let dx = waypoint.x - self.state.player.pos.x;
        let dy = waypoint.y - self.state.player.pos.y;
        let outcome = movement::apply_step(&mut self.state, &mut self.log, dx, dy);
        if !outcome.moved {
            self.pending_path = None;
            return false;
        }
        self.finish_turn(&outcome);
        true
    }

    pub fn cancel_travel(&mut self) {
        self.pending_path = None;
    }

    pub fn has_pending_path(&self) -> bool {
        self.pending_path.is_some()
    }

    /// Revert the walk animation to idle. The scheduler calls this after the
    /// step animation window has elapsed.
    pub fn end_step_window(&mut self) {
        self.state.player.moving = false;
    }

    pub fn pause(&mut self) {
        self.state.running = false;
    }

    pub fn resume(&mut self) {
        self.state.running = true;
    }

    /// Restart the whole session: score, level, and power gone, fresh map.
    pub fn reset(&mut self) {
        self.pending_path = None;
        self.log.clear();
        let generated = mapgen::generate_level(self.seed, 1);
        self.state = fresh_state(generated, 1, 0, true);
    }

    /// Replace the world with a level loaded from a file. Score, level
    /// counter, and an already-acquired power are untouched; the whole map
    /// starts revealed and the treasure count comes from scanning the tiles.
    pub fn apply_level(&mut self, level: &LevelFile) {
        self.pending_path = None;
        self.state.treasures_remaining = level.treasure_count();
        self.state.map = level.to_map();
        self.state.player.pos = level.player;
        self.state.player.moving = false;
        self.log.push(LogEvent::LevelLoaded);
    }

    /// Canonical fingerprint of the world, for determinism checks and replay
    /// verification.
    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.state.level);
        hasher.write_u32(self.state.score);
        hasher.write_u32(self.state.treasures_remaining);
        hasher.write_i32(self.state.player.pos.y);
        hasher.write_i32(self.state.player.pos.x);
        hasher.write_u8(u8::from(self.state.player.magnet_active));
        for tile in &self.state.map.tiles {
            hasher.write_u8(tile.code());
        }
        for &revealed in &self.state.map.revealed {
            hasher.write_u8(u8::from(revealed));
        }
        hasher.finish()
    }

    /// Level transitions are deferred to the end of the turn so a completion
    /// inside the attraction pass never swaps the map out mid-scan.
    fn finish_turn(&mut self, outcome: &StepOutcome) {
        if outcome.completed_level {
            self.advance_level();
        }
    }

    fn advance_level(&mut self) {
        self.pending_path = None;
        let next = self.state.level + 1;
        let generated = mapgen::generate_level(self.seed, next);
        self.state = fresh_state(generated, next, self.state.score, self.state.running);
    }
}

fn fresh_state(generated: GeneratedLevel, level: u32, score: u32, running: bool) -> GameState {
    GameState {
        player: Player::at(generated.spawn),
        treasures_remaining: generated.treasure_count,
        map: generated.map,
        score,
        level,
        running,
    }
}
