//! Single-step move application and pickup resolution.
//! Every applied step runs the same turn sequence: reveal, pickup, attraction.
//! It does not own path planning or the level lifecycle.

use super::{attraction, visibility};
use crate::state::GameState;
use crate::types::*;

pub(super) struct StepOutcome {
    pub(super) moved: bool,
    pub(super) completed_level: bool,
}

/// Try to move the player by one tile. Blocked or out-of-range targets are
/// a silent no-op; a successful step runs the full turn sequence.
pub(super) fn apply_step(
    state: &mut GameState,
    log: &mut Vec<LogEvent>,
    dx: i32,
    dy: i32,
) -> StepOutcome {
    let target = state.player.pos.step(dx, dy);
    if !state.map.is_walkable(target) {
        return StepOutcome { moved: false, completed_level: false };
    }

    state.player.pos = target;
    if let Some(facing) = facing_from_delta(dx, dy) {
        state.player.facing = facing;
    }
    state.player.walk_phase = !state.player.walk_phase;
    state.player.moving = true;

    visibility::reveal_around(&mut state.map, target, REVEAL_RADIUS);
    let mut completed = resolve_pickup(state, log);
    completed |= attraction::attract_treasures(state, log);

    StepOutcome { moved: true, completed_level: completed }
}

/// The x axis wins over the y axis, matching how facing is derived from a
/// diagonal-free step sequence.
fn facing_from_delta(dx: i32, dy: i32) -> Option<Facing> {
    if dx > 0 {
        Some(Facing::Right)
    } else if dx < 0 {
        Some(Facing::Left)
    } else if dy > 0 {
        Some(Facing::Down)
    } else if dy < 0 {
        Some(Facing::Up)
    } else {
        None
    }
}

fn resolve_pickup(state: &mut GameState, log: &mut Vec<LogEvent>) -> bool {
    let pos = state.player.pos;
    match state.map.tile_at(pos) {
        TileKind::Magnet => {
            clear_tile(state, pos);
            state.player.magnet_active = true;
            log.push(LogEvent::MagnetAcquired);
            false
        }
        TileKind::Treasure => {
            clear_tile(state, pos);
            collect_treasure(state, log)
        }
        TileKind::Floor | TileKind::Wall => false,
    }
}

/// Book a collected treasure: score up, remaining down, notify. Returns true
/// when this collection completed the level; the completion event is logged
/// exactly once, at the moment the count reaches zero.
pub(super) fn collect_treasure(state: &mut GameState, log: &mut Vec<LogEvent>) -> bool {
    state.score += 1;
    state.treasures_remaining = state.treasures_remaining.saturating_sub(1);
    log.push(LogEvent::TreasureCollected { total: state.score });
    if state.treasures_remaining == 0 {
        log.push(LogEvent::LevelCompleted { level: state.level });
        true
    } else {
        false
    }
}

fn clear_tile(state: &mut GameState, pos: Pos) {
    state.map.set_tile(pos, TileKind::Floor).expect("player position stays on the grid");
}
