//! Magnet-driven treasure relocation, run once after every applied step.
//!
//! The candidate orders are load-bearing: a treasure first tries to close the
//! gap along x, then along y, then diagonally, and only then falls back to
//! the plain 4-neighborhood. Reordering them changes observable trajectories.

use super::movement::collect_treasure;
use super::pathfinding::neighbors;
use crate::state::GameState;
use crate::types::*;

/// One attraction pass. Each in-range treasure moves at most one cell toward
/// the player, or is collected when it would land on the player's cell.
/// Returns true when a collection in this pass completed the level; the pass
/// never stops early, even then.
pub(super) fn attract_treasures(state: &mut GameState, log: &mut Vec<LogEvent>) -> bool {
    if !state.player.magnet_active {
        return false;
    }

    let player = state.player.pos;
    let mut in_range = Vec::new();
    for y in 0..GRID as i32 {
        for x in 0..GRID as i32 {
            let pos = Pos { y, x };
            if state.map.tile_at(pos) != TileKind::Treasure {
                continue;
            }
            let dx = player.x - x;
            let dy = player.y - y;
            if dx * dx + dy * dy <= ATTRACT_RADIUS * ATTRACT_RADIUS {
                in_range.push(pos);
            }
        }
    }

    let mut completed = false;
    for treasure in in_range {
        // An earlier relocation or collection in this pass may already have
        // emptied this cell.
        if state.map.tile_at(treasure) != TileKind::Treasure {
            continue;
        }

        let dx = (player.x - treasure.x).signum();
        let dy = (player.y - treasure.y).signum();
        let primary = [
            Pos { y: treasure.y, x: treasure.x + dx },
            Pos { y: treasure.y + dy, x: treasure.x },
            Pos { y: treasure.y + dy, x: treasure.x + dx },
        ];
        if !try_destinations(state, log, treasure, &primary, &mut completed) {
            try_destinations(state, log, treasure, &neighbors(treasure), &mut completed);
        }
    }

    completed
}

/// Try each destination in order: collect on the player's cell, otherwise
/// move onto the first free floor cell. Returns whether the treasure settled.
fn try_destinations(
    state: &mut GameState,
    log: &mut Vec<LogEvent>,
    from: Pos,
    destinations: &[Pos],
    completed: &mut bool,
) -> bool {
    for &dest in destinations {
        if !state.map.in_bounds(dest) {
            continue;
        }
        if dest == state.player.pos {
            state.map.set_tile(from, TileKind::Floor).expect("treasure cell is on the grid");
            *completed |= collect_treasure(state, log);
            return true;
        }
        if state.map.tile_at(dest) == TileKind::Floor {
            state.map.set_tile(from, TileKind::Floor).expect("treasure cell is on the grid");
            state.map.set_tile(dest, TileKind::Treasure).expect("destination is on the grid");
            return true;
        }
    }
    false
}
