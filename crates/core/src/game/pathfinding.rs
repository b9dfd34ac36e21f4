//! Breadth-first reachability and shortest-path queries over the tile grid.
//! This module exists so the movement controller and the map generator share
//! one navigation rule set. It does not own any mutable world state.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::state::Map;
use crate::types::Pos;

/// 4-neighborhood in the fixed expansion order `+x, -x, +y, -y`.
/// Path tie-breaking and the attraction fallback both depend on this order.
pub(crate) fn neighbors(p: Pos) -> [Pos; 4] {
    [
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y, x: p.x - 1 },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y - 1, x: p.x },
    ]
}

/// All cells reachable from `start` through walkable tiles, `start` included.
pub fn reachable_from(map: &Map, start: Pos) -> BTreeSet<Pos> {
    let mut visited = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for neighbor in neighbors(current) {
            if map.is_walkable(neighbor) && visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited
}

/// Shortest path from `start` to `goal`, excluding `start` and including
/// `goal`. `None` when the goal is unreachable; empty when start == goal.
pub fn shortest_path(map: &Map, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    if start == goal {
        return Some(Vec::new());
    }

    let mut visited = BTreeSet::from([start]);
    let mut came_from: BTreeMap<Pos, Pos> = BTreeMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            break;
        }
        for neighbor in neighbors(current) {
            if !map.is_walkable(neighbor) || !visited.insert(neighbor) {
                continue;
            }
            came_from.insert(neighbor, current);
            queue.push_back(neighbor);
        }
    }

    if !came_from.contains_key(&goal) {
        return None;
    }

    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    Some(path)
}
