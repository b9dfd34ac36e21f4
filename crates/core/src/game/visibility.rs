//! Fog-of-reveal bookkeeping. Reveal is monotone within a level; only the
//! rendering layer reads the mask.

use crate::state::Map;
use crate::types::{GRID, Pos};

/// Reveal every cell within Euclidean distance `radius` of `center`,
/// clipped to the grid. Integer squared distances keep the circle exact.
pub fn reveal_around(map: &mut Map, center: Pos, radius: i32) {
    let min_y = (center.y - radius).max(0);
    let max_y = (center.y + radius).min(GRID as i32 - 1);
    for y in min_y..=max_y {
        let min_x = (center.x - radius).max(0);
        let max_x = (center.x + radius).min(GRID as i32 - 1);
        for x in min_x..=max_x {
            let dx = x - center.x;
            let dy = y - center.y;
            if dx * dx + dy * dy <= radius * radius {
                map.reveal(Pos { y, x });
            }
        }
    }
}
