//! Field of view
//!
//! Sight is a plain circular mask around the viewer: walls do not cast
//! shadows, the map edge clips the circle, and exploration is monotonic.

use std::collections::HashSet;

use super::{Map, Position};

/// Sight radius of the player, in tiles
pub const VIEW_RADIUS: i32 = 5;

/// Compute every in-bounds cell within `radius` of `origin`
pub fn compute_fov(map: &Map, origin: Position, radius: i32) -> HashSet<Position> {
    let mut visible = HashSet::new();
    let radius_squared = radius * radius;

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius_squared {
                continue;
            }
            let x = origin.x + dx;
            let y = origin.y + dy;
            if map.in_bounds(x, y) {
                visible.insert(Position::new(x, y));
            }
        }
    }

    visible
}

/// Mark visible cells explored; returns the cells seen for the first time
pub fn reveal(map: &mut Map, visible: &HashSet<Position>) -> Vec<Position> {
    let mut newly_seen: Vec<Position> = visible
        .iter()
        .copied()
        .filter(|pos| map.mark_explored(pos.x, pos.y))
        .collect();
    newly_seen.sort_by_key(|p| (p.y, p.x));
    newly_seen
}
