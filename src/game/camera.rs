//! Camera and viewport rendering
//!
//! The view is a fixed 15x15 window that follows the player and stops at
//! the map edges.

use std::collections::HashSet;

use crate::entities::Enemy;
use crate::world::{Map, Position};

/// Side of the square viewport, in tiles
pub const VIEWPORT_SIZE: i32 = 15;

/// Top-left corner of the viewport for a player position
pub fn camera_for(player: Position, map_width: i32, map_height: i32) -> Position {
    let half = VIEWPORT_SIZE / 2;
    Position::new(
        clamp_axis(player.x - half, map_width),
        clamp_axis(player.y - half, map_height),
    )
}

fn clamp_axis(value: i32, dimension: i32) -> i32 {
    value.clamp(0, (dimension - VIEWPORT_SIZE).max(0))
}

/// Draw the viewport as text rows.
///
/// Unexplored cells are blank. Enemies only show while visible; the player
/// is `@`.
pub fn render_viewport(
    map: &Map,
    camera: Position,
    player: Position,
    enemies: &[Enemy],
    visible: &HashSet<Position>,
) -> Vec<String> {
    (camera.y..camera.y + VIEWPORT_SIZE)
        .map(|y| {
            (camera.x..camera.x + VIEWPORT_SIZE)
                .map(|x| {
                    let pos = Position::new(x, y);
                    if !map.in_bounds(x, y) {
                        return ' ';
                    }
                    if pos == player {
                        return '@';
                    }
                    if visible.contains(&pos) {
                        if let Some(enemy) = enemies.iter().find(|e| e.position == pos && e.is_alive()) {
                            return enemy.symbol;
                        }
                    }
                    if map.is_explored(x, y) {
                        map.tile_type(x, y).glyph()
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{compute_fov, reveal, TileType};

    #[test]
    fn test_camera_clamps_at_edges() {
        assert_eq!(camera_for(Position::new(2, 3), 40, 30), Position::new(0, 0));
        assert_eq!(camera_for(Position::new(20, 15), 40, 30), Position::new(13, 8));
        assert_eq!(camera_for(Position::new(39, 29), 40, 30), Position::new(25, 15));
    }

    #[test]
    fn test_small_map_pins_camera() {
        assert_eq!(camera_for(Position::new(8, 8), 10, 10), Position::new(0, 0));
    }

    #[test]
    fn test_render_marks_player_and_fog() {
        let mut map = Map::new(20, 20, 1);
        for y in 1..19 {
            for x in 1..19 {
                map.set_tile(x, y, TileType::Floor);
            }
        }
        let player = Position::new(3, 3);
        let visible = compute_fov(&map, player, 2);
        reveal(&mut map, &visible);

        let rows = render_viewport(&map, camera_for(player, 20, 20), player, &[], &visible);
        assert_eq!(rows.len(), VIEWPORT_SIZE as usize);
        assert!(rows.iter().all(|r| r.chars().count() == VIEWPORT_SIZE as usize));
        assert_eq!(rows[3].chars().nth(3), Some('@'));
        assert_eq!(rows[3].chars().nth(4), Some('.'));
        // Far corner was never seen
        assert_eq!(rows[14].chars().nth(14), Some(' '));
    }
}
