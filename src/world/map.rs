//! Map data structure
//!
//! The 2D grid representing a dungeon level.

use std::collections::{HashSet, VecDeque};

use super::generation::Room;
use super::position::Position;
use super::tile::{Tile, TileType};

/// Width of the first level's map
pub const BASE_WIDTH: i32 = 40;
/// Height of the first level's map
pub const BASE_HEIGHT: i32 = 30;

/// A dungeon level map
#[derive(Debug, Clone)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Tile>,
    pub level: u32,
    /// Start position for player
    pub start_pos: Position,
    /// Where the level boss stands
    pub boss_pos: Position,
    /// Rooms in generation order
    pub rooms: Vec<Room>,
}

impl Map {
    /// Create a new map filled with walls
    pub fn new(width: i32, height: i32, level: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let tiles = vec![Tile::default(); (width * height) as usize];
        Self {
            width,
            height,
            tiles,
            level,
            start_pos: Position::new(0, 0),
            boss_pos: Position::new(0, 0),
            rooms: Vec::new(),
        }
    }

    /// Map dimensions for a dungeon level.
    ///
    /// Level 1 uses the base 40x30 grid; deeper levels are square and grow by
    /// five cells per level, up to five levels of growth.
    pub fn size_for_level(level: u32) -> (i32, i32) {
        if level <= 1 {
            (BASE_WIDTH, BASE_HEIGHT)
        } else {
            let side = BASE_WIDTH + 5 * (level as i32 - 1).min(5);
            (side, side)
        }
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    pub fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Get mutable tile at position
    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    /// Tile type at a position; out-of-bounds reads as wall
    pub fn tile_type(&self, x: i32, y: i32) -> TileType {
        self.get_tile(x, y).map_or(TileType::Wall, |t| t.tile_type)
    }

    /// Set tile type at position
    pub fn set_tile(&mut self, x: i32, y: i32, tile_type: TileType) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.tile_type = tile_type;
        }
    }

    /// Check if a position can be stepped on
    pub fn is_traversable(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.is_traversable())
    }

    /// Check if a position is plain floor
    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.tile_type(x, y) == TileType::Floor
    }

    /// Mark a tile as explored, returning true if it was not explored before
    pub fn mark_explored(&mut self, x: i32, y: i32) -> bool {
        match self.get_tile_mut(x, y) {
            Some(tile) if !tile.explored => {
                tile.explored = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.explored)
    }

    /// Get all plain floor positions
    pub fn floor_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.tile_type == TileType::Floor)
            .map(|(idx, _)| {
                let (x, y) = self.idx_to_xy(idx);
                Position::new(x, y)
            })
            .collect()
    }

    /// Count tiles of a given type
    pub fn count_tiles(&self, tile_type: TileType) -> usize {
        self.tiles.iter().filter(|t| t.tile_type == tile_type).count()
    }

    /// All cells reachable from `origin` over traversable tiles (4-connected)
    pub fn reachable_from(&self, origin: Position) -> HashSet<Position> {
        let mut seen = HashSet::new();
        if !self.is_traversable(origin.x, origin.y) {
            return seen;
        }

        let mut queue = VecDeque::new();
        seen.insert(origin);
        queue.push_back(origin);

        while let Some(pos) = queue.pop_front() {
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let next = pos.offset(dx, dy);
                if self.is_traversable(next.x, next.y) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        seen
    }

    /// Render the map rows as glyph strings
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.tile_type(x, y).glyph()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_for_level() {
        assert_eq!(Map::size_for_level(1), (40, 30));
        assert_eq!(Map::size_for_level(2), (45, 45));
        assert_eq!(Map::size_for_level(6), (65, 65));
        assert_eq!(Map::size_for_level(12), (65, 65));
    }

    #[test]
    fn test_bounds_and_defaults() {
        let map = Map::new(10, 8, 1);
        assert_eq!(map.tiles.len(), 80);
        assert!(map.in_bounds(9, 7));
        assert!(!map.in_bounds(10, 0));
        assert!(!map.in_bounds(0, -1));
        assert_eq!(map.tile_type(-5, 3), TileType::Wall);
        assert_eq!(map.idx_to_xy(map.xy_to_idx(3, 4)), (3, 4));
    }

    #[test]
    fn test_mark_explored_once() {
        let mut map = Map::new(5, 5, 1);
        assert!(map.mark_explored(2, 2));
        assert!(!map.mark_explored(2, 2));
        assert!(map.is_explored(2, 2));
        assert!(!map.mark_explored(9, 9));
    }

    #[test]
    fn test_reachable_stops_at_walls() {
        let mut map = Map::new(7, 3, 1);
        for x in 1..3 {
            map.set_tile(x, 1, TileType::Floor);
        }
        map.set_tile(5, 1, TileType::Floor);

        let reached = map.reachable_from(Position::new(1, 1));
        assert_eq!(reached.len(), 2);
        assert!(!reached.contains(&Position::new(5, 1)));

        map.set_tile(3, 1, TileType::Door);
        map.set_tile(4, 1, TileType::Chest);
        let reached = map.reachable_from(Position::new(1, 1));
        assert!(reached.contains(&Position::new(5, 1)));
    }
}
