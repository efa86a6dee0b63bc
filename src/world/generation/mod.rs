//! Procedural level generation
//!
//! Rooms and corridors first, then interactive tiles, then the player start,
//! the boss and the enemy population. Generation never fails; a cramped map
//! just ends up with fewer rooms and entities.

pub mod rooms;

pub use rooms::Room;

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;

use super::{Map, Position, TileType};
use crate::data::ContentTables;
use crate::entities::{enemy_count_for_level, spawn_enemies_for_level, Enemy};
use crate::items::IdCounter;

/// A generated level ready to play
#[derive(Debug, Clone)]
pub struct Dungeon {
    pub map: Map,
    /// Regular enemies followed by the level boss
    pub enemies: Vec<Enemy>,
    pub player_start: Position,
    pub boss_position: Position,
}

/// Number of rooms requested for a level
pub fn room_count_for_level(level: u32, rng: &mut StdRng) -> usize {
    5 + rng.gen_range(0..=4) + (level / 2) as usize
}

/// Generate a complete level
pub fn generate(
    width: i32,
    height: i32,
    level: u32,
    content: &ContentTables,
    ids: &mut IdCounter,
    rng: &mut StdRng,
) -> Dungeon {
    let level = level.max(1);
    let mut map = Map::new(width, height, level);

    let requested = room_count_for_level(level, rng);
    let rooms = rooms::place_rooms(rng, &mut map, requested);
    rooms::connect_rooms(rng, &mut map, &rooms);
    rooms::add_doors(&mut map, &rooms);

    place_chests(rng, &mut map, &rooms, level);
    if rooms.len() > 2 {
        place_shop(rng, &mut map, &rooms);
        place_single(rng, &mut map, &rooms, TileType::Wizard);
        place_single(rng, &mut map, &rooms, TileType::Shrine);
    }

    let start = place_start(&mut map, &rooms);
    let boss = place_boss(&mut map, &rooms, start);
    map.start_pos = start;
    map.boss_pos = boss;
    map.rooms = rooms;

    let mut occupied: HashSet<Position> = [start, boss].into_iter().collect();
    let count = enemy_count_for_level(level, rng);
    let drops = content.items.drops();
    let enemies = spawn_enemies_for_level(
        &map,
        level,
        count,
        &mut occupied,
        &content.enemies,
        &drops,
        ids,
        rng,
    );

    log::info!(
        "Generated level {} ({}x{}): {} rooms, {} enemies, {} chests",
        level,
        width,
        height,
        map.rooms.len(),
        enemies.len(),
        map.count_tiles(TileType::Chest)
    );

    Dungeon {
        map,
        enemies,
        player_start: start,
        boss_position: boss,
    }
}

fn place_chests(rng: &mut StdRng, map: &mut Map, rooms: &[Room], level: u32) {
    if rooms.is_empty() {
        return;
    }
    let attempts = 2 + rng.gen_range(0..=2) + (level / 2) as usize;
    for _ in 0..attempts {
        let room = rooms[rng.gen_range(0..rooms.len())];
        let pos = room.random_inner(rng);
        if map.is_floor(pos.x, pos.y) {
            map.set_tile(pos.x, pos.y, TileType::Chest);
        }
    }
}

/// Any room except the first and the last; callers ensure there are three
fn interior_room(rng: &mut StdRng, rooms: &[Room]) -> Room {
    rooms[1 + rng.gen_range(0..rooms.len() - 2)]
}

fn place_shop(rng: &mut StdRng, map: &mut Map, rooms: &[Room]) {
    let room = interior_room(rng, rooms);

    if room.width >= 4 && room.height >= 4 {
        let x = room.x + 1 + rng.gen_range(0..room.width - 3);
        let y = room.y + 1 + rng.gen_range(0..room.height - 3);
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            if map.is_floor(x + dx, y + dy) {
                map.set_tile(x + dx, y + dy, TileType::Shop);
            }
        }
    } else {
        let pos = room.random_inner(rng);
        if map.is_floor(pos.x, pos.y) {
            map.set_tile(pos.x, pos.y, TileType::Shop);
        }
    }
}

fn place_single(rng: &mut StdRng, map: &mut Map, rooms: &[Room], tile_type: TileType) {
    let room = interior_room(rng, rooms);
    let pos = room.random_inner(rng);
    if map.is_floor(pos.x, pos.y) {
        map.set_tile(pos.x, pos.y, tile_type);
    }
}

/// First room center, else its first floor cell, else forced floor
fn place_start(map: &mut Map, rooms: &[Room]) -> Position {
    let Some(first) = rooms.first() else {
        let center = Position::new(map.width / 2, map.height / 2);
        log::debug!("No rooms placed; forcing start at {}", center);
        map.set_tile(center.x, center.y, TileType::Floor);
        return center;
    };

    let center = first.center();
    if map.is_floor(center.x, center.y) {
        return center;
    }
    if let Some(pos) = first.cells().find(|p| map.is_floor(p.x, p.y)) {
        return pos;
    }
    map.set_tile(center.x, center.y, TileType::Floor);
    center
}

/// Last room center as plain floor; with a single room, the farthest floor
/// cell from the start
fn place_boss(map: &mut Map, rooms: &[Room], start: Position) -> Position {
    if rooms.len() >= 2 {
        if let Some(last) = rooms.last() {
            let pos = last.center();
            map.set_tile(pos.x, pos.y, TileType::Floor);
            return pos;
        }
    }

    let farthest = map
        .floor_positions()
        .into_iter()
        .filter(|p| *p != start)
        .max_by_key(|p| p.distance(&start));
    if let Some(pos) = farthest {
        return pos;
    }

    // Nothing but the start cell is open; use the first in-bounds neighbour
    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let pos = start.offset(dx, dy);
        if map.in_bounds(pos.x, pos.y) {
            map.set_tile(pos.x, pos.y, TileType::Floor);
            return pos;
        }
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn level(seed: u64, width: i32, height: i32, level: u32) -> Dungeon {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ids = IdCounter::new();
        generate(width, height, level, &ContentTables::default(), &mut ids, &mut rng)
    }

    #[test]
    fn test_start_is_floor_and_everything_connects() {
        for seed in 0..20 {
            let dungeon = level(seed, 40, 30, 1);
            let map = &dungeon.map;
            assert_eq!(map.tile_type(dungeon.player_start.x, dungeon.player_start.y), TileType::Floor);

            let reached = map.reachable_from(dungeon.player_start);
            let traversable = map.tiles.iter().filter(|t| t.is_traversable()).count();
            assert_eq!(reached.len(), traversable, "seed {}", seed);
        }
    }

    #[test]
    fn test_exactly_one_boss_on_floor() {
        for seed in 0..10 {
            let dungeon = level(seed, 45, 45, 2);
            let bosses: Vec<_> = dungeon.enemies.iter().filter(|e| e.is_boss).collect();
            assert_eq!(bosses.len(), 1);
            assert_eq!(bosses[0].position, dungeon.boss_position);
            assert_eq!(dungeon.map.tile_type(dungeon.boss_position.x, dungeon.boss_position.y), TileType::Floor);
            assert_ne!(dungeon.boss_position, dungeon.player_start);
        }
    }

    #[test]
    fn test_enemies_on_distinct_floor_cells() {
        let dungeon = level(4, 40, 30, 1);
        let positions: HashSet<_> = dungeon.enemies.iter().map(|e| e.position).collect();
        assert_eq!(positions.len(), dungeon.enemies.len());
        assert!(!positions.contains(&dungeon.player_start));
        for enemy in &dungeon.enemies {
            assert!(dungeon.map.is_floor(enemy.position.x, enemy.position.y));
        }
    }

    #[test]
    fn test_specials_need_three_rooms() {
        for seed in 0..10 {
            let dungeon = level(seed, 40, 30, 1);
            let map = &dungeon.map;
            if map.rooms.len() > 2 {
                assert!(map.count_tiles(TileType::Shop) >= 1);
                assert!(map.count_tiles(TileType::Shop) <= 4);
                assert!(map.count_tiles(TileType::Wizard) <= 1);
                assert!(map.count_tiles(TileType::Shrine) <= 1);
            }
            assert_eq!(map.count_tiles(TileType::Portal), 0);
            assert_eq!(map.count_tiles(TileType::Boss), 0);
        }
    }

    #[test]
    fn test_single_room_puts_boss_far_away() {
        // Only one room fits
        let dungeon = level(1, 12, 12, 1);
        let map = &dungeon.map;
        assert!(map.rooms.len() <= 1);
        assert!(map.is_traversable(dungeon.boss_position.x, dungeon.boss_position.y));
        assert_ne!(dungeon.boss_position, dungeon.player_start);
    }

    #[test]
    fn test_degenerate_map_still_has_a_start() {
        let dungeon = level(1, 5, 5, 1);
        assert!(dungeon.map.rooms.is_empty());
        assert!(dungeon.map.is_floor(dungeon.player_start.x, dungeon.player_start.y));
        assert_eq!(dungeon.enemies.iter().filter(|e| e.is_boss).count(), 1);
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = level(99, 40, 30, 3);
        let b = level(99, 40, 30, 3);
        assert_eq!(a.map.to_ascii(), b.map.to_ascii());
        assert_eq!(a.player_start, b.player_start);
    }
}
