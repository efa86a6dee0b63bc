//! Property checks for level generation

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use vlkava::data::ContentTables;
use vlkava::items::IdCounter;
use vlkava::world::{generate, Dungeon, Map, TileType};

fn level(seed: u64, level: u32) -> (Dungeon, ContentTables) {
    let content = ContentTables::default();
    let (width, height) = Map::size_for_level(level);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ids = IdCounter::new();
    let dungeon = generate(width, height, level, &content, &mut ids, &mut rng);
    (dungeon, content)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_walkable_cell_is_reachable(seed in any::<u64>(), lvl in 1u32..8) {
        let (dungeon, _) = level(seed, lvl);
        let map = &dungeon.map;
        prop_assert!(map.is_floor(dungeon.player_start.x, dungeon.player_start.y));

        let reached = map.reachable_from(dungeon.player_start);
        let walkable = map.tiles.iter().filter(|t| t.is_traversable()).count();
        prop_assert_eq!(reached.len(), walkable);
    }

    #[test]
    fn one_boss_and_distinct_enemies(seed in any::<u64>(), lvl in 1u32..8) {
        let (dungeon, _) = level(seed, lvl);
        let bosses = dungeon.enemies.iter().filter(|e| e.is_level_boss()).count();
        prop_assert_eq!(bosses, 1);

        let cells: HashSet<_> = dungeon.enemies.iter().map(|e| e.position).collect();
        prop_assert_eq!(cells.len(), dungeon.enemies.len());
        prop_assert!(!cells.contains(&dungeon.player_start));
        for enemy in &dungeon.enemies {
            prop_assert!(dungeon.map.is_traversable(enemy.position.x, enemy.position.y));
        }
    }

    #[test]
    fn enemies_respect_min_level(seed in any::<u64>(), lvl in 1u32..8) {
        let (dungeon, content) = level(seed, lvl);
        for enemy in dungeon.enemies.iter().filter(|e| !e.is_boss) {
            let template = content.enemies.iter().find(|t| t.race == enemy.race);
            prop_assert!(template.map_or(false, |t| t.min_level <= lvl), "{:?} on level {}", enemy.race, lvl);
        }
    }

    #[test]
    fn map_size_follows_level(lvl in 1u32..20) {
        let (width, height) = Map::size_for_level(lvl);
        if lvl == 1 {
            prop_assert_eq!((width, height), (40, 30));
        } else {
            let side = 40 + 5 * (lvl as i32 - 1).min(5);
            prop_assert_eq!((width, height), (side, side));
        }
    }
}

#[test]
fn no_portal_until_the_boss_falls() {
    for seed in 0..16 {
        let (dungeon, _) = level(seed, 3);
        assert_eq!(dungeon.map.count_tiles(TileType::Portal), 0);
    }
}

#[test]
fn same_seed_same_level() {
    let (a, _) = level(77, 2);
    let (b, _) = level(77, 2);
    assert_eq!(a.map.to_ascii(), b.map.to_ascii());
    assert_eq!(a.player_start, b.player_start);
    assert_eq!(a.enemies.len(), b.enemies.len());
}
