//! Enemy placement on a generated level

use std::collections::HashSet;

use rand::Rng;

use super::bosses::generate_boss;
use super::enemies::{generate_enemy, Enemy};
use crate::data::EnemyTemplate;
use crate::items::{IdCounter, Item};
use crate::world::{Map, Position};

/// Random cell picks per enemy before it is skipped
const SPAWN_ATTEMPTS: usize = 100;

/// Number of regular enemies requested for a level
pub fn enemy_count_for_level(level: u32, rng: &mut impl Rng) -> usize {
    5 + rng.gen_range(0..=4) + (level / 2) as usize
}

/// Spawn the regular enemies and the boss for a freshly generated map.
///
/// Regular enemies only land on plain floor cells that are not in
/// `occupied`; each accepted cell is added to it. The boss always stands on
/// `map.boss_pos`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_enemies_for_level(
    map: &Map,
    level: u32,
    count: usize,
    occupied: &mut HashSet<Position>,
    templates: &[EnemyTemplate],
    item_catalog: &[Item],
    ids: &mut IdCounter,
    rng: &mut impl Rng,
) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(count + 1);

    for _ in 0..count {
        let Some(pos) = find_free_floor(map, occupied, rng) else {
            continue;
        };
        occupied.insert(pos);
        if let Some(enemy) = generate_enemy(level, pos, templates, item_catalog, ids, rng) {
            enemies.push(enemy);
        }
    }

    if enemies.len() < count {
        log::debug!("Spawned {} of {} enemies on level {}", enemies.len(), count, level);
    }

    enemies.push(generate_boss(level, map.boss_pos, ids));
    enemies
}

fn find_free_floor(map: &Map, occupied: &HashSet<Position>, rng: &mut impl Rng) -> Option<Position> {
    for _ in 0..SPAWN_ATTEMPTS {
        let pos = Position::new(rng.gen_range(0..map.width), rng.gen_range(0..map.height));
        if map.is_floor(pos.x, pos.y) && !occupied.contains(&pos) {
            return Some(pos);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_enemy_templates;
    use crate::world::TileType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawns_on_free_floor_with_one_boss() {
        let mut map = Map::new(20, 20, 2);
        for y in 1..19 {
            for x in 1..19 {
                map.set_tile(x, y, TileType::Floor);
            }
        }
        map.start_pos = Position::new(1, 1);
        map.boss_pos = Position::new(18, 18);

        let mut occupied: HashSet<Position> = [map.start_pos, map.boss_pos].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(5);
        let mut ids = IdCounter::new();
        let enemies = spawn_enemies_for_level(
            &map,
            2,
            8,
            &mut occupied,
            &default_enemy_templates(),
            &[],
            &mut ids,
            &mut rng,
        );

        assert_eq!(enemies.len(), 9);
        assert_eq!(enemies.iter().filter(|e| e.is_boss).count(), 1);
        let boss = enemies.iter().find(|e| e.is_boss).unwrap();
        assert_eq!(boss.position, map.boss_pos);

        let regular: HashSet<_> = enemies.iter().filter(|e| !e.is_boss).map(|e| e.position).collect();
        assert_eq!(regular.len(), 8);
        assert!(!regular.contains(&map.start_pos));
        assert!(regular.iter().all(|p| map.is_floor(p.x, p.y)));
    }

    #[test]
    fn test_no_floor_skips_regulars() {
        let map = Map::new(10, 10, 1);
        let mut occupied = HashSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ids = IdCounter::new();
        let enemies = spawn_enemies_for_level(
            &map,
            1,
            5,
            &mut occupied,
            &default_enemy_templates(),
            &[],
            &mut ids,
            &mut rng,
        );
        assert_eq!(enemies.len(), 1);
        assert!(enemies[0].is_boss);
    }

    #[test]
    fn test_enemy_count_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let n = enemy_count_for_level(4, &mut rng);
            assert!((7..=11).contains(&n));
        }
    }
}
