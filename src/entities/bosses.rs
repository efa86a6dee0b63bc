//! Boss entity creation
//!
//! One boss guards the last room of every dungeon level. Deeper levels pick a
//! stronger archetype until the Elder God, who holds every level from five on.

use serde::{Deserialize, Serialize};

use super::enemies::{Enemy, Race};
use crate::items::IdCounter;
use crate::world::Position;

/// Flat difficulty reduction applied to every boss multiplier
const BOSS_DIFFICULTY_SCALE: f64 = 0.85;

/// Types of bosses, one per dungeon level band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossType {
    DarkKnight,
    AncientLich,
    DragonLord,
    DemonPrince,
    ElderGod,
}

impl BossType {
    pub const ALL: [BossType; 5] = [
        BossType::DarkKnight,
        BossType::AncientLich,
        BossType::DragonLord,
        BossType::DemonPrince,
        BossType::ElderGod,
    ];

    /// Get boss for a given dungeon level
    pub fn for_level(level: u32) -> Self {
        let index = (level.max(1) - 1).min(4) as usize;
        Self::ALL[index]
    }

    /// Look a boss up by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Get the boss name
    pub fn name(&self) -> &'static str {
        match self {
            BossType::DarkKnight => "Dark Knight",
            BossType::AncientLich => "Ancient Lich",
            BossType::DragonLord => "Dragon Lord",
            BossType::DemonPrince => "Demon Prince",
            BossType::ElderGod => "Elder God",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BossType::DarkKnight => 'K',
            BossType::AncientLich => 'L',
            BossType::DragonLord => 'D',
            BossType::DemonPrince => 'P',
            BossType::ElderGod => 'G',
        }
    }

    /// Stat multiplier before the flat reduction
    pub fn multiplier(&self) -> f64 {
        match self {
            BossType::DarkKnight => 1.2,
            BossType::AncientLich => 1.3,
            BossType::DragonLord => 1.4,
            BossType::DemonPrince => 1.5,
            BossType::ElderGod => 2.0,
        }
    }
}

/// Spawn the boss for a dungeon level
pub fn generate_boss(dungeon_level: u32, position: Position, ids: &mut IdCounter) -> Enemy {
    let level = dungeon_level.max(1);
    let boss = BossType::for_level(level);
    let mult = boss.multiplier() * BOSS_DIFFICULTY_SCALE;
    let l = level as f64;

    let scaled = |base: f64| (base * mult).floor() as i32;

    let mut enemy = Enemy::new(ids.next(), boss.name(), Race::Boss, boss.symbol(), level, position)
        .with_health(scaled(50.0 + l * 20.0));
    enemy.attack = scaled(8.0 + l * 2.0);
    enemy.defense = scaled(5.0 + l * 1.5);
    enemy.magic = scaled(3.0 + l * 1.5);
    enemy.dodge = 0;
    enemy.gold_value = level * 100;
    enemy.exp_value = level * 150;
    enemy.is_boss = true;
    enemy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_for_level() {
        assert_eq!(BossType::for_level(1), BossType::DarkKnight);
        assert_eq!(BossType::for_level(3), BossType::DragonLord);
        assert_eq!(BossType::for_level(5), BossType::ElderGod);
        assert_eq!(BossType::for_level(40), BossType::ElderGod);
        assert_eq!(BossType::from_name("Ancient Lich"), Some(BossType::AncientLich));
    }

    #[test]
    fn test_boss_stats_level_one() {
        let mut ids = IdCounter::new();
        let boss = generate_boss(1, Position::new(4, 4), &mut ids);
        // mult = 1.2 * 0.85 = 1.02
        assert_eq!(boss.max_health, 71);
        assert_eq!(boss.attack, 10);
        assert_eq!(boss.defense, 6);
        assert_eq!(boss.magic, 4);
        assert_eq!((boss.gold_value, boss.exp_value), (100, 150));
        assert!(boss.is_level_boss());
        assert_eq!(boss.race, Race::Boss);
    }

    #[test]
    fn test_boss_stats_level_five() {
        let mut ids = IdCounter::new();
        let boss = generate_boss(5, Position::new(0, 0), &mut ids);
        // mult = 2.0 * 0.85 = 1.7
        assert_eq!(boss.max_health, 255);
        assert_eq!(boss.attack, 30);
        assert_eq!(boss.defense, 21);
        assert_eq!(boss.symbol, 'G');
    }
}
