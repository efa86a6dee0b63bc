//! Shop owners
//!
//! The shopkeeper and the archmage sell to the player, but either can be
//! attacked. Their strength tracks the player, not the dungeon level.

use super::enemies::{Enemy, Race};
use super::spell::Spell;
use crate::items::{IdCounter, Item};
use crate::world::Position;

/// Levels added on top of the player's level for an owner fight
const OWNER_LEVEL_BONUS: u32 = 2;

/// Types of shop owners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NpcType {
    /// Sells items
    Shopkeeper,
    /// Sells spells
    Archmage,
}

impl NpcType {
    pub fn name(&self) -> &'static str {
        match self {
            NpcType::Shopkeeper => "Angry Shopkeeper",
            NpcType::Archmage => "Archmage",
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            NpcType::Shopkeeper => 'S',
            NpcType::Archmage => 'W',
        }
    }
}

/// Shopkeeper encounter; drops every item in `stock`
pub fn generate_shopkeeper(
    player_level: u32,
    position: Position,
    stock: &[Item],
    ids: &mut IdCounter,
) -> Enemy {
    let lvl = player_level.max(1) + OWNER_LEVEL_BONUS;
    let l = lvl as i32;
    let kind = NpcType::Shopkeeper;

    let mut enemy = Enemy::new(ids.next(), kind.name(), Race::Human, kind.glyph(), lvl, position)
        .with_health(100 + l * 20);
    enemy.attack = 15 + l * 3;
    enemy.defense = 10 + l * 2;
    enemy.magic = 8 + l * 2;
    enemy.dodge = 10 + l;
    enemy.gold_value = 500 + lvl * 100;
    enemy.exp_value = 300 + lvl * 50;
    enemy.loot = stock.iter().map(|item| item.with_id(ids.next())).collect();
    enemy.is_boss = true;
    enemy.is_shopkeeper = true;
    enemy
}

/// Archmage encounter; teaches every priced spell on defeat
pub fn generate_archmage(
    player_level: u32,
    position: Position,
    spells: &[Spell],
    ids: &mut IdCounter,
) -> Enemy {
    let lvl = player_level.max(1) + OWNER_LEVEL_BONUS;
    let l = lvl as i32;
    let kind = NpcType::Archmage;

    let mut enemy = Enemy::new(ids.next(), kind.name(), Race::Human, kind.glyph(), lvl, position)
        .with_health(80 + l * 15);
    enemy.attack = 8 + l;
    enemy.defense = 6 + l;
    enemy.magic = 20 + l * 3;
    enemy.dodge = 12 + l;
    enemy.gold_value = 600 + lvl * 120;
    enemy.exp_value = 350 + lvl * 60;
    enemy.spell_loot = spells.iter().filter(|s| s.is_for_sale()).cloned().collect();
    enemy.is_boss = true;
    enemy.is_wizard = true;
    enemy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemKind, Rarity};

    #[test]
    fn test_shopkeeper_scales_with_player() {
        let mut ids = IdCounter::new();
        let stock = vec![Item::new("Minor Healing Potion", ItemKind::Potion, 20, Rarity::Common)];
        let keeper = generate_shopkeeper(1, Position::new(3, 3), &stock, &mut ids);

        // lvl = 3
        assert_eq!(keeper.max_health, 160);
        assert_eq!(keeper.attack, 24);
        assert_eq!(keeper.dodge, 13);
        assert_eq!(keeper.gold_value, 800);
        assert_eq!(keeper.loot.len(), 1);
        assert!(keeper.is_shopkeeper);
        assert!(!keeper.is_level_boss());
    }

    #[test]
    fn test_archmage_drops_priced_spells_only() {
        let mut ids = IdCounter::new();
        let spells = vec![
            Spell::new("free", "Free", 1),
            Spell::new("paid", "Paid", 1).price(100),
        ];
        let mage = generate_archmage(2, Position::new(0, 0), &spells, &mut ids);

        // lvl = 4
        assert_eq!(mage.max_health, 140);
        assert_eq!(mage.magic, 32);
        assert_eq!(mage.exp_value, 590);
        assert_eq!(mage.spell_loot.len(), 1);
        assert!(mage.is_wizard);
        assert!(!mage.is_level_boss());
    }
}
