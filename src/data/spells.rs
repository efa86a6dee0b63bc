//! Spell catalogs
//!
//! Level-1 spells are handed out at class selection; priced spells are sold
//! by the archmage.

use crate::entities::CharacterClass::{self, Mage, Tank, Warrior};
use crate::entities::Spell;

pub fn mage_spells() -> Vec<Spell> {
    vec![
        Spell::new("fireball", "Fireball", 10).damage(15)
            .describe("Hurls a ball of fire at the enemy")
            .classes(&[Mage]).level(1),
        Spell::new("ice-shard", "Ice Shard", 8).damage(10)
            .effect("Stuns enemy for 1 turn")
            .describe("A freezing shard that locks the target in place")
            .classes(&[Mage]).level(1),
        Spell::new("minor-heal", "Minor Heal", 8).healing(20)
            .describe("Mends light wounds")
            .classes(&[Mage]).level(1),
        Spell::new("lightning-bolt", "Lightning Bolt", 15).damage(25)
            .describe("Calls down a bolt of lightning")
            .classes(&[Mage]).level(3).price(150),
        Spell::new("frost-nova", "Frost Nova", 18).damage(18)
            .effect("Stuns enemy for 1 turn")
            .describe("A burst of cold that freezes everything nearby")
            .classes(&[Mage]).level(4).price(200),
        Spell::new("arcane-missiles", "Arcane Missiles", 20).damage(32)
            .describe("A volley of homing arcane bolts")
            .classes(&[Mage]).level(5).price(260),
        Spell::new("meteor", "Meteor", 30).damage(50)
            .describe("Drops a burning rock from the sky")
            .classes(&[Mage]).level(7).price(400),
        Spell::new("greater-heal", "Greater Heal", 15).healing(50)
            .describe("Restores a large amount of health")
            .level(3).price(120),
    ]
}

pub fn warrior_spells() -> Vec<Spell> {
    vec![
        Spell::new("power-strike", "Power Strike", 5).damage(12)
            .describe("A heavy blow powered by sheer strength")
            .classes(&[Warrior]).level(1),
        Spell::new("second-wind", "Second Wind", 6).healing(15)
            .describe("Catch your breath and shake off some damage")
            .classes(&[Warrior]).level(1),
        Spell::new("whirlwind", "Whirlwind", 12).damage(22)
            .describe("A spinning attack that cuts deep")
            .classes(&[Warrior]).level(4).price(180),
        Spell::new("execute", "Execute", 16).damage(35)
            .describe("A finishing strike aimed at a weak point")
            .classes(&[Warrior]).level(6).price(300),
    ]
}

pub fn tank_spells() -> Vec<Spell> {
    vec![
        Spell::new("shield-bash", "Shield Bash", 6).damage(8)
            .effect("Stuns enemy for 1 turn")
            .describe("Slam your shield into the enemy")
            .classes(&[Tank]).level(1),
        Spell::new("fortify", "Fortify", 6).healing(20)
            .describe("Brace yourself and recover")
            .classes(&[Tank]).level(1),
        Spell::new("earthquake-slam", "Earthquake Slam", 14).damage(16)
            .effect("Stuns enemy for 1 turn")
            .describe("Shakes the ground beneath the enemy")
            .classes(&[Tank]).level(4).price(180),
        Spell::new("last-stand", "Last Stand", 18).healing(60)
            .describe("Draw on hidden reserves of endurance")
            .classes(&[Tank]).level(6).price(280),
    ]
}

/// Every spell, mage first
pub fn all_spells() -> Vec<Spell> {
    let mut spells = mage_spells();
    spells.extend(warrior_spells());
    spells.extend(tank_spells());
    spells
}

/// Level-1 spells a class starts with
pub fn starting_spells(spells: &[Spell], class: CharacterClass) -> Vec<Spell> {
    spells
        .iter()
        .filter(|s| s.class_restriction.as_deref() == Some(&[class][..]) && s.required_level() == 1)
        .filter(|s| !s.is_for_sale())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique() {
        let spells = all_spells();
        let ids: HashSet<_> = spells.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), spells.len());
    }

    #[test]
    fn test_starting_spells_per_class() {
        let spells = all_spells();
        assert_eq!(starting_spells(&spells, Mage).len(), 3);
        assert_eq!(starting_spells(&spells, Warrior).len(), 2);
        assert_eq!(starting_spells(&spells, Tank).len(), 2);
    }

    #[test]
    fn test_every_shop_spell_is_above_level_one() {
        for spell in all_spells().iter().filter(|s| s.is_for_sale()) {
            assert!(spell.required_level() > 1);
        }
        assert!(all_spells().iter().any(|s| s.stuns()));
    }
}
