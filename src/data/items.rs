//! Item catalogs
//!
//! Built-in item tables. Templates carry no instance id; callers stamp one
//! with `Item::with_id` when a copy enters play.

use crate::entities::CharacterClass::{self, Mage, Tank, Warrior};
use crate::items::Item;
use crate::items::ItemKind::{Accessory, Armor, Potion, Weapon};
use crate::items::Rarity::{Common, Epic, Legendary, Rare, Uncommon};

/// Weapons for warriors (some shared with tanks)
pub fn warrior_weapons() -> Vec<Item> {
    vec![
        Item::new("Iron Sword", Weapon, 25, Common).attack(5)
            .describe("A basic iron sword")
            .classes(&[Warrior, Tank]).level(1),
        Item::new("Steel Greatsword", Weapon, 50, Uncommon).attack(8)
            .describe("A heavy two-handed greatsword")
            .classes(&[Warrior]).level(3),
        Item::new("Mithril Axe", Weapon, 100, Rare).attack(12)
            .describe("A finely crafted axe made of mithril")
            .classes(&[Warrior, Tank]).level(5),
        Item::new("Dragonbone Warhammer", Weapon, 200, Epic).attack(15)
            .describe("A massive warhammer made from dragon bones")
            .classes(&[Warrior]).level(8),
        Item::new("Excalibur", Weapon, 500, Legendary).attack(20).magic(5)
            .describe("The legendary sword of kings")
            .classes(&[Warrior]).level(10),
        Item::new("Berserker's Axe", Weapon, 150, Rare).attack(14)
            .describe("An axe that increases in power as your health decreases")
            .classes(&[Warrior]).level(6),
        Item::new("Obsidian Cleaver", Weapon, 180, Rare).attack(13)
            .describe("A razor-sharp blade made of volcanic glass")
            .classes(&[Warrior, Tank]).level(7),
        Item::new("Runic Blade", Weapon, 220, Epic).attack(14).magic(3)
            .describe("A sword inscribed with ancient runes of power")
            .classes(&[Warrior]).level(9),
        Item::new("Gladiator's Spear", Weapon, 120, Rare).attack(11)
            .describe("A well-balanced spear favored by arena fighters")
            .classes(&[Warrior, Tank]).level(5),
        Item::new("Executioner's Blade", Weapon, 250, Epic).attack(16)
            .describe("A massive blade designed for swift executions")
            .classes(&[Warrior]).level(8),
    ]
}

/// Staves, wands and tomes for mages
pub fn mage_weapons() -> Vec<Item> {
    vec![
        Item::new("Apprentice Staff", Weapon, 25, Common).magic(5)
            .describe("A basic staff for apprentice mages")
            .classes(&[Mage]).level(1),
        Item::new("Crystal Wand", Weapon, 50, Uncommon).magic(8)
            .describe("A wand with a crystal focus")
            .classes(&[Mage]).level(3),
        Item::new("Arcane Scepter", Weapon, 100, Rare).magic(12)
            .describe("A scepter imbued with arcane energy")
            .classes(&[Mage]).level(5),
        Item::new("Staff of the Elements", Weapon, 200, Epic).magic(15)
            .describe("A staff that channels elemental magic")
            .classes(&[Mage]).level(8),
        Item::new("Merlin's Spellbook", Weapon, 500, Legendary).magic(20).mana(50)
            .describe("The legendary spellbook of Merlin")
            .classes(&[Mage]).level(10),
        Item::new("Frost Orb", Weapon, 120, Rare).magic(11)
            .describe("A sphere of perpetual ice that enhances frost magic")
            .classes(&[Mage]).level(6),
        Item::new("Flameheart Rod", Weapon, 150, Rare).magic(13)
            .describe("A rod with a core of eternal flame")
            .classes(&[Mage]).level(7),
        Item::new("Void Staff", Weapon, 220, Epic).magic(16)
            .describe("A staff that draws power from the void between worlds")
            .classes(&[Mage]).level(9),
        Item::new("Astral Codex", Weapon, 180, Rare).magic(14).mana(20)
            .describe("An ancient book containing the secrets of the stars")
            .classes(&[Mage]).level(8),
        Item::new("Mindweaver", Weapon, 250, Epic).magic(17)
            .describe("A staff that enhances mental magic and illusions")
            .classes(&[Mage]).level(9),
    ]
}

/// Defensive weapons for tanks
pub fn tank_weapons() -> Vec<Item> {
    vec![
        Item::new("Iron Mace", Weapon, 25, Common).attack(4).defense(1)
            .describe("A heavy iron mace")
            .classes(&[Tank, Warrior]).level(1),
        Item::new("Steel Flail", Weapon, 50, Uncommon).attack(6).defense(2)
            .describe("A flail with a spiked ball")
            .classes(&[Tank]).level(3),
        Item::new("Tower Shield & Spear", Weapon, 100, Rare).attack(8).defense(4)
            .describe("A massive shield paired with a spear")
            .classes(&[Tank]).level(5),
        Item::new("Dwarven Warhammer", Weapon, 200, Epic).attack(10).defense(5)
            .describe("A mighty warhammer forged by dwarven smiths")
            .classes(&[Tank, Warrior]).level(8),
        Item::new("Aegis", Weapon, 500, Legendary).attack(12).defense(10)
            .describe("The legendary shield of the gods")
            .classes(&[Tank]).level(10),
        Item::new("Bulwark Maul", Weapon, 150, Rare).attack(9).defense(3)
            .describe("A heavy maul that can also be used defensively")
            .classes(&[Tank]).level(6),
        Item::new("Guardian's Halberd", Weapon, 180, Rare).attack(11).defense(4)
            .describe("A versatile polearm used by elite guards")
            .classes(&[Tank]).level(7),
        Item::new("Sentinel's Bastion", Weapon, 220, Epic).attack(9).defense(7)
            .describe("A shield with a built-in blade mechanism")
            .classes(&[Tank]).level(8),
        Item::new("Ironclad Mace", Weapon, 190, Rare).attack(10).defense(5)
            .describe("A mace with defensive plating along the handle")
            .classes(&[Tank, Warrior]).level(7),
        Item::new("Titan's Fist", Weapon, 250, Epic).attack(11).defense(8)
            .describe("A massive gauntlet weapon that doubles as a shield")
            .classes(&[Tank]).level(9),
    ]
}

/// Plate for warriors
pub fn warrior_armor() -> Vec<Item> {
    vec![
        Item::new("Iron Plate", Armor, 30, Common).defense(5)
            .describe("Basic iron plate armor")
            .classes(&[Warrior, Tank]).level(1),
        Item::new("Steel Plate", Armor, 60, Uncommon).defense(8)
            .describe("Sturdy steel plate armor")
            .classes(&[Warrior, Tank]).level(4),
        Item::new("Mithril Plate", Armor, 120, Rare).defense(12)
            .describe("Lightweight yet strong mithril armor")
            .classes(&[Warrior]).level(7),
        Item::new("Dragonscale Armor", Armor, 250, Epic).attack(3).defense(15)
            .describe("Armor forged from dragon scales")
            .classes(&[Warrior]).level(10),
        Item::new("Berserker's Harness", Armor, 150, Rare).attack(5).defense(10)
            .describe("Light armor that enhances offensive capabilities")
            .classes(&[Warrior]).level(6),
        Item::new("Gladiator's Armor", Armor, 180, Rare).attack(2).defense(11)
            .describe("Armor designed for mobility in arena combat")
            .classes(&[Warrior]).level(8),
        Item::new("Warlord's Plate", Armor, 220, Epic).attack(4).defense(14)
            .describe("Imposing armor worn by battle commanders")
            .classes(&[Warrior]).level(9),
        Item::new("Volcanic Plate", Armor, 200, Epic).defense(13)
            .describe("Armor forged in volcanic heat, resistant to fire")
            .classes(&[Warrior, Tank]).level(8),
    ]
}

/// Robes for mages
pub fn mage_armor() -> Vec<Item> {
    vec![
        Item::new("Apprentice Robes", Armor, 20, Common).defense(2).magic(3)
            .describe("Simple robes worn by apprentice mages")
            .classes(&[Mage]).level(1),
        Item::new("Enchanted Cloak", Armor, 45, Uncommon).defense(3).magic(5)
            .describe("A cloak with minor enchantments")
            .classes(&[Mage]).level(4),
        Item::new("Archmage Vestments", Armor, 100, Rare).defense(5).magic(8).mana(20)
            .describe("Ornate vestments worn by archmages")
            .classes(&[Mage]).level(7),
        Item::new("Celestial Robes", Armor, 200, Epic).defense(7).magic(12).mana(50)
            .describe("Robes woven with threads of celestial energy")
            .classes(&[Mage]).level(10),
        Item::new("Astral Silk Garments", Armor, 150, Rare).defense(4).magic(10).mana(30)
            .describe("Garments made from silk infused with starlight")
            .classes(&[Mage]).level(6),
        Item::new("Void Walker's Shroud", Armor, 180, Rare).defense(6).magic(9)
            .describe("A dark shroud that absorbs magical energy")
            .classes(&[Mage]).level(8),
        Item::new("Elemental Mantle", Armor, 220, Epic).defense(6).magic(11).mana(40)
            .describe("A mantle that shifts between elemental properties")
            .classes(&[Mage]).level(9),
        Item::new("Chronomancer's Attire", Armor, 250, Epic).defense(8).magic(13)
            .describe("Robes that exist partially outside of normal time")
            .classes(&[Mage]).level(10),
    ]
}

/// Heavy plate for tanks
pub fn tank_armor() -> Vec<Item> {
    vec![
        Item::new("Heavy Iron Plate", Armor, 35, Common).defense(6)
            .describe("Exceptionally heavy iron armor")
            .classes(&[Tank]).level(1),
        Item::new("Reinforced Steel Plate", Armor, 70, Uncommon).defense(10)
            .describe("Steel plate with additional reinforcement")
            .classes(&[Tank]).level(4),
        Item::new("Dwarven Bulwark", Armor, 140, Rare).defense(15)
            .describe("Massive armor crafted by dwarven smiths")
            .classes(&[Tank]).level(7),
        Item::new("Adamantine Fortress", Armor, 280, Epic).defense(20)
            .describe("Nearly impenetrable armor made of adamantine")
            .classes(&[Tank]).level(10),
        Item::new("Juggernaut Plate", Armor, 160, Rare).defense(17)
            .describe("Extremely heavy armor that makes the wearer unstoppable")
            .classes(&[Tank]).level(6),
        Item::new("Stonehide Armor", Armor, 190, Rare).defense(18)
            .describe("Armor infused with earth magic for extra durability")
            .classes(&[Tank]).level(8),
        Item::new("Titan's Shell", Armor, 230, Epic).defense(22)
            .describe("Armor modeled after the legendary titans")
            .classes(&[Tank]).level(9),
        Item::new("Immortal's Aegis", Armor, 300, Epic).defense(25)
            .describe("Mythical armor said to grant immortality in battle")
            .classes(&[Tank]).level(10),
    ]
}

/// Consumables, including timed stat elixirs
pub fn potions() -> Vec<Item> {
    vec![
        Item::new("Health Potion", Potion, 10, Common).health(20)
            .describe("Restores 20 health points"),
        Item::new("Greater Health Potion", Potion, 25, Uncommon).health(50)
            .describe("Restores 50 health points"),
        Item::new("Mana Potion", Potion, 10, Common).mana(20)
            .describe("Restores 20 mana points"),
        Item::new("Greater Mana Potion", Potion, 25, Uncommon).mana(50)
            .describe("Restores 50 mana points"),
        Item::new("Elixir of Strength", Potion, 30, Rare)
            .effect("Increases attack by 5 for 3 turns")
            .describe("Temporarily increases attack power"),
        Item::new("Elixir of Defense", Potion, 30, Rare)
            .effect("Increases defense by 5 for 3 turns")
            .describe("Temporarily increases defense"),
        Item::new("Elixir of Magic", Potion, 30, Rare)
            .effect("Increases magic by 5 for 3 turns")
            .describe("Temporarily increases magical power"),
        Item::new("Elixir of Dodge", Potion, 30, Rare)
            .effect("Increases dodge by 5 for 3 turns")
            .describe("Temporarily increases dodge"),
        Item::new("Supreme Healing Elixir", Potion, 50, Epic).health(100)
            .describe("Restores 100 health points"),
        Item::new("Supreme Mana Elixir", Potion, 50, Epic).mana(100)
            .describe("Restores 100 mana points"),
        Item::new("Potion of Rejuvenation", Potion, 60, Epic).health(50).mana(50)
            .describe("Restores 50 health and 50 mana points"),
        Item::new("Elixir of Heroes", Potion, 100, Legendary)
            .effect("Increases all stats by 3 for 5 turns")
            .describe("A legendary elixir that enhances all abilities"),
        Item::new("Potion of Evasion", Potion, 40, Rare)
            .effect("Increases dodge by 15% for 3 turns")
            .describe("Makes you significantly harder to hit for a short time"),
        Item::new("Elixir of Shadows", Potion, 75, Epic)
            .effect("Increases dodge by 30% for 3 turns")
            .describe("Your form becomes partially incorporeal, making attacks pass through you"),
    ]
}

/// Rings, amulets and charms
pub fn accessories() -> Vec<Item> {
    vec![
        Item::new("Ring of Health", Accessory, 50, Uncommon).health(10)
            .describe("Increases maximum health by 10"),
        Item::new("Amulet of Mana", Accessory, 50, Uncommon).mana(10)
            .describe("Increases maximum mana by 10"),
        Item::new("Warrior's Band", Accessory, 75, Rare).attack(3)
            .describe("Increases attack by 3")
            .classes(&[Warrior, Tank]),
        Item::new("Mage's Pendant", Accessory, 75, Rare).magic(3)
            .describe("Increases magic by 3")
            .classes(&[Mage]),
        Item::new("Agile Charm", Accessory, 75, Rare).attack(2).dodge(5)
            .describe("Increases attack by 2 and dodge by 5%")
            .classes(&[Warrior]),
        Item::new("Evasive Locket", Accessory, 75, Rare).dodge(8)
            .describe("Increases dodge by 8%")
            .classes(&[Mage, Warrior]),
        Item::new("Guardian's Emblem", Accessory, 75, Rare).defense(3)
            .describe("Increases defense by 3")
            .classes(&[Tank]),
        Item::new("Ring of Vitality", Accessory, 100, Rare).health(25)
            .describe("Increases maximum health by 25"),
        Item::new("Arcane Circlet", Accessory, 100, Rare).mana(25)
            .describe("Increases maximum mana by 25"),
        Item::new("Berserker's Totem", Accessory, 150, Epic).attack(5).health(-10)
            .describe("Increases attack by 5 but reduces health by 10")
            .classes(&[Warrior]),
        Item::new("Sorcerer's Focus", Accessory, 150, Epic).magic(5).mana(15)
            .describe("Increases magic by 5 and mana by 15")
            .classes(&[Mage]),
        Item::new("Nimble Talisman", Accessory, 150, Epic).attack(4).dodge(12)
            .describe("Increases attack by 4 and dodge by 12%")
            .classes(&[Warrior]),
        Item::new("Shadow Talisman", Accessory, 150, Epic).dodge(15)
            .describe("Increases dodge by 15%")
            .classes(&[Mage, Warrior]),
        Item::new("Bulwark Medallion", Accessory, 150, Epic).defense(6)
            .describe("Increases defense by 6")
            .classes(&[Tank]),
        Item::new("Amulet of the Ancients", Accessory, 250, Legendary).attack(2).defense(2).magic(2).dodge(5).health(20).mana(20)
            .describe("An ancient amulet that enhances all attributes"),
        Item::new("Lucky Charm", Accessory, 75, Uncommon).luck(5)
            .describe("A small charm that brings good fortune (+5% Luck)"),
        Item::new("Assassin's Mark", Accessory, 100, Rare).crit(8)
            .describe("A symbol worn by elite assassins (+8% Critical Hit)")
            .classes(&[Warrior, Tank]),
        Item::new("Four-Leaf Clover", Accessory, 150, Rare).luck(10)
            .describe("A rare clover that brings exceptional luck (+10% Luck)"),
        Item::new("Precision Scope", Accessory, 200, Epic).attack(2).crit(15)
            .describe("A targeting device that helps find weak spots (+15% Critical Hit, +2 Attack)")
            .classes(&[Warrior]),
        Item::new("Golden Horseshoe", Accessory, 200, Epic).luck(15)
            .describe("A golden horseshoe that brings extraordinary luck (+15% Luck)"),
        Item::new("Executioner's Eye", Accessory, 250, Epic).attack(3).crit(12)
            .describe("Helps find the perfect spot for a killing blow (+12% Critical Hit, +3 Attack)")
            .classes(&[Warrior, Tank]),
        Item::new("Arcane Focus", Accessory, 250, Epic).magic(5).crit(10)
            .describe("Focuses magical energy for devastating spells (+10% Critical Hit, +5 Magic)")
            .classes(&[Mage]),
        Item::new("Gambler's Dice", Accessory, 300, Legendary).crit(5).luck(20)
            .describe("Enchanted dice that manipulate fate itself (+20% Luck, +5% Critical Hit)"),
        Item::new("Eye of the Dragon", Accessory, 500, Legendary).attack(5).crit(25)
            .describe("A dragon's eye that reveals every weakness (+25% Critical Hit, +5 Attack)").level(8),
        Item::new("Fortune's Favor", Accessory, 500, Legendary).luck(25)
            .describe("The embodiment of good fortune (+25% Luck)").level(8),
        Item::new("Feather of Evasion", Accessory, 120, Rare).dodge(10)
            .describe("A magical feather that makes your movements lighter and quicker (+10% Dodge)")
            .classes(&[Warrior, Mage]),
        Item::new("Phantom Veil", Accessory, 180, Epic).dodge(15)
            .describe("A veil that makes your form partially incorporeal (+15% Dodge)")
            .classes(&[Mage]),
        Item::new("Shadowdancer's Boots", Accessory, 200, Epic).dodge(18)
            .describe("Enchanted boots that allow you to step between shadows (+18% Dodge)")
            .classes(&[Warrior]),
        Item::new("Amulet of Displacement", Accessory, 250, Epic).dodge(20)
            .describe("Makes your exact position difficult to determine (+20% Dodge)"),
        Item::new("Mirage Band", Accessory, 350, Legendary).dodge(25)
            .describe("Creates illusory duplicates that confuse enemies (+25% Dodge)").level(7),
    ]
}

/// Stock the shopkeeper draws from
pub fn shop_items() -> Vec<Item> {
    vec![
        Item::new("Minor Healing Potion", Potion, 20, Common).health(30)
            .describe("Restores 30 health points"),
        Item::new("Lesser Mana Potion", Potion, 20, Common).mana(30)
            .describe("Restores 30 mana points"),
        Item::new("Durable Shield", Armor, 80, Uncommon).defense(7)
            .describe("A sturdy shield that provides good protection")
            .classes(&[Warrior, Tank]),
        Item::new("Magic Amulet", Accessory, 120, Rare).magic(6)
            .describe("An amulet that enhances magical abilities")
            .classes(&[Mage]),
        Item::new("Swift Boots", Armor, 90, Uncommon).dodge(8)
            .describe("Boots that allow for quieter movement")
            .classes(&[Warrior, Mage]),
        Item::new("Sharpened Dagger", Weapon, 70, Uncommon).attack(7)
            .describe("A well-crafted dagger for swift attacks")
            .classes(&[Warrior]),
        Item::new("Reinforced Helm", Armor, 110, Rare).defense(9)
            .describe("A sturdy helm that protects the head")
            .classes(&[Warrior, Tank]),
        Item::new("Enchanted Bracers", Armor, 130, Rare).magic(7)
            .describe("Bracers that enhance magical power")
            .classes(&[Mage]),
        Item::new("Evasion Cloak", Armor, 140, Rare).dodge(12)
            .describe("A cloak that helps evade attacks")
            .classes(&[Warrior, Mage]),
        Item::new("Nimble Gloves", Accessory, 100, Uncommon).dodge(7)
            .describe("Lightweight gloves that improve reflexes (+7% Dodge)"),
        Item::new("Elixir of Reflexes", Potion, 50, Rare)
            .effect("Increases dodge by 20% for 3 turns")
            .describe("Enhances your reflexes to avoid attacks"),
    ]
}

/// Every weapon, warrior first, then mage, then tank
pub fn all_weapons() -> Vec<Item> {
    let mut items = warrior_weapons();
    items.extend(mage_weapons());
    items.extend(tank_weapons());
    items
}

/// Every armor, in the same class order as weapons
pub fn all_armor() -> Vec<Item> {
    let mut items = warrior_armor();
    items.extend(mage_armor());
    items.extend(tank_armor());
    items
}

/// Everything that can drop from enemies or chests
pub fn all_items() -> Vec<Item> {
    let mut items = all_weapons();
    items.extend(all_armor());
    items.extend(potions());
    items.extend(accessories());
    items
}

/// Find a template by display name
pub fn find_item<'a>(catalog: &'a [Item], name: &str) -> Option<&'a Item> {
    catalog.iter().find(|item| item.name == name)
}

/// Names of the starting kit for a class, duplicates included
pub fn starting_kit(class: CharacterClass) -> &'static [&'static str] {
    match class {
        Tank => &["Tower Shield & Spear", "Heavy Iron Plate", "Health Potion", "Health Potion"],
        Mage => &["Apprentice Staff", "Apprentice Robes", "Mana Potion", "Mana Potion"],
        Warrior => &["Steel Greatsword", "Steel Plate", "Health Potion"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(all_weapons().len(), 30);
        assert_eq!(all_armor().len(), 24);
        assert_eq!(potions().len(), 14);
        assert_eq!(accessories().len(), 30);
        assert_eq!(shop_items().len(), 11);
        assert_eq!(all_items().len(), 98);
    }

    #[test]
    fn test_keys_are_unique_within_drop_catalog() {
        let items = all_items();
        let keys: HashSet<_> = items.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys.len(), items.len());
    }

    #[test]
    fn test_starting_kits_exist() {
        let catalog = all_items();
        for class in CharacterClass::ALL {
            for name in starting_kit(class) {
                assert!(find_item(&catalog, name).is_some(), "missing {}", name);
            }
        }
    }

    #[test]
    fn test_tower_shield_is_tank_gear() {
        let catalog = all_items();
        let item = find_item(&catalog, "Tower Shield & Spear").unwrap();
        assert_eq!(item.attack, Some(8));
        assert_eq!(item.defense, Some(4));
        assert_eq!(item.class_restriction, Some(vec![Tank]));
        assert_eq!(item.level_requirement, Some(5));
    }
}
