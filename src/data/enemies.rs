//! Enemy archetypes for data-driven enemy creation
//!
//! These templates may be replaced by `assets/data/enemies.ron`.

use serde::{Deserialize, Serialize};

use crate::entities::Race;
use crate::world::TileType;

/// A template for creating enemies from external data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub race: Race,
    /// Lowest dungeon level this archetype appears on
    pub min_level: u32,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic: i32,
    pub dodge: i32,
    pub gold_multiplier: f64,
    pub exp_multiplier: f64,
    /// Display glyph
    pub symbol: char,
    /// Name variants; one is picked per spawn
    pub names: Vec<String>,
}

#[allow(clippy::too_many_arguments)]
fn template(
    race: Race,
    min_level: u32,
    (health, attack, defense, magic, dodge): (i32, i32, i32, i32, i32),
    gold_multiplier: f64,
    exp_multiplier: f64,
    symbol: char,
    names: [&str; 5],
) -> EnemyTemplate {
    EnemyTemplate {
        race,
        min_level,
        health,
        attack,
        defense,
        magic,
        dodge,
        gold_multiplier,
        exp_multiplier,
        symbol,
        names: names.iter().map(|n| n.to_string()).collect(),
    }
}

/// Create default enemy templates (hardcoded fallback)
pub fn default_enemy_templates() -> Vec<EnemyTemplate> {
    vec![
        template(Race::Dragon, 8, (80, 15, 12, 10, 5), 5.0, 5.0, 'D',
            ["Red Dragon", "Blue Dragon", "Green Dragon", "Black Dragon", "Gold Dragon"]),
        template(Race::Skeleton, 2, (20, 5, 3, 2, 0), 1.0, 1.0, 'S',
            ["Skeleton Warrior", "Skeleton Archer", "Skeleton Mage", "Bone Knight", "Skeletal Champion"]),
        template(Race::Human, 1, (25, 6, 4, 3, 8), 2.0, 1.5, 'H',
            ["Bandit", "Mercenary", "Cultist", "Dark Knight", "Warlock"]),
        template(Race::Dwarf, 3, (30, 8, 6, 1, 3), 3.0, 1.7, 'D',
            ["Dwarf Fighter", "Dwarf Berserker", "Dwarf Smith", "Dwarf Guard", "Dwarf Champion"]),
        template(Race::Mimic, 5, (35, 10, 8, 5, 0), 4.0, 2.5, 'M',
            ["Chest Mimic", "Door Mimic", "Weapon Mimic", "Armor Mimic", "Gold Mimic"]),
        template(Race::Undead, 3, (25, 6, 4, 7, 2), 1.5, 1.8, 'Z',
            ["Zombie", "Ghoul", "Wight", "Wraith", "Lich"]),
        template(Race::Rat, 1, (10, 3, 1, 0, 15), 0.5, 0.7, 'r',
            ["Giant Rat", "Plague Rat", "Sewer Rat", "Dire Rat", "Mutant Rat"]),
        template(Race::Wolf, 2, (22, 7, 2, 0, 12), 0.8, 1.2, 'w',
            ["Timber Wolf", "Dire Wolf", "Shadow Wolf", "Winter Wolf", "Alpha Wolf"]),
        template(Race::Bear, 4, (40, 9, 5, 0, 3), 1.2, 1.5, 'B',
            ["Brown Bear", "Black Bear", "Cave Bear", "Grizzly", "Dire Bear"]),
        template(Race::Spider, 2, (15, 5, 2, 1, 18), 0.7, 1.0, 's',
            ["Giant Spider", "Venomous Spider", "Web Spinner", "Shadow Spider", "Cave Spider"]),
        template(Race::Goblin, 2, (18, 4, 2, 2, 10), 1.0, 1.1, 'g',
            ["Goblin Scout", "Goblin Warrior", "Goblin Shaman", "Goblin Archer", "Goblin Chief"]),
        template(Race::Troll, 6, (60, 12, 8, 1, 2), 2.0, 2.2, 'T',
            ["Cave Troll", "Bridge Troll", "Swamp Troll", "Mountain Troll", "Elder Troll"]),
        template(Race::Ogre, 5, (50, 10, 7, 2, 1), 1.8, 2.0, 'O',
            ["Ogre Brute", "Ogre Mauler", "Ogre Chieftain", "Two-Headed Ogre", "Ogre Mage"]),
        template(Race::Ghost, 4, (20, 5, 3, 8, 20), 1.0, 1.6, 'G',
            ["Restless Spirit", "Phantom", "Specter", "Haunting Presence", "Vengeful Ghost"]),
    ]
}

/// Codex blurb for every race, bosses included
pub fn race_description(race: Race) -> &'static str {
    match race {
        Race::Dragon => "Powerful winged creatures that breathe fire and hoard treasure.",
        Race::Skeleton => "Animated remains of the dead, often wielding rusty weapons.",
        Race::Human => "Regular human enemies, typically bandits or mercenaries.",
        Race::Elf => "Agile and magical forest dwellers with pointed ears.",
        Race::Dwarf => "Stout miners and craftsmen with a love for gold and ale.",
        Race::Halfling => "Small, nimble folk with a knack for stealth.",
        Race::Mimic => "Creatures that disguise themselves as treasure chests to ambush prey.",
        Race::Undead => "Reanimated corpses that hunger for the living.",
        Race::Boss => "Exceptionally powerful enemies that guard valuable treasures.",
        Race::Rat => "Small vermin that attack in groups.",
        Race::Wolf => "Predatory canines that hunt in packs.",
        Race::Bear => "Large, powerful mammals with sharp claws.",
        Race::Spider => "Eight-legged arachnids that spin webs and inject venom.",
        Race::Goblin => "Small, green-skinned creatures known for their mischief.",
        Race::Troll => "Large, regenerating monsters with incredible strength.",
        Race::Ogre => "Huge, brutish humanoids with limited intelligence but immense power.",
        Race::Ghost => "Spectral entities that can phase through solid objects.",
    }
}

/// Codex blurb for a tile type
pub fn location_description(tile_type: TileType) -> &'static str {
    match tile_type {
        TileType::Wall => "Solid barriers that block movement and line of sight.",
        TileType::Floor => "Open spaces where characters can move freely.",
        TileType::Door => "Passages between rooms that can be opened and closed.",
        TileType::Chest => "Containers that may hold valuable loot.",
        TileType::Shop => "Places where items can be bought and sold.",
        TileType::Wizard => "Magical vendors who sell spells and enchanted items.",
        TileType::Shrine => "Sacred places that restore health and mana when visited.",
        TileType::Boss => "Chambers where powerful enemies await.",
        TileType::Portal => "Magical gateways to the next dungeon level.",
    }
}
