//! Enemy entities
//!
//! Enemy values and level-scaled generation from archetype templates.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::EnemyTemplate;
use crate::entities::Spell;
use crate::items::{IdCounter, Item};
use crate::world::Position;

/// Chance that a regular enemy carries one catalog item
pub const LOOT_CHANCE: f64 = 0.3;

/// Enemy races
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    Dragon,
    Skeleton,
    Human,
    Elf,
    Dwarf,
    Halfling,
    Mimic,
    Undead,
    Boss,
    Rat,
    Wolf,
    Bear,
    Spider,
    Goblin,
    Troll,
    Ogre,
    Ghost,
}

impl Race {
    pub const ALL: [Race; 17] = [
        Race::Dragon,
        Race::Skeleton,
        Race::Human,
        Race::Elf,
        Race::Dwarf,
        Race::Halfling,
        Race::Mimic,
        Race::Undead,
        Race::Boss,
        Race::Rat,
        Race::Wolf,
        Race::Bear,
        Race::Spider,
        Race::Goblin,
        Race::Troll,
        Race::Ogre,
        Race::Ghost,
    ];

    /// Lowercase identifier, shared with the codex ids
    pub fn id(&self) -> &'static str {
        match self {
            Race::Dragon => "dragon",
            Race::Skeleton => "skeleton",
            Race::Human => "human",
            Race::Elf => "elf",
            Race::Dwarf => "dwarf",
            Race::Halfling => "halfling",
            Race::Mimic => "mimic",
            Race::Undead => "undead",
            Race::Boss => "boss",
            Race::Rat => "rat",
            Race::Wolf => "wolf",
            Race::Bear => "bear",
            Race::Spider => "spider",
            Race::Goblin => "goblin",
            Race::Troll => "troll",
            Race::Ogre => "ogre",
            Race::Ghost => "ghost",
        }
    }

    /// Capitalized display name
    pub fn display_name(&self) -> String {
        let id = self.id();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// A hostile creature on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u64,
    pub name: String,
    pub race: Race,
    pub symbol: char,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic: i32,
    pub dodge: i32,
    pub position: Position,
    pub loot: Vec<Item>,
    pub spell_loot: Vec<Spell>,
    pub gold_value: u32,
    pub exp_value: u32,
    pub is_boss: bool,
    pub is_shopkeeper: bool,
    pub is_wizard: bool,
}

impl Enemy {
    /// Bare enemy with no loot; callers fill in the rest
    pub fn new(id: u64, name: &str, race: Race, symbol: char, level: u32, position: Position) -> Self {
        Self {
            id,
            name: name.to_string(),
            race,
            symbol,
            level,
            health: 1,
            max_health: 1,
            attack: 0,
            defense: 0,
            magic: 0,
            dodge: 0,
            position,
            loot: Vec::new(),
            spell_loot: Vec::new(),
            gold_value: 0,
            exp_value: 0,
            is_boss: false,
            is_shopkeeper: false,
            is_wizard: false,
        }
    }

    /// Set current and max health together
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self.max_health = health;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, returns the amount actually taken
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health - amount.max(0)).max(0);
        before - self.health
    }

    pub fn reset_health(&mut self) {
        self.health = self.max_health;
    }

    /// Level encounter that opens the portal when defeated
    pub fn is_level_boss(&self) -> bool {
        self.is_boss && !self.is_shopkeeper && !self.is_wizard
    }
}

/// Stat scaling for an enemy of the given level
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + (level.max(1) - 1) as f64 * 0.25
}

/// Archetypes allowed on a dungeon level, falling back to the lowest one
pub fn eligible_templates(templates: &[EnemyTemplate], dungeon_level: u32) -> Vec<&EnemyTemplate> {
    let eligible: Vec<&EnemyTemplate> = templates
        .iter()
        .filter(|t| t.min_level <= dungeon_level)
        .collect();
    if !eligible.is_empty() {
        return eligible;
    }
    templates.iter().min_by_key(|t| t.min_level).into_iter().collect()
}

/// Roll a regular enemy for a dungeon level.
///
/// Returns `None` only when there are no templates at all.
pub fn generate_enemy(
    dungeon_level: u32,
    position: Position,
    templates: &[EnemyTemplate],
    item_catalog: &[Item],
    ids: &mut IdCounter,
    rng: &mut impl Rng,
) -> Option<Enemy> {
    let dungeon_level = dungeon_level.max(1);
    let template = *eligible_templates(templates, dungeon_level).choose(rng)?;

    let min_level = dungeon_level.saturating_sub(1).max(1);
    let level = rng.gen_range(min_level..=dungeon_level);
    let mult = level_multiplier(level);
    let scale = |base: i32| (base as f64 * mult).floor() as i32;

    let name = template
        .names
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| template.race.display_name());

    let mut enemy = Enemy::new(ids.next(), &name, template.race, template.symbol, level, position)
        .with_health(scale(template.health).max(1));
    enemy.attack = scale(template.attack);
    enemy.defense = scale(template.defense);
    enemy.magic = scale(template.magic);
    enemy.dodge = scale(template.dodge);
    enemy.gold_value = (level as f64 * 8.0 * template.gold_multiplier).floor() as u32;
    enemy.exp_value = (level as f64 * 15.0 * template.exp_multiplier).floor() as u32;

    if rng.gen_bool(LOOT_CHANCE) {
        let available: Vec<&Item> = item_catalog
            .iter()
            .filter(|item| item.required_level() <= level)
            .collect();
        if let Some(item) = available.choose(rng) {
            enemy.loot.push(item.with_id(ids.next()));
        }
    }

    Some(enemy)
}
