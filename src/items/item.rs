//! Item definitions
//!
//! Item values, kinds and rarities. Catalog entries are built with the
//! `Item::new(..).attack(..)` style builder and only receive a real id when a
//! copy enters play.

use serde::{Deserialize, Serialize};

use crate::entities::{CharacterClass, CombatStats, Stat};

/// Unique item ID for tracking
pub type ItemId = u64;

/// Catalog templates carry this id until `with_id` stamps a real one
pub const UNASSIGNED_ID: ItemId = 0;

/// Monotonic id source shared by items and spawned enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Item rarity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Get display color RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Rarity::Common => (200, 200, 200),
            Rarity::Uncommon => (100, 255, 100),
            Rarity::Rare => (100, 150, 255),
            Rarity::Epic => (200, 100, 255),
            Rarity::Legendary => (255, 180, 50),
        }
    }

    /// Lowercase rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// Main item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
    Accessory,
    Scroll,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
            ItemKind::Potion => "potion",
            ItemKind::Accessory => "accessory",
            ItemKind::Scroll => "scroll",
        }
    }

    /// Slot this kind is worn in, if it can be worn at all
    pub fn equip_slot(&self) -> Option<EquipSlot> {
        match self {
            ItemKind::Weapon => Some(EquipSlot::Weapon),
            ItemKind::Armor => Some(EquipSlot::Armor),
            ItemKind::Accessory => Some(EquipSlot::Accessory),
            ItemKind::Potion | ItemKind::Scroll => None,
        }
    }
}

/// Equipment slot for wearable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipSlot {
    /// Aggregation order
    pub const ALL: [EquipSlot; 3] = [EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Accessory];
}

/// A single item instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    /// Stable catalog identifier
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub value: u32,
    pub rarity: Rarity,
    #[serde(default)]
    pub attack: Option<i32>,
    #[serde(default)]
    pub defense: Option<i32>,
    #[serde(default)]
    pub magic: Option<i32>,
    #[serde(default)]
    pub dodge: Option<i32>,
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default)]
    pub mana: Option<i32>,
    #[serde(default)]
    pub critical_hit: Option<i32>,
    #[serde(default)]
    pub luck: Option<i32>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub class_restriction: Option<Vec<CharacterClass>>,
    #[serde(default)]
    pub level_requirement: Option<u32>,
}

impl Item {
    /// New catalog template; the key is derived from the name
    pub fn new(name: &str, kind: ItemKind, value: u32, rarity: Rarity) -> Self {
        Self {
            id: UNASSIGNED_ID,
            key: slug(name),
            name: name.to_string(),
            kind,
            value,
            rarity,
            attack: None,
            defense: None,
            magic: None,
            dodge: None,
            health: None,
            mana: None,
            critical_hit: None,
            luck: None,
            effect: None,
            description: String::new(),
            class_restriction: None,
            level_requirement: None,
        }
    }

    pub fn attack(mut self, amount: i32) -> Self {
        self.attack = Some(amount);
        self
    }

    pub fn defense(mut self, amount: i32) -> Self {
        self.defense = Some(amount);
        self
    }

    pub fn magic(mut self, amount: i32) -> Self {
        self.magic = Some(amount);
        self
    }

    pub fn dodge(mut self, amount: i32) -> Self {
        self.dodge = Some(amount);
        self
    }

    pub fn health(mut self, amount: i32) -> Self {
        self.health = Some(amount);
        self
    }

    pub fn mana(mut self, amount: i32) -> Self {
        self.mana = Some(amount);
        self
    }

    pub fn crit(mut self, amount: i32) -> Self {
        self.critical_hit = Some(amount);
        self
    }

    pub fn luck(mut self, amount: i32) -> Self {
        self.luck = Some(amount);
        self
    }

    pub fn effect(mut self, text: &str) -> Self {
        self.effect = Some(text.to_string());
        self
    }

    pub fn describe(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    pub fn classes(mut self, classes: &[CharacterClass]) -> Self {
        self.class_restriction = Some(classes.to_vec());
        self
    }

    pub fn level(mut self, requirement: u32) -> Self {
        self.level_requirement = Some(requirement);
        self
    }

    /// Copy of this item carrying a fresh instance id
    pub fn with_id(&self, id: ItemId) -> Self {
        let mut copy = self.clone();
        copy.id = id;
        copy
    }

    /// Level requirement, absent meaning 1
    pub fn required_level(&self) -> u32 {
        self.level_requirement.unwrap_or(1)
    }

    pub fn is_equipment(&self) -> bool {
        self.kind.equip_slot().is_some()
    }

    /// True when there is no class restriction or it lists `class`
    pub fn allows_class(&self, class: CharacterClass) -> bool {
        self.class_restriction
            .as_ref()
            .map_or(true, |classes| classes.contains(&class))
    }

    /// Bonus to one of the six aggregated stats (absent = 0)
    pub fn bonus(&self, stat: Stat) -> i32 {
        let value = match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Magic => self.magic,
            Stat::Dodge => self.dodge,
            Stat::CriticalHit => self.critical_hit,
            Stat::Luck => self.luck,
        };
        value.unwrap_or(0)
    }

    /// All six bonuses as a stat block
    pub fn bonuses(&self) -> CombatStats {
        let mut stats = CombatStats::default();
        for stat in Stat::ALL {
            stats.add(stat, self.bonus(stat));
        }
        stats
    }

    /// Description shown in the codex and tooltips
    pub fn display_description(&self) -> String {
        if self.description.is_empty() {
            format!("A {} {}", self.rarity.name(), self.kind.name())
        } else {
            self.description.clone()
        }
    }
}

/// Lowercase, dash-separated identifier derived from a display name
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else if ch != '\'' {
            pending_dash = true;
        }
    }
    out
}
