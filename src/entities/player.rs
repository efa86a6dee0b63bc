//! Player character
//!
//! Class presets, the base/total stat split and every command that changes
//! what the player carries or knows. Totals are only ever produced by
//! [`compute_totals`].

use serde::{Deserialize, Serialize};

use super::spell::Spell;
use super::stats::{Attribute, CombatStats, Stat, DODGE_CAP};
use crate::combat::status::{parse_boost_effect, StatusEffects, TimedBoost};
use crate::items::{EquipSlot, Equipment, Inventory, Item, ItemId, ItemKind};
use crate::progression::xp::apply_experience;
use crate::progression::PermanentUpgrades;
use crate::world::Position;

/// Spells a non-mage can hold at once
pub const NON_MAGE_SPELL_CAP: usize = 2;

/// Playable classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Tank,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 3] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Tank,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Tank => "Tank",
        }
    }
}

impl std::str::FromStr for CharacterClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warrior" => Ok(CharacterClass::Warrior),
            "mage" => Ok(CharacterClass::Mage),
            "tank" => Ok(CharacterClass::Tank),
            other => Err(format!("unknown class '{}'", other)),
        }
    }
}

/// Derive the six totals from base stats, gear and boosts; dodge is clamped
pub fn compute_totals(base: &CombatStats, equipment: &Equipment, boosts: &StatusEffects) -> CombatStats {
    let mut totals = *base;
    for item in equipment.all_items() {
        for stat in Stat::ALL {
            totals.add(stat, item.bonus(stat));
        }
    }
    let boosted = boosts.totals();
    for stat in Stat::ALL {
        totals.add(stat, boosted.get(stat));
    }
    totals.dodge = totals.dodge.clamp(0, DODGE_CAP);
    totals
}

/// What drinking a potion did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PotionUse {
    pub name: String,
    pub healed: i32,
    pub mana_restored: i32,
    pub boosts: Vec<TimedBoost>,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub class: CharacterClass,
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub base: CombatStats,
    /// Derived; refreshed by `recompute`
    pub total: CombatStats,
    pub level: u32,
    pub experience: u32,
    pub skill_points: u32,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub known_spells: Vec<Spell>,
    pub boosts: StatusEffects,
    pub position: Position,
}

impl Player {
    /// Fresh level-1 character with the class preset applied
    pub fn new(class: CharacterClass) -> Self {
        let mut base = CombatStats {
            attack: 5,
            defense: 3,
            magic: 2,
            dodge: 1,
            critical_hit: 5,
            luck: 5,
        };
        let (health, mana) = match class {
            CharacterClass::Tank => {
                base.defense = 5;
                base.attack = 4;
                (70, 30)
            }
            CharacterClass::Mage => {
                base.magic = 6;
                base.defense = 2;
                (40, 50)
            }
            CharacterClass::Warrior => {
                base.attack = 7;
                (60, 30)
            }
        };

        let mut inventory = Inventory::new();
        inventory.set_gold(50);

        let mut player = Self {
            class,
            health,
            max_health: health,
            mana,
            max_mana: mana,
            base,
            total: base,
            level: 1,
            experience: 0,
            skill_points: 0,
            inventory,
            equipment: Equipment::new(),
            known_spells: Vec::new(),
            boosts: StatusEffects::new(),
            position: Position::default(),
        };
        player.recompute();
        player
    }

    /// Refresh totals from base, gear and boosts
    pub fn recompute(&mut self) {
        self.total = compute_totals(&self.base, &self.equipment, &self.boosts);
    }

    pub fn gold(&self) -> u32 {
        self.inventory.gold()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply damage, returns the amount actually taken
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health - amount.max(0)).max(0);
        before - self.health
    }

    /// Heal up to max, returns the amount restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health);
        self.health - before
    }

    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let before = self.mana;
        self.mana = (self.mana + amount.max(0)).min(self.max_mana);
        self.mana - before
    }

    pub fn restore_full(&mut self) {
        self.health = self.max_health;
        self.mana = self.max_mana;
    }

    /// Raise an attribute by `points` worth of steps, without spending anything
    pub fn apply_attribute(&mut self, attribute: Attribute, points: u32) {
        let amount = attribute.step() * points as i32;
        match attribute {
            Attribute::Health => {
                self.max_health += amount;
                self.health += amount;
            }
            Attribute::Mana => {
                self.max_mana += amount;
                self.mana += amount;
            }
            other => {
                if let Some(stat) = other.stat() {
                    self.base.add(stat, amount);
                }
            }
        }
    }

    /// Apply every permanent upgrade, then recompute
    pub fn apply_upgrades(&mut self, upgrades: &PermanentUpgrades) {
        for (attribute, count) in upgrades.iter() {
            self.apply_attribute(attribute, count);
        }
        self.recompute();
    }

    /// Spend one skill point on an attribute
    pub fn increase_attribute(&mut self, attribute: Attribute) -> bool {
        if self.skill_points == 0 {
            log::debug!("No skill points to spend on {}", attribute.name());
            return false;
        }
        self.skill_points -= 1;
        self.apply_attribute(attribute, 1);
        self.recompute();
        true
    }

    /// Add experience; returns the number of levels gained
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        let (level, experience, gained) =
            apply_experience(self.level, self.experience.saturating_add(amount));
        self.level = level;
        self.experience = experience;
        self.skill_points += gained;
        gained
    }

    pub fn add_to_inventory(&mut self, item: Item) -> bool {
        self.inventory.add_item(item)
    }

    /// Remove an item, clearing any equipment slot that holds it
    pub fn remove_from_inventory(&mut self, id: ItemId) -> Option<Item> {
        let item = self.inventory.remove_by_id(id)?;
        if self.equipment.clear_id(id).is_some() {
            self.recompute();
        }
        Some(item)
    }

    /// Why an item cannot be worn, if it cannot
    pub fn equip_block_reason(&self, item: &Item) -> Option<String> {
        if !item.is_equipment() {
            return Some(format!("{} cannot be equipped", item.name));
        }
        if !item.allows_class(self.class) {
            return Some(format!("{} cannot use {}", self.class.name(), item.name));
        }
        if self.level < item.required_level() {
            return Some(format!(
                "{} requires level {}",
                item.name,
                item.required_level()
            ));
        }
        None
    }

    /// Wear an inventory item; the previous slot content stays carried
    pub fn equip_item(&mut self, id: ItemId) -> bool {
        let Some(item) = self.inventory.get_by_id(id).cloned() else {
            log::debug!("Equip rejected: item {} not carried", id);
            return false;
        };
        if let Some(reason) = self.equip_block_reason(&item) {
            log::debug!("Equip rejected: {}", reason);
            return false;
        }
        if self.equipment.equip(item).is_err() {
            return false;
        }
        self.recompute();
        true
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        let item = self.equipment.unequip(slot)?;
        self.recompute();
        Some(item)
    }

    /// Drink a potion from the inventory
    pub fn use_item(&mut self, id: ItemId) -> Option<PotionUse> {
        let item = self.inventory.get_by_id(id)?;
        if item.kind != ItemKind::Potion {
            log::debug!("Use rejected: {} is not a potion", item.name);
            return None;
        }
        let item = self.remove_from_inventory(id)?;

        let mut outcome = PotionUse {
            name: item.name.clone(),
            ..PotionUse::default()
        };
        if let Some(health) = item.health {
            outcome.healed = self.heal(health);
        }
        if let Some(mana) = item.mana {
            outcome.mana_restored = self.restore_mana(mana);
        }
        if let Some(effect) = item.effect.as_deref() {
            outcome.boosts = parse_boost_effect(effect);
            for boost in &outcome.boosts {
                self.boosts.add(*boost);
            }
            if !outcome.boosts.is_empty() {
                self.recompute();
            }
        }
        Some(outcome)
    }

    /// Drop every temporary boost
    pub fn clear_boosts(&mut self) {
        if !self.boosts.is_empty() {
            self.boosts.clear();
            self.recompute();
        }
    }

    pub fn knows_spell(&self, id: &str) -> bool {
        self.known_spells.iter().any(|s| s.id == id)
    }

    /// Learn a spell; non-mages forget their oldest spell past the cap
    pub fn learn_spell(&mut self, spell: Spell) -> bool {
        if self.knows_spell(&spell.id) {
            return false;
        }
        if self.class != CharacterClass::Mage {
            while self.known_spells.len() >= NON_MAGE_SPELL_CAP {
                let forgotten = self.known_spells.remove(0);
                log::debug!("Forgot {} to make room for {}", forgotten.name, spell.name);
            }
        }
        self.known_spells.push(spell);
        true
    }

    pub fn spell(&self, id: &str) -> Option<&Spell> {
        self.known_spells.iter().find(|s| s.id == id)
    }
}
