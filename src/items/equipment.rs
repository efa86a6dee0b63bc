//! Equipment system
//!
//! Three worn slots. Equipped items are copies of inventory entries and share
//! their id, so dropping the inventory entry can clear the slot.

use serde::{Deserialize, Serialize};

use super::item::{EquipSlot, Item, ItemId};
use crate::entities::{CombatStats, Stat};

/// Player equipment slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip an item, returning the previously equipped item if any.
    /// Non-wearable items are handed straight back.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, Item> {
        match item.kind.equip_slot() {
            Some(slot) => Ok(self.slot_mut(slot).replace(item)),
            None => Err(item),
        }
    }

    /// Unequip an item from a slot
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    /// Get item in a slot
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Accessory => self.accessory.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory => &mut self.accessory,
        }
    }

    pub fn is_empty(&self, slot: EquipSlot) -> bool {
        self.get(slot).is_none()
    }

    /// Slot currently holding `id`, if any
    pub fn slot_of(&self, id: ItemId) -> Option<EquipSlot> {
        EquipSlot::ALL
            .into_iter()
            .find(|slot| self.get(*slot).map_or(false, |item| item.id == id))
    }

    /// Clear whichever slot holds `id`; returns the cleared slot
    pub fn clear_id(&mut self, id: ItemId) -> Option<EquipSlot> {
        let slot = self.slot_of(id)?;
        self.unequip(slot);
        Some(slot)
    }

    /// Equipped items in weapon, armor, accessory order
    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        EquipSlot::ALL.into_iter().filter_map(move |slot| self.get(slot))
    }

    /// Summed bonus for one stat
    pub fn stat_bonus(&self, stat: Stat) -> i32 {
        self.all_items().map(|item| item.bonus(stat)).sum()
    }

    /// Summed bonuses for all six stats
    pub fn bonuses(&self) -> CombatStats {
        let mut total = CombatStats::default();
        for stat in Stat::ALL {
            total.add(stat, self.stat_bonus(stat));
        }
        total
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Armor => "Armor",
            EquipSlot::Accessory => "Accessory",
        }
    }
}
