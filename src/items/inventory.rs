//! Inventory system
//!
//! Flat, ordered item list with a hard slot cap, plus the gold purse.

use serde::{Deserialize, Serialize};

use super::item::{Item, ItemId, ItemKind};

/// Maximum number of items carried
pub const MAX_INVENTORY: usize = 20;

/// Player inventory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    gold: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            gold: 0,
        }
    }

    /// Get current number of items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        MAX_INVENTORY
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_INVENTORY
    }

    pub fn has_space(&self) -> bool {
        !self.is_full()
    }

    /// Add an item to inventory
    /// Returns false if no space available
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove an item by ID
    pub fn remove_by_id(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn get_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get_by_id(id).is_some()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items of a specific kind, in carry order
    pub fn items_of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.kind == kind)
    }

    /// First potion matching a predicate
    pub fn find_potion<F>(&self, f: F) -> Option<&Item>
    where
        F: Fn(&Item) -> bool,
    {
        self.items.iter().find(|i| i.kind == ItemKind::Potion && f(i))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get current gold
    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn set_gold(&mut self, amount: u32) {
        self.gold = amount;
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Spend gold, returns false if not enough
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold >= amount {
            self.gold -= amount;
            true
        } else {
            false
        }
    }
}
