//! RON data loader
//!
//! Loads content tables from RON files in a data directory, with fallback to
//! the built-in tables for anything missing or malformed.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::enemies::{default_enemy_templates, EnemyTemplate};
use super::items;
use super::spells::all_spells;
use crate::entities::Spell;
use crate::items::Item;
use crate::save::StoreError;

/// Default location of the override files
pub const DEFAULT_DATA_DIR: &str = "assets/data";

/// Item tables grouped the way loot and shops draw from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalog {
    /// Warrior, then mage, then tank weapons
    pub weapons: Vec<Item>,
    pub armor: Vec<Item>,
    pub potions: Vec<Item>,
    pub accessories: Vec<Item>,
    /// Shop-only stock
    pub shop: Vec<Item>,
}

impl ItemCatalog {
    /// Everything that can drop from enemies
    pub fn drops(&self) -> Vec<Item> {
        let mut all = self.weapons.clone();
        all.extend(self.armor.iter().cloned());
        all.extend(self.potions.iter().cloned());
        all.extend(self.accessories.iter().cloned());
        all
    }

    /// Every item including shop stock
    pub fn iter_all(&self) -> impl Iterator<Item = &Item> {
        self.weapons
            .iter()
            .chain(&self.armor)
            .chain(&self.potions)
            .chain(&self.accessories)
            .chain(&self.shop)
    }

    pub fn find(&self, name: &str) -> Option<&Item> {
        self.iter_all().find(|item| item.name == name)
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self {
            weapons: items::all_weapons(),
            armor: items::all_armor(),
            potions: items::potions(),
            accessories: items::accessories(),
            shop: items::shop_items(),
        }
    }
}

/// All content the game reads as data
#[derive(Debug, Clone, PartialEq)]
pub struct ContentTables {
    pub items: ItemCatalog,
    pub spells: Vec<Spell>,
    pub enemies: Vec<EnemyTemplate>,
}

impl ContentTables {
    /// Load each table from `dir`, falling back per file
    pub fn load(dir: &Path) -> Self {
        Self {
            items: load_or_default(&dir.join("items.ron"), ItemCatalog::default),
            spells: load_or_default(&dir.join("spells.ron"), all_spells),
            enemies: load_or_default(&dir.join("enemies.ron"), default_enemy_templates),
        }
    }

    /// Load from the default data directory
    pub fn load_from_assets() -> Self {
        Self::load(Path::new(DEFAULT_DATA_DIR))
    }

    /// Spells the archmage sells
    pub fn shop_spells(&self) -> Vec<Spell> {
        self.spells.iter().filter(|s| s.is_for_sale()).cloned().collect()
    }

    pub fn spell(&self, id: &str) -> Option<&Spell> {
        self.spells.iter().find(|s| s.id == id)
    }
}

impl Default for ContentTables {
    fn default() -> Self {
        Self {
            items: ItemCatalog::default(),
            spells: all_spells(),
            enemies: default_enemy_templates(),
        }
    }
}

/// Read one RON file; absent files are silent, broken ones warn
fn load_or_default<T, F>(path: &Path, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    if !path.exists() {
        return default();
    }
    match read_ron(path) {
        Ok(value) => {
            log::info!("Loaded content overrides from {}", path.display());
            value
        }
        Err(e) => {
            log::warn!("{}. Using built-in table.", e);
            default()
        }
    }
}

fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    ron::from_str(&content).map_err(|e| StoreError::parse(path, e))
}

/// Export the built-in tables to RON files for editing
pub fn export_default_data(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let tables = ContentTables::default();
    write_ron(&dir.join("items.ron"), "items", &tables.items)?;
    write_ron(&dir.join("spells.ron"), "spells", &tables.spells)?;
    write_ron(&dir.join("enemies.ron"), "enemies", &tables.enemies)?;
    Ok(())
}

fn write_ron<T: Serialize>(path: &Path, what: &str, value: &T) -> Result<(), StoreError> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| StoreError::encode(what, e))?;
    fs::write(path, text).map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let tables = ContentTables::load(&dir.path().join("nowhere"));
        assert_eq!(tables, ContentTables::default());
    }

    #[test]
    fn test_export_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        export_default_data(dir.path()).unwrap();
        assert!(dir.path().join("items.ron").exists());

        let tables = ContentTables::load(dir.path());
        assert_eq!(tables.enemies.len(), default_enemy_templates().len());
        assert_eq!(tables.spells, all_spells());
        assert_eq!(tables.items.shop.len(), items::shop_items().len());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("enemies.ron"), "this is not ron (").unwrap();
        let tables = ContentTables::load(dir.path());
        assert_eq!(tables.enemies, default_enemy_templates());
    }

    #[test]
    fn test_override_replaces_table() {
        let dir = tempfile::tempdir().unwrap();
        let only_rats: Vec<_> = default_enemy_templates()
            .into_iter()
            .filter(|t| t.symbol == 'r')
            .collect();
        write_ron(&dir.path().join("enemies.ron"), "enemies", &only_rats).unwrap();

        let tables = ContentTables::load(dir.path());
        assert_eq!(tables.enemies.len(), 1);
        assert_eq!(tables.shop_spells().len(), all_spells().iter().filter(|s| s.is_for_sale()).count());
    }
}
