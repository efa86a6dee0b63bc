//! Codex of everything the player has met
//!
//! Entries are seeded from the content tables and flipped to discovered as
//! the player finds items, learns spells, fights races and steps on tiles.
//! A stored codex is reloaded verbatim; catalog entries it lacks are merged
//! in undiscovered.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::storage::{read_json, write_json};
use crate::data::{location_description, race_description, ContentTables};
use crate::entities::{CharacterClass, Race, Spell};
use crate::items::{Item, ItemKind, Rarity};
use crate::world::TileType;

/// Codex file name
pub const CODEX_FILE: &str = "codex.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodexCategory {
    Weapon,
    Armor,
    Accessory,
    Potion,
    Scroll,
    Enemy,
    Spell,
    Location,
}

impl From<ItemKind> for CodexCategory {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Weapon => CodexCategory::Weapon,
            ItemKind::Armor => CodexCategory::Armor,
            ItemKind::Accessory => CodexCategory::Accessory,
            ItemKind::Potion => CodexCategory::Potion,
            ItemKind::Scroll => CodexCategory::Scroll,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: CodexCategory,
    pub discovered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_requirement: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_restriction: Option<Vec<CharacterClass>>,
}

impl CodexEntry {
    fn plain(id: String, name: String, description: &str, category: CodexCategory) -> Self {
        Self {
            id,
            name,
            description: description.to_string(),
            category,
            discovered: false,
            rarity: None,
            level_requirement: None,
            class_restriction: None,
        }
    }

    pub fn for_item(item: &Item) -> Self {
        Self {
            id: item.key.clone(),
            name: item.name.clone(),
            description: item.display_description(),
            category: item.kind.into(),
            discovered: false,
            rarity: Some(item.rarity),
            level_requirement: item.level_requirement,
            class_restriction: item.class_restriction.clone(),
        }
    }

    pub fn for_spell(spell: &Spell) -> Self {
        Self {
            id: spell.id.clone(),
            name: spell.name.clone(),
            description: spell.description.clone(),
            category: CodexCategory::Spell,
            discovered: false,
            rarity: None,
            level_requirement: spell.level_requirement,
            class_restriction: spell.class_restriction.clone(),
        }
    }
}

/// Codex id of an enemy race
pub fn enemy_entry_id(race: Race) -> String {
    format!("enemy-{}", race.id())
}

/// Codex id of a tile type
pub fn location_entry_id(tile_type: TileType) -> String {
    format!("location-{}", tile_type.name())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Build a fresh, fully undiscovered codex from the content tables
pub fn seed_entries(content: &ContentTables) -> Vec<CodexEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for item in content.items.iter_all() {
        if seen.insert(item.key.clone()) {
            entries.push(CodexEntry::for_item(item));
        }
    }
    for spell in &content.spells {
        if seen.insert(spell.id.clone()) {
            entries.push(CodexEntry::for_spell(spell));
        }
    }
    for race in Race::ALL {
        entries.push(CodexEntry::plain(
            enemy_entry_id(race),
            race.display_name(),
            race_description(race),
            CodexCategory::Enemy,
        ));
    }
    for tile_type in TileType::ALL {
        entries.push(CodexEntry::plain(
            location_entry_id(tile_type),
            capitalize(tile_type.name()),
            location_description(tile_type),
            CodexCategory::Location,
        ));
    }

    entries
}

/// The discovered-things book
#[derive(Debug, Clone)]
pub struct Codex {
    entries: Vec<CodexEntry>,
    /// `None` keeps the codex in memory
    path: Option<PathBuf>,
}

impl Codex {
    /// Undiscovered codex that is never written
    pub fn in_memory(content: &ContentTables) -> Self {
        Self {
            entries: seed_entries(content),
            path: None,
        }
    }

    /// Load `codex.json` from `dir`, merging in new catalog entries
    pub fn open(dir: &Path, content: &ContentTables) -> Self {
        let path = dir.join(CODEX_FILE);
        let seeded = seed_entries(content);

        let entries = match read_json::<Vec<CodexEntry>>(&path) {
            Ok(Some(stored)) => merge_entries(stored, seeded),
            Ok(None) => seeded,
            Err(e) => {
                log::warn!("{}. Starting a fresh codex.", e);
                seeded
            }
        };

        Self {
            entries,
            path: Some(path),
        }
    }

    pub fn entries(&self) -> &[CodexEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CodexEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn is_discovered(&self, id: &str) -> bool {
        self.get(id).map_or(false, |e| e.discovered)
    }

    pub fn in_category(&self, category: CodexCategory) -> impl Iterator<Item = &CodexEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// (discovered, total)
    pub fn progress(&self) -> (usize, usize) {
        let found = self.entries.iter().filter(|e| e.discovered).count();
        (found, self.entries.len())
    }

    /// Mark an entry discovered; returns true if it was new
    pub fn discover(&mut self, id: &str) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            log::debug!("No codex entry named {}", id);
            return false;
        };
        if entry.discovered {
            return false;
        }
        entry.discovered = true;
        self.save();
        true
    }

    /// Discover an item, adding an entry for items outside the catalogs
    pub fn discover_item(&mut self, item: &Item) -> bool {
        if self.get(&item.key).is_none() {
            self.entries.push(CodexEntry::for_item(item));
        }
        self.discover(&item.key)
    }

    pub fn discover_spell(&mut self, spell: &Spell) -> bool {
        if self.get(&spell.id).is_none() {
            self.entries.push(CodexEntry::for_spell(spell));
        }
        self.discover(&spell.id)
    }

    pub fn discover_enemy(&mut self, race: Race) -> bool {
        self.discover(&enemy_entry_id(race))
    }

    pub fn discover_location(&mut self, tile_type: TileType) -> bool {
        self.discover(&location_entry_id(tile_type))
    }

    /// Write the codex, logging instead of failing
    pub fn save(&self) {
        if let Err(e) = self.persist() {
            log::warn!("Failed to save codex: {}", e);
        }
    }

    fn persist(&self) -> Result<(), StoreError> {
        match &self.path {
            Some(path) => write_json(path, "codex", &self.entries),
            None => Ok(()),
        }
    }
}

/// Stored entries win; seeded entries missing from them are appended
fn merge_entries(mut stored: Vec<CodexEntry>, seeded: Vec<CodexEntry>) -> Vec<CodexEntry> {
    let known: HashSet<String> = stored.iter().map(|e| e.id.clone()).collect();
    let added: Vec<CodexEntry> = seeded.into_iter().filter(|e| !known.contains(&e.id)).collect();
    if !added.is_empty() {
        log::debug!("Merged {} new codex entries", added.len());
    }
    stored.extend(added);
    stored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_covers_every_category() {
        let content = ContentTables::default();
        let codex = Codex::in_memory(&content);

        assert_eq!(codex.in_category(CodexCategory::Enemy).count(), Race::ALL.len());
        assert_eq!(codex.in_category(CodexCategory::Location).count(), TileType::ALL.len());
        assert_eq!(codex.in_category(CodexCategory::Spell).count(), content.spells.len());
        assert!(codex.get("enemy-rat").is_some());
        assert_eq!(codex.get("location-shrine").map(|e| e.name.as_str()), Some("Shrine"));
        assert_eq!(codex.progress().0, 0);

        let ids: HashSet<_> = codex.entries().iter().map(|e| &e.id).collect();
        assert_eq!(ids.len(), codex.entries().len());
    }

    #[test]
    fn test_discover_once() {
        let mut codex = Codex::in_memory(&ContentTables::default());
        assert!(codex.discover_enemy(Race::Rat));
        assert!(!codex.discover_enemy(Race::Rat));
        assert!(codex.is_discovered("enemy-rat"));
        assert!(!codex.discover("no-such-entry"));
    }

    #[test]
    fn test_unknown_item_gets_an_entry() {
        let mut codex = Codex::in_memory(&ContentTables::default());
        let trophy = Item::new("Champion's Trophy", ItemKind::Accessory, 250, Rarity::Rare);
        assert!(codex.discover_item(&trophy));
        assert!(codex.is_discovered("champions-trophy"));
    }

    #[test]
    fn test_discovered_flags_persist() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentTables::default();

        let mut codex = Codex::open(dir.path(), &content);
        codex.discover_location(TileType::Shrine);
        codex.discover_enemy(Race::Goblin);

        let reloaded = Codex::open(dir.path(), &content);
        assert!(reloaded.is_discovered("location-shrine"));
        assert!(reloaded.is_discovered("enemy-goblin"));
        assert!(!reloaded.is_discovered("enemy-troll"));
        assert_eq!(reloaded.entries().len(), codex.entries().len());
    }

    #[test]
    fn test_stored_entries_kept_and_new_ones_merged() {
        let dir = tempfile::tempdir().unwrap();
        let mut stored = vec![CodexEntry::plain(
            "enemy-rat".to_string(),
            "Old Rat Name".to_string(),
            "kept verbatim",
            CodexCategory::Enemy,
        )];
        stored[0].discovered = true;
        write_json(&dir.path().join(CODEX_FILE), "codex", &stored).unwrap();

        let content = ContentTables::default();
        let codex = Codex::open(dir.path(), &content);
        let rat = codex.get("enemy-rat").unwrap();
        assert_eq!(rat.name, "Old Rat Name");
        assert!(rat.discovered);
        assert_eq!(codex.entries().len(), seed_entries(&content).len());
    }

    #[test]
    fn test_corrupt_codex_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CODEX_FILE), "{{{").unwrap();
        let codex = Codex::open(dir.path(), &ContentTables::default());
        assert_eq!(codex.progress().0, 0);
    }
}
