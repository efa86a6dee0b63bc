//! Data loading and external game content
//!
//! Built-in catalogs of items, spells and enemy archetypes, optionally
//! replaced by RON files so content can be tuned without a rebuild.

pub mod loader;
pub mod items;
pub mod spells;
pub mod enemies;

pub use loader::{export_default_data, ContentTables, ItemCatalog, DEFAULT_DATA_DIR};
pub use enemies::{default_enemy_templates, location_description, race_description, EnemyTemplate};
pub use spells::{all_spells, starting_spells};
pub use items::starting_kit;
