//! Entity creation and management
//!
//! Plain value types for the player, enemies and spells, plus the functions
//! that roll them for a dungeon level.

pub mod player;
pub mod stats;
pub mod spell;
pub mod enemies;
pub mod bosses;
pub mod npcs;
pub mod spawner;

pub use player::{compute_totals, CharacterClass, Player, PotionUse, NON_MAGE_SPELL_CAP};
pub use stats::{Attribute, CombatStats, Stat, DODGE_CAP};
pub use spell::{Spell, STUN_MARKER};
pub use enemies::{generate_enemy, Enemy, Race};
pub use bosses::{generate_boss, BossType};
pub use npcs::{generate_archmage, generate_shopkeeper, NpcType};
pub use spawner::{enemy_count_for_level, spawn_enemies_for_level};
