//! Vlkava Dungeons - the core of a turn-based ASCII roguelike
//!
//! Pick a class, walk procedurally generated dungeon levels, fight
//! turn-based battles, loot chests, trade with shops and defeat each
//! level's boss to open the portal deeper.

pub mod audio;
pub mod combat;
pub mod data;
pub mod entities;
pub mod game;
pub mod items;
pub mod progression;
pub mod save;
pub mod world;

// Re-export commonly used types
pub use entities::{CharacterClass, Enemy, Player};
pub use game::{Game, GameConfig, GameEvent, GameMode};
pub use world::{Map, Position, TileType};
