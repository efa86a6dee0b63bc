//! Tile definitions
//!
//! Tile types and their properties.

use serde::{Deserialize, Serialize};

/// A single tile in the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    /// Seen at least once; never reset within a level
    pub explored: bool,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            explored: false,
        }
    }

    pub fn is_traversable(&self) -> bool {
        self.tile_type.is_traversable()
    }

    pub fn glyph(&self) -> char {
        self.tile_type.glyph()
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileType::Wall)
    }
}

/// Types of tiles in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Wall,
    Floor,
    Door,

    // Interactables
    Chest,
    Shop,
    Wizard,
    Shrine,
    Boss,
    Portal,
}

impl TileType {
    /// Every tile type in codex order
    pub const ALL: [TileType; 9] = [
        TileType::Wall,
        TileType::Floor,
        TileType::Door,
        TileType::Chest,
        TileType::Shop,
        TileType::Wizard,
        TileType::Shrine,
        TileType::Boss,
        TileType::Portal,
    ];

    /// Anything but a wall can be stepped on
    pub fn is_traversable(&self) -> bool {
        !matches!(self, TileType::Wall)
    }

    /// Tiles that trigger something when entered
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            TileType::Chest
                | TileType::Shop
                | TileType::Wizard
                | TileType::Shrine
                | TileType::Boss
                | TileType::Portal
        )
    }

    pub fn glyph(&self) -> char {
        match self {
            TileType::Wall => '#',
            TileType::Floor => '.',
            TileType::Door => '+',
            TileType::Chest => '$',
            TileType::Shop => 'S',
            TileType::Wizard => 'W',
            TileType::Shrine => '^',
            TileType::Boss => 'B',
            TileType::Portal => 'O',
        }
    }

    /// Lowercase identifier, shared with the codex ids
    pub fn name(&self) -> &'static str {
        match self {
            TileType::Wall => "wall",
            TileType::Floor => "floor",
            TileType::Door => "door",
            TileType::Chest => "chest",
            TileType::Shop => "shop",
            TileType::Wizard => "wizard",
            TileType::Shrine => "shrine",
            TileType::Boss => "boss",
            TileType::Portal => "portal",
        }
    }
}
