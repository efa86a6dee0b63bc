//! Sound definitions and mappings
//!
//! Defines all sound events and music tracks the game asks for.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Sound event identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundId {
    /// Player swings at an enemy
    Attack,
    /// Player takes a hit
    Damage,
    LevelUp,
    OpenChest,
    ItemPickup,
    /// Player got away from a fight
    Flee,
    /// Spell cast
    Spell,
    EnemyDefeat,
    /// Menu and modal buttons
    ButtonClick,
}

impl SoundId {
    pub const ALL: [SoundId; 9] = [
        SoundId::Attack,
        SoundId::Damage,
        SoundId::LevelUp,
        SoundId::OpenChest,
        SoundId::ItemPickup,
        SoundId::Flee,
        SoundId::Spell,
        SoundId::EnemyDefeat,
        SoundId::ButtonClick,
    ];

    /// Symbolic name shared with the presentation layer
    pub fn name(&self) -> &'static str {
        match self {
            SoundId::Attack => "attack",
            SoundId::Damage => "damage",
            SoundId::LevelUp => "levelUp",
            SoundId::OpenChest => "openChest",
            SoundId::ItemPickup => "itemPickup",
            SoundId::Flee => "flee",
            SoundId::Spell => "spell",
            SoundId::EnemyDefeat => "enemyDefeat",
            SoundId::ButtonClick => "buttonClick",
        }
    }

    /// Get the file path for this sound
    pub fn file_path(&self) -> &'static str {
        match self {
            SoundId::Attack => "assets/sounds/combat/attack.ogg",
            SoundId::Damage => "assets/sounds/combat/damage.ogg",
            SoundId::Flee => "assets/sounds/combat/flee.ogg",
            SoundId::Spell => "assets/sounds/combat/spell.ogg",
            SoundId::EnemyDefeat => "assets/sounds/combat/enemy_defeat.ogg",
            SoundId::OpenChest => "assets/sounds/items/open_chest.ogg",
            SoundId::ItemPickup => "assets/sounds/items/pickup.ogg",
            SoundId::LevelUp => "assets/sounds/ambient/level_up.ogg",
            SoundId::ButtonClick => "assets/sounds/ui/click.ogg",
        }
    }

    /// Get the default volume for this sound (0.0 - 1.0)
    pub fn default_volume(&self) -> f64 {
        match self {
            SoundId::ButtonClick => 0.4,
            SoundId::ItemPickup => 0.5,
            SoundId::Attack | SoundId::Flee => 0.6,
            SoundId::Damage | SoundId::Spell => 0.7,
            SoundId::LevelUp | SoundId::EnemyDefeat => 0.8,
            SoundId::OpenChest => 0.6,
        }
    }

    /// Check if the sound file exists
    pub fn exists(&self) -> bool {
        Path::new(self.file_path()).exists()
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MusicTrack {
    /// Exploration
    Background,
    Battle,
}

impl MusicTrack {
    pub fn name(&self) -> &'static str {
        match self {
            MusicTrack::Background => "background",
            MusicTrack::Battle => "battle",
        }
    }

    pub fn file_path(&self) -> &'static str {
        match self {
            MusicTrack::Background => "assets/music/background.ogg",
            MusicTrack::Battle => "assets/music/battle.ogg",
        }
    }
}
