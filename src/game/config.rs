//! Run configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::DEFAULT_DATA_DIR;
use crate::save::default_storage_dir;

/// Settings a game is started with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Run seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Where meta data and the codex live; the platform data dir when absent
    pub storage_dir: Option<PathBuf>,
    /// Write meta data and the codex to disk
    pub persist: bool,
    /// Directory holding RON content overrides
    pub data_dir: PathBuf,
    /// Play real audio when the `audio` feature is compiled in
    pub audio_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            storage_dir: None,
            persist: true,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            audio_enabled: true,
        }
    }
}

impl GameConfig {
    /// Seeded configuration that never touches the disk or the speakers
    pub fn ephemeral(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            persist: false,
            audio_enabled: false,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self.persist = true;
        self
    }

    /// The configured run seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// The storage directory to use when persisting
    pub fn resolve_storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(default_storage_dir)
    }
}
