//! Meta-progression that outlives a run
//!
//! Best score, meta skill points and the permanent upgrades bought with
//! them. Every change is written straight away; storage failures are
//! logged and never reach gameplay.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::storage::{read_json, remove_file, write_json};
use crate::entities::Attribute;
use crate::progression::PermanentUpgrades;

/// Meta data file name
pub const META_FILE: &str = "vlkava-dungeons-data.json";
/// High score file name
pub const HIGH_SCORE_FILE: &str = "high-score.json";
/// Score needed per meta skill point
pub const SCORE_PER_SKILL_POINT: u32 = 100;

/// Persisted meta progression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaData {
    pub max_score: u32,
    pub skill_points: u32,
    pub upgrades: PermanentUpgrades,
}

/// Meta data plus the high score, bound to a storage directory
#[derive(Debug, Clone)]
pub struct MetaStore {
    /// `None` keeps everything in memory
    dir: Option<PathBuf>,
    data: MetaData,
    high_score: u32,
}

impl MetaStore {
    /// Load from `dir`; anything unreadable starts from zero
    pub fn open(dir: &Path) -> Self {
        let data = read_json::<MetaData>(&dir.join(META_FILE))
            .unwrap_or_else(|e| {
                log::warn!("{}. Starting with fresh meta data.", e);
                None
            })
            .unwrap_or_default();
        let high_score = read_json::<u32>(&dir.join(HIGH_SCORE_FILE))
            .unwrap_or_else(|e| {
                log::warn!("{}. Resetting high score.", e);
                None
            })
            .unwrap_or(0);

        log::info!(
            "Meta data loaded from {:?}: {} skill points, {} upgrades",
            dir,
            data.skill_points,
            data.upgrades.total()
        );

        Self {
            dir: Some(dir.to_path_buf()),
            data,
            high_score,
        }
    }

    /// A store that never touches the disk
    pub fn in_memory() -> Self {
        Self {
            dir: None,
            data: MetaData::default(),
            high_score: 0,
        }
    }

    pub fn data(&self) -> &MetaData {
        &self.data
    }

    pub fn upgrades(&self) -> &PermanentUpgrades {
        &self.data.upgrades
    }

    pub fn skill_points(&self) -> u32 {
        self.data.skill_points
    }

    pub fn max_score(&self) -> u32 {
        self.data.max_score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Record a finished run; returns the skill points credited
    pub fn record_game_over(&mut self, score: u32) -> u32 {
        let credited = score / SCORE_PER_SKILL_POINT;
        self.data.max_score = self.data.max_score.max(score);
        self.data.skill_points = self.data.skill_points.saturating_add(credited);
        if score > self.high_score {
            log::info!("New high score: {}", score);
            self.high_score = score;
        }
        self.save();
        credited
    }

    /// Spend one meta skill point on a permanent upgrade
    pub fn purchase_upgrade(&mut self, attribute: Attribute) -> bool {
        if self.data.skill_points == 0 {
            log::debug!("No meta skill points for a {} upgrade", attribute.name());
            return false;
        }
        self.data.skill_points -= 1;
        self.data.upgrades.increment(attribute);
        self.save();
        true
    }

    /// Forget all meta progression
    pub fn clear(&mut self) {
        self.data = MetaData::default();
        self.high_score = 0;
        if let Some(dir) = &self.dir {
            for file in [META_FILE, HIGH_SCORE_FILE] {
                if let Err(e) = remove_file(&dir.join(file)) {
                    log::warn!("{}", e);
                }
            }
        }
    }

    /// Write both files, logging instead of failing
    pub fn save(&self) {
        if let Err(e) = self.persist() {
            log::warn!("Failed to save meta data: {}", e);
        }
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        write_json(&dir.join(META_FILE), "meta data", &self.data)?;
        write_json(&dir.join(HIGH_SCORE_FILE), "high score", &self.high_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_absent_files_are_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetaStore::open(dir.path());
        assert_eq!(*store.data(), MetaData::default());
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn test_game_over_credits_points_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MetaStore::open(dir.path());

        assert_eq!(store.record_game_over(450), 4);
        assert_eq!(store.record_game_over(120), 1);
        assert_eq!(store.max_score(), 450);
        assert_eq!(store.skill_points(), 5);

        let reloaded = MetaStore::open(dir.path());
        assert_eq!(reloaded.max_score(), 450);
        assert_eq!(reloaded.high_score(), 450);
        assert_eq!(reloaded.skill_points(), 5);
    }

    #[test]
    fn test_purchase_upgrade() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MetaStore::open(dir.path());
        assert!(!store.purchase_upgrade(Attribute::Health));

        store.record_game_over(200);
        assert!(store.purchase_upgrade(Attribute::Health));
        assert!(store.purchase_upgrade(Attribute::Luck));
        assert!(!store.purchase_upgrade(Attribute::Luck));

        let reloaded = MetaStore::open(dir.path());
        assert_eq!(reloaded.upgrades().health, 1);
        assert_eq!(reloaded.upgrades().luck, 1);
        assert_eq!(reloaded.skill_points(), 0);
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(META_FILE), "not json at all").unwrap();
        fs::write(dir.path().join(HIGH_SCORE_FILE), "[]").unwrap();

        let store = MetaStore::open(dir.path());
        assert_eq!(*store.data(), MetaData::default());
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn test_partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(META_FILE),
            r#"{"maxScore": 300, "upgrades": {"criticalHit": 2}}"#,
        )
        .unwrap();

        let store = MetaStore::open(dir.path());
        assert_eq!(store.max_score(), 300);
        assert_eq!(store.skill_points(), 0);
        assert_eq!(store.upgrades().critical_hit, 2);
    }

    #[test]
    fn test_clear_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MetaStore::open(dir.path());
        store.record_game_over(900);
        store.clear();
        assert!(!dir.path().join(META_FILE).exists());
        assert_eq!(MetaStore::open(dir.path()).skill_points(), 0);
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = MetaStore::in_memory();
        store.record_game_over(250);
        assert_eq!(store.skill_points(), 2);
    }
}
