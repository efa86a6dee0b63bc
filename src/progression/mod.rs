//! Progression systems
//!
//! Run-level experience and the permanent upgrades carried between runs.

pub mod xp;
pub mod upgrades;

pub use xp::{apply_experience, score, xp_for_level};
pub use upgrades::PermanentUpgrades;
