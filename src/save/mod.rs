//! Save/load system
//!
//! Meta progression, high score and codex, persisted as JSON files.

pub mod error;
pub mod storage;
pub mod profile;
pub mod codex;

pub use error::StoreError;
pub use storage::default_storage_dir;
pub use profile::{MetaData, MetaStore, HIGH_SCORE_FILE, META_FILE};
pub use codex::{Codex, CodexCategory, CodexEntry, CODEX_FILE};
