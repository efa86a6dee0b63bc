//! Storage directory and JSON file helpers

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::StoreError;

/// Directory the meta files live in.
///
/// The platform data directory when one can be resolved, else the current
/// directory.
pub fn default_storage_dir() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "vlkava", "Vlkava") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".")
    }
}

/// Read a JSON file; a missing file is `Ok(None)`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&data)
        .map(Some)
        .map_err(|e| StoreError::parse(path, e))
}

/// Write a value as pretty JSON, creating parent directories
pub fn write_json<T: Serialize>(path: &Path, what: &str, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::encode(what, e))?;
    fs::write(path, json).map_err(|e| StoreError::io(path, e))
}

/// Remove a file if it exists
pub fn remove_file(path: &Path) -> Result<(), StoreError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| StoreError::io(path, e))?;
    }
    Ok(())
}
