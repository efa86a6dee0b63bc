//! Storage errors

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure reading or writing a persisted file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to encode {what}: {message}")]
    Encode { what: String, message: String },
}

impl StoreError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: &Path, message: impl ToString) -> Self {
        StoreError::Parse {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn encode(what: &str, message: impl ToString) -> Self {
        StoreError::Encode {
            what: what.to_string(),
            message: message.to_string(),
        }
    }
}
