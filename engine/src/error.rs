use std::path::PathBuf;

use thiserror::Error;

/// Failures at the save-slot boundary. Gameplay itself never errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access save slot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("save data is malformed: {0}")]
    Codec(#[from] serde_json::Error),
}
