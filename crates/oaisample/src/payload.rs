//! Upload payloads read from disk.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
#[error("failed to read {}: {source}", path.display())]
pub struct PayloadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Read a whole file into memory.
pub async fn read_payload(path: &Path) -> Result<Vec<u8>, PayloadError> {
    fs::read(path).await.map_err(|source| PayloadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Upload name for `path` when the caller does not supply one.
pub fn default_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string())
}
