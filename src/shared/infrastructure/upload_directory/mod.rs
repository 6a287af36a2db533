// Single-slot storage for uploaded schedule files.
//
// Purpose
// - Give every upload a stable place on disk for the import to read from.
//
// Responsibilities
// - Only keep the latest upload: everything already in the directory is deleted first.
// - Refuse names that could escape the directory.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct UploadDirectory {
    root: PathBuf,
}

impl UploadDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Replaces the directory contents with `bytes` stored as `file_name`.
    pub async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, UploadError> {
        let file_name = validate_file_name(file_name)?;
        tokio::fs::create_dir_all(&self.root).await?;
        self.clear().await?;

        let path = self.root.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), size = bytes.len(), "upload stored");
        Ok(path)
    }

    async fn clear(&self) -> io::Result<()> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                tokio::fs::remove_dir_all(&path).await?;
            } else {
                tokio::fs::remove_file(&path).await?;
            }
        }
        Ok(())
    }
}

fn validate_file_name(file_name: &str) -> Result<&str, UploadError> {
    let trimmed = file_name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
        || trimmed.contains('\0')
    {
        return Err(UploadError::InvalidFileName(file_name.to_string()));
    }
    Ok(trimmed)
}
