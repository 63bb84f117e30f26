//! On-disk store for generated audio clips.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Append-only directory of `<uuid>.mp3` files.
///
/// Every clip gets a fresh random name, so concurrent writers never collide.
/// Files are never removed.
#[derive(Debug, Clone)]
pub struct AudioStore {
    root: PathBuf,
}

impl AudioStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` under a new unique file name and returns that name.
    ///
    /// The directory is created on first use.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the directory or file cannot be
    /// written.
    pub async fn save(&self, bytes: &[u8]) -> std::io::Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;
        let filename = format!("{}.mp3", Uuid::new_v4());
        tokio::fs::write(self.root.join(&filename), bytes).await?;
        Ok(filename)
    }

    /// Reads a previously saved clip. `Ok(None)` when no such file exists.
    ///
    /// Names that could escape the store directory are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns I/O errors other than "not found".
    pub async fn read(&self, filename: &str) -> std::io::Result<Option<Vec<u8>>> {
        if !is_plain_filename(filename) {
            return Ok(None);
        }
        match tokio::fs::read(self.root.join(filename)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}
