//! Per-request artifact storage.
//!
//! Every transformation request gets its own directory under the
//! store root, named by a generated request id, holding the uploaded
//! original and the pixelated output. Keying by request id is what
//! keeps concurrent uploads from clobbering each other; nothing here
//! cleans old requests up.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// File name for the uploaded bytes, stored exactly as received.
const ORIGINAL_FILE: &str = "original";

/// File name for the PNG-encoded pixelated output.
const PIXELATED_FILE: &str = "pixelated.png";

/// Errors from reading or writing stored artifacts.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Writing an artifact failed.
    #[error("could not save {path}: {source}")]
    Save {
        /// Path of the artifact that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Reading a stored artifact back failed.
    #[error("could not read {path}: {source}")]
    Read {
        /// Path of the artifact that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Filesystem store for request-scoped image artifacts.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `root`. The directory is created
    /// lazily on the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory all request artifacts live under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate a fresh request id.
    #[must_use]
    pub fn new_request_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// URL path where the pixelated output for `id` is served.
    #[must_use]
    pub fn download_path(id: &str) -> String {
        format!("/images/{id}/{PIXELATED_FILE}")
    }

    /// Save the uploaded bytes for a request, as received.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Save`] if the request directory cannot
    /// be created or the file cannot be written.
    pub async fn save_original(&self, id: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        self.save(id, ORIGINAL_FILE, bytes).await
    }

    /// Save the pixelated PNG for a request, overwriting any prior
    /// output for the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Save`] if the write fails.
    pub async fn save_pixelated(&self, id: &str, png: &[u8]) -> Result<PathBuf, StorageError> {
        self.save(id, PIXELATED_FILE, png).await
    }

    /// Read the uploaded bytes for a request back from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the file is missing or
    /// unreadable.
    pub async fn read_original(&self, id: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.root.join(id).join(ORIGINAL_FILE);
        tokio::fs::read(&path)
            .await
            .map_err(|source| StorageError::Read { path, source })
    }

    async fn save(&self, id: &str, name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let dir = self.root.join(id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::Save {
                path: dir.clone(),
                source,
            })?;

        let path = dir.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Save {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_and_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let id = ImageStore::new_request_id();

        store.save_original(&id, b"raw bytes").await.unwrap();
        let read_back = store.read_original(&id).await.unwrap();
        assert_eq!(read_back, b"raw bytes");
    }

    #[tokio::test]
    async fn artifacts_are_namespaced_per_request() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        store.save_original("a", b"first").await.unwrap();
        store.save_original("b", b"second").await.unwrap();

        assert_eq!(store.read_original("a").await.unwrap(), b"first");
        assert_eq!(store.read_original("b").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn save_pixelated_overwrites_prior_output() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        let path = store.save_pixelated("a", b"old").await.unwrap();
        store.save_pixelated("a", b"new").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn save_into_unwritable_root_fails() {
        // A regular file in the root's path makes directory creation
        // impossible for any user, root included.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let store = ImageStore::new(blocker.join("images"));
        let result = store.save_original("a", b"bytes").await;
        assert!(matches!(result, Err(StorageError::Save { .. })));
    }

    #[tokio::test]
    async fn read_missing_request_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let result = store.read_original("nope").await;
        assert!(matches!(result, Err(StorageError::Read { .. })));
    }

    #[test]
    fn download_path_is_request_scoped() {
        assert_eq!(
            ImageStore::download_path("abc-123"),
            "/images/abc-123/pixelated.png",
        );
    }

    #[test]
    fn request_ids_are_unique() {
        let a = ImageStore::new_request_id();
        let b = ImageStore::new_request_id();
        assert_ne!(a, b);
    }
}
