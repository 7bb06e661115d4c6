//! File-backed key/value storage for state that outlives the process.
//!
//! Each key is one JSON document (`<key>.json`) in the storage directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Key of the persisted cart lines.
pub const CART_ITEMS: &str = "cartItems";

/// Key of the persisted logged-in user.
pub const USER_INFO: &str = "userInfo";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored {key} is not valid JSON: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON documents in a directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read a document, `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be read or decoded.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let bytes = match std::fs::read(self.path(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    key: key.to_owned(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StorageError::Json {
                key: key.to_owned(),
                source,
            })
    }

    /// Write a document, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be encoded or written.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_owned(),
            source,
        };

        let json = serde_json::to_vec(value).map_err(|source| StorageError::Json {
            key: key.to_owned(),
            source,
        })?;
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        std::fs::write(self.path(key), json).map_err(io_err)
    }

    /// Remove a document. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be removed.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(StorageError::Io {
                key: key.to_owned(),
                source: e,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        let value: Option<Vec<u32>> = storage.load(CART_ITEMS).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_save_creates_directory_and_load_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));

        storage.save(CART_ITEMS, &vec![1_u32, 2]).unwrap();
        assert!(dir.path().join("nested/cartItems.json").exists());

        let value: Option<Vec<u32>> = storage.load(CART_ITEMS).unwrap();
        assert_eq!(value, Some(vec![1, 2]));
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("userInfo.json"), b"{not json").unwrap();

        let storage = LocalStorage::new(dir.path());
        let err = storage.load::<serde_json::Value>(USER_INFO).unwrap_err();
        assert!(matches!(err, StorageError::Json { .. }));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.save(USER_INFO, "x").unwrap();
        storage.remove(USER_INFO).unwrap();
        storage.remove(USER_INFO).unwrap();
        assert!(storage.load::<String>(USER_INFO).unwrap().is_none());
    }
}
