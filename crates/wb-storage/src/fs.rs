//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`], which keeps each slot in its own JSON file under a
//! root directory. Writes go to a sibling temp file first and are renamed into
//! place, so readers see either the old or the new content, never a torn write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File extension for slot files.
const SLOT_EXTENSION: &str = "json";

/// Filesystem storage implementation.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- website-builder-data.json      # slot "website-builder-data"
/// +-- website-builder-data.json.tmp  # transient, only during a write
/// ```
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), wb_storage::StorageError> {
/// use std::path::PathBuf;
/// use wb_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from(".wb")).with_quota(5 * 1024 * 1024);
/// storage.write("website-builder-data", "{}")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Root directory holding slot files.
    root: PathBuf,
    /// Maximum payload size in bytes, if limited.
    quota: Option<usize>,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root, quota: None }
    }

    /// Limit the size of a single slot payload.
    ///
    /// Writes larger than `bytes` fail with [`StorageErrorKind::QuotaExceeded`]
    /// and leave the previous content untouched.
    #[must_use]
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate a slot key.
    ///
    /// Keys map directly to file names, so only `[A-Za-z0-9._-]` is accepted
    /// and `..` is rejected to keep slots inside the root.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        let valid = !key.is_empty()
            && !key.contains("..")
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

        if valid {
            Ok(())
        } else {
            Err(StorageError::invalid_key(key).with_backend(BACKEND))
        }
    }

    /// Path of the file backing a slot.
    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{SLOT_EXTENSION}"))
    }

    fn io_error(err: std::io::Error, key: &str) -> StorageError {
        StorageError::io(err, Some(key)).with_backend(BACKEND)
    }
}

impl Storage for FsStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::validate_key(key)?;
        let path = self.slot_path(key);

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(e, key)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::validate_key(key)?;

        if let Some(quota) = self.quota
            && value.len() > quota
        {
            return Err(StorageError::new(StorageErrorKind::QuotaExceeded)
                .with_key(key)
                .with_backend(BACKEND));
        }

        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(e, key))?;

        let path = self.slot_path(key);
        let tmp = path.with_extension(format!("{SLOT_EXTENSION}.tmp"));

        if let Err(e) = fs::write(&tmp, value) {
            let _ = fs::remove_file(&tmp);
            return Err(Self::io_error(e, key));
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(Self::io_error(e, key));
        }

        tracing::debug!(key, bytes = value.len(), "Wrote storage slot");
        Ok(())
    }
}
