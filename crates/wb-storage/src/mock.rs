//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::storage::{ErrorStatus, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores slots in memory. Use the builder methods to seed slot content and
/// the failure switches to simulate an unavailable or full backend.
///
/// # Example
///
/// ```ignore
/// use wb_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_slot("website-builder-data", "not json");
/// storage.fail_writes(true);
///
/// assert!(storage.write("website-builder-data", "{}").is_err());
/// assert_eq!(storage.slot("website-builder-data").as_deref(), Some("not json"));
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    slots: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with raw content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_slot(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots
            .write()
            .unwrap()
            .insert(key.into(), value.into());
        self
    }

    /// Make every subsequent `read` fail with [`StorageErrorKind::Unavailable`].
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `write` fail with
    /// [`StorageErrorKind::QuotaExceeded`].
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw content of a slot, bypassing failure switches.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn slot(&self, key: &str) -> Option<String> {
        self.slots.read().unwrap().get(key).cloned()
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Storage for MockStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Unavailable)
                .with_status(ErrorStatus::Persistent)
                .with_key(key)
                .with_backend(BACKEND));
        }
        Ok(self.slot(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::QuotaExceeded)
                .with_key(key)
                .with_backend(BACKEND));
        }
        self.slots
            .write()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
