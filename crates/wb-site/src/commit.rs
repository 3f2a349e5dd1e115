//! Outcome of a mutating store operation.

use wb_storage::StorageError;

/// Result of a mutation: the value is always produced, and the variant says
/// whether the collection reached storage.
///
/// `Unsaved` means the change is visible to this session only and will be
/// lost on reload unless written again.
#[derive(Debug)]
#[must_use]
pub enum Commit<T> {
    /// Collection persisted (or nothing needed persisting).
    Saved(T),
    /// Collection could not be persisted.
    Unsaved {
        /// Value reflecting the attempted change.
        value: T,
        /// Why the write failed.
        error: StorageError,
    },
}

impl<T> Commit<T> {
    /// Build a commit from a value and the outcome of writing it.
    pub(crate) fn from_write(value: T, write: Result<(), StorageError>) -> Self {
        match write {
            Ok(()) => Self::Saved(value),
            Err(error) => Self::Unsaved { value, error },
        }
    }

    /// The produced value, saved or not.
    pub fn value(&self) -> &T {
        match self {
            Self::Saved(value) | Self::Unsaved { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Saved(value) | Self::Unsaved { value, .. } => value,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }

    /// The storage error of an unsaved commit.
    pub fn error(&self) -> Option<&StorageError> {
        match self {
            Self::Saved(_) => None,
            Self::Unsaved { error, .. } => Some(error),
        }
    }

    /// Split into the value and the storage error, if any.
    pub fn into_parts(self) -> (T, Option<StorageError>) {
        match self {
            Self::Saved(value) => (value, None),
            Self::Unsaved { value, error } => (value, Some(error)),
        }
    }

    /// Convert into a `Result`, discarding the value of an unsaved commit.
    pub fn into_result(self) -> Result<T, StorageError> {
        match self {
            Self::Saved(value) => Ok(value),
            Self::Unsaved { error, .. } => Err(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Commit<U> {
        match self {
            Self::Saved(value) => Commit::Saved(f(value)),
            Self::Unsaved { value, error } => Commit::Unsaved {
                value: f(value),
                error,
            },
        }
    }
}
