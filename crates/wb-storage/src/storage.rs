//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for abstracting slot reads and writes,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Slot Convention
//!
//! A slot is addressed by a short key (e.g., `"website-builder-data"`) and holds
//! a single string. Backends never expose partial writes: a `write` either
//! replaces the whole slot or fails and leaves the previous content intact.

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Permission denied.
    PermissionDenied,
    /// Key is empty or contains characters the backend cannot address.
    InvalidKey,
    /// Payload exceeds the backend's size limit.
    QuotaExceeded,
    /// Slot content could not be decoded.
    Corrupt,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Retry guidance.
#[derive(Debug, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    /// Don't retry (invalid key, quota, corrupt data).
    #[default]
    Permanent,
    /// Retry immediately (timeout, interrupted write).
    Temporary,
    /// Retry with backoff (backend unavailable).
    Persistent,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Retry guidance.
    pub status: ErrorStatus,
    /// Slot key context (if applicable).
    pub key: Option<String>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            status: ErrorStatus::Permanent,
            key: None,
            backend: None,
            source: None,
        }
    }

    /// Attach slot key context.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set retry status.
    #[must_use]
    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create an invalid key error.
    #[must_use]
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::InvalidKey).with_key(key)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, key: Option<&str>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => StorageErrorKind::Timeout,
            std::io::ErrorKind::StorageFull | std::io::ErrorKind::QuotaExceeded => {
                StorageErrorKind::QuotaExceeded
            }
            std::io::ErrorKind::InvalidData => StorageErrorKind::Corrupt,
            _ => StorageErrorKind::Other,
        };
        let status = match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted => {
                ErrorStatus::Temporary
            }
            _ => ErrorStatus::Permanent,
        };
        let mut error = Self::new(kind).with_status(status).with_source(err);
        if let Some(k) = key {
            error = error.with_key(k);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (key: website-builder-data)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidKey => "Invalid key",
            StorageErrorKind::QuotaExceeded => "Quota exceeded",
            StorageErrorKind::Corrupt => "Corrupt data",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::Timeout => "Timeout",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction over named string slots.
///
/// Provides a unified interface for durable slots regardless of backend.
/// Every slot is read and written whole; there are no partial updates and no
/// secondary indices for a backend to keep in sync.
pub trait Storage: Send + Sync {
    /// Read the full content of a slot.
    ///
    /// Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read (e.g., permission
    /// denied, backend unavailable).
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the full content of a slot.
    ///
    /// On error the previous content must remain readable.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be stored (e.g., quota
    /// exceeded, invalid key).
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
