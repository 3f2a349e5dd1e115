//! Storage slot abstraction for the website builder.
//!
//! This crate provides a [`Storage`] trait over named key/value slots, the
//! durable medium behind the site collection. Each slot holds one opaque
//! string and is always read and written as a whole. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (local files today, anything key/value tomorrow)
//! - **Clean separation** between record bookkeeping and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with whole-slot `read()` and `write()` methods
//! - [`FsStorage`] implementation storing one file per slot with atomic replace
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use wb_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from(".wb"));
//! storage.write("website-builder-data", r#"{"websites":[]}"#)?;
//! let raw = storage.read("website-builder-data")?;
//! assert!(raw.is_some());
//! # Ok(())
//! # }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{ErrorStatus, Storage, StorageError, StorageErrorKind};
