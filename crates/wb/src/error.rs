//! CLI error types.

use wb_config::ConfigError;
use wb_site::ExportError;
use wb_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("Changes were not saved: {0}")]
    Unsaved(#[from] StorageError),

    #[error("No site with {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}
