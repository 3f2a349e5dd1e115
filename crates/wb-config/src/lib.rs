//! Configuration management for the website builder.
//!
//! Parses `wb.toml` with serde and discovers it in the current directory or
//! any parent. CLI settings are applied during load via [`CliSettings`].
//!
//! ```toml
//! [storage]
//! dir = ".wb"                   # relative to the config file
//! slot = "website-builder-data"
//! quota_bytes = 5242880         # optional
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `storage.dir` and `storage.slot` support `${VAR}` (error if unset) and
//! `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wb.toml";

/// Data directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = ".wb";

/// Storage slot used when none is configured.
pub const DEFAULT_SLOT: &str = "website-builder-data";

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the data directory.
    pub data_dir: Option<PathBuf>,
    /// Override the storage slot.
    pub slot: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage section as written in TOML.
    storage: StorageConfigRaw,

    /// Resolved storage configuration (set after loading).
    #[serde(skip)]
    pub storage_resolved: StorageConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw storage configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StorageConfigRaw {
    dir: Option<String>,
    slot: Option<String>,
    quota_bytes: Option<usize>,
}

/// Resolved storage configuration with an absolute data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding slot files.
    pub data_dir: PathBuf,
    /// Slot holding the site collection.
    pub slot: String,
    /// Maximum slot size in bytes.
    pub quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            slot: DEFAULT_SLOT.to_owned(),
            quota_bytes: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`storage.dir`").
        field: String,
        /// Error message (e.g., "${`WB_DATA`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `wb.toml` in the current directory and its parents, falling back
    /// to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(data_dir) = &settings.data_dir {
            self.storage_resolved.data_dir.clone_from(data_dir);
        }
        if let Some(slot) = &settings.slot {
            self.storage_resolved.slot.clone_from(slot);
        }
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            storage: StorageConfigRaw::default(),
            storage_resolved: StorageConfig {
                data_dir: base.join(DEFAULT_DATA_DIR),
                ..StorageConfig::default()
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate resolved values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the slot is empty or the quota is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let storage = &self.storage_resolved;
        if storage.slot.is_empty() {
            return Err(ConfigError::Validation(
                "storage.slot cannot be empty".to_owned(),
            ));
        }
        if storage.quota_bytes == Some(0) {
            return Err(ConfigError::Validation(
                "storage.quota_bytes must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.storage.dir {
            self.storage.dir = Some(expand::expand_env(dir, "storage.dir")?);
        }
        if let Some(ref slot) = self.storage.slot {
            self.storage.slot = Some(expand::expand_env(slot, "storage.slot")?);
        }
        Ok(())
    }

    /// Resolve the data directory against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.storage_resolved = StorageConfig {
            data_dir: config_dir.join(self.storage.dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)),
            slot: self
                .storage
                .slot
                .clone()
                .unwrap_or_else(|| DEFAULT_SLOT.to_owned()),
            quota_bytes: self.storage.quota_bytes,
        };
    }
}
