//! CLI command implementations.

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod export;
pub(crate) mod list;
pub(crate) mod show;
pub(crate) mod update;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use wb_config::{CliSettings, Config, StorageConfig};
use wb_site::{Commit, SiteDirectory, SiteRecord, SiteStore};
use wb_storage::FsStorage;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use create::CreateArgs;
pub(crate) use delete::DeleteArgs;
pub(crate) use export::ExportArgs;
pub(crate) use list::{ListArgs, SearchArgs};
pub(crate) use show::ShowArgs;
pub(crate) use update::UpdateArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover wb.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding site data (overrides config).
    #[arg(long, env = "WB_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Storage slot holding the site collection (overrides config).
    #[arg(long, global = true)]
    slot: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

impl GlobalArgs {
    /// Load configuration and open the site directory it points at.
    pub(crate) fn open(&self) -> Result<Context, CliError> {
        let cli_settings = CliSettings {
            data_dir: self.data_dir.clone(),
            slot: self.slot.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        Ok(Context::open(&config.storage_resolved))
    }
}

/// State shared by a command run.
pub(crate) struct Context {
    pub(crate) directory: SiteDirectory,
    pub(crate) output: Output,
}

impl Context {
    /// Open the site directory over the filesystem slot described by `config`.
    pub(crate) fn open(config: &StorageConfig) -> Self {
        tracing::info!(
            data_dir = %config.data_dir.display(),
            slot = %config.slot,
            "Opening site store"
        );

        let mut storage = FsStorage::new(config.data_dir.clone());
        if let Some(quota) = config.quota_bytes {
            storage = storage.with_quota(quota);
        }
        let store = SiteStore::new(Arc::new(storage)).with_slot(config.slot.clone());

        Self {
            directory: SiteDirectory::new(Arc::new(store)),
            output: Output::new(),
        }
    }
}

/// Unwrap a commit, turning an unsaved one into an error.
pub(crate) fn require_saved<T>(commit: Commit<T>) -> Result<T, CliError> {
    commit.into_result().map_err(CliError::from)
}

/// Print records as an aligned table on stdout.
pub(crate) fn print_records(output: &Output, records: &[SiteRecord]) {
    let title_width = column_width(records.iter().map(|r| r.title.as_str()), "TITLE");
    let slug_width = column_width(records.iter().map(|r| r.slug.as_str()), "SLUG");

    output.heading(&format!(
        "{:<title_width$}  {:<slug_width$}  {:<10}  {:<9}  {:<10}  ID",
        "TITLE", "SLUG", "PRICE", "STATUS", "UPDATED"
    ));
    for record in records {
        output.data(&format!(
            "{:<title_width$}  {:<slug_width$}  {:<10}  {:<9}  {:<10}  {}",
            record.title,
            record.slug,
            record.price,
            record.status.as_str(),
            record.updated_at.format("%Y-%m-%d").to_string(),
            record.id,
        ));
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}
