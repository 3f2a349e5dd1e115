//! `wb export` command implementation.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;
use wb_site::{StatusFilter, export_file_name, write_csv};

use super::Context;
use crate::error::CliError;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Output file, or `-` for stdout (default: websites-<date>.csv).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Status tab to export: all, published, unpublished, draft.
    #[arg(short, long, default_value = "all")]
    status: StatusFilter,
}

impl ExportArgs {
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        let records = ctx.directory.filter_by_status(self.status);

        let path = self
            .output
            .unwrap_or_else(|| PathBuf::from(export_file_name(chrono::Local::now().date_naive())));

        if path.as_os_str() == "-" {
            write_csv(&records, std::io::stdout().lock())?;
            return Ok(());
        }

        let file = File::create(&path)?;
        write_csv(&records, BufWriter::new(file))?;
        ctx.output.success(&format!(
            "Exported {} site(s) to {}",
            records.len(),
            path.display()
        ));
        Ok(())
    }
}
