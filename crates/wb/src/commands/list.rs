//! `wb list` and `wb search` command implementations.

use clap::Args;
use wb_site::{SortDirection, SortField, StatusFilter, sort_records};

use super::{Context, print_records};
use crate::error::CliError;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Status tab: all, published, unpublished, draft.
    #[arg(short, long, default_value = "all")]
    status: StatusFilter,

    /// Sort column: title, slug, price, status, created, updated.
    #[arg(long)]
    sort: Option<SortField>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    desc: bool,
}

impl ListArgs {
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        let mut records = ctx.directory.filter_by_status(self.status);
        if let Some(field) = self.sort {
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            sort_records(&mut records, field, direction);
        }

        print_records(&ctx.output, &records);
        ctx.output.info(&format!("{} site(s)", records.len()));
        Ok(())
    }
}

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Text matched against title and slug, ignoring case.
    query: String,
}

impl SearchArgs {
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        let records = ctx.directory.search(&self.query);
        if records.is_empty() {
            ctx.output.warning(&format!("No sites match \"{}\"", self.query));
            return Ok(());
        }

        print_records(&ctx.output, &records);
        ctx.output.info(&format!("{} site(s)", records.len()));
        Ok(())
    }
}
