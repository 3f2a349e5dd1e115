//! `wb delete` command implementation.

use clap::Args;

use super::{Context, require_saved};
use crate::error::CliError;

/// Arguments for the delete command.
#[derive(Args)]
pub(crate) struct DeleteArgs {
    /// Id of the site.
    id: String,
}

impl DeleteArgs {
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        if !require_saved(ctx.directory.delete(&self.id))? {
            return Err(CliError::NotFound(format!("id {}", self.id)));
        }

        ctx.output.success(&format!("Deleted {}", self.id));
        Ok(())
    }
}
