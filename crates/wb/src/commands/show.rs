//! `wb show` command implementation.

use clap::Args;
use wb_site::RenderError;

use super::Context;
use crate::error::CliError;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Slug of the site.
    slug: String,
}

impl ShowArgs {
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        let record = ctx
            .directory
            .get_by_slug(&self.slug)
            .ok_or_else(|| CliError::NotFound(format!("slug {}", self.slug)))?;
        let output = &ctx.output;

        output.heading(&record.title);
        output.data(&format!("id:        {}", record.id));
        output.data(&format!("slug:      {}", record.slug));
        output.data(&format!("path:      {}", record.public_path()));
        output.data(&format!("type:      {}", record.website_type));
        output.data(&format!("status:    {}", record.status));
        output.data(&format!("published: {}", record.published));
        output.data(&format!("price:     {}", record.price));
        output.data(&format!("sale:      {}", record.sale));
        output.data(&format!("revenue:   {}", record.revenue));
        output.data(&format!("created:   {}", record.created_at.to_rfc3339()));
        output.data(&format!("updated:   {}", record.updated_at.to_rfc3339()));

        let steps: Vec<&str> = record
            .website_type
            .step_flow()
            .iter()
            .map(|s| s.label())
            .collect();
        output.data(&format!("wizard:    {}", steps.join(" > ")));

        if let Err(RenderError::MissingPayload(_)) = ctx.directory.renderable(&self.slug) {
            output.warning("Site has no form data and cannot be rendered");
        }
        Ok(())
    }
}
