//! `wb update` command implementation.

use clap::Args;
use wb_site::{SiteStatus, SiteUpdate};

use super::{Context, require_saved};
use crate::error::CliError;

/// Arguments for the update command.
#[derive(Args)]
pub(crate) struct UpdateArgs {
    /// Id of the site.
    id: String,

    /// New title.
    #[arg(long)]
    title: Option<String>,

    /// New display price.
    #[arg(long)]
    price: Option<String>,

    /// New status: published, active, pending, draft.
    #[arg(long)]
    status: Option<SiteStatus>,

    /// New publication flag.
    #[arg(long)]
    published: Option<bool>,
}

impl UpdateArgs {
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        let changes = SiteUpdate {
            title: self.title,
            price: self.price,
            status: self.status,
            published: self.published,
            ..SiteUpdate::default()
        };
        if changes.is_empty() {
            return Err(CliError::Validation(
                "Nothing to update: pass --title, --price, --status, or --published".to_owned(),
            ));
        }

        let record = require_saved(ctx.directory.update(&self.id, changes))?
            .ok_or_else(|| CliError::NotFound(format!("id {}", self.id)))?;

        ctx.output.success(&format!(
            "Updated \"{}\" ({}, {})",
            record.title, record.status, record.price
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use wb_site::{FormPayload, NewSite, WebsiteType};

    use super::*;
    use crate::commands::tests::context;

    fn args(id: &str) -> UpdateArgs {
        UpdateArgs {
            id: id.to_owned(),
            title: None,
            price: None,
            status: None,
            published: None,
        }
    }

    #[test]
    fn test_execute_updates_fields() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let created = ctx
            .directory
            .create(NewSite::new(FormPayload::new(WebsiteType::Others)))
            .into_value();

        let mut update = args(&created.id);
        update.price = Some("₹999".to_owned());
        update.status = Some(SiteStatus::Published);
        update.published = Some(true);
        update.execute(&ctx).unwrap();

        let stored = context(&temp_dir).directory.get_by_id(&created.id).unwrap();
        assert_eq!(stored.price, "₹999");
        assert_eq!(stored.status, SiteStatus::Published);
        assert!(stored.published);
        assert_eq!(stored.slug, created.slug);
    }

    #[test]
    fn test_execute_without_changes_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);

        let err = args("website_any").execute(&ctx).unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_execute_unknown_id_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let mut update = args("website_missing");
        update.title = Some("New".to_owned());

        let err = update.execute(&ctx).unwrap_err();

        assert_eq!(err.to_string(), "No site with id website_missing");
    }
}
