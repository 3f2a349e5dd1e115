//! `wb create` command implementation.

use clap::Args;
use wb_site::{FormPayload, NewSite, WebsiteType};

use super::{Context, require_saved};
use crate::error::CliError;

/// Arguments for the create command.
#[derive(Args)]
pub(crate) struct CreateArgs {
    /// Website type: digital-products, list-multiple, existing-products, others.
    #[arg(short = 't', long = "type", default_value = "others")]
    website_type: WebsiteType,

    /// Page title (existing-products and others).
    #[arg(long)]
    title: Option<String>,

    /// Price (digital-products and list-multiple).
    #[arg(long)]
    price: Option<String>,

    /// Requested slug; made unique if taken.
    #[arg(long)]
    slug: Option<String>,

    /// Publish immediately.
    #[arg(long)]
    publish: bool,
}

impl CreateArgs {
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        let payload = self.payload()?;
        let mut site = NewSite::new(payload).published(self.publish);
        if let Some(slug) = self.slug {
            site = site.with_slug(slug);
        }

        let record = require_saved(ctx.directory.create(site))?;

        ctx.output.success(&format!(
            "Created \"{}\" at {}",
            record.title,
            record.public_path()
        ));
        ctx.output.data(&record.id);
        Ok(())
    }

    /// Wizard answers carrying the title and price options.
    fn payload(&self) -> Result<FormPayload, CliError> {
        let mut payload = FormPayload::new(self.website_type);

        if let Some(title) = &self.title {
            let page = payload.page_mut().ok_or_else(|| {
                CliError::Validation(format!("{} sites have no page title", self.website_type))
            })?;
            page.page_title.clone_from(title);
        }
        if let Some(price) = &self.price {
            let pricing = payload.pricing_mut().ok_or_else(|| {
                CliError::Validation(format!("{} sites have no price", self.website_type))
            })?;
            pricing.price.clone_from(price);
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use wb_config::StorageConfig;

    use super::*;
    use crate::commands::tests::context;

    fn args(website_type: WebsiteType, title: Option<&str>, price: Option<&str>) -> CreateArgs {
        CreateArgs {
            website_type,
            title: title.map(str::to_owned),
            price: price.map(str::to_owned),
            slug: None,
            publish: false,
        }
    }

    #[test]
    fn test_payload_sets_title_for_page_types() {
        let payload = args(WebsiteType::Others, Some("Acme"), None)
            .payload()
            .unwrap();
        assert_eq!(payload.title(), Some("Acme"));
    }

    #[test]
    fn test_payload_sets_price_for_pricing_types() {
        let payload = args(WebsiteType::DigitalProducts, None, Some("₹499"))
            .payload()
            .unwrap();
        assert_eq!(payload.price(), Some("₹499"));
    }

    #[test]
    fn test_payload_rejects_unsupported_fields() {
        let err = args(WebsiteType::ListMultiple, Some("Acme"), None)
            .payload()
            .unwrap_err();
        assert_eq!(err.to_string(), "list-multiple sites have no page title");

        assert!(
            args(WebsiteType::Others, None, Some("10"))
                .payload()
                .is_err()
        );
    }

    #[test]
    fn test_execute_persists_site() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let mut create = args(WebsiteType::Others, Some("Acme Bakery"), None);
        create.publish = true;

        create.execute(&ctx).unwrap();

        let record = ctx.directory.get_by_slug("acme-bakery").unwrap();
        assert!(record.published);
        assert_eq!(
            context(&temp_dir).directory.get_by_slug("acme-bakery"),
            Some(record)
        );
    }

    #[test]
    fn test_execute_requested_slug() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let mut create = args(WebsiteType::Others, Some("Acme"), None);
        create.slug = Some("Grand Opening".to_owned());

        create.execute(&ctx).unwrap();

        assert!(ctx.directory.get_by_slug("grand-opening").is_some());
    }

    #[test]
    fn test_execute_unsaved_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = Context::open(&StorageConfig {
            data_dir: temp_dir.path().join("data"),
            quota_bytes: Some(16),
            ..StorageConfig::default()
        });

        let err = args(WebsiteType::Others, Some("Acme"), None)
            .execute(&ctx)
            .unwrap_err();

        assert!(matches!(err, CliError::Unsaved(_)));
        assert!(context(&temp_dir).directory.is_empty());
    }
}
