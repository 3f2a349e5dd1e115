//! Site record and its enumerations.
//!
//! [`SiteRecord`] is the durable entity stored in the site collection. It
//! serializes to the camelCase JSON layout used by the storage slot:
//!
//! ```text
//! { "id", "title", "slug", "price", "sale", "revenue", "status",
//!   "websiteType", "formData", "createdAt", "updatedAt", "published" }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::FormPayload;

/// Error returned when parsing one of the site enumerations from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value} (expected one of: {expected})")]
pub struct ParseEnumError {
    /// Enumeration name (e.g., "status").
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
    /// Accepted spellings, comma separated.
    pub expected: &'static str,
}

/// Descriptive status tag of a site.
///
/// Not a state machine: any status may follow any other through an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteStatus {
    Published,
    Active,
    Pending,
    Draft,
}

impl SiteStatus {
    /// Display name, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "Published",
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Draft => "Draft",
        }
    }
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "published" => Ok(Self::Published),
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "draft" => Ok(Self::Draft),
            _ => Err(ParseEnumError {
                kind: "status",
                value: s.to_owned(),
                expected: "published, active, pending, draft",
            }),
        }
    }
}

/// Category chosen at the start of the wizard.
///
/// Fixed at creation; decides which wizard steps (and therefore which
/// [`FormPayload`] variant) apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WebsiteType {
    DigitalProducts,
    ListMultiple,
    ExistingProducts,
    #[default]
    Others,
}

impl WebsiteType {
    /// All website types in wizard order.
    pub const ALL: [Self; 4] = [
        Self::DigitalProducts,
        Self::ListMultiple,
        Self::ExistingProducts,
        Self::Others,
    ];

    /// Serialized name (e.g., `"digital-products"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DigitalProducts => "digital-products",
            Self::ListMultiple => "list-multiple",
            Self::ExistingProducts => "existing-products",
            Self::Others => "others",
        }
    }
}

impl fmt::Display for WebsiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebsiteType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "website type",
                value: s.to_owned(),
                expected: "digital-products, list-multiple, existing-products, others",
            })
    }
}

/// A generated website: metadata plus the wizard answers it was built from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    /// Opaque unique identifier, immutable.
    pub id: String,
    /// Human-readable name.
    pub title: String,
    /// URL-safe unique key, assigned at creation.
    pub slug: String,
    /// Display price (e.g., "₹499").
    pub price: String,
    /// Display sale count.
    pub sale: String,
    /// Display revenue.
    pub revenue: String,
    /// Descriptive status tag.
    pub status: SiteStatus,
    /// Website category, fixed at creation.
    pub website_type: WebsiteType,
    /// Wizard answers. `None` makes the record unrenderable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<FormPayload>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last mutation instant, never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
    /// Publication flag, conventionally consistent with `status`.
    pub published: bool,
}

impl SiteRecord {
    /// Public URL path of the rendered site (`/sites/<slug>`).
    #[must_use]
    pub fn public_path(&self) -> String {
        format!("/sites/{}", self.slug)
    }

    /// Whether the record carries the payload needed for rendering.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.form_data.is_some()
    }

    /// Build the unsaved record shown while the wizard is still open.
    ///
    /// Uses the `pageUrl` setting as slug when present, and never touches
    /// the store.
    #[must_use]
    pub fn preview(payload: FormPayload, now: DateTime<Utc>) -> Self {
        Self {
            id: "preview".to_owned(),
            title: payload.title().unwrap_or("Untitled page").to_owned(),
            slug: payload.page_url().unwrap_or("preview-page").to_owned(),
            price: payload.price().unwrap_or("0").to_owned(),
            sale: "0".to_owned(),
            revenue: "0".to_owned(),
            status: SiteStatus::Draft,
            website_type: payload.website_type(),
            form_data: Some(payload),
            created_at: now,
            updated_at: now,
            published: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_status_serializes_as_display_name() {
        assert_eq!(serde_json::to_value(SiteStatus::Published).unwrap(), json!("Published"));
        assert_eq!(serde_json::to_value(SiteStatus::Draft).unwrap(), json!("Draft"));
    }

    #[test]
    fn test_status_from_str_is_case_insensitive() {
        assert_eq!("published".parse::<SiteStatus>(), Ok(SiteStatus::Published));
        assert_eq!("PENDING".parse::<SiteStatus>(), Ok(SiteStatus::Pending));
        let err = "archived".parse::<SiteStatus>().unwrap_err();
        assert_eq!(err.kind, "status");
        assert_eq!(err.value, "archived");
    }

    #[test]
    fn test_website_type_round_trips_names() {
        for t in WebsiteType::ALL {
            assert_eq!(t.as_str().parse::<WebsiteType>(), Ok(t));
            assert_eq!(serde_json::to_value(t).unwrap(), json!(t.as_str()));
        }
        assert!("blog".parse::<WebsiteType>().is_err());
    }

    #[test]
    fn test_website_type_default_is_others() {
        assert_eq!(WebsiteType::default(), WebsiteType::Others);
    }

    #[test]
    fn test_public_path() {
        let now = Utc::now();
        let mut record = SiteRecord::preview(FormPayload::new(WebsiteType::Others), now);
        record.slug = "acme-bakery".to_owned();

        assert_eq!(record.public_path(), "/sites/acme-bakery");
    }

    #[test]
    fn test_preview_defaults() {
        let now = Utc::now();
        let record = SiteRecord::preview(FormPayload::new(WebsiteType::ExistingProducts), now);

        assert_eq!(record.id, "preview");
        assert_eq!(record.title, "Untitled page");
        assert_eq!(record.slug, "preview-page");
        assert_eq!(record.price, "0");
        assert_eq!(record.status, SiteStatus::Draft);
        assert_eq!(record.website_type, WebsiteType::ExistingProducts);
        assert!(!record.published);
        assert!(record.is_renderable());
    }

    #[test]
    fn test_preview_uses_page_url_and_title() {
        let mut payload = FormPayload::new(WebsiteType::Others);
        if let Some(page) = payload.page_mut() {
            page.page_title = "Acme".to_owned();
        }
        if let Some(advanced) = payload.advanced_mut() {
            advanced.page_url = "acme-launch".to_owned();
        }

        let record = SiteRecord::preview(payload, Utc::now());

        assert_eq!(record.title, "Acme");
        assert_eq!(record.slug, "acme-launch");
    }

    #[test]
    fn test_record_json_layout() {
        let now: DateTime<Utc> = "2024-05-01T10:00:00Z".parse().unwrap();
        let record = SiteRecord {
            id: "website_1".to_owned(),
            title: "Shop".to_owned(),
            slug: "shop".to_owned(),
            price: "₹0".to_owned(),
            sale: "0".to_owned(),
            revenue: "₹0".to_owned(),
            status: SiteStatus::Draft,
            website_type: WebsiteType::Others,
            form_data: None,
            created_at: now,
            updated_at: now,
            published: false,
        };

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "website_1",
                "title": "Shop",
                "slug": "shop",
                "price": "₹0",
                "sale": "0",
                "revenue": "₹0",
                "status": "Draft",
                "websiteType": "others",
                "createdAt": "2024-05-01T10:00:00Z",
                "updatedAt": "2024-05-01T10:00:00Z",
                "published": false
            })
        );
        let back: SiteRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
