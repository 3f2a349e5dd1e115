//! Lookup contract for the public site page.
//!
//! The renderer asks for a slug and must show a not-found page both when no
//! record exists and when the record has no wizard answers to render.

use crate::form::FormPayload;
use crate::model::SiteRecord;

/// Error returned when a site cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// No record has this slug.
    #[error("Site not found: {0}")]
    NotFound(String),
    /// Record exists but carries no form payload.
    #[error("Site has no content to render: {0}")]
    MissingPayload(String),
}

/// A record guaranteed to carry a form payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderableSite {
    record: SiteRecord,
}

impl RenderableSite {
    /// Check a lookup result for `slug` against the render contract.
    pub(crate) fn resolve(slug: &str, record: Option<SiteRecord>) -> Result<Self, RenderError> {
        let record = record.ok_or_else(|| RenderError::NotFound(slug.to_owned()))?;
        if !record.is_renderable() {
            return Err(RenderError::MissingPayload(slug.to_owned()));
        }
        Ok(Self { record })
    }

    #[must_use]
    pub fn record(&self) -> &SiteRecord {
        &self.record
    }

    /// Form payload to project onto the template.
    ///
    /// # Panics
    ///
    /// Never in practice: construction requires the payload.
    #[must_use]
    pub fn payload(&self) -> &FormPayload {
        self.record
            .form_data
            .as_ref()
            .expect("renderable site always carries form data")
    }

    #[must_use]
    pub fn into_record(self) -> SiteRecord {
        self.record
    }
}
