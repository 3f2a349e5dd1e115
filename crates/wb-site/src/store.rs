//! Durable site collection over a storage slot.
//!
//! [`SiteStore`] is the only component that reads or writes the slot. Every
//! mutation reads the full collection, applies the change, and writes the
//! whole collection back, so slug uniqueness is always checked against the
//! live set of records.
//!
//! # Failure handling
//!
//! Reads never fail: an empty, unreadable, or malformed slot yields an empty
//! collection (logged). Mutations always produce their value and report
//! durability through [`Commit`]. When the slot cannot be read at all, the
//! write is skipped so an unavailable backend is never overwritten with a
//! partial collection.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wb_site::{FormPayload, NewSite, SiteStore, WebsiteType};
//! use wb_storage::FsStorage;
//!
//! let store = SiteStore::new(Arc::new(FsStorage::new(".wb".into())));
//! let commit = store.create(NewSite::new(FormPayload::new(WebsiteType::Others)));
//! println!("/sites/{}", commit.value().slug);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wb_storage::{Storage, StorageError, StorageErrorKind};

use crate::commit::Commit;
use crate::form::FormPayload;
use crate::model::{SiteRecord, SiteStatus};
use crate::query::{self, StatusFilter};
use crate::render::{RenderError, RenderableSite};
use crate::slug;

/// Storage slot holding the collection.
pub const DEFAULT_SLOT: &str = "website-builder-data";
/// Title used when the payload has none.
pub const DEFAULT_TITLE: &str = "Untitled Website";
/// Price used when the payload has none.
pub const DEFAULT_PRICE: &str = "₹0";
pub const DEFAULT_SALE: &str = "0";
pub const DEFAULT_REVENUE: &str = "₹0";

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Input for [`SiteStore::create`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewSite {
    pub payload: FormPayload,
    pub published: bool,
    /// Requested slug; normalized and made unique before use. A blank slug
    /// counts as none and the title is used instead.
    pub slug: Option<String>,
}

impl NewSite {
    /// Unpublished site built from wizard answers.
    #[must_use]
    pub fn new(payload: FormPayload) -> Self {
        Self {
            payload,
            published: false,
            slug: None,
        }
    }

    #[must_use]
    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// Partial update applied by [`SiteStore::update`].
///
/// `None` fields are left unchanged. `form_data` replaces the payload
/// wholesale and must be of the record's website type. Identity fields (`id`,
/// `slug`, `created_at`, `website_type`) and `updated_at` cannot be set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SiteUpdate {
    pub title: Option<String>,
    pub price: Option<String>,
    pub sale: Option<String>,
    pub revenue: Option<String>,
    pub status: Option<SiteStatus>,
    pub published: Option<bool>,
    pub form_data: Option<FormPayload>,
}

impl SiteUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    #[must_use]
    pub fn sale(mut self, sale: impl Into<String>) -> Self {
        self.sale = Some(sale.into());
        self
    }

    #[must_use]
    pub fn revenue(mut self, revenue: impl Into<String>) -> Self {
        self.revenue = Some(revenue.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: SiteStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    #[must_use]
    pub fn form_data(mut self, payload: FormPayload) -> Self {
        self.form_data = Some(payload);
        self
    }

    /// Whether no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(self, record: &mut SiteRecord) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(sale) = self.sale {
            record.sale = sale;
        }
        if let Some(revenue) = self.revenue {
            record.revenue = revenue;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(published) = self.published {
            record.published = published;
        }
        if let Some(payload) = self.form_data {
            record.form_data = Some(payload);
        }
    }
}

/// Persisted slot layout: `{ "websites": [...] }`.
#[derive(Deserialize)]
struct StoredCollection {
    #[serde(default)]
    websites: Vec<SiteRecord>,
}

/// Authority for durable site records.
pub struct SiteStore {
    storage: Arc<dyn Storage>,
    slot: String,
    clock: Arc<dyn Clock>,
}

impl SiteStore {
    /// Store over the [`DEFAULT_SLOT`] of `storage`, using the wall clock.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            slot: DEFAULT_SLOT.to_owned(),
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Every record in collection order.
    #[must_use]
    pub fn list(&self) -> Vec<SiteRecord> {
        self.load().unwrap_or_default()
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<SiteRecord> {
        self.list().into_iter().find(|r| r.id == id)
    }

    /// Exact slug lookup.
    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<SiteRecord> {
        self.list().into_iter().find(|r| r.slug == slug)
    }

    /// Create a record from wizard answers and append it to the collection.
    pub fn create(&self, site: NewSite) -> Commit<SiteRecord> {
        self.create_with_known(site, &[])
    }

    /// Like [`create`](Self::create), but the slug and id also avoid those of
    /// `known`.
    ///
    /// Callers holding their own copy of the collection pass it here so a
    /// record created while the slot is unreadable still gets a unique slug.
    /// `known` is never written.
    pub fn create_with_known(&self, site: NewSite, known: &[SiteRecord]) -> Commit<SiteRecord> {
        let (mut records, loaded) = self.load_for_write();
        let now = self.clock.now();

        let record = {
            let slugs: HashSet<&str> = records
                .iter()
                .chain(known)
                .map(|r| r.slug.as_str())
                .collect();
            let ids: HashSet<&str> = records.iter().chain(known).map(|r| r.id.as_str()).collect();
            let source = site
                .slug
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .or_else(|| site.payload.title())
                .unwrap_or(slug::FALLBACK_SLUG);

            SiteRecord {
                id: fresh_id(&ids),
                title: site.payload.title().unwrap_or(DEFAULT_TITLE).to_owned(),
                slug: slug::make_unique(source, &slugs),
                price: site.payload.price().unwrap_or(DEFAULT_PRICE).to_owned(),
                sale: DEFAULT_SALE.to_owned(),
                revenue: DEFAULT_REVENUE.to_owned(),
                status: if site.published {
                    SiteStatus::Published
                } else {
                    SiteStatus::Draft
                },
                website_type: site.payload.website_type(),
                form_data: Some(site.payload),
                created_at: now,
                updated_at: now,
                published: site.published,
            }
        };

        records.push(record.clone());
        tracing::debug!(id = %record.id, slug = %record.slug, "Creating site");
        self.commit(record, &records, loaded)
    }

    /// Merge `changes` into the record with `id`.
    ///
    /// Returns `None` (without writing) when no such record exists, or when
    /// `changes.form_data` belongs to a different website type than the record.
    pub fn update(&self, id: &str, changes: SiteUpdate) -> Commit<Option<SiteRecord>> {
        let (mut records, loaded) = self.load_for_write();
        let now = self.clock.now();

        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return match loaded {
                Ok(()) => Commit::Saved(None),
                Err(error) => Commit::Unsaved { value: None, error },
            };
        };

        if let Some(payload) = &changes.form_data
            && payload.website_type() != record.website_type
        {
            tracing::warn!(
                id,
                expected = %record.website_type,
                got = %payload.website_type(),
                "Rejecting form data of another website type"
            );
            return Commit::Saved(None);
        }

        changes.apply(record);
        record.updated_at = next_timestamp(record.updated_at, now);
        let updated = record.clone();

        tracing::debug!(id, "Updating site");
        self.commit(Some(updated), &records, loaded)
    }

    /// Remove the record with `id`. Writes only when a record was removed.
    pub fn delete(&self, id: &str) -> Commit<bool> {
        let (mut records, loaded) = self.load_for_write();
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            return match loaded {
                Ok(()) => Commit::Saved(false),
                Err(error) => Commit::Unsaved {
                    value: false,
                    error,
                },
            };
        }

        tracing::debug!(id, "Deleting site");
        self.commit(true, &records, loaded)
    }

    #[must_use]
    pub fn filter_by_status(&self, filter: StatusFilter) -> Vec<SiteRecord> {
        query::filter_by_status(&self.list(), filter)
    }

    /// Literal case-insensitive substring search over title and slug.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SiteRecord> {
        query::search(&self.list(), query)
    }

    /// Look up `slug` for the public page.
    pub fn renderable(&self, slug: &str) -> Result<RenderableSite, RenderError> {
        RenderableSite::resolve(slug, self.get_by_slug(slug))
    }

    /// Read and parse the slot.
    ///
    /// Malformed content counts as empty. Backend failures are returned so
    /// mutations can refuse to overwrite.
    fn load(&self) -> Result<Vec<SiteRecord>, StorageError> {
        let raw = match self.storage.read(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => {
                tracing::warn!(slot = %self.slot, error = %e, "Failed to read site collection");
                return Err(e);
            }
        };

        match serde_json::from_str::<StoredCollection>(&raw) {
            Ok(collection) => {
                tracing::debug!(
                    slot = %self.slot,
                    count = collection.websites.len(),
                    "Loaded site collection"
                );
                Ok(collection.websites)
            }
            Err(e) => {
                tracing::warn!(slot = %self.slot, error = %e, "Ignoring malformed site collection");
                Ok(Vec::new())
            }
        }
    }

    fn load_for_write(&self) -> (Vec<SiteRecord>, Result<(), StorageError>) {
        match self.load() {
            Ok(records) => (records, Ok(())),
            Err(e) => (Vec::new(), Err(e)),
        }
    }

    /// Persist `records` unless the preceding load failed.
    fn commit<T>(
        &self,
        value: T,
        records: &[SiteRecord],
        loaded: Result<(), StorageError>,
    ) -> Commit<T> {
        let written = loaded.and_then(|()| self.persist(records));
        if let Err(e) = &written {
            tracing::warn!(slot = %self.slot, error = %e, "Site collection not saved");
        }
        Commit::from_write(value, written)
    }

    fn persist(&self, records: &[SiteRecord]) -> Result<(), StorageError> {
        #[derive(Serialize)]
        struct Borrowed<'a> {
            websites: &'a [SiteRecord],
        }

        let json = serde_json::to_string(&Borrowed { websites: records }).map_err(|e| {
            StorageError::new(StorageErrorKind::Other)
                .with_key(&self.slot)
                .with_source(e)
        })?;
        self.storage.write(&self.slot, &json)
    }
}

/// Random id not present in `existing`.
fn fresh_id(existing: &HashSet<&str>) -> String {
    loop {
        let id = format!("website_{}", Uuid::new_v4().simple());
        if !existing.contains(id.as_str()) {
            return id;
        }
    }
}

/// `now`, or one millisecond past `previous` when the clock has not advanced.
fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + TimeDelta::milliseconds(1)
    }
}
