//! Site records, slug assignment, and the site directory for the website builder.
//!
//! This crate provides:
//! - [`slug`]: URL-safe slug normalization and collision suffixes
//! - [`SiteStore`]: the durable site collection over a [`wb_storage::Storage`] slot
//! - [`SiteDirectory`]: in-memory mirror of the store with change events
//! - Dashboard helpers: status filters, search, sorting, and CSV export
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use wb_site::{FormPayload, NewSite, SiteDirectory, SiteStore, WebsiteType};
//! use wb_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from(".wb")));
//! let directory = SiteDirectory::new(Arc::new(SiteStore::new(storage)));
//!
//! let mut payload = FormPayload::new(WebsiteType::Others);
//! if let Some(page) = payload.page_mut() {
//!     page.page_title = "Acme Bakery".to_owned();
//! }
//!
//! let commit = directory.create(NewSite::new(payload).published(true));
//! if !commit.is_saved() {
//!     eprintln!("Site kept for this session only");
//! }
//! println!("{}", commit.value().public_path());
//! ```

mod commit;
mod directory;
mod event;
mod export;
mod form;
mod media;
mod model;
mod query;
mod render;
pub mod slug;
mod store;
mod wizard;

pub use commit::Commit;
pub use directory::SiteDirectory;
pub use event::{DirectoryEvent, DirectoryEventReceiver};
pub use export::{ExportError, export_csv, export_file_name, write_csv};
pub use form::{
    AdvancedSettings, CheckoutType, DigitalFileType, DigitalFiles, FormPayload, PageDetails,
    PageSettings, PageStyle, PricingDetails, PricingType, ProductDetails,
};
pub use media::{
    DEFAULT_MAX_SIZE_MB, MediaError, MediaHandle, is_valid_url, validate_file, validate_image,
};
pub use model::{ParseEnumError, SiteRecord, SiteStatus, WebsiteType};
pub use query::{
    SortDirection, SortField, StatusFilter, filter_by_status, matches_query, search, sort_records,
};
pub use render::{RenderError, RenderableSite};
pub use store::{
    Clock, DEFAULT_PRICE, DEFAULT_REVENUE, DEFAULT_SALE, DEFAULT_SLOT, DEFAULT_TITLE, NewSite,
    SiteStore, SiteUpdate, SystemClock,
};
pub use wizard::{WizardStep, step_label};
