//! Status filtering, text search, and sorting over site records.
//!
//! These are pure functions over slices so the store (reading the slot) and
//! the directory (reading its in-memory view) share one definition.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::{ParseEnumError, SiteRecord, SiteStatus};

/// Dashboard status tab.
///
/// Categories overlap: a draft is both [`Unpublished`](Self::Unpublished) and
/// [`Draft`](Self::Draft).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every record.
    #[default]
    All,
    /// `published` is true and status is exactly `Published`.
    Published,
    /// Complement of [`Published`](Self::Published).
    Unpublished,
    /// Status is `Draft`, regardless of the `published` flag.
    Draft,
}

impl StatusFilter {
    /// Whether `record` belongs to this category.
    #[must_use]
    pub fn matches(self, record: &SiteRecord) -> bool {
        let live = record.published && record.status == SiteStatus::Published;
        match self {
            Self::All => true,
            Self::Published => live,
            Self::Unpublished => !live,
            Self::Draft => record.status == SiteStatus::Draft,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "published" => Ok(Self::Published),
            "unpublished" => Ok(Self::Unpublished),
            "draft" => Ok(Self::Draft),
            _ => Err(ParseEnumError {
                kind: "status filter",
                value: s.to_owned(),
                expected: "all, published, unpublished, draft",
            }),
        }
    }
}

/// Records matching a status filter, in collection order.
#[must_use]
pub fn filter_by_status(records: &[SiteRecord], filter: StatusFilter) -> Vec<SiteRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// Whether `record`'s title or slug contains `query`, ignoring case.
#[must_use]
pub fn matches_query(record: &SiteRecord, query: &str) -> bool {
    contains_lowered(record, &query.to_lowercase())
}

/// Records whose title or slug contains `query`, ignoring case.
///
/// Matching is literal: the empty query matches every record.
#[must_use]
pub fn search(records: &[SiteRecord], query: &str) -> Vec<SiteRecord> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|r| contains_lowered(r, &query))
        .cloned()
        .collect()
}

fn contains_lowered(record: &SiteRecord, lowered_query: &str) -> bool {
    record.title.to_lowercase().contains(lowered_query)
        || record.slug.to_lowercase().contains(lowered_query)
}

/// Sortable column of the dashboard table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Title,
    Slug,
    Price,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl FromStr for SortField {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "slug" => Ok(Self::Slug),
            "price" => Ok(Self::Price),
            "status" => Ok(Self::Status),
            "created" | "created-at" => Ok(Self::CreatedAt),
            "updated" | "updated-at" => Ok(Self::UpdatedAt),
            _ => Err(ParseEnumError {
                kind: "sort field",
                value: s.to_owned(),
                expected: "title, slug, price, status, created, updated",
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction, used when a column header is clicked twice.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        })
    }
}

/// Sort records in place by one column. Stable; text columns compare
/// as plain strings, like the dashboard table.
pub fn sort_records(records: &mut [SiteRecord], field: SortField, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_by(a: &SiteRecord, b: &SiteRecord, field: SortField) -> Ordering {
    match field {
        SortField::Title => a.title.cmp(&b.title),
        SortField::Slug => a.slug.cmp(&b.slug),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}
