//! In-memory mirror of the site collection.
//!
//! [`SiteDirectory`] loads the collection once, serves reads from a snapshot,
//! and funnels every mutation through its [`SiteStore`]. The view is only
//! ever changed from the store's returned value, never from a guess.
//!
//! # Thread Safety
//!
//! - `records()` returns `Arc<Vec<SiteRecord>>` (just an Arc clone under a read lock)
//! - mutations hold the view lock while applying the store's result, so
//!   subscribers observe events in view order

use std::sync::{Arc, Mutex, RwLock, mpsc};

use crate::commit::Commit;
use crate::event::{DirectoryEvent, DirectoryEventReceiver};
use crate::model::SiteRecord;
use crate::query::{self, StatusFilter};
use crate::render::{RenderError, RenderableSite};
use crate::store::{NewSite, SiteStore, SiteUpdate};

/// Reactive cache over a [`SiteStore`].
pub struct SiteDirectory {
    store: Arc<SiteStore>,
    view: RwLock<Arc<Vec<SiteRecord>>>,
    subscribers: Mutex<Vec<mpsc::Sender<DirectoryEvent>>>,
}

impl SiteDirectory {
    /// Create a directory and load the collection from `store`.
    #[must_use]
    pub fn new(store: Arc<SiteStore>) -> Self {
        let records = store.list();
        tracing::debug!(count = records.len(), "Site directory loaded");
        Self {
            store,
            view: RwLock::new(Arc::new(records)),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SiteStore> {
        &self.store
    }

    /// Current snapshot of all records.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn records(&self) -> Arc<Vec<SiteRecord>> {
        Arc::clone(&self.view.read().unwrap())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Receive events for every subsequent change to the view.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn subscribe(&self) -> DirectoryEventReceiver {
        let (tx, rx) = mpsc::channel();
        self.subscribers.lock().unwrap().push(tx);
        DirectoryEventReceiver::new(rx)
    }

    /// Create a site and append the stored record to the view.
    ///
    /// The record is appended even when unsaved. Its slug and id are unique
    /// across both the stored collection and the view.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn create(&self, site: NewSite) -> Commit<SiteRecord> {
        let mut view = self.view.write().unwrap();
        let commit = self.store.create_with_known(site, view.as_slice());
        let record = commit.value();

        Arc::make_mut(&mut view).push(record.clone());
        self.publish(DirectoryEvent::Created {
            id: record.id.clone(),
            durable: commit.is_saved(),
        });
        commit
    }

    /// Update a site and replace it in the view with the stored record.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn update(&self, id: &str, changes: SiteUpdate) -> Commit<Option<SiteRecord>> {
        let mut view = self.view.write().unwrap();
        let commit = self.store.update(id, changes);

        if let Some(record) = commit.value() {
            let records = Arc::make_mut(&mut view);
            match records.iter_mut().find(|r| r.id == record.id) {
                Some(slot) => *slot = record.clone(),
                None => records.push(record.clone()),
            }
            self.publish(DirectoryEvent::Updated {
                id: record.id.clone(),
                durable: commit.is_saved(),
            });
        }
        commit
    }

    /// Delete a site; the view drops it only if the store removed it.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn delete(&self, id: &str) -> Commit<bool> {
        let mut view = self.view.write().unwrap();
        let commit = self.store.delete(id);

        if *commit.value() {
            Arc::make_mut(&mut view).retain(|r| r.id != id);
            self.publish(DirectoryEvent::Removed {
                id: id.to_owned(),
                durable: commit.is_saved(),
            });
        }
        commit
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<SiteRecord> {
        self.records().iter().find(|r| r.id == id).cloned()
    }

    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<SiteRecord> {
        self.records().iter().find(|r| r.slug == slug).cloned()
    }

    #[must_use]
    pub fn filter_by_status(&self, filter: StatusFilter) -> Vec<SiteRecord> {
        query::filter_by_status(&self.records(), filter)
    }

    /// Search the view. A blank query returns every record.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SiteRecord> {
        let records = self.records();
        if query.trim().is_empty() {
            return records.as_ref().clone();
        }
        query::search(&records, query)
    }

    /// Look up `slug` in the view for the public page.
    pub fn renderable(&self, slug: &str) -> Result<RenderableSite, RenderError> {
        RenderableSite::resolve(slug, self.get_by_slug(slug))
    }

    /// Discard the view and reload it from the store.
    ///
    /// Changes that were never persisted disappear.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn refresh(&self) -> Arc<Vec<SiteRecord>> {
        let mut view = self.view.write().unwrap();
        let records = Arc::new(self.store.list());
        *view = Arc::clone(&records);

        tracing::debug!(count = records.len(), "Site directory refreshed");
        self.publish(DirectoryEvent::Refreshed {
            count: records.len(),
        });
        records
    }

    /// Send `event` to live subscribers, dropping closed ones.
    fn publish(&self, event: DirectoryEvent) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;
    use wb_storage::{MockStorage, Storage};

    use super::*;
    use crate::model::SiteStatus;
    use crate::store::DEFAULT_SLOT;
    use crate::store::tests::titled;

    assert_impl_all!(SiteDirectory: Send, Sync);

    fn directory() -> (Arc<MockStorage>, SiteDirectory) {
        let storage = Arc::new(MockStorage::new());
        let store = Arc::new(SiteStore::new(Arc::clone(&storage) as Arc<dyn Storage>));
        (storage, SiteDirectory::new(store))
    }

    #[test]
    fn test_new_loads_existing_records() {
        let storage = Arc::new(MockStorage::new());
        let store = Arc::new(SiteStore::new(storage));
        let _ = store.create(NewSite::new(titled("Shop")));

        let dir = SiteDirectory::new(store);

        assert_eq!(dir.len(), 1);
        assert_eq!(dir.get_by_slug("shop").unwrap().title, "Shop");
    }

    #[test]
    fn test_create_appends_store_result() {
        let (_, dir) = directory();
        let events = dir.subscribe();

        let record = dir.create(NewSite::new(titled("Shop"))).into_value();

        assert_eq!(dir.records().as_ref(), &vec![record.clone()]);
        assert_eq!(dir.store().list(), vec![record.clone()]);
        assert_eq!(
            events.try_recv(),
            Some(DirectoryEvent::Created {
                id: record.id,
                durable: true
            })
        );
    }

    #[test]
    fn test_unsaved_create_is_visible_until_refresh() {
        let (storage, dir) = directory();
        let events = dir.subscribe();
        storage.fail_writes(true);

        let commit = dir.create(NewSite::new(titled("Shop")));

        assert!(!commit.is_saved());
        assert_eq!(dir.len(), 1);
        assert_eq!(
            events.try_recv(),
            Some(DirectoryEvent::Created {
                id: commit.value().id.clone(),
                durable: false
            })
        );

        dir.refresh();
        assert!(dir.is_empty());
        assert_eq!(events.try_recv(), Some(DirectoryEvent::Refreshed { count: 0 }));
    }

    #[test]
    fn test_create_with_unreadable_store_keeps_slugs_unique() {
        let (storage, dir) = directory();
        let first = dir.create(NewSite::new(titled("Shop"))).into_value();
        storage.fail_reads(true);

        let commit = dir.create(NewSite::new(titled("Shop")));

        assert!(!commit.is_saved());
        let second = commit.into_value();
        assert_eq!(second.slug, "shop-1");
        assert_eq!(dir.get_by_slug("shop").map(|r| r.id), Some(first.id));
        assert_eq!(dir.get_by_slug("shop-1").map(|r| r.id), Some(second.id));
    }

    #[test]
    fn test_update_replaces_matching_record() {
        let (_, dir) = directory();
        let a = dir.create(NewSite::new(titled("A"))).into_value();
        let b = dir.create(NewSite::new(titled("B"))).into_value();

        let updated = dir
            .update(&a.id, SiteUpdate::new().status(SiteStatus::Published).published(true))
            .into_value()
            .unwrap();

        assert_eq!(dir.records().as_ref(), &vec![updated, b]);
        assert_eq!(dir.filter_by_status(StatusFilter::Published).len(), 1);
    }

    #[test]
    fn test_update_missing_leaves_view_and_emits_nothing() {
        let (_, dir) = directory();
        let _ = dir.create(NewSite::new(titled("A")));
        let events = dir.subscribe();

        assert_eq!(dir.update("nope", SiteUpdate::new().title("X")).into_value(), None);
        assert_eq!(dir.len(), 1);
        assert_eq!(events.try_recv(), None);
    }

    #[test]
    fn test_delete_only_on_store_success() {
        let (_, dir) = directory();
        let a = dir.create(NewSite::new(titled("A"))).into_value();
        let events = dir.subscribe();

        assert!(dir.delete(&a.id).into_value());
        assert!(dir.is_empty());
        assert_eq!(
            events.try_recv(),
            Some(DirectoryEvent::Removed {
                id: a.id.clone(),
                durable: true
            })
        );

        assert!(!dir.delete(&a.id).into_value());
        assert_eq!(events.try_recv(), None);
    }

    #[test]
    fn test_delete_with_unreadable_store_keeps_view() {
        let (storage, dir) = directory();
        let a = dir.create(NewSite::new(titled("A"))).into_value();
        storage.fail_reads(true);

        let commit = dir.delete(&a.id);

        assert!(!commit.is_saved());
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_reads_come_from_view() {
        let (storage, dir) = directory();
        let a = dir.create(NewSite::new(titled("Acme Bakery"))).into_value();
        storage.fail_reads(true);

        assert_eq!(dir.get_by_id(&a.id), Some(a.clone()));
        assert_eq!(dir.search("BAKERY"), vec![a.clone()]);
        assert!(dir.renderable("acme-bakery").is_ok());
        assert!(dir.store().list().is_empty());
    }

    #[test]
    fn test_blank_search_returns_everything() {
        let (_, dir) = directory();
        let _ = dir.create(NewSite::new(titled("A")));
        let _ = dir.create(NewSite::new(titled("B")));

        assert_eq!(dir.search("").len(), 2);
        assert_eq!(dir.search("   ").len(), 2);
        assert!(dir.search("zzz").is_empty());
    }

    #[test]
    fn test_refresh_picks_up_external_changes() {
        let storage = Arc::new(MockStorage::new());
        let store = Arc::new(SiteStore::new(Arc::clone(&storage) as Arc<dyn Storage>));
        let dir = SiteDirectory::new(Arc::clone(&store));

        // Another store instance over the same slot
        let other = SiteStore::new(Arc::clone(&storage) as Arc<dyn Storage>);
        let _ = other.create(NewSite::new(titled("Elsewhere")));
        assert!(dir.is_empty());

        let records = dir.refresh();

        assert_eq!(records.len(), 1);
        assert!(storage.slot(DEFAULT_SLOT).is_some());
        assert!(dir.get_by_slug("elsewhere").is_some());
    }

    #[test]
    fn test_snapshot_is_stable_across_mutation() {
        let (_, dir) = directory();
        let before = dir.records();

        let _ = dir.create(NewSite::new(titled("A")));

        assert!(before.is_empty());
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let (_, dir) = directory();
        let kept = dir.subscribe();
        drop(dir.subscribe());

        let _ = dir.create(NewSite::new(titled("A")));

        assert_eq!(dir.subscribers.lock().unwrap().len(), 1);
        assert_eq!(kept.try_iter().count(), 1);
    }
}
