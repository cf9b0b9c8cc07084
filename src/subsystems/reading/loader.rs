//! Process-lifetime cache in front of the link store.
//!
//! The first [`ReadingList::load`] issues one fetch; concurrent callers wait
//! on that same fetch. A successful result is kept for the life of the
//! process. A failure is logged, yields an empty list, and is not cached, so
//! a later visit may try again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono_tz::Tz;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use super::links::ReadingItem;
use super::record::LinkRecord;
use super::store::LinkStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded(usize),
    Empty,
}

pub struct ReadingList {
    store: LinkStore,
    cache: OnceCell<Arc<Vec<LinkRecord>>>,
    in_flight: AtomicBool,
    last_failed: AtomicBool,
    fetches: AtomicUsize,
}

/// Clears the in-flight flag even if the fetch future is dropped midway.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ReadingList {
    pub fn new(store: LinkStore) -> Self {
        Self {
            store,
            cache: OnceCell::new(),
            in_flight: AtomicBool::new(false),
            last_failed: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Records in store order, fetching at most once per successful load.
    pub async fn load(&self) -> Arc<Vec<LinkRecord>> {
        if let Some(hit) = self.cache.get() {
            debug!(count = hit.len(), "reading list cache hit");
            return hit.clone();
        }

        let result = self
            .cache
            .get_or_try_init(|| async {
                self.fetches.fetch_add(1, Ordering::SeqCst);
                let _guard = InFlight::enter(&self.in_flight);
                self.store.fetch_all().await.map(Arc::new)
            })
            .await;

        match result {
            Ok(records) => {
                self.last_failed.store(false, Ordering::SeqCst);
                info!(count = records.len(), store = self.store.kind(), "reading list loaded");
                records.clone()
            }
            Err(e) => {
                self.last_failed.store(true, Ordering::SeqCst);
                error!(store = self.store.kind(), error = %e, "error fetching reading list");
                Arc::new(Vec::new())
            }
        }
    }

    /// Loaded records prepared for display.
    pub async fn items(&self, tz: Tz) -> Vec<ReadingItem> {
        self.load()
            .await
            .iter()
            .map(|r| ReadingItem::from_record(r, tz))
            .collect()
    }

    pub fn state(&self) -> LoadState {
        if let Some(records) = self.cache.get() {
            return if records.is_empty() {
                LoadState::Empty
            } else {
                LoadState::Loaded(records.len())
            };
        }
        if self.in_flight.load(Ordering::SeqCst) {
            LoadState::Loading
        } else if self.last_failed.load(Ordering::SeqCst) {
            LoadState::Empty
        } else {
            LoadState::Idle
        }
    }

    /// Number of fetches issued to the store so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsystems::reading::store::FixedStore;
    use std::time::Duration;

    fn records() -> Vec<LinkRecord> {
        vec![
            LinkRecord::new("https://c.dev", "2025-03-01T00:00:00Z", "C"),
            LinkRecord::new("https://a.dev", "2025-02-01T00:00:00Z", "A"),
            LinkRecord::new("https://b.dev", "2025-01-01T00:00:00Z", "B"),
        ]
    }

    #[tokio::test]
    async fn load_keeps_store_order() {
        let list = ReadingList::new(LinkStore::Fixed(FixedStore::new(records())));
        assert_eq!(list.state(), LoadState::Idle);
        let titles: Vec<_> = list.load().await.iter().map(|r| r.title.clone()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
        assert_eq!(list.state(), LoadState::Loaded(3));
    }

    #[tokio::test]
    async fn second_load_hits_cache() {
        let list = ReadingList::new(LinkStore::Fixed(FixedStore::new(records())));
        list.load().await;
        list.load().await;
        list.items(chrono_tz::UTC).await;
        assert_eq!(list.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failure_renders_empty_and_is_not_cached() {
        let list = ReadingList::new(LinkStore::Fixed(FixedStore::failing("unreachable")));
        assert!(list.load().await.is_empty());
        assert_eq!(list.state(), LoadState::Empty);
        assert!(list.load().await.is_empty());
        assert_eq!(list.fetch_count(), 2);
    }

    #[tokio::test]
    async fn empty_table_is_empty_state() {
        let list = ReadingList::new(LinkStore::Fixed(FixedStore::new(Vec::new())));
        list.load().await;
        assert_eq!(list.state(), LoadState::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_loads_share_one_fetch() {
        let store = FixedStore::new(records()).with_delay(Duration::from_millis(200));
        let list = Arc::new(ReadingList::new(LinkStore::Fixed(store)));

        let first = tokio::spawn({
            let list = list.clone();
            async move { list.load().await.len() }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(list.state(), LoadState::Loading);

        let second = list.load().await.len();
        assert_eq!(first.await.unwrap(), 3);
        assert_eq!(second, 3);
        assert_eq!(list.fetch_count(), 1);
    }

    #[tokio::test]
    async fn items_are_display_ready() {
        let list = ReadingList::new(LinkStore::Fixed(FixedStore::new(records())));
        let items = list.items(chrono_tz::UTC).await;
        assert_eq!(items[0].base_domain, "c.dev");
        assert_eq!(items[0].date, "2025-03-01");
    }
}
