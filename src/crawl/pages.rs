// src/crawl/pages.rs
// =============================================================================
// Page records: what we learned about each fetched page.
//
// Every in-scope page URL (fragment stripped) gets exactly one record per run.
// The record is written once, by whichever task reaches the page first, and
// never changes after that. Other tasks pointing at the same page wait for it
// instead of fetching again.
//
// Rust concepts:
// - Arc<OnceCell<..>>: a shared slot that is filled exactly once
// - Mutex<HashMap>: only held long enough to look up or insert a slot
// - PoisonError::into_inner: keep using the map even if a holder panicked
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;

/// How a page fetch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Fetched with status < 400 and analyzed.
    Loaded,
    /// The body carried a meta-refresh redirect to `destination`.
    Redirected { destination: String },
    /// Transport error or status >= 400.
    Failed { cause: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub anchors: HashSet<String>,
    pub outcome: PageOutcome,
}

impl PageRecord {
    pub fn loaded(anchors: HashSet<String>) -> Self {
        Self {
            anchors,
            outcome: PageOutcome::Loaded,
        }
    }

    pub fn redirected(destination: impl Into<String>) -> Self {
        Self {
            anchors: HashSet::new(),
            outcome: PageOutcome::Redirected {
                destination: destination.into(),
            },
        }
    }

    pub fn failed(cause: impl Into<String>) -> Self {
        Self {
            anchors: HashSet::new(),
            outcome: PageOutcome::Failed {
                cause: cause.into(),
            },
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.outcome == PageOutcome::Loaded
    }

    pub fn has_anchor(&self, id: &str) -> bool {
        self.anchors.contains(id)
    }
}

pub type PageSlot = Arc<OnceCell<Arc<PageRecord>>>;

/// Page records keyed by fragment-stripped URL.
///
/// `slot()` is the atomic check-then-insert: the map lock is only held long
/// enough to find or create the cell, and the cell itself guarantees a single
/// initializer.
#[derive(Debug, Default)]
pub struct PageCache {
    slots: Mutex<HashMap<String, PageSlot>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, url: &str) -> PageSlot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(url.to_string()).or_default().clone()
    }

    pub fn get(&self, url: &str) -> Option<Arc<PageRecord>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(url).and_then(|cell| cell.get().cloned())
    }

    /// Number of pages with a finished record.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|cell| cell.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_is_shared_per_url() {
        let cache = PageCache::new();
        let a = cache.slot("http://x/a.html");
        let b = cache.slot("http://x/a.html");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &cache.slot("http://x/b.html")));
    }

    #[tokio::test]
    async fn test_record_written_once() {
        let cache = PageCache::new();
        let slot = cache.slot("http://x/a.html");
        assert!(cache.is_empty());

        slot.get_or_init(|| async { Arc::new(PageRecord::failed("HTTP 404")) })
            .await;
        slot.get_or_init(|| async { Arc::new(PageRecord::loaded(HashSet::new())) })
            .await;

        let record = cache.get("http://x/a.html").unwrap();
        assert!(!record.is_loaded());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_and_redirected_have_no_anchors() {
        assert!(PageRecord::failed("boom").anchors.is_empty());
        assert!(PageRecord::redirected("http://x/new.html").anchors.is_empty());
    }
}
