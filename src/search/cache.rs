//! Memoized search results
//!
//! Results are keyed on the deck *snapshot* (its `Arc` allocation) and the
//! raw query. Any mutation of a deck replaces its `Arc`, so stale results are
//! never returned; the old entry simply ages out of the bounded cache. Keys
//! hold a `Weak` so a cached entry never keeps a replaced deck's cards alive.

use super::filter::filter_indices;
use crate::model::Deck;
use moka::sync::Cache;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

/// Cache key compared by snapshot pointer
///
/// The weak reference pins the allocation, so the address cannot be reused by
/// a later snapshot while the key exists.
#[derive(Clone)]
struct SnapshotKey {
    deck: Weak<Deck>,
    query: String,
}

impl PartialEq for SnapshotKey {
    fn eq(&self, other: &Self) -> bool {
        self.deck.ptr_eq(&other.deck) && self.query == other.query
    }
}

impl Eq for SnapshotKey {}

impl Hash for SnapshotKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.deck.as_ptr().hash(state);
        self.query.hash(state);
    }
}

/// Bounded memo of `filter_indices` results
pub struct SearchCache {
    cache: Cache<SnapshotKey, Arc<[usize]>>,
}

impl SearchCache {
    /// Default number of (deck, query) results kept
    pub const DEFAULT_CAPACITY: u64 = 256;

    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_capacity).build(),
        }
    }

    /// Matching card positions for `query` in this deck snapshot
    pub fn filter(&self, deck: &Arc<Deck>, query: &str) -> Arc<[usize]> {
        let key = SnapshotKey {
            deck: Arc::downgrade(deck),
            query: query.to_string(),
        };
        self.cache
            .get_with(key, || Arc::from(filter_indices(deck, query)))
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
