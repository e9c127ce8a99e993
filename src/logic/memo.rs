//! Single-entry memoization slot tagged by a dependency tuple.

use std::sync::Arc;

/// What: Cache slot holding one result and the dependency tuple that produced it.
///
/// Inputs:
/// - `get_or_compute(key, compute)` with the current dependency tuple
///
/// Output:
/// - The cached `Arc` when `key` equals the stored tag (by value), otherwise a
///   freshly computed one that replaces the entry.
///
/// Details:
/// - Returned results are shared `Arc`s, so consumers can detect "unchanged"
///   with `Arc::ptr_eq`.
/// - `refills` counts how often the slot was (re)populated.
#[derive(Debug)]
pub struct MemoSlot<K, V: ?Sized> {
    /// Tag and result of the last computation.
    entry: Option<(K, Arc<V>)>,
    /// Number of times the slot was filled.
    refills: u64,
}

impl<K: PartialEq, V: ?Sized> MemoSlot<K, V> {
    /// Empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entry: None,
            refills: 0,
        }
    }

    /// Cached result when the stored tag equals `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        match &self.entry {
            Some((tag, value)) if tag == key => Some(Arc::clone(value)),
            _ => None,
        }
    }

    /// Replace the entry.
    pub fn store(&mut self, key: K, value: Arc<V>) {
        self.entry = Some((key, value));
        self.refills += 1;
    }

    /// Remove and return the entry.
    pub fn take(&mut self) -> Option<(K, Arc<V>)> {
        self.entry.take()
    }

    /// Return the cached result for `key`, computing and storing it on a miss.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> Arc<V>) -> Arc<V> {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let value = compute();
        self.store(key, Arc::clone(&value));
        value
    }

    /// Number of times the slot was filled.
    #[must_use]
    pub const fn refills(&self) -> u64 {
        self.refills
    }
}

impl<K: PartialEq, V: ?Sized> Default for MemoSlot<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
