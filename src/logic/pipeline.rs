//! Two-stage memoized pipeline: filter, then stable sort.
//!
//! Each stage lives in a [`MemoSlot`] tagged with its dependency tuple:
//! - filter: collection identity, committed term, filter selections
//! - sort: identity of the filter result, sort key name
//!
//! A stage only runs when its tuple changed. Because the sort tuple contains
//! the filter result's `Arc`, an unchanged filter stage also keeps the sort
//! stage cached. Previous filter results are kept in a small LRU so that
//! returning to an earlier term (backspacing) does not rerun the predicate.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use super::memo::MemoSlot;
use super::ordering::{Comparator, sort_indices};
use super::predicate::{Predicate, Selections};

/// Dependency tuple of the filter stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterDeps {
    /// Address of the collection allocation.
    collection: usize,
    /// Committed search term.
    term: String,
    /// Filter selections at computation time.
    selections: Selections,
}

/// Dependency tuple of the sort stage.
#[derive(Debug, Clone)]
pub struct SortDeps {
    /// Filter result the ordering was computed from (compared by identity).
    filtered: Arc<[usize]>,
    /// Sort key name.
    key: String,
}

impl PartialEq for SortDeps {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.filtered, &other.filtered) && self.key == other.key
    }
}

/// Counters describing how much work the pipeline actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Times the predicate ran over the collection.
    pub filter_runs: u64,
    /// Times the filter stage was served from the history cache.
    pub history_hits: u64,
    /// Times a sort ran.
    pub sort_runs: u64,
}

/// What: Memoized filter → sort computation over one immutable collection.
///
/// Inputs:
/// - `collection`: Records, fixed for the lifetime of the pipeline
/// - `history`: Capacity of the previous-filter-result cache (0 disables it)
///
/// Output:
/// - `filtered` and `ordered` return shared index slices into the collection.
///
/// Details:
/// - Repeated reads with unchanged dependencies return the same `Arc` and do
///   not bump `stats`.
pub struct Pipeline<T> {
    /// Source records.
    collection: Arc<[T]>,
    /// Filter stage cache.
    filter_slot: MemoSlot<FilterDeps, [usize]>,
    /// Sort stage cache.
    sort_slot: MemoSlot<SortDeps, [usize]>,
    /// Earlier filter results keyed by their dependency tuple.
    history: Option<LruCache<FilterDeps, Arc<[usize]>>>,
    /// Work counters.
    stats: PipelineStats,
}

impl<T> Pipeline<T> {
    /// Create a pipeline over `collection`.
    #[must_use]
    pub fn new(collection: Arc<[T]>, history: usize) -> Self {
        Self {
            collection,
            filter_slot: MemoSlot::new(),
            sort_slot: MemoSlot::new(),
            history: NonZeroUsize::new(history).map(LruCache::new),
            stats: PipelineStats::default(),
        }
    }

    /// Source records.
    #[must_use]
    pub const fn collection(&self) -> &Arc<[T]> {
        &self.collection
    }

    /// Work counters.
    #[must_use]
    pub const fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// What: Filter stage.
    ///
    /// Inputs:
    /// - `predicate`: Match rules
    /// - `term`: Committed search term
    /// - `selections`: Current filter selections
    ///
    /// Output:
    /// - Ascending indices of matching records.
    ///
    /// Details:
    /// - Lookup order: current slot, history cache, then a fresh predicate run.
    /// - The displaced slot entry is moved into the history cache.
    pub fn filtered(
        &mut self,
        predicate: &Predicate<T>,
        term: &str,
        selections: &Selections,
    ) -> Arc<[usize]> {
        let deps = FilterDeps {
            collection: self.collection.as_ptr() as usize,
            term: term.to_string(),
            selections: selections.clone(),
        };
        if let Some(hit) = self.filter_slot.get(&deps) {
            return hit;
        }
        if let Some((old_deps, old)) = self.filter_slot.take()
            && let Some(history) = self.history.as_mut()
        {
            history.put(old_deps, old);
        }
        let cached = self
            .history
            .as_mut()
            .and_then(|history| history.get(&deps).cloned());
        let result = if let Some(hit) = cached {
            self.stats.history_hits += 1;
            tracing::debug!(term, matched = hit.len(), "filter stage served from history");
            hit
        } else {
            self.stats.filter_runs += 1;
            let result: Arc<[usize]> = predicate.filter(&self.collection, term, selections).into();
            tracing::debug!(
                term,
                matched = result.len(),
                total = self.collection.len(),
                "filter stage recomputed"
            );
            result
        };
        self.filter_slot.store(deps, Arc::clone(&result));
        result
    }

    /// What: Sort stage.
    ///
    /// Inputs:
    /// - `filtered`: Result of [`Pipeline::filtered`]
    /// - `key`: Active sort key name
    /// - `compare`: Comparator for `key`
    ///
    /// Output:
    /// - Stable permutation of `filtered`.
    pub fn ordered(
        &mut self,
        filtered: &Arc<[usize]>,
        key: &str,
        compare: &Comparator<T>,
    ) -> Arc<[usize]> {
        let deps = SortDeps {
            filtered: Arc::clone(filtered),
            key: key.to_string(),
        };
        let collection = &self.collection;
        let stats = &mut self.stats;
        self.sort_slot.get_or_compute(deps, || {
            stats.sort_runs += 1;
            let ordered = sort_indices(collection, filtered, compare.as_ref());
            tracing::debug!(key, len = ordered.len(), "sort stage recomputed");
            ordered.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::ordering::SortKey;
    use crate::logic::predicate::{DiscreteFilter, EmptySearchPolicy, TextField};

    #[derive(Debug)]
    struct Note {
        text: &'static str,
        size: u32,
        pinned: bool,
    }

    fn notes() -> Arc<[Note]> {
        vec![
            Note { text: "cat", size: 3, pinned: false },
            Note { text: "car", size: 1, pinned: true },
            Note { text: "dog", size: 2, pinned: false },
            Note { text: "cart", size: 1, pinned: false },
        ]
        .into()
    }

    fn predicate() -> Predicate<Note> {
        Predicate::new(
            vec![TextField::new("text", |n: &Note| n.text)],
            vec![DiscreteFilter::require_flag("pinned", |n: &Note| n.pinned)],
            EmptySearchPolicy::ShowAll,
        )
    }

    fn by_size() -> Comparator<Note> {
        let (_, cmp) = SortKey::ascending("size", |n: &Note| n.size).into_parts();
        cmp.expect("comparator declared")
    }

    #[test]
    /// What: Unchanged dependency tuples return identical Arcs without rerunning either stage.
    ///
    /// Inputs:
    /// - Two reads with term "ca" and sort "size".
    ///
    /// Output:
    /// - Pointer-equal results; one filter run and one sort run in total.
    fn repeated_reads_are_memoized() {
        let p = predicate();
        let cmp = by_size();
        let mut pipe = Pipeline::new(notes(), 4);
        let sel = Selections::new();
        let f1 = pipe.filtered(&p, "ca", &sel);
        let o1 = pipe.ordered(&f1, "size", &cmp);
        let f2 = pipe.filtered(&p, "ca", &sel);
        let o2 = pipe.ordered(&f2, "size", &cmp);
        assert!(Arc::ptr_eq(&f1, &f2));
        assert!(Arc::ptr_eq(&o1, &o2));
        assert_eq!(&*f1, &[0, 1, 3]);
        assert_eq!(&*o1, &[1, 3, 0]);
        assert_eq!(
            pipe.stats(),
            PipelineStats {
                filter_runs: 1,
                history_hits: 0,
                sort_runs: 1
            }
        );
    }

    #[test]
    /// What: Changing only the sort key reruns the sort but not the filter.
    fn sort_key_change_only_reruns_sort() {
        let p = predicate();
        let cmp = by_size();
        let mut pipe = Pipeline::new(notes(), 0);
        let sel = Selections::new();
        let f = pipe.filtered(&p, "", &sel);
        let _ = pipe.ordered(&f, "size", &cmp);
        let _ = pipe.ordered(&f, "size-again", &cmp);
        assert_eq!(pipe.stats().filter_runs, 1);
        assert_eq!(pipe.stats().sort_runs, 2);
    }

    #[test]
    /// What: Returning to an earlier term is served from history with the original Arc.
    ///
    /// Inputs:
    /// - Terms "car" -> "ca" -> "car" with history capacity 4, then the same with history off.
    ///
    /// Output:
    /// - With history: two predicate runs and one history hit; the third result is the first Arc.
    /// - Without history: three predicate runs.
    fn backspace_hits_history() {
        let p = predicate();
        let sel = Selections::new();
        let mut pipe = Pipeline::new(notes(), 4);
        let first = pipe.filtered(&p, "car", &sel);
        let _ = pipe.filtered(&p, "ca", &sel);
        let again = pipe.filtered(&p, "car", &sel);
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(pipe.stats().filter_runs, 2);
        assert_eq!(pipe.stats().history_hits, 1);

        let mut no_history = Pipeline::new(notes(), 0);
        let _ = no_history.filtered(&p, "car", &sel);
        let _ = no_history.filtered(&p, "ca", &sel);
        let _ = no_history.filtered(&p, "car", &sel);
        assert_eq!(no_history.stats().filter_runs, 3);
        assert_eq!(no_history.stats().history_hits, 0);
    }

    #[test]
    /// What: Selections are part of the filter tuple.
    fn selection_change_reruns_filter() {
        let p = predicate();
        let mut pipe = Pipeline::new(notes(), 0);
        let mut sel = Selections::new();
        let all = pipe.filtered(&p, "ca", &sel);
        sel.insert("pinned".into(), true.into());
        let pinned = pipe.filtered(&p, "ca", &sel);
        assert_eq!(&*all, &[0, 1, 3]);
        assert_eq!(&*pinned, &[1]);
        assert_eq!(pipe.stats().filter_runs, 2);
    }
}
