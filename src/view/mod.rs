//! View coordinator: owns view parameters and turns them into snapshots.
//!
//! Event handlers (`set_search_term`, `set_filter`, `set_sort_key`,
//! `load_more`, `reset`) mutate parameters; `current` pulls a snapshot,
//! recomputing pipeline stages only when their dependencies moved.
//!
//! Window resets happen on every change of the committed term, a filter
//! selection, or the sort key. Load more never touches the caches.

pub mod config;
pub mod types;

use std::sync::Arc;
use std::time::{Duration, Instant};

pub use config::{DEFAULT_FILTER_HISTORY, DEFAULT_WINDOW_SIZE, ViewConfig};
pub use types::{ViewPhase, ViewSnapshot};

use crate::debounce::{Clock, Debouncer, SystemClock};
use crate::error::ViewError;
use crate::logic::{
    Comparator, EmptySearchPolicy, FilterValue, Pipeline, PipelineStats, Predicate, Selections,
    Window,
};

/// What: One list view over an immutable collection.
///
/// Inputs:
/// - `collection`: Records, fixed for the life of the view
/// - `config`: Declared search fields, filters, sort keys, window and debounce
/// - `clock`: Time source for the debounce timer
///
/// Output:
/// - `current()` snapshots reflecting the latest committed parameters.
///
/// Details:
/// - A new collection requires a new view, which invalidates all derived state.
/// - The view is single-threaded; share the collection, not the view.
pub struct View<T, C = SystemClock> {
    /// Time source.
    clock: C,
    /// Match rules.
    predicate: Predicate<T>,
    /// Resolved sort keys.
    sort_keys: Vec<(String, Comparator<T>)>,
    /// Index into `sort_keys` of the active key.
    sort_index: usize,
    /// Non-default filter selections.
    selections: Selections,
    /// Raw and committed search term.
    debouncer: Debouncer,
    /// Visible prefix size.
    window: Window,
    /// Memoized stages.
    pipeline: Pipeline<T>,
}

impl<T> View<T, SystemClock> {
    /// Create a view driven by the system clock (`createView`).
    ///
    /// # Errors
    /// Returns `ViewError::InvalidConfiguration` when `config` is inconsistent.
    pub fn new(collection: impl Into<Arc<[T]>>, config: ViewConfig<T>) -> Result<Self, ViewError> {
        Self::with_clock(collection, config, SystemClock)
    }
}

impl<T, C: Clock> View<T, C> {
    /// What: Create a view driven by `clock`.
    ///
    /// Inputs:
    /// - `collection`, `config`, `clock` as described on [`View`]
    ///
    /// Output:
    /// - View with empty term, default sort key, defaults for every filter, and
    ///   the initial window.
    ///
    /// # Errors
    /// Returns `ViewError::InvalidConfiguration` when `config` is inconsistent.
    pub fn with_clock(
        collection: impl Into<Arc<[T]>>,
        config: ViewConfig<T>,
        clock: C,
    ) -> Result<Self, ViewError> {
        let resolved = config.resolve()?;
        let collection = collection.into();
        tracing::debug!(
            records = collection.len(),
            sort_keys = resolved.sort_keys.len(),
            filters = resolved.discrete_filters.len(),
            window = resolved.initial_window_size,
            debounce_ms = resolved.debounce.as_millis(),
            policy = resolved.empty_search_policy.as_config_key(),
            "view created"
        );
        Ok(Self {
            clock,
            predicate: Predicate::new(
                resolved.search_fields,
                resolved.discrete_filters,
                resolved.empty_search_policy,
            ),
            sort_keys: resolved.sort_keys,
            sort_index: resolved.default_sort,
            selections: Selections::new(),
            debouncer: Debouncer::new(resolved.debounce),
            window: Window::new(resolved.initial_window_size, resolved.window_step),
            pipeline: Pipeline::new(collection, resolved.filter_history),
        })
    }

    /// Record a keystroke. The committed term follows after the debounce delay.
    pub fn set_search_term(&mut self, raw: impl Into<String>) {
        // A timer that is already due fires before the newer keystroke.
        self.tick();
        self.debouncer.push(raw, self.clock.now());
    }

    /// Set and commit a term immediately, bypassing the debounce timer.
    pub fn commit_search_term(&mut self, raw: impl Into<String>) {
        self.tick();
        if self.debouncer.flush(raw) {
            self.reset_window("search term committed");
        }
    }

    /// Clear the search term immediately and reset the window.
    pub fn reset(&mut self) {
        self.debouncer.flush(String::new());
        self.reset_window("reset");
    }

    /// What: Change a discrete filter selection.
    ///
    /// Inputs:
    /// - `name`: Declared filter name
    /// - `value`: New selection; the filter's default deactivates it
    ///
    /// Output:
    /// - `Ok(())` after applying the change (window reset if the value moved).
    ///
    /// # Errors
    /// Leaves the view unchanged and returns
    /// - `ViewError::UnknownFilterName` when `name` is not declared
    /// - `ViewError::InvalidFilterValue` when `value` is text for a flag filter
    ///   or a flag for a text filter
    pub fn set_filter(&mut self, name: &str, value: impl Into<FilterValue>) -> Result<(), ViewError> {
        self.tick();
        let Some(filter) = self.predicate.filters().iter().find(|f| f.name() == name) else {
            tracing::warn!(filter = name, "ignoring unknown filter");
            return Err(ViewError::UnknownFilterName(name.to_string()));
        };
        let value = value.into();
        if let Some(default) = filter.default_value()
            && !default.same_kind(&value)
        {
            tracing::warn!(filter = name, value = %value, "ignoring filter value of the wrong kind");
            return Err(ViewError::InvalidFilterValue {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        let is_default = filter.default_value() == Some(&value);
        let previous = if is_default {
            self.selections.remove(name)
        } else {
            self.selections.insert(name.to_string(), value.clone())
        };
        let changed = if is_default {
            previous.is_some()
        } else {
            previous.as_ref() != Some(&value)
        };
        if changed {
            tracing::debug!(filter = name, value = %value, "filter changed");
            self.reset_window("filter changed");
        }
        Ok(())
    }

    /// What: Switch the active sort key.
    ///
    /// Inputs:
    /// - `name`: Declared sort key name
    ///
    /// Output:
    /// - `Ok(())`; the window resets when the key actually changes.
    ///
    /// # Errors
    /// Returns `ViewError::UnknownSortKey` and leaves the view unchanged when
    /// `name` is not declared.
    pub fn set_sort_key(&mut self, name: &str) -> Result<(), ViewError> {
        self.tick();
        let Some(index) = self.sort_keys.iter().position(|(key, _)| key == name) else {
            tracing::warn!(sort_key = name, "ignoring unknown sort key");
            return Err(ViewError::UnknownSortKey(name.to_string()));
        };
        if index != self.sort_index {
            self.sort_index = index;
            tracing::debug!(sort_key = name, "sort key changed");
            self.reset_window("sort key changed");
        }
        Ok(())
    }

    /// Reveal the next page of results. Returns `true` when more records became visible.
    pub fn load_more(&mut self) -> bool {
        self.tick();
        let total = self.ordered().len();
        let grew = self.window.grow(total);
        tracing::debug!(window = self.window.size(), total, grew, "load more");
        grew
    }

    /// Fire the debounce timer if due. Returns `true` when a new term was committed.
    pub fn tick(&mut self) -> bool {
        if self.debouncer.poll(self.clock.now()) {
            self.reset_window("debounced term committed");
            return true;
        }
        false
    }

    /// What: Snapshot of the latest committed state.
    ///
    /// Inputs: None (fires a due debounce timer first).
    ///
    /// Output:
    /// - Visible records, matched count, remaining count, and collection size.
    ///
    /// Details:
    /// - Reuses cached stage results when dependencies are unchanged.
    pub fn current(&mut self) -> ViewSnapshot<'_, T> {
        self.tick();
        let ordered = self.ordered();
        let collection = self.pipeline.collection();
        let visible = self
            .window
            .prefix(&ordered[..])
            .iter()
            .map(|&idx| &collection[idx])
            .collect();
        ViewSnapshot {
            visible,
            total_matched: ordered.len(),
            remaining: self.window.remaining(ordered.len()),
            total: collection.len(),
        }
    }

    /// Filter-stage result: indices into the collection, in collection order.
    pub fn filtered_indices(&mut self) -> Arc<[usize]> {
        self.tick();
        self.filtered()
    }

    /// Sort-stage result: indices into the collection, in display order.
    pub fn ordered_indices(&mut self) -> Arc<[usize]> {
        self.tick();
        self.ordered()
    }

    /// Debounce state, after firing a due timer.
    pub fn phase(&mut self) -> ViewPhase {
        self.tick();
        if self.debouncer.is_pending() {
            ViewPhase::Pending
        } else {
            ViewPhase::Idle
        }
    }

    /// Instant at which a pending search term commits.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Latest raw search input.
    #[must_use]
    pub fn search_term(&self) -> &str {
        self.debouncer.raw()
    }

    /// Search term the pipeline currently filters on.
    #[must_use]
    pub fn debounced_search_term(&self) -> &str {
        self.debouncer.committed()
    }

    /// Active sort key name.
    #[must_use]
    pub fn sort_key(&self) -> &str {
        self.sort_keys
            .get(self.sort_index)
            .map_or("", |(name, _)| name.as_str())
    }

    /// Declared sort key names.
    #[must_use]
    pub fn sort_key_names(&self) -> Vec<&str> {
        self.sort_keys.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Current value of a filter (its default when unselected).
    #[must_use]
    pub fn filter_value(&self, name: &str) -> Option<&FilterValue> {
        self.selections.get(name).or_else(|| {
            self.predicate
                .filters()
                .iter()
                .find(|f| f.name() == name)
                .and_then(|f| f.default_value())
        })
    }

    /// Declared filter names with their defaults.
    #[must_use]
    pub fn filter_defaults(&self) -> Vec<(&str, &FilterValue)> {
        self.predicate
            .filters()
            .iter()
            .filter_map(|f| f.default_value().map(|d| (f.name(), d)))
            .collect()
    }

    /// Current window size.
    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.window.size()
    }

    /// Configured debounce delay.
    #[must_use]
    pub const fn debounce_delay(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Empty-term behaviour.
    #[must_use]
    pub const fn empty_search_policy(&self) -> EmptySearchPolicy {
        self.predicate.policy()
    }

    /// Pipeline work counters.
    #[must_use]
    pub const fn stats(&self) -> PipelineStats {
        self.pipeline.stats()
    }

    /// Source records.
    #[must_use]
    pub const fn collection(&self) -> &Arc<[T]> {
        self.pipeline.collection()
    }

    /// Run (or reuse) the filter stage for the committed parameters.
    fn filtered(&mut self) -> Arc<[usize]> {
        self.pipeline
            .filtered(&self.predicate, self.debouncer.committed(), &self.selections)
    }

    /// Run (or reuse) the sort stage on top of the filter stage.
    fn ordered(&mut self) -> Arc<[usize]> {
        let filtered = self.filtered();
        let (key, compare) = &self.sort_keys[self.sort_index];
        self.pipeline.ordered(&filtered, key, compare)
    }

    /// Restore the initial window size.
    fn reset_window(&mut self, cause: &'static str) {
        if self.window.reset() {
            tracing::debug!(cause, window = self.window.size(), "window reset");
        }
    }
}

impl<T, C> std::fmt::Debug for View<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("sort_index", &self.sort_index)
            .field("selections", &self.selections)
            .field("debouncer", &self.debouncer)
            .field("window", &self.window)
            .field("stats", &self.pipeline.stats())
            .finish_non_exhaustive()
    }
}
