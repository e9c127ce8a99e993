//! Declarative view configuration and its validation.

use std::collections::HashSet;
use std::time::Duration;

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::error::ViewError;
use crate::logic::{Comparator, DiscreteFilter, EmptySearchPolicy, SortKey, TextField};

/// Default number of records shown before "load more".
pub const DEFAULT_WINDOW_SIZE: usize = 50;

/// Default capacity of the previous-filter-result cache.
pub const DEFAULT_FILTER_HISTORY: usize = 8;

/// What: Everything a view needs to know about its records and controls.
///
/// Inputs:
/// - Built with chained setters starting from [`ViewConfig::new`].
///
/// Output:
/// - Passed to `View::new`, which validates it through [`ViewConfig::resolve`].
///
/// Details:
/// - The first declared sort key is the default unless `default_sort_key` is set.
/// - `window_step` defaults to `initial_window_size`.
pub struct ViewConfig<T> {
    /// Fields searched by the text term.
    pub(crate) search_fields: Vec<TextField<T>>,
    /// Discrete filters.
    pub(crate) discrete_filters: Vec<DiscreteFilter<T>>,
    /// Selectable sort keys.
    pub(crate) sort_keys: Vec<SortKey<T>>,
    /// Explicit default sort key name.
    pub(crate) default_sort_key: Option<String>,
    /// Window size after construction and resets.
    pub(crate) initial_window_size: usize,
    /// Growth per "load more".
    pub(crate) window_step: Option<usize>,
    /// Debounce quiet period.
    pub(crate) debounce: Duration,
    /// Behaviour for an empty committed term.
    pub(crate) empty_search_policy: EmptySearchPolicy,
    /// Previous-filter-result cache capacity.
    pub(crate) filter_history: usize,
}

/// Validated configuration split into the parts a view owns.
pub(crate) struct ResolvedConfig<T> {
    /// Fields searched by the text term.
    pub search_fields: Vec<TextField<T>>,
    /// Discrete filters, all with defaults.
    pub discrete_filters: Vec<DiscreteFilter<T>>,
    /// Sort keys with comparators.
    pub sort_keys: Vec<(String, Comparator<T>)>,
    /// Index of the default sort key.
    pub default_sort: usize,
    /// Window size after construction and resets.
    pub initial_window_size: usize,
    /// Growth per "load more".
    pub window_step: usize,
    /// Debounce quiet period.
    pub debounce: Duration,
    /// Behaviour for an empty committed term.
    pub empty_search_policy: EmptySearchPolicy,
    /// Previous-filter-result cache capacity.
    pub filter_history: usize,
}

impl<T> ViewConfig<T> {
    /// Empty configuration with default window, debounce and policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            search_fields: Vec::new(),
            discrete_filters: Vec::new(),
            sort_keys: Vec::new(),
            default_sort_key: None,
            initial_window_size: DEFAULT_WINDOW_SIZE,
            window_step: None,
            debounce: DEFAULT_DEBOUNCE,
            empty_search_policy: EmptySearchPolicy::default(),
            filter_history: DEFAULT_FILTER_HISTORY,
        }
    }

    /// Add a searchable text field.
    #[must_use]
    pub fn search_field(
        mut self,
        name: impl Into<String>,
        get: impl Fn(&T) -> &str + Send + Sync + 'static,
    ) -> Self {
        self.search_fields.push(TextField::new(name, get));
        self
    }

    /// Add a discrete filter.
    #[must_use]
    pub fn discrete_filter(mut self, filter: DiscreteFilter<T>) -> Self {
        self.discrete_filters.push(filter);
        self
    }

    /// Add a sort key.
    #[must_use]
    pub fn sort_key(mut self, key: SortKey<T>) -> Self {
        self.sort_keys.push(key);
        self
    }

    /// Choose the sort key active after construction.
    #[must_use]
    pub fn default_sort_key(mut self, name: impl Into<String>) -> Self {
        self.default_sort_key = Some(name.into());
        self
    }

    /// Window size after construction and after every reset.
    #[must_use]
    pub const fn initial_window_size(mut self, size: usize) -> Self {
        self.initial_window_size = size;
        self
    }

    /// Growth per "load more".
    #[must_use]
    pub const fn window_step(mut self, step: usize) -> Self {
        self.window_step = Some(step);
        self
    }

    /// Debounce quiet period for typed search input.
    #[must_use]
    pub const fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Behaviour while the committed term is empty.
    #[must_use]
    pub const fn empty_search_policy(mut self, policy: EmptySearchPolicy) -> Self {
        self.empty_search_policy = policy;
        self
    }

    /// Capacity of the previous-filter-result cache; 0 disables it.
    #[must_use]
    pub const fn filter_history(mut self, capacity: usize) -> Self {
        self.filter_history = capacity;
        self
    }

    /// Names of the declared sort keys, in declaration order.
    #[must_use]
    pub fn sort_key_names(&self) -> Vec<&str> {
        self.sort_keys.iter().map(SortKey::name).collect()
    }

    /// What: Validate and split the configuration.
    ///
    /// Inputs:
    /// - `self`: Configuration as declared by the caller
    ///
    /// Output:
    /// - `Ok(ResolvedConfig)` or `Err(ViewError::InvalidConfiguration)`.
    ///
    /// Details:
    /// - Rejects: zero window size or step, no sort keys, sort keys without a
    ///   comparator, filters without a default, duplicate names, and an unknown
    ///   default sort key. Nothing is silently defaulted.
    pub(crate) fn resolve(self) -> Result<ResolvedConfig<T>, ViewError> {
        if self.initial_window_size == 0 {
            return Err(ViewError::invalid("initial window size must be at least 1"));
        }
        if self.window_step == Some(0) {
            return Err(ViewError::invalid("window step must be at least 1"));
        }
        if self.sort_keys.is_empty() {
            return Err(ViewError::invalid("at least one sort key is required"));
        }

        let mut seen = HashSet::new();
        for filter in &self.discrete_filters {
            if filter.default_value().is_none() {
                return Err(ViewError::invalid(format!(
                    "filter \"{}\" has no default value",
                    filter.name()
                )));
            }
            if !seen.insert(filter.name().to_string()) {
                return Err(ViewError::invalid(format!(
                    "filter \"{}\" is declared twice",
                    filter.name()
                )));
            }
        }

        let mut sort_keys = Vec::with_capacity(self.sort_keys.len());
        for key in self.sort_keys {
            let (name, comparator) = key.into_parts();
            let Some(comparator) = comparator else {
                return Err(ViewError::invalid(format!(
                    "sort key \"{name}\" has no comparator"
                )));
            };
            if sort_keys.iter().any(|(existing, _)| existing == &name) {
                return Err(ViewError::invalid(format!(
                    "sort key \"{name}\" is declared twice"
                )));
            }
            sort_keys.push((name, comparator));
        }

        let default_sort = match &self.default_sort_key {
            None => 0,
            Some(wanted) => sort_keys
                .iter()
                .position(|(name, _)| name == wanted)
                .ok_or_else(|| {
                    ViewError::invalid(format!("default sort key \"{wanted}\" is not declared"))
                })?,
        };

        Ok(ResolvedConfig {
            search_fields: self.search_fields,
            discrete_filters: self.discrete_filters,
            sort_keys,
            default_sort,
            initial_window_size: self.initial_window_size,
            window_step: self.window_step.unwrap_or(self.initial_window_size),
            debounce: self.debounce,
            empty_search_policy: self.empty_search_policy,
            filter_history: self.filter_history,
        })
    }
}

impl<T> Default for ViewConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ViewConfig<T> {
    fn clone(&self) -> Self {
        Self {
            search_fields: self.search_fields.clone(),
            discrete_filters: self.discrete_filters.clone(),
            sort_keys: self.sort_keys.clone(),
            default_sort_key: self.default_sort_key.clone(),
            initial_window_size: self.initial_window_size,
            window_step: self.window_step,
            debounce: self.debounce,
            empty_search_policy: self.empty_search_policy,
            filter_history: self.filter_history,
        }
    }
}

impl<T> std::fmt::Debug for ViewConfig<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewConfig")
            .field("search_fields", &self.search_fields)
            .field("discrete_filters", &self.discrete_filters)
            .field("sort_keys", &self.sort_keys)
            .field("default_sort_key", &self.default_sort_key)
            .field("initial_window_size", &self.initial_window_size)
            .field("window_step", &self.window_step)
            .field("debounce", &self.debounce)
            .field("empty_search_policy", &self.empty_search_policy)
            .field("filter_history", &self.filter_history)
            .finish()
    }
}
