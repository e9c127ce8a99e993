//! Record matching: case-insensitive text search combined with discrete filters.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Accessor returning one searchable text field of a record.
pub type TextAccessor<T> = Arc<dyn Fn(&T) -> &str + Send + Sync>;

/// Test deciding whether a record passes a discrete filter at a given value.
pub type FilterTest<T> = Arc<dyn Fn(&T, &FilterValue) -> bool + Send + Sync>;

/// Current filter selections keyed by filter name.
pub type Selections = BTreeMap<String, FilterValue>;

/// Value of a discrete filter selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum FilterValue {
    /// Text selection such as a category name (or an "all" sentinel).
    Text(String),
    /// Boolean toggle such as "in stock only".
    Flag(bool),
}

impl FilterValue {
    /// What: Parse user input into the same variant as `self`.
    ///
    /// Inputs:
    /// - `input`: Raw text from a selector or command line
    ///
    /// Output:
    /// - `Some(value)` of the matching variant, `None` when a flag cannot be parsed.
    ///
    /// Details:
    /// - Flags accept `true/false`, `1/0`, `yes/no`, `on/off` case-insensitively.
    #[must_use]
    pub fn parse_like(&self, input: &str) -> Option<Self> {
        match self {
            Self::Text(_) => Some(Self::Text(input.trim().to_string())),
            Self::Flag(_) => match input.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(Self::Flag(true)),
                "false" | "0" | "no" | "off" => Some(Self::Flag(false)),
                _ => None,
            },
        }
    }

    /// Whether `self` and `other` are the same variant (both text or both flags).
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

/// What a view shows while the committed search term is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySearchPolicy {
    /// Show every record that passes the discrete filters.
    #[default]
    ShowAll,
    /// Show nothing until a term is entered.
    ShowNone,
}

impl EmptySearchPolicy {
    /// Map a config value (e.g. "show-none") to a policy.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "show-all" | "all" => Some(Self::ShowAll),
            "show-none" | "none" => Some(Self::ShowNone),
            _ => None,
        }
    }

    /// Stable config key for this policy.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::ShowAll => "show-all",
            Self::ShowNone => "show-none",
        }
    }
}

/// Named text field participating in search matching.
pub struct TextField<T> {
    /// Field name, used for diagnostics only.
    name: String,
    /// Accessor returning the field text.
    get: TextAccessor<T>,
}

impl<T> TextField<T> {
    /// Declare a searchable field.
    pub fn new(name: impl Into<String>, get: impl Fn(&T) -> &str + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            get: Arc::new(get),
        }
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for TextField<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            get: Arc::clone(&self.get),
        }
    }
}

impl<T> fmt::Debug for TextField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField").field("name", &self.name).finish()
    }
}

/// What: Named discrete filter (category selector, stock toggle, ...).
///
/// Inputs:
/// - `name`: Key used by `View::set_filter`
/// - `default`: Value meaning "no restriction"; required for a valid view
/// - `test`: Predicate applied when the selection differs from `default`
///
/// Output:
/// - Used by [`Predicate`] to AND active filters with the text match.
///
/// Details:
/// - A filter whose selection equals its default never rejects a record.
pub struct DiscreteFilter<T> {
    /// Filter name.
    name: String,
    /// Inactive value; `None` makes the configuration invalid.
    default: Option<FilterValue>,
    /// Record test for an active selection.
    test: FilterTest<T>,
}

impl<T> DiscreteFilter<T> {
    /// Declare a filter with a custom test and no default yet.
    pub fn new(
        name: impl Into<String>,
        test: impl Fn(&T, &FilterValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            default: None,
            test: Arc::new(test),
        }
    }

    /// Set the inactive value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<FilterValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// What: Text equality filter with an "all" sentinel as default.
    ///
    /// Inputs:
    /// - `name`: Filter name
    /// - `all_label`: Default value meaning "any"
    /// - `get`: Accessor for the compared field
    ///
    /// Output:
    /// - Filter passing records whose field equals the selected text exactly.
    pub fn text_equals(
        name: impl Into<String>,
        all_label: impl Into<String>,
        get: impl Fn(&T) -> &str + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |item, value| match value {
            FilterValue::Text(wanted) => get(item) == wanted,
            FilterValue::Flag(_) => true,
        })
        .with_default(FilterValue::Text(all_label.into()))
    }

    /// Boolean requirement toggle: default `false`; when `true`, only records
    /// for which `get` returns `true` pass.
    pub fn require_flag(
        name: impl Into<String>,
        get: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |item, value| match value {
            FilterValue::Flag(true) => get(item),
            FilterValue::Flag(false) | FilterValue::Text(_) => true,
        })
        .with_default(false)
    }

    /// Filter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inactive value, if declared.
    #[must_use]
    pub const fn default_value(&self) -> Option<&FilterValue> {
        self.default.as_ref()
    }
}

impl<T> Clone for DiscreteFilter<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            default: self.default.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> fmt::Debug for DiscreteFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscreteFilter")
            .field("name", &self.name)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// Combined search predicate: text fields, discrete filters, and the empty-term policy.
#[derive(Debug)]
pub struct Predicate<T> {
    /// Fields OR-ed together for the text match.
    fields: Vec<TextField<T>>,
    /// Filters AND-ed with the text match.
    filters: Vec<DiscreteFilter<T>>,
    /// Behaviour for an empty term.
    policy: EmptySearchPolicy,
}

impl<T> Predicate<T> {
    /// Assemble a predicate from already validated parts.
    #[must_use]
    pub const fn new(
        fields: Vec<TextField<T>>,
        filters: Vec<DiscreteFilter<T>>,
        policy: EmptySearchPolicy,
    ) -> Self {
        Self {
            fields,
            filters,
            policy,
        }
    }

    /// Declared discrete filters.
    #[must_use]
    pub fn filters(&self) -> &[DiscreteFilter<T>] {
        &self.filters
    }

    /// Empty-term behaviour.
    #[must_use]
    pub const fn policy(&self) -> EmptySearchPolicy {
        self.policy
    }

    /// What: Select the indices of `collection` that match `term` and `selections`.
    ///
    /// Inputs:
    /// - `collection`: Records in their original order
    /// - `term`: Committed search term (matched case-insensitively)
    /// - `selections`: Current filter values; missing names fall back to defaults
    ///
    /// Output:
    /// - Ascending indices into `collection`, i.e. an order-preserving subsequence.
    ///
    /// Details:
    /// - Empty term + `ShowNone` yields nothing; empty term + `ShowAll` applies
    ///   only the active discrete filters.
    /// - The term is lower-cased once; fields are only lower-cased when they are
    ///   not plain ASCII.
    pub fn filter(&self, collection: &[T], term: &str, selections: &Selections) -> Vec<usize> {
        if term.is_empty() && self.policy == EmptySearchPolicy::ShowNone {
            return Vec::new();
        }
        let active: Vec<(&DiscreteFilter<T>, &FilterValue)> = self
            .filters
            .iter()
            .filter_map(|filter| {
                let selected = selections.get(&filter.name).or(filter.default.as_ref())?;
                (Some(selected) != filter.default.as_ref()).then_some((filter, selected))
            })
            .collect();
        let needle = term.to_lowercase();

        if needle.is_empty() && active.is_empty() {
            return (0..collection.len()).collect();
        }
        collection
            .iter()
            .enumerate()
            .filter(|&(_, item)| {
                (needle.is_empty()
                    || self
                        .fields
                        .iter()
                        .any(|field| contains_ignore_case((field.get)(item), &needle)))
                    && active.iter().all(|&(filter, value)| (filter.test)(item, value))
            })
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Case-insensitive substring test against an already lower-cased needle.
fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    if haystack.is_ascii() && needle_lower.is_ascii() {
        let hay = haystack.as_bytes();
        let needle = needle_lower.as_bytes();
        return hay.len() >= needle.len()
            && hay
                .windows(needle.len())
                .any(|window| window.eq_ignore_ascii_case(needle));
    }
    haystack.to_lowercase().contains(needle_lower)
}

/// What: Build selector options from a collection.
///
/// Inputs:
/// - `collection`: Records to scan
/// - `get`: Accessor for the option field
/// - `all_label`: Sentinel placed first
///
/// Output:
/// - `all_label` followed by distinct field values in first-seen order.
pub fn distinct_values<T>(collection: &[T], get: impl Fn(&T) -> &str, all_label: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = vec![all_label.to_string()];
    for item in collection {
        let value = get(item);
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}
