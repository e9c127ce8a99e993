//! Stable ordering of filtered results by a named sort key.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Three-way comparison between two records.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// What: Named sort key paired with its comparison semantics.
///
/// Inputs:
/// - `name`: Key used by `View::set_sort_key`
/// - `comparator`: Required for a valid view; a bare [`SortKey::declared`] is rejected
///
/// Output:
/// - Consumed by the view, which resolves each key into `(name, comparator)`.
pub struct SortKey<T> {
    /// Key name.
    name: String,
    /// Comparison semantics, if declared.
    comparator: Option<Comparator<T>>,
}

impl<T> SortKey<T> {
    /// Sort key with an explicit comparator.
    pub fn new(
        name: impl Into<String>,
        compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            comparator: Some(Arc::new(compare)),
        }
    }

    /// Sort key declared by name only. Views refuse to build with it.
    pub fn declared(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comparator: None,
        }
    }

    /// Accent- and case-insensitive text order (see [`compare_text`]).
    pub fn by_text(name: impl Into<String>, get: impl Fn(&T) -> &str + Send + Sync + 'static) -> Self {
        Self::new(name, move |a, b| compare_text(get(a), get(b)))
    }

    /// Smallest value first.
    pub fn ascending<K: PartialOrd>(
        name: impl Into<String>,
        get: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |a, b| {
            get(a).partial_cmp(&get(b)).unwrap_or(Ordering::Equal)
        })
    }

    /// Largest value first.
    pub fn descending<K: PartialOrd>(
        name: impl Into<String>,
        get: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |a, b| {
            get(b).partial_cmp(&get(a)).unwrap_or(Ordering::Equal)
        })
    }

    /// Most recent timestamp first.
    pub fn newest_first(
        name: impl Into<String>,
        get: impl Fn(&T) -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |a, b| get(b).cmp(&get(a)))
    }

    /// Key name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Split into name and comparator.
    pub(crate) fn into_parts(self) -> (String, Option<Comparator<T>>) {
        (self.name, self.comparator)
    }
}

impl<T> Clone for SortKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T> fmt::Debug for SortKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortKey")
            .field("name", &self.name)
            .field("has_comparator", &self.comparator.is_some())
            .finish()
    }
}

/// What: Locale-style text order.
///
/// Inputs:
/// - `a`, `b`: Texts to compare
///
/// Output:
/// - Order by accent- and case-folded text, then by case-folded text, then by raw text.
///
/// Details:
/// - "éclair" sorts between "apple" and "zebra", and "Apple" before "apple".
/// - No strings are allocated; ASCII pairs skip Unicode decomposition.
#[must_use]
pub fn compare_text(a: &str, b: &str) -> Ordering {
    if a.is_ascii() && b.is_ascii() {
        return ascii_lower(a).cmp(ascii_lower(b)).then_with(|| a.cmp(b));
    }
    folded(a)
        .cmp(folded(b))
        .then_with(|| lowered(a).cmp(lowered(b)))
        .then_with(|| a.cmp(b))
}

/// ASCII bytes, lower-cased.
fn ascii_lower(s: &str) -> impl Iterator<Item = u8> + '_ {
    s.bytes().map(|b| b.to_ascii_lowercase())
}

/// Characters with combining marks removed after canonical decomposition, lower-cased.
fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
}

/// Characters, lower-cased.
fn lowered(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// What: Order `indices` into `collection` with `compare`, without touching the input.
///
/// Inputs:
/// - `collection`: Records the indices point into
/// - `indices`: Filter result in collection order
/// - `compare`: Comparator for the active sort key
///
/// Output:
/// - New index vector; records comparing equal keep their relative input order.
///
/// Details:
/// - `slice::sort_by` is a stable merge sort, which provides the tie guarantee.
pub fn sort_indices<T>(
    collection: &[T],
    indices: &[usize],
    compare: &(dyn Fn(&T, &T) -> Ordering + Send + Sync),
) -> Vec<usize> {
    let mut out = indices.to_vec();
    out.sort_by(|&a, &b| compare(&collection[a], &collection[b]));
    out
}
