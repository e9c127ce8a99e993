//! Error type for view construction and parameter changes.

use std::fmt;

/// What: Error type covering misconfigured views and rejected parameter changes.
///
/// Inputs: Generated by `View::new`, `View::set_filter`, and `View::set_sort_key`.
///
/// Output: Implements `Display`/`Error` for ergonomic propagation.
///
/// Details:
/// - `InvalidConfiguration` is fatal to construction.
/// - `UnknownSortKey`, `UnknownFilterName`, and `InvalidFilterValue` leave the
///   view untouched; they only report the misuse to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The view configuration cannot produce a working pipeline.
    InvalidConfiguration {
        /// Human-readable description of the offending declaration.
        reason: String,
    },
    /// `set_sort_key` was called with a name the configuration does not declare.
    UnknownSortKey(String),
    /// `set_filter` was called with a name the configuration does not declare.
    UnknownFilterName(String),
    /// `set_filter` was called with a value of a different kind than the
    /// filter's default (text for a flag filter, or the reverse).
    InvalidFilterValue {
        /// Declared filter name.
        name: String,
        /// Rejected value, as displayed.
        value: String,
    },
}

impl ViewError {
    /// Shorthand for building an `InvalidConfiguration` error.
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid view configuration: {reason}")
            }
            Self::UnknownSortKey(name) => write!(f, "unknown sort key \"{name}\""),
            Self::UnknownFilterName(name) => write!(f, "unknown filter \"{name}\""),
            Self::InvalidFilterValue { name, value } => {
                write!(f, "invalid value \"{value}\" for filter \"{name}\"")
            }
        }
    }
}

impl std::error::Error for ViewError {}

#[cfg(test)]
mod tests {
    use super::ViewError;

    #[test]
    /// What: Display strings name the offending key so CLI users can correct typos.
    ///
    /// - Input: One instance of each variant
    /// - Output: Messages contain the variant-specific payload
    fn view_error_display_includes_payload() {
        assert_eq!(
            ViewError::invalid("sort key \"price\" has no comparator").to_string(),
            "invalid view configuration: sort key \"price\" has no comparator"
        );
        assert_eq!(
            ViewError::UnknownSortKey("size".into()).to_string(),
            "unknown sort key \"size\""
        );
        assert_eq!(
            ViewError::UnknownFilterName("colour".into()).to_string(),
            "unknown filter \"colour\""
        );
        assert_eq!(
            ViewError::InvalidFilterValue {
                name: "in_stock".into(),
                value: "yes".into()
            }
            .to_string(),
            "invalid value \"yes\" for filter \"in_stock\""
        );
    }
}
