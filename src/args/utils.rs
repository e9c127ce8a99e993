//! Shared utilities for argument processing.

use crate::args::Args;
use crate::logic::EmptySearchPolicy;
use crate::settings::Settings;

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides log_level argument.
/// - VIEWPIPE_TRACE=1 enables TRACE level for per-keystroke timer logging.
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("VIEWPIPE_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Layer command-line flags over file settings.
///
/// Inputs:
/// - `settings`: Values loaded from `viewpipe.conf` (or defaults).
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Settings with every flag the user passed taking precedence.
///
/// Details:
/// - An unrecognized `--empty-search` value is logged and ignored.
/// - A zero `--page-size` or `--count` is ignored.
pub fn apply_overrides(mut settings: Settings, args: &Args) -> Settings {
    if let Some(kind) = args.dataset {
        settings.dataset = kind;
    }
    if let Some(count) = args.count.filter(|&c| c > 0) {
        settings.count = Some(count);
    }
    if let Some(ms) = args.debounce_ms {
        settings.debounce_ms = ms;
    }
    if let Some(size) = args.page_size.filter(|&s| s > 0) {
        settings.page_size = size;
    }
    if let Some(raw) = &args.empty_search {
        match EmptySearchPolicy::from_config_key(raw) {
            Some(policy) => settings.empty_search = Some(policy),
            None => tracing::warn!(value = %raw, "ignoring unknown --empty-search value"),
        }
    }
    if let Some(sort) = &args.sort {
        settings.sort = Some(sort.clone());
    }
    if let Some(capacity) = args.filter_history {
        settings.filter_history = capacity;
    }
    settings
}

/// Split a `NAME=VALUE` filter assignment; both sides are trimmed.
pub fn parse_filter_assignment(raw: &str) -> Option<(&str, &str)> {
    let (name, value) = raw.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::DatasetKind;

    #[test]
    /// What: Verbose flag wins over the explicit level.
    fn determine_log_level_verbose_forces_debug() {
        let args = Args {
            log_level: "warn".into(),
            verbose: true,
            ..Args::default()
        };
        assert_eq!(determine_log_level(&args), "debug");
    }

    #[test]
    /// What: Flags override file settings; absent or invalid flags keep them.
    ///
    /// - Input: Settings with posts/250ms; args with catalog, zero page size, bad policy
    /// - Output: Dataset replaced, debounce kept, page size kept, policy unchanged
    fn apply_overrides_prefers_flags() {
        let settings = Settings {
            dataset: DatasetKind::Posts,
            debounce_ms: 250,
            ..Settings::default()
        };
        let args = Args {
            dataset: Some(DatasetKind::Catalog),
            page_size: Some(0),
            empty_search: Some("sometimes".into()),
            sort: Some("price".into()),
            filter_history: Some(0),
            ..Args::default()
        };
        let merged = apply_overrides(settings, &args);
        assert_eq!(merged.dataset, DatasetKind::Catalog);
        assert_eq!(merged.debounce_ms, 250);
        assert_eq!(merged.page_size, crate::settings::DEFAULT_PAGE_SIZE);
        assert_eq!(merged.empty_search, None);
        assert_eq!(merged.sort.as_deref(), Some("price"));
        assert_eq!(merged.filter_history, 0);
    }

    #[test]
    /// What: Filter assignments split on the first `=`.
    fn parse_filter_assignment_variants() {
        assert_eq!(
            parse_filter_assignment("category = Category 3"),
            Some(("category", "Category 3"))
        );
        assert_eq!(parse_filter_assignment("in_stock="), Some(("in_stock", "")));
        assert_eq!(parse_filter_assignment("=x"), None);
        assert_eq!(parse_filter_assignment("category"), None);
    }
}
