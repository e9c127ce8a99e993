//! User settings loaded from `viewpipe.conf`.
//!
//! The file is a flat list of `key = value` lines. Unknown keys and values that
//! fail to parse are ignored so a stale config never prevents startup.

pub mod paths;

use std::fs;
use std::path::Path;

use crate::datasets::DatasetKind;
use crate::logic::EmptySearchPolicy;
use crate::util::config::{parse_key_value, skip_comment_or_empty};

/// Default debounce delay in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
/// Default page size for the visible window.
pub const DEFAULT_PAGE_SIZE: usize = 50;
/// Default number of earlier filter results kept for reuse.
pub const DEFAULT_FILTER_HISTORY: usize = 8;

/// What: Settings that shape the CLI view before command-line overrides apply.
///
/// Details:
/// - `count`, `empty_search`, and `sort` are optional because each dataset preset
///   carries its own defaults for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Dataset to generate.
    pub dataset: DatasetKind,
    /// Number of records to generate; `None` uses the dataset default.
    pub count: Option<usize>,
    /// Quiet period before a typed search term is committed.
    pub debounce_ms: u64,
    /// Initial window size and growth step.
    pub page_size: usize,
    /// Override for the preset's empty-search behavior.
    pub empty_search: Option<EmptySearchPolicy>,
    /// Override for the preset's default sort key.
    pub sort: Option<String>,
    /// Capacity of the filter history cache.
    pub filter_history: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset: DatasetKind::default(),
            count: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_size: DEFAULT_PAGE_SIZE,
            empty_search: None,
            sort: None,
            filter_history: DEFAULT_FILTER_HISTORY,
        }
    }
}

/// What: Parse settings from the contents of a config file.
///
/// Inputs:
/// - `content`: Raw file text.
///
/// Output:
/// - `Settings` with recognized keys applied over the defaults.
///
/// Details:
/// - A `page_size` or `count` of zero is rejected and leaves the default in place.
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "dataset" => {
                if let Some(kind) = DatasetKind::from_config_key(&val) {
                    out.dataset = kind;
                }
            }
            "count" | "records" => {
                if let Ok(v) = val.parse::<usize>()
                    && v > 0
                {
                    out.count = Some(v);
                }
            }
            "debounce_ms" | "debounce" => {
                if let Ok(v) = val.parse::<u64>() {
                    out.debounce_ms = v;
                }
            }
            "page_size" | "window_size" => {
                if let Ok(v) = val.parse::<usize>()
                    && v > 0
                {
                    out.page_size = v;
                }
            }
            "empty_search" => {
                if let Some(policy) = EmptySearchPolicy::from_config_key(&val) {
                    out.empty_search = Some(policy);
                }
            }
            "sort" | "sort_key" => {
                if !val.is_empty() {
                    out.sort = Some(val);
                }
            }
            "filter_history" => {
                if let Ok(v) = val.parse::<usize>() {
                    out.filter_history = v;
                }
            }
            _ => {
                tracing::trace!(key = %key, "ignoring unknown settings key");
            }
        }
    }
    out
}

/// What: Load settings from an explicit path or the default config location.
///
/// Inputs:
/// - `explicit`: Path given with `--config`, if any.
///
/// Output:
/// - Parsed `Settings`, or defaults when the file is missing or unreadable.
///
/// Details:
/// - A missing explicit file is logged at warn level; a missing default file is not.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let default_path = paths::settings_path();
    let path = explicit.unwrap_or(&default_path);
    match fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "loaded settings");
            parse_settings(&content)
        }
        Err(err) => {
            if explicit.is_some() {
                tracing::warn!(path = %path.display(), error = %err, "settings file unreadable; using defaults");
            }
            Settings::default()
        }
    }
}
