//! viewpipe application runtime: settings, dataset generation, and the REPL.
//!
//! The binary entrypoint stays minimal; everything after logging setup lives here.

pub mod commands;
pub mod render;
pub mod repl;

use std::fmt::Display;
use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::args::{Args, apply_overrides, parse_filter_assignment};
use crate::datasets::{
    DatasetKind, catalog_view_config, category_options, generate_catalog, generate_posts,
    posts_view_config,
};
use crate::debounce::TokioClock;
use crate::settings::{Settings, load_settings};
use crate::view::{View, ViewConfig};

pub use commands::{Command, CommandError, apply_filter};
pub use repl::drive;

/// Result type for the runtime: any error, sendable across tasks.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run viewpipe with parsed arguments.
///
/// Inputs:
/// - `args`: Command-line arguments
///
/// Output:
/// - `Ok(())` when the one-shot search or the REPL finished.
///
/// # Errors
/// - Invalid view settings (for example an unknown `--sort` key)
/// - Unknown or malformed `--filter` assignments
/// - I/O errors on stdin/stdout
///
/// Details:
/// - Settings come from `viewpipe.conf` (or `--config`), then flags override them.
pub async fn run(args: Args) -> Result<()> {
    let settings = apply_overrides(load_settings(args.config.as_deref()), &args);
    let count = settings.count.unwrap_or_else(|| settings.dataset.default_count());
    tracing::info!(
        dataset = ?settings.dataset,
        count,
        page_size = settings.page_size,
        debounce_ms = settings.debounce_ms,
        "starting session"
    );
    match settings.dataset {
        DatasetKind::Catalog => {
            let items = generate_catalog(count);
            tracing::debug!(categories = ?category_options(&items), "catalog generated");
            let view = build_view(items, catalog_view_config(), &settings)?;
            session(view, &args).await
        }
        DatasetKind::Posts => {
            let posts = generate_posts(count);
            let view = build_view(posts, posts_view_config(), &settings)?;
            session(view, &args).await
        }
    }
}

/// What: Apply settings to a dataset preset and build a tokio-timed view.
///
/// Inputs:
/// - `records`: Generated collection
/// - `preset`: Dataset view preset
/// - `settings`: Merged file and flag settings
///
/// Output:
/// - View ready for the REPL.
///
/// # Errors
/// Returns `ViewError::InvalidConfiguration` when the settings name an unknown
/// sort key.
///
/// Details:
/// - `page_size` sets both the initial window and the load-more step.
/// - `empty_search` and `sort` replace the preset's choice only when set.
pub fn build_view<T>(
    records: Vec<T>,
    preset: ViewConfig<T>,
    settings: &Settings,
) -> std::result::Result<View<T, TokioClock>, crate::error::ViewError> {
    let mut config = preset
        .debounce(Duration::from_millis(settings.debounce_ms))
        .initial_window_size(settings.page_size)
        .window_step(settings.page_size)
        .filter_history(settings.filter_history);
    if let Some(policy) = settings.empty_search {
        config = config.empty_search_policy(policy);
    }
    if let Some(sort) = &settings.sort {
        config = config.default_sort_key(sort.clone());
    }
    View::with_clock(records, config, TokioClock)
}

/// Apply `--filter` flags, then run either the one-shot search or the REPL.
async fn session<T>(mut view: View<T, TokioClock>, args: &Args) -> Result<()>
where
    T: Serialize + Display,
{
    for raw in &args.filter {
        let (name, value) =
            parse_filter_assignment(raw).ok_or_else(|| CommandError::InvalidArgument {
                command: "--filter",
                value: raw.clone(),
            })?;
        apply_filter(&mut view, name, value)?;
    }
    let mut out = std::io::stdout();
    if let Some(term) = &args.search {
        view.commit_search_term(term.as_str());
        render::render(&mut view, &mut out, args.json)?;
        out.flush()?;
        return Ok(());
    }
    if !args.json {
        writeln!(
            out,
            "{} records loaded; sort keys: {}. Type \"help\" for commands.",
            view.collection().len(),
            view.sort_key_names().join(", ")
        )?;
    }
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    drive(&mut view, stdin, &mut out, args.json).await?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::{catalog_item, generate_posts};
    use crate::error::ViewError;
    use crate::logic::EmptySearchPolicy;

    #[test]
    /// What: Settings reach the view; the preset supplies the rest.
    ///
    /// - Input: Posts preset with page size 7, 120 ms debounce, sort `likes`
    /// - Output: View reports those values and keeps the preset's show-all policy
    fn build_view_applies_settings() {
        let settings = Settings {
            page_size: 7,
            debounce_ms: 120,
            sort: Some("likes".into()),
            ..Settings::default()
        };
        let view = build_view(generate_posts(20), posts_view_config(), &settings)
            .expect("valid posts config");
        assert_eq!(view.window_size(), 7);
        assert_eq!(view.debounce_delay(), Duration::from_millis(120));
        assert_eq!(view.sort_key(), "likes");
        assert_eq!(view.empty_search_policy(), EmptySearchPolicy::ShowAll);
    }

    #[test]
    /// What: An empty-search override flips the catalog preset.
    fn build_view_overrides_empty_search() {
        let settings = Settings {
            empty_search: Some(EmptySearchPolicy::ShowAll),
            ..Settings::default()
        };
        let items: Vec<_> = (0..12).map(|id| catalog_item(id, 10, true, 1)).collect();
        let mut view = build_view(items, catalog_view_config(), &settings).expect("valid config");
        assert_eq!(view.current().total_matched, 12);
    }

    #[test]
    /// What: Unknown sort keys from settings fail construction.
    fn build_view_rejects_unknown_sort() {
        let settings = Settings {
            sort: Some("popularity".into()),
            ..Settings::default()
        };
        let err = build_view(generate_posts(3), posts_view_config(), &settings)
            .expect_err("unknown sort key");
        assert!(matches!(err, ViewError::InvalidConfiguration { .. }));
    }
}
