//! Text and JSON output for view snapshots.

use std::fmt::Display;
use std::io::{self, Write};

use serde::Serialize;

use crate::debounce::Clock;
use crate::view::{View, ViewSnapshot};

/// JSON line wrapping a snapshot with the parameters that produced it.
#[derive(Serialize)]
struct SnapshotLine<'a, T> {
    /// Committed search term.
    search: String,
    /// Active sort key.
    sort: String,
    /// Current window size.
    window: usize,
    /// The snapshot itself.
    #[serde(flatten)]
    snapshot: ViewSnapshot<'a, T>,
}

/// What: Write the current page of `view`.
///
/// Inputs:
/// - `view`: View to snapshot (fires a due debounce timer first)
/// - `out`: Destination
/// - `json`: Emit one JSON object instead of the text listing
///
/// Output:
/// - `Ok(())` when everything was written.
///
/// # Errors
/// Returns the underlying I/O (or JSON encoding) error.
///
/// Details:
/// - The text form is a "Showing X of Y" header, one line per visible record,
///   then a load-more hint when records remain.
pub fn render<T, C, W>(view: &mut View<T, C>, out: &mut W, json: bool) -> io::Result<()>
where
    T: Serialize + Display,
    C: Clock,
    W: Write,
{
    view.tick();
    let search = view.debounced_search_term().to_string();
    let sort = view.sort_key().to_string();
    let window = view.window_size();
    let snapshot = view.current();
    if json {
        let line = SnapshotLine {
            search,
            sort,
            window,
            snapshot,
        };
        serde_json::to_writer(&mut *out, &line)?;
        return writeln!(out);
    }
    writeln!(
        out,
        "Showing {} of {} matches ({} records) | search: {search:?} | sort: {sort}",
        snapshot.visible.len(),
        snapshot.total_matched,
        snapshot.total,
    )?;
    for item in &snapshot.visible {
        writeln!(out, "  {item}")?;
    }
    if snapshot.has_more() {
        writeln!(out, "  ... load more ({} remaining)", snapshot.remaining)?;
    }
    Ok(())
}

/// Write a one-line status or error message (a `{"message": ..}` object in JSON mode).
///
/// # Errors
/// Returns the underlying I/O error.
pub fn message<W: Write>(out: &mut W, json: bool, text: &str) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &serde_json::json!({ "message": text }))?;
        return writeln!(out);
    }
    writeln!(out, "{text}")
}
