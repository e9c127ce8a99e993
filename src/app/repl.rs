//! Line-oriented event loop driving one view.
//!
//! Typed input only schedules a commit; the loop sleeps until the view's next
//! deadline alongside reading input so commits land in real time.

use std::fmt::Display;
use std::io::Write;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::select;
use tokio::time::{Instant, sleep, sleep_until};

use super::Result;
use super::commands::{Command, HELP, apply_filter};
use super::render::{message, render};
use crate::debounce::TokioClock;
use crate::view::View;

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Read the next line.
    Continue,
    /// Stop immediately.
    Quit,
}

/// What: Run the REPL until `quit` or end of input.
///
/// Inputs:
/// - `view`: View driven by tokio time
/// - `input`: Command lines
/// - `out`: Destination for snapshots and messages
/// - `json`: Emit JSON lines instead of text
///
/// Output:
/// - `Ok(())` on `quit` or EOF.
///
/// # Errors
/// Returns I/O errors from reading `input` or writing `out`.
///
/// Details:
/// - A debounced commit prints the refreshed page as soon as its deadline passes.
/// - At EOF a pending commit is awaited, then the final page is printed.
/// - Command errors are reported on `out` and do not stop the loop.
pub async fn drive<T, R, W>(view: &mut View<T, TokioClock>, input: R, out: &mut W, json: bool) -> Result<()>
where
    T: Serialize + Display,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        let deadline = view.next_deadline();
        select! {
            () = sleep_until(deadline.map_or_else(Instant::now, Instant::from_std)), if deadline.is_some() => {
                if view.tick() {
                    announce_commit(view, out, json)?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if handle_line(view, &line, out, json).await? == Flow::Quit {
                    tracing::debug!("repl quit");
                    return Ok(());
                }
            }
        }
    }
    if let Some(deadline) = view.next_deadline() {
        tracing::debug!("input closed; waiting for pending search term");
        sleep_until(Instant::from_std(deadline)).await;
    }
    render(view, out, json)?;
    Ok(())
}

/// Apply one input line to `view`, writing any response to `out`.
async fn handle_line<T, W>(view: &mut View<T, TokioClock>, line: &str, out: &mut W, json: bool) -> Result<Flow>
where
    T: Serialize + Display,
    W: Write,
{
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(err) => {
            message(out, json, &format!("error: {err}"))?;
            return Ok(Flow::Continue);
        }
    };
    tracing::trace!(?command, "repl command");
    match command {
        Command::Type(text) => view.set_search_term(text),
        Command::Search(text) => {
            view.commit_search_term(text);
            render(view, out, json)?;
        }
        Command::Clear => {
            view.reset();
            render(view, out, json)?;
        }
        Command::Filter { name, value } => match apply_filter(view, &name, &value) {
            Ok(()) => render(view, out, json)?,
            Err(err) => message(out, json, &format!("error: {err}"))?,
        },
        Command::Sort(key) => match view.set_sort_key(&key) {
            Ok(()) => render(view, out, json)?,
            Err(err) => message(out, json, &format!("error: {err}"))?,
        },
        Command::More => {
            if view.load_more() {
                render(view, out, json)?;
            } else {
                message(out, json, "nothing more to load")?;
            }
        }
        Command::Show => render(view, out, json)?,
        Command::Wait(duration) => {
            sleep(duration).await;
            if view.tick() {
                announce_commit(view, out, json)?;
            }
        }
        Command::Help => message(out, json, HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Report a debounced commit and print the refreshed page.
fn announce_commit<T, W>(view: &mut View<T, TokioClock>, out: &mut W, json: bool) -> Result<()>
where
    T: Serialize + Display,
    W: Write,
{
    let note = format!("search committed: {:?}", view.debounced_search_term());
    message(out, json, &note)?;
    render(view, out, json)?;
    Ok(())
}
