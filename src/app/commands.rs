//! REPL command parsing.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::debounce::Clock;
use crate::error::ViewError;
use crate::view::View;

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Typed input; commits after the debounce delay.
    Type(String),
    /// Search that commits immediately.
    Search(String),
    /// Clear the search term.
    Clear,
    /// Change a discrete filter.
    Filter {
        /// Filter name.
        name: String,
        /// Raw value, parsed against the filter's default.
        value: String,
    },
    /// Switch sort key.
    Sort(String),
    /// Grow the visible window.
    More,
    /// Print the current view.
    Show,
    /// Let time pass (so pending input can commit).
    Wait(Duration),
    /// List commands.
    Help,
    /// Leave the REPL.
    Quit,
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
commands:
  type <text>            debounced search input
  search <text>          search immediately
  clear                  clear the search term
  filter <name> <value>  set a filter (use its default to clear it)
  sort <key>             change the sort key
  more                   load the next page
  show                   print the current page
  wait <ms>              let time pass
  help                   this list
  quit                   exit";

/// What: Errors surfaced to the REPL user.
///
/// Inputs: Produced by [`Command::from_str`] and [`apply_filter`].
///
/// Output: Implements `Display`/`Error`; wrapped view errors keep their message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a known command.
    Unknown(String),
    /// A command needing an argument got none.
    MissingArgument {
        /// Command name.
        command: &'static str,
        /// Shape of the expected argument.
        expected: &'static str,
    },
    /// An argument could not be parsed.
    InvalidArgument {
        /// Command name.
        command: &'static str,
        /// Offending text.
        value: String,
    },
    /// The view rejected the change.
    View(ViewError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(word) => write!(f, "unknown command \"{word}\" (try \"help\")"),
            Self::MissingArgument { command, expected } => {
                write!(f, "{command}: expected {expected}")
            }
            Self::InvalidArgument { command, value } => {
                write!(f, "{command}: invalid argument \"{value}\"")
            }
            Self::View(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::View(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ViewError> for CommandError {
    fn from(value: ViewError) -> Self {
        Self::View(value)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));
        match word.to_ascii_lowercase().as_str() {
            "type" | "t" => Ok(Self::Type(rest.to_string())),
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "clear" | "reset" => Ok(Self::Clear),
            "filter" | "f" => {
                let split = rest
                    .split_once('=')
                    .filter(|(name, _)| !name.trim().contains(char::is_whitespace))
                    .or_else(|| rest.split_once(char::is_whitespace));
                match split {
                    Some((name, value)) if !name.trim().is_empty() => Ok(Self::Filter {
                        name: name.trim().to_string(),
                        value: value.trim().to_string(),
                    }),
                    _ => Err(CommandError::MissingArgument {
                        command: "filter",
                        expected: "<name> <value>",
                    }),
                }
            }
            "sort" => {
                if rest.is_empty() {
                    Err(CommandError::MissingArgument {
                        command: "sort",
                        expected: "<key>",
                    })
                } else {
                    Ok(Self::Sort(rest.to_string()))
                }
            }
            "more" | "m" => Ok(Self::More),
            "show" | "" => Ok(Self::Show),
            "wait" | "w" => rest
                .parse::<u64>()
                .map(|ms| Self::Wait(Duration::from_millis(ms)))
                .map_err(|_| {
                    if rest.is_empty() {
                        CommandError::MissingArgument {
                            command: "wait",
                            expected: "<milliseconds>",
                        }
                    } else {
                        CommandError::InvalidArgument {
                            command: "wait",
                            value: rest.to_string(),
                        }
                    }
                }),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// What: Set a filter from user text.
///
/// Inputs:
/// - `view`: Target view
/// - `name`: Declared filter name
/// - `raw`: Value text, parsed like the filter's default (text or flag)
///
/// Output:
/// - `Ok(())` once the view accepted the value.
///
/// # Errors
/// - `CommandError::View(UnknownFilterName)` for undeclared names
/// - `CommandError::InvalidArgument` when a flag value is not a boolean word
pub fn apply_filter<T, C: Clock>(
    view: &mut View<T, C>,
    name: &str,
    raw: &str,
) -> Result<(), CommandError> {
    let Some(current) = view.filter_value(name) else {
        return Err(ViewError::UnknownFilterName(name.to_string()).into());
    };
    let value = current
        .parse_like(raw)
        .ok_or_else(|| CommandError::InvalidArgument {
            command: "filter",
            value: raw.to_string(),
        })?;
    view.set_filter(name, value)?;
    Ok(())
}
