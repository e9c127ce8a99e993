//! Configuration file parsing utilities.
//!
//! This module provides helpers for parsing configuration files with common
//! patterns like comment skipping and key-value parsing.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character
/// - Keys are lower-cased with `.`, `-`, and spaces folded to `_`
/// - Trailing ` #` and `//` comments are removed from the value
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    let (raw_key, raw_value) = trimmed.split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    Some((key, strip_inline_comment(raw_value).to_string()))
}

/// Remove a trailing ` #...` or `//...` comment and surrounding whitespace.
fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//") {
        s = &s[..i];
    }
    if let Some(i) = s.find(" #") {
        s = &s[..i];
    }
    s.trim()
}
