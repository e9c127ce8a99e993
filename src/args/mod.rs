//! Command-line argument parsing and handling.

pub mod definition;
pub mod utils;

// Re-export commonly used items
pub use definition::Args;
pub use utils::{apply_overrides, determine_log_level, parse_filter_assignment};
