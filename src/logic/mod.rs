//! Non-UI list logic: matching, ordering, memoization, and windowing.
//!
//! These pieces know nothing about timers or view parameters; the `view`
//! module wires them together.

pub mod memo;
pub mod ordering;
pub mod pipeline;
pub mod predicate;
pub mod window;

pub use memo::MemoSlot;
pub use ordering::{Comparator, SortKey, compare_text, sort_indices};
pub use pipeline::{Pipeline, PipelineStats};
pub use predicate::{
    DiscreteFilter, EmptySearchPolicy, FilterValue, Predicate, Selections, TextField,
    distinct_values,
};
pub use window::Window;
