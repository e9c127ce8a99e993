//! Incremental view computation for large in-memory lists.
//!
//! A [`View`] owns the search, filter, sort, and window parameters for one
//! collection. Typed search input is debounced; filtering and sorting are
//! memoized on their inputs, and the visible window resets whenever the
//! matched set or its order changes.

pub mod app;
pub mod args;
pub mod datasets;
pub mod debounce;
pub mod error;
pub mod logic;
pub mod settings;
pub mod util;
pub mod view;

pub use debounce::{Clock, ManualClock, SystemClock, TokioClock};
pub use error::ViewError;
pub use logic::{
    DiscreteFilter, EmptySearchPolicy, FilterValue, PipelineStats, SortKey, distinct_values,
};
pub use view::{View, ViewConfig, ViewPhase, ViewSnapshot};
