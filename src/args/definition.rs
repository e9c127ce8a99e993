//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

use crate::datasets::DatasetKind;

/// viewpipe - Search, filter, sort, and page through a large generated list
#[derive(Parser, Debug, Default)]
#[command(name = "viewpipe")]
#[command(version)]
#[command(about = "Search, filter, sort, and page through a large generated list", long_about = None)]
pub struct Args {
    /// Dataset to generate
    #[arg(short, long, value_enum)]
    pub dataset: Option<DatasetKind>,

    /// Number of records to generate (default depends on the dataset)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Run a single search, print the first page, and exit
    #[arg(short, long)]
    pub search: Option<String>,

    /// Apply a filter before searching (NAME=VALUE, repeatable)
    #[arg(short, long, value_name = "NAME=VALUE")]
    pub filter: Vec<String>,

    /// Sort key to start with
    #[arg(long)]
    pub sort: Option<String>,

    /// Settings file (default: ~/.config/viewpipe/viewpipe.conf)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Quiet period before typed input is committed, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Initial number of visible records and load-more step
    #[arg(long)]
    pub page_size: Option<usize>,

    /// What an empty search shows (show-all, show-none)
    #[arg(long)]
    pub empty_search: Option<String>,

    /// Number of earlier filter results kept for reuse (0 disables)
    #[arg(long)]
    pub filter_history: Option<usize>,

    /// Print snapshots as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}
