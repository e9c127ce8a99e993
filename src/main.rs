//! viewpipe binary entrypoint kept minimal. The runtime lives in `viewpipe::app`.

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

use viewpipe::args::{Args, determine_log_level};
use viewpipe::settings::paths::logs_dir;

/// Log timestamp formatter using local time.
struct ViewpipeTimer;

impl tracing_subscriber::fmt::time::FormatTime for ViewpipeTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let now = chrono::Local::now();
        w.write_str(&now.format("%Y-%m-%d-T %H:%M:%S%.3f").to_string())
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Install the tracing subscriber, writing to the log file or falling back to stderr.
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let mut log_path = logs_dir();
    log_path.push("viewpipe.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(ViewpipeTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger so startup never blocks on the log file
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(ViewpipeTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&determine_log_level(&args));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "viewpipe starting");
    if let Err(err) = viewpipe::app::run(args).await {
        tracing::error!(error = %err, "Application error");
        eprintln!("viewpipe: {err}");
        std::process::exit(1);
    }
    tracing::info!("viewpipe exited");
}
