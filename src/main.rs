//! # Headline Table
//!
//! Fetches the GNews top headlines for nine fixed categories, renders them as
//! one Markdown table, prints it and saves it as `news_{YYYYMMDD_HHMM}.md`.
//!
//! ## Usage
//!
//! ```sh
//! API_KEY=YOUR_GNEWS_API_KEY headline_table
//! ```
//!
//! ## Architecture
//!
//! The application is a linear pipeline:
//! 1. **Configuration**: require the API key, fix the rest into a `NewsConfig`
//! 2. **Timestamp**: capture one UTC+8 instant for the heading and filename
//! 3. **Fetching**: one GET per category, strictly sequential, 2 s apart
//! 4. **Output**: print the framed table, then write it to disk
//!
//! A failing category becomes an error row in the table; it never stops the
//! run and never changes the exit code. Only a missing API key does (exit 1).

use clap::Parser;
use std::error::Error;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod fetcher;
mod models;
mod outputs;
mod utils;

use api::GNewsClient;
use cli::Cli;
use config::{ENV_FILE, NewsConfig, resolve_api_key};
use fetcher::{SleepPacer, fetch_all};
use models::Report;
use outputs::markdown;
use utils::ReportTimestamp;

/// Build the run configuration, or report why the run cannot start.
///
/// Runs before anything is fetched or printed to standard output. On failure
/// the diagnostic goes to `diag` and the exit status to use is returned.
fn startup(args: Cli, env_file: &Path, diag: &mut impl Write) -> Result<NewsConfig, i32> {
    match resolve_api_key(args.api_key, env_file) {
        Ok(api_key) => Ok(NewsConfig::new(api_key)),
        Err(e) => {
            error!(error = %e, "Missing API key; aborting before any request");
            let _ = writeln!(diag, "Error: {}", e);
            let _ = writeln!(diag, "{}", e.hint());
            Err(1)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match startup(args, Path::new(ENV_FILE), &mut std::io::stderr()) {
        Ok(config) => config,
        Err(code) => std::process::exit(code),
    };
    info!(?config, "headline_table starting up");

    let timestamp = ReportTimestamp::now();
    info!(at = %timestamp.as_datetime(), file = %timestamp.compact(), "Captured report timestamp");

    let client = GNewsClient::new(&config)?;
    let rows = fetch_all(&config, &client, &SleepPacer).await;

    let report = Report::new(timestamp, rows);
    markdown::print_report(&report);
    markdown::save_report(&report, Path::new(".")).await;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        rows = report.rows.len(),
        "Execution complete"
    );

    Ok(())
}
