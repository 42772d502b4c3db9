//! Markdown report output.
//!
//! The rendered report is printed between two banners and then saved as
//! `news_{YYYYMMDD_HHMM}.md`. A save failure is reported but never fails the
//! run: the table has already reached standard output by then.

use crate::models::Report;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

const TABLE_BANNER: &str = "--- Generated Markdown Table ---";
const TABLE_FOOTER: &str = "-------------------------------";

/// Frame the report text with the banners printed around it.
pub fn framed(report: &Report) -> String {
    format!("{}\n{}\n{}\n", TABLE_BANNER, report.to_markdown(), TABLE_FOOTER)
}

/// Print the framed report to standard output.
pub fn print_report(report: &Report) {
    println!("{}", framed(report));
}

/// Write the report into `dir`, overwriting any file with the same name.
///
/// # Returns
///
/// The path written to.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn write_report(report: &Report, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(report.filename());
    fs::write(&path, report.to_markdown()).await?;
    info!(path = %path.display(), rows = report.rows.len(), "Wrote Markdown report");
    Ok(path)
}

/// Save the report and print the outcome. Errors are reported, not returned.
pub async fn save_report(report: &Report, dir: &Path) -> Option<PathBuf> {
    let filename = report.filename();
    match write_report(report, dir).await {
        Ok(path) => {
            println!("Markdown table saved to file: {}", filename);
            Some(path)
        }
        Err(e) => {
            println!("Error saving file {}: {}", filename, e);
            error!(file = %filename, error = %e, "Failed writing Markdown report");
            None
        }
    }
}
