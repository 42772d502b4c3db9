//! Sequential per-category fetch loop.
//!
//! Categories are fetched strictly one after another. Each category yields
//! either its article rows or exactly one error row, and a fixed pause
//! separates consecutive requests. The pause goes through [`Pacer`] so tests
//! can run the loop without sleeping.

use crate::api::{FetchError, HeadlineSource};
use crate::config::NewsConfig;
use crate::models::{Article, Category, ReportRow};
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Pause between two category requests.
pub trait Pacer {
    async fn pause(&self, interval: Duration);
}

/// [`Pacer`] that really waits, using the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    async fn pause(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

/// Turn one category's outcome into table rows.
///
/// A successful empty category yields a single "No articles found" row unless
/// `omit_empty` is set.
pub fn rows_for_category(
    category: Category,
    result: &Result<Vec<Article>, FetchError>,
    omit_empty: bool,
) -> Vec<ReportRow> {
    match result {
        Ok(articles) if articles.is_empty() => {
            if omit_empty {
                Vec::new()
            } else {
                vec![ReportRow::no_articles(category)]
            }
        }
        Ok(articles) => articles
            .iter()
            .map(|article| ReportRow::from_article(category, article))
            .collect(),
        Err(e) => vec![ReportRow::from_error(category, e)],
    }
}

/// Fetch every configured category and collect the report rows.
///
/// Progress goes to standard output. A failure in one category is printed,
/// recorded as a row, and the loop moves on.
#[instrument(level = "info", skip_all, fields(categories = config.categories.len()))]
pub async fn fetch_all<S, P>(config: &NewsConfig, source: &S, pacer: &P) -> Vec<ReportRow>
where
    S: HeadlineSource,
    P: Pacer,
{
    let total = config.categories.len();
    let mut rows = Vec::new();

    println!("Fetching news...");

    for (i, &category) in config.categories.iter().enumerate() {
        println!("Fetching category: {} ({}/{})...", category, i + 1, total);

        let result = source.fetch(category).await;
        match &result {
            Ok(articles) if articles.is_empty() => {
                println!("  No articles found for category: {}", category);
                warn!(%category, "Category returned no articles");
            }
            Ok(articles) => {
                info!(%category, count = articles.len(), "Category fetched");
            }
            Err(e) => {
                println!("{}", e.diagnostic(category));
                error!(%category, kind = e.kind(), error = %e, "Category fetch failed");
            }
        }
        rows.extend(rows_for_category(
            category,
            &result,
            config.omit_empty_categories,
        ));

        if i + 1 < total {
            println!(
                "  Waiting {} seconds before next category...",
                config.pacing.as_secs_f64()
            );
            pacer.pause(config.pacing).await;
        }
    }

    println!("\nFetching complete.\n");
    info!(rows = rows.len(), "Finished fetching all categories");
    rows
}
