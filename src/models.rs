//! Data models for headlines and the rows they become.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Category`]: The fixed, ordered set of GNews topics queried on every run
//! - [`Article`] and [`HeadlinesResponse`]: The subset of the GNews payload we read
//! - [`ReportRow`]: One line of the Markdown table (an article or a category error)
//! - [`Report`]: The full document for a single run
//!
//! Articles are transient. They are read once, projected into a [`ReportRow`],
//! and dropped.

use crate::api::FetchError;
use crate::utils::{ReportTimestamp, escape_cell};
use itertools::Itertools;
use serde::Deserialize;
use std::fmt;

/// Placeholder for a missing title or description.
pub const MISSING_TEXT: &str = "N/A";
/// Placeholder for a missing article URL.
pub const MISSING_URL: &str = "#";
/// URL cell used by rows that do not point at an article.
pub const NO_LINK: &str = "-";

/// A GNews top-headlines category.
///
/// The order of [`Category::ALL`] is the order categories are fetched and the
/// order their rows appear in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    General,
    World,
    Nation,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl Category {
    /// Every category, in fetch order.
    pub const ALL: [Category; 9] = [
        Category::General,
        Category::World,
        Category::Nation,
        Category::Business,
        Category::Technology,
        Category::Entertainment,
        Category::Sports,
        Category::Science,
        Category::Health,
    ];

    /// The identifier GNews expects in the `category` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::World => "world",
            Category::Nation => "nation",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Science => "science",
            Category::Health => "health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single article as returned by the GNews API.
///
/// Every field is optional: GNews occasionally omits or nulls them, and a
/// missing field must render as a placeholder rather than fail the category.
#[derive(Debug, Default, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The top-level GNews response body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlinesResponse {
    /// Total matches reported by the API. Only logged.
    #[serde(default)]
    pub total_articles: Option<u64>,
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
}

impl HeadlinesResponse {
    /// The articles list, treating an absent or `null` key as empty.
    pub fn into_articles(self) -> Vec<Article> {
        self.articles.unwrap_or_default()
    }
}

/// One row of the Markdown table.
///
/// Cells are stored already escaped, so a `ReportRow` can never produce a
/// broken table line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub category: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

impl ReportRow {
    /// Build a row from an article, applying placeholders and escaping.
    pub fn from_article(category: Category, article: &Article) -> Self {
        let title = article
            .title
            .as_deref()
            .map(escape_cell)
            .unwrap_or_else(|| MISSING_TEXT.to_string());
        let description = article
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(escape_cell)
            .unwrap_or_else(|| MISSING_TEXT.to_string());
        let url = article
            .url
            .as_deref()
            .map(escape_cell)
            .unwrap_or_else(|| MISSING_URL.to_string());

        Self {
            category: escape_cell(category.as_str()),
            title,
            description,
            url,
        }
    }

    /// Build the single row that stands in for a failed category.
    pub fn from_error(category: Category, error: &FetchError) -> Self {
        Self {
            category: escape_cell(category.as_str()),
            title: error.row_title().to_string(),
            description: escape_cell(&error.row_detail()),
            url: NO_LINK.to_string(),
        }
    }

    /// Row emitted when a category succeeded but returned no articles.
    pub fn no_articles(category: Category) -> Self {
        Self {
            category: escape_cell(category.as_str()),
            title: "No articles found".to_string(),
            description: NO_LINK.to_string(),
            url: NO_LINK.to_string(),
        }
    }

    /// Render the row as a Markdown table line.
    pub fn to_markdown(&self) -> String {
        format!(
            "| {} | {} | {} | {} |",
            self.category, self.title, self.description, self.url
        )
    }
}

/// The complete Markdown document produced by one run.
#[derive(Debug, Clone)]
pub struct Report {
    pub timestamp: ReportTimestamp,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(timestamp: ReportTimestamp, rows: Vec<ReportRow>) -> Self {
        Self { timestamp, rows }
    }

    /// Filename the report is saved under, e.g. `news_20250430_1320.md`.
    pub fn filename(&self) -> String {
        format!("news_{}.md", self.timestamp.compact())
    }

    /// Render the heading, table header and every row.
    ///
    /// Lines are joined with `\n` and there is no trailing newline.
    pub fn to_markdown(&self) -> String {
        let header = [
            format!("# News Today -- Fetched at {}", self.timestamp.display()),
            String::new(),
            "| Category | Title | Description | URL |".to_string(),
            "|---|---|---|---|".to_string(),
        ];

        header
            .into_iter()
            .chain(self.rows.iter().map(ReportRow::to_markdown))
            .join("\n")
    }
}
