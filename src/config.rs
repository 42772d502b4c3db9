//! Run configuration.
//!
//! Everything a run needs is collected into one immutable [`NewsConfig`]
//! before the first request is made. Only the API key comes from the user;
//! the endpoint, query parameters, category list and pacing are fixed.

use crate::models::Category;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// GNews top-headlines endpoint.
pub const GNEWS_TOP_HEADLINES: &str = "https://gnews.io/api/v4/top-headlines";
/// Language filter sent with every request.
pub const LANGUAGE: &str = "en";
/// Country filter sent with every request.
pub const COUNTRY: &str = "us";
/// Maximum number of articles requested per category.
pub const MAX_ARTICLES: u32 = 10;
/// Pause between two consecutive category requests.
pub const DEFAULT_PACING: Duration = Duration::from_secs(2);

/// Variable holding the GNews API key.
pub const API_KEY_VAR: &str = "API_KEY";
/// Dotenv-style file consulted when the key is not set in the environment.
pub const ENV_FILE: &str = ".env";

/// Configuration errors that abort a run before any network activity.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API_KEY not found in .env file or environment variables.")]
    MissingApiKey,
}

impl ConfigError {
    /// Setup instructions printed after the error itself.
    pub fn hint(&self) -> &'static str {
        match self {
            ConfigError::MissingApiKey => {
                "Please create a .env file in the project root with the following content:\nAPI_KEY=YOUR_GNEWS_API_KEY"
            }
        }
    }
}

/// Accept an API key only if it is present and not blank.
pub fn require_api_key(raw: Option<String>) -> Result<String, ConfigError> {
    match raw {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingApiKey),
    }
}

/// Read `API_KEY` from a dotenv-style file.
///
/// A missing or malformed file yields `None`; entries that fail to parse are
/// skipped. The process environment is left untouched.
pub fn api_key_from_env_file(path: &Path) -> Option<String> {
    dotenvy::from_path_iter(path)
        .ok()?
        .filter_map(Result::ok)
        .find(|(key, _)| key == API_KEY_VAR)
        .map(|(_, value)| value)
}

/// Resolve the API key: a non-blank flag or environment value wins,
/// otherwise the key is looked up in `env_file`.
pub fn resolve_api_key(explicit: Option<String>, env_file: &Path) -> Result<String, ConfigError> {
    require_api_key(explicit).or_else(|_| require_api_key(api_key_from_env_file(env_file)))
}

/// Immutable configuration for one run.
#[derive(Clone)]
pub struct NewsConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub country: String,
    pub max_articles: u32,
    pub categories: Vec<Category>,
    /// Pause inserted between consecutive categories (not after the last).
    pub pacing: Duration,
    /// Drop categories that return zero articles instead of emitting a
    /// "No articles found" row.
    pub omit_empty_categories: bool,
}

impl NewsConfig {
    /// Standard configuration: all nine categories against GNews.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: GNEWS_TOP_HEADLINES.to_string(),
            language: LANGUAGE.to_string(),
            country: COUNTRY.to_string(),
            max_articles: MAX_ARTICLES,
            categories: Category::ALL.to_vec(),
            pacing: DEFAULT_PACING,
            omit_empty_categories: false,
        }
    }

    /// Build the request URL for one category.
    pub fn request_url(&self, category: Category) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("lang", &self.language)
            .append_pair("country", &self.country)
            .append_pair("max", &self.max_articles.to_string())
            .append_pair("apikey", &self.api_key)
            .append_pair("category", category.as_str());
        Ok(url)
    }
}

impl fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("country", &self.country)
            .field("max_articles", &self.max_articles)
            .field("categories", &self.categories)
            .field("pacing", &self.pacing)
            .field("omit_empty_categories", &self.omit_empty_categories)
            .finish()
    }
}
