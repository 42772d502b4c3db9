//! GNews API access and per-category error classification.
//!
//! # Architecture
//!
//! - [`HeadlineSource`]: trait for anything that can produce the articles of
//!   one category. The pipeline only talks to this trait.
//! - [`GNewsClient`]: the real implementation, one HTTP GET per call.
//! - [`FetchError`]: the closed set of ways a single category can fail.
//!
//! A failed category never aborts the run. Every [`FetchError`] knows how to
//! describe itself as a console diagnostic and as a table row.

use crate::config::NewsConfig;
use crate::models::{Article, Category, HeadlinesResponse};
use crate::utils::{error_chain, truncate_for_log};
use reqwest::StatusCode;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Why a single category could not be turned into article rows.
#[derive(Error, Debug)]
pub enum FetchError {
    /// A 2xx status other than 200.
    #[error("HTTP Status {0}")]
    HttpStatus(u16),

    /// Any final status outside 2xx (unfollowed 3xx, 4xx, 5xx).
    #[error("{code} {reason}")]
    HttpProtocol { code: u16, reason: String },

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("{0}")]
    Network(String),

    /// The body was not the JSON document we expect.
    #[error("{0}")]
    JsonParse(#[source] serde_json::Error),

    /// Anything else: unreadable body, non-UTF-8 body, unbuildable request.
    #[error("{0}")]
    Unexpected(String),
}

impl FetchError {
    /// Classify a status outside the 2xx range.
    pub fn protocol(status: StatusCode) -> Self {
        FetchError::HttpProtocol {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// Classify an error returned while sending a request.
    ///
    /// The request URL is stripped first: it carries the API key.
    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_builder() {
            FetchError::Unexpected(error_chain(&e.without_url()))
        } else {
            FetchError::Network(error_chain(&e.without_url()))
        }
    }

    /// Short name of the error kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::HttpStatus(_) => "http_status",
            FetchError::HttpProtocol { .. } => "http_protocol",
            FetchError::Network(_) => "network",
            FetchError::JsonParse(_) => "json_parse",
            FetchError::Unexpected(_) => "unexpected",
        }
    }

    /// Title cell of the error row.
    pub fn row_title(&self) -> &'static str {
        match self {
            FetchError::HttpStatus(_) => "Error fetching",
            FetchError::HttpProtocol { .. } => "HTTP Error",
            FetchError::Network(_) => "URL Error",
            FetchError::JsonParse(_) => "JSON Error",
            FetchError::Unexpected(_) => "Unexpected Error",
        }
    }

    /// Description cell of the error row (unescaped).
    pub fn row_detail(&self) -> String {
        match self {
            FetchError::HttpProtocol { code, reason } => {
                let hint = match code {
                    401 => " (Check API Key)",
                    403 => " (Forbidden - Check API Key/Plan)",
                    429 => " (Rate Limit Exceeded)",
                    _ => "",
                };
                format!("{} {}{}", code, reason, hint)
            }
            FetchError::JsonParse(_) => "Could not parse response".to_string(),
            other => other.to_string(),
        }
    }

    /// One-line console diagnostic for this failure.
    pub fn diagnostic(&self, category: Category) -> String {
        match self {
            FetchError::HttpStatus(_) => format!("  Error fetching category {}: {}", category, self),
            FetchError::HttpProtocol { .. } => format!("  HTTP Error for category {}: {}", category, self),
            FetchError::Network(_) => format!("  URL Error for category {}: {}", category, self),
            FetchError::JsonParse(_) => format!("  JSON Decode Error for category {}: {}", category, self),
            FetchError::Unexpected(_) => {
                format!("  An unexpected error occurred for category {}: {}", category, self)
            }
        }
    }
}

/// Anything that can produce the articles of one category.
pub trait HeadlineSource {
    /// Fetch the articles of `category`, in the order the source returns them.
    async fn fetch(&self, category: Category) -> Result<Vec<Article>, FetchError>;
}

/// [`HeadlineSource`] backed by the GNews top-headlines endpoint.
#[derive(Debug)]
pub struct GNewsClient<'a> {
    config: &'a NewsConfig,
    http: reqwest::Client,
}

impl<'a> GNewsClient<'a> {
    /// Create a client with transport defaults (no timeout override).
    pub fn new(config: &'a NewsConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http(config, http))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http(config: &'a NewsConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }
}

impl<'a> HeadlineSource for GNewsClient<'a> {
    #[instrument(level = "info", skip_all, fields(%category))]
    async fn fetch(&self, category: Category) -> Result<Vec<Article>, FetchError> {
        let t0 = Instant::now();
        let url = self
            .config
            .request_url(category)
            .map_err(|e| FetchError::Unexpected(format!("invalid request URL: {}", e)))?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        debug!(
            status = status.as_u16(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "GNews responded"
        );

        if !status.is_success() {
            return Err(FetchError::protocol(status));
        }
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Unexpected(error_chain(&e.without_url())))?;
        let body = std::str::from_utf8(&bytes).map_err(|e| {
            FetchError::Unexpected(format!("response body is not valid UTF-8: {}", e))
        })?;

        let parsed: HeadlinesResponse = serde_json::from_str(body).map_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(body, 300),
                "GNews returned malformed JSON"
            );
            FetchError::JsonParse(e)
        })?;

        let total_articles = parsed.total_articles;
        let articles = parsed.into_articles();
        info!(
            count = articles.len(),
            ?total_articles,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched category headlines"
        );
        Ok(articles)
    }
}
