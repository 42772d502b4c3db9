//! Command-line interface definitions for Headline Table.
//!
//! The only setting is the GNews API key, which can be given as a flag or,
//! more usually, through the `API_KEY` environment variable.

use clap::Parser;

/// Command-line arguments for the Headline Table application.
///
/// # Examples
///
/// ```sh
/// # Key from the environment
/// API_KEY=YOUR_GNEWS_API_KEY headline_table
///
/// # Key on the command line
/// headline_table --api-key YOUR_GNEWS_API_KEY
/// ```
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// GNews API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
