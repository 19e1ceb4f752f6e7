//! Command-line interface for nyt_trending.
//!
//! Every option can also come from the environment. A `.env` file in the
//! working directory is loaded before parsing.

use crate::api::DEFAULT_BASE_URL;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Key from the environment, CSV to ./news.csv
/// NYT_API_KEY=... nyt_trending
///
/// # Explicit key and output path
/// nyt_trending --api-key YOUR_KEY -o ./out/trending.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// New York Times API key
    #[arg(long, env = "NYT_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Path of the CSV file to write
    #[arg(short, long, env = "NYT_OUTPUT", default_value = "news.csv")]
    pub output: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, env = "NYT_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Base URL of the Most Popular API
    #[arg(long, env = "NYT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// User-Agent header sent with each request
    #[arg(long, default_value = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,
}
