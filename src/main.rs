//! # nyt_trending
//!
//! Finds the New York Times articles that are both among the most viewed and
//! the most shared to Facebook over the last 30 days, then reports and
//! exports them.
//!
//! ## Usage
//!
//! ```sh
//! NYT_API_KEY=... nyt_trending -o news.csv
//! ```
//!
//! ## Architecture
//!
//! A single linear pipeline, run once per invocation:
//! 1. **Extract**: fetch both Most Popular feeds and intersect them
//! 2. **Transform**: reduce each match to an [`models::ArticleRecord`], newest first
//! 3. **Load**: write the records to CSV (atomic replace)
//! 4. **Report**: print the article table and the keyword frequency table
//!
//! Any stage failing stops the run with a non-zero exit status.

use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod error;
mod models;
mod outputs;
mod transform;
mod utils;

use api::{MostPopularClient, PopularFeed, extract};
use cli::Cli;
use error::{Result, error_chain};
use outputs::{articles::article_table, export::write_records, keywords};
use transform::transform;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // before tracing so RUST_LOG may come from .env
    let dotenv = dotenvy::dotenv();

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

    let start_time = Instant::now();
    info!("nyt_trending starting up");

    if let Err(e) = dotenv {
        debug!(error = %e, "No .env file loaded");
    }
    let args = Cli::parse();
    debug!(output = %args.output.display(), base_url = %args.base_url, timeout_secs = args.timeout_secs, "Parsed CLI arguments");

    match run(&args).await {
        Ok(()) => {
            let elapsed = start_time.elapsed();
            info!(?elapsed, secs = elapsed.as_secs(), millis = elapsed.subsec_millis(), "Execution complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let detail = error_chain(&e);
            error!(stage = e.stage(), error = %detail, "Pipeline failed");
            eprintln!("nyt_trending: {} stage failed: {detail}", e.stage());
            ExitCode::FAILURE
        }
    }
}

/// Build the API client from the CLI options and run the pipeline against it.
async fn run(args: &Cli) -> Result<()> {
    let client = MostPopularClient::new(
        &args.base_url,
        args.api_key.as_str(),
        Duration::from_secs(args.timeout_secs),
        &args.user_agent,
    )?;
    run_with(&client, &args.output).await
}

/// Extract, transform, load, then report. Fetches exactly once.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
async fn run_with<F: PopularFeed>(source: &F, output: &Path) -> Result<()> {
    let matched = extract(source).await?;
    let records = transform(matched);

    write_records(output, &records)?;
    info!(rows = records.len(), "Saved matched articles");

    println!("{}", article_table(&records));

    let stats = keywords::keyword_stats(&records);
    if stats.is_empty() {
        warn!("No keyword occurs more than once across matched articles");
    }
    println!("{}", keywords::keyword_table(&stats));

    info!(articles = records.len(), keywords = stats.len(), "Printed reports");
    Ok(())
}
