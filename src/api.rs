//! Extraction from the New York Times Most Popular API.
//!
//! Two feeds are queried over the same 30-day window: most viewed and most
//! shared to Facebook. The matched set is the viewed list filtered down to
//! the articles that also appear in the shared list.
//!
//! # Architecture
//!
//! - [`PopularFeed`]: the seam between fetching and matching
//! - [`MostPopularClient`]: the HTTP implementation over `reqwest`
//! - [`extract`]: fetches both feeds concurrently and intersects them
//!
//! # Matching
//!
//! Two articles are the same story when both title and published date are
//! equal. The viewed list's order is preserved.

use crate::error::{PipelineError, Result};
use crate::models::{MatchKey, MostPopularResponse, RawArticle};
use crate::utils::{looks_truncated, truncate_for_log};
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/svc/mostpopular/v2/";

/// Lookback window shared by both queries, in days.
pub const LOOKBACK_DAYS: u32 = 30;

/// The two Most Popular feeds this tool reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Viewed,
    SharedFacebook,
}

impl Feed {
    /// Path relative to the API base URL.
    pub fn path(self) -> String {
        match self {
            Feed::Viewed => format!("viewed/{LOOKBACK_DAYS}.json"),
            Feed::SharedFacebook => format!("shared/{LOOKBACK_DAYS}/facebook.json"),
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Viewed => f.write_str("most-viewed"),
            Feed::SharedFacebook => f.write_str("most-shared (facebook)"),
        }
    }
}

/// Source of Most Popular article lists.
pub trait PopularFeed {
    /// Fetch every article in `feed` for the lookback window.
    async fn fetch(&self, feed: Feed) -> Result<Vec<RawArticle>>;
}

/// HTTP client for the Most Popular API.
pub struct MostPopularClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl MostPopularClient {
    /// Build a client rooted at `base_url`.
    ///
    /// A trailing slash is added to `base_url` when missing so feed paths
    /// join beneath it rather than replacing its last segment.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(PipelineError::HttpClient)?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Full request URL for `feed`, credential included.
    pub fn endpoint(&self, feed: Feed) -> Result<Url> {
        let mut url = self.base_url.join(&feed.path())?;
        url.query_pairs_mut().append_pair("api-key", &self.api_key);
        Ok(url)
    }
}

impl fmt::Debug for MostPopularClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MostPopularClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl PopularFeed for MostPopularClient {
    #[instrument(level = "info", skip_all, fields(%feed))]
    async fn fetch(&self, feed: Feed) -> Result<Vec<RawArticle>> {
        let t0 = Instant::now();
        let url = self.endpoint(feed)?;

        // without_url() keeps the api-key query parameter out of messages
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::Network {
                feed,
                source: e.without_url(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| PipelineError::Network {
            feed,
            source: e.without_url(),
        })?;
        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Received response"
        );

        if !status.is_success() {
            warn!(status = status.as_u16(), "Non-success status from Most Popular API");
            return Err(PipelineError::Api {
                feed,
                status: status.as_u16(),
                message: truncate_for_log(body.trim(), 200),
            });
        }

        parse_results(feed, &body)
    }
}

/// Decode a Most Popular body into its article list.
pub fn parse_results(feed: Feed, body: &str) -> Result<Vec<RawArticle>> {
    let response: MostPopularResponse = serde_json::from_str(body).map_err(|e| {
        let reason = if looks_truncated(&e) {
            format!("body ended early ({e})")
        } else {
            e.to_string()
        };
        warn!(%feed, preview = %truncate_for_log(body, 300), "Could not decode response body");
        PipelineError::MalformedResponse { feed, reason }
    })?;

    let results = response.results.ok_or_else(|| PipelineError::MalformedResponse {
        feed,
        reason: "missing `results` array".to_string(),
    })?;

    if let Some(expected) = response.num_results {
        if expected as usize != results.len() {
            debug!(%feed, expected, actual = results.len(), "num_results disagrees with results length");
        }
    }
    info!(%feed, status = ?response.status, count = results.len(), "Parsed feed");
    Ok(results)
}

/// Keep the viewed articles whose (title, published date) also occur in `shared`.
pub fn intersect(viewed: Vec<RawArticle>, shared: &[RawArticle]) -> Vec<RawArticle> {
    let shared_keys: HashSet<MatchKey<'_>> = shared.iter().map(RawArticle::match_key).collect();
    viewed
        .into_iter()
        .filter(|article| shared_keys.contains(&article.match_key()))
        .collect()
}

/// Fetch both feeds and return the matched articles in viewed order.
///
/// # Errors
///
/// Any fetch failure is returned as-is. An empty intersection is
/// [`PipelineError::EmptyResult`], so nothing downstream runs on no data.
#[instrument(level = "info", skip_all)]
pub async fn extract<F: PopularFeed>(source: &F) -> Result<Vec<RawArticle>> {
    let (viewed, shared) = futures::try_join!(
        source.fetch(Feed::Viewed),
        source.fetch(Feed::SharedFacebook)
    )?;
    let (viewed_count, shared_count) = (viewed.len(), shared.len());

    let matched = intersect(viewed, &shared);
    info!(
        viewed = viewed_count,
        shared = shared_count,
        matched = matched.len(),
        "Matched viewed articles against shared articles"
    );

    if matched.is_empty() {
        return Err(PipelineError::EmptyResult { stage: "extract" });
    }
    Ok(matched)
}
