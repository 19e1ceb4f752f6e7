//! Error taxonomy for the pipeline.
//!
//! Every variant knows which stage produced it so the top level can report
//! where a run stopped. Nothing in the pipeline recovers from these; the
//! remedy is to re-run.

use crate::api::Feed;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Host unreachable, connection reset, or request timeout.
    #[error("network error while fetching {feed}: {source}")]
    Network {
        feed: Feed,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("{feed} endpoint returned HTTP {status}: {message}")]
    Api {
        feed: Feed,
        status: u16,
        message: String,
    },

    /// Body was not JSON, was cut short, or lacked the fields we need.
    #[error("malformed response from {feed}: {reason}")]
    MalformedResponse { feed: Feed, reason: String },

    /// No matched articles reached `stage`.
    #[error("{}", empty_result_message(.stage))]
    EmptyResult { stage: &'static str },

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode CSV row for {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid API base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("could not build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

fn empty_result_message(stage: &str) -> String {
    match stage {
        "extract" => "no articles appear in both the most-viewed and most-shared lists".to_string(),
        other => format!("{other} stage was given no article records"),
    }
}

/// Render `err` followed by every underlying cause, skipping causes whose
/// text is already part of the message.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl PipelineError {
    /// Name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::InvalidUrl(_) | PipelineError::HttpClient(_) => "configure",
            PipelineError::Network { .. }
            | PipelineError::Api { .. }
            | PipelineError::MalformedResponse { .. } => "extract",
            PipelineError::EmptyResult { stage } => *stage,
            PipelineError::FileWrite { .. } | PipelineError::Csv { .. } => "load",
        }
    }
}
