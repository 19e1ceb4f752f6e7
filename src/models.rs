//! Data models for the Most Popular API and the records derived from it.
//!
//! - [`MostPopularResponse`]: envelope returned by both endpoints
//! - [`RawArticle`]: one article as the API describes it
//! - [`ArticleRecord`]: the reduced shape that is reported and written to CSV
//! - [`KeywordStat`]: one row of the keyword frequency report

use serde::{Deserialize, Serialize};

/// Top-level JSON body of a Most Popular response.
///
/// `results` is optional here so a missing array can be reported as a
/// malformed response instead of a generic decode error.
#[derive(Debug, Deserialize)]
pub struct MostPopularResponse {
    pub status: Option<String>,
    pub num_results: Option<u32>,
    pub results: Option<Vec<RawArticle>>,
}

/// An article as returned by the API. Only lives for a single run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawArticle {
    pub title: String,
    /// Null for some wire stories.
    #[serde(default)]
    pub byline: Option<String>,
    pub section: String,
    /// ISO-8601 date, e.g. `2024-03-14`.
    pub published_date: String,
    /// Semicolon-delimited keywords; may be absent, null, or empty.
    #[serde(default)]
    pub adx_keywords: Option<String>,
}

/// Identity used to decide that two articles are the same story.
pub type MatchKey<'a> = (&'a str, &'a str);

impl RawArticle {
    pub fn match_key(&self) -> MatchKey<'_> {
        (self.title.as_str(), self.published_date.as_str())
    }
}

/// The transformed record. Field order and names define the CSV header:
/// `Title,By,Section,Date,keywords,keycount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "By")]
    pub by: String,
    #[serde(rename = "Section")]
    pub section: String,
    #[serde(rename = "Date")]
    pub date: String,
    pub keywords: String,
    /// Semicolons in `keywords` plus one. Never zero.
    pub keycount: usize,
}

/// How often a lowercased keyword token occurs across all matched articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordStat {
    pub word: String,
    pub count: usize,
}
