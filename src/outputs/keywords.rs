//! Keyword frequency across all matched articles.
//!
//! Keyword strings are concatenated as-is, with nothing inserted between
//! records, so the last keyword of one article and the first of the next
//! fuse into a single token (`"a;b;c"` + `"b;b"` reads as `a b cb b`).

use crate::models::{ArticleRecord, KeywordStat};
use crate::outputs::{count_cell, report_table, text_cell};
use comfy_table::Table;
use itertools::Itertools;
use tracing::{debug, instrument};

/// Tokens never reported: a conjunction and a leftover fragment of
/// parenthesised keywords such as `(D)`.
const DENYLIST: &[&str] = &["and", "(d"];

/// Count keyword tokens and keep those that occur more than once.
///
/// Sorted by count, highest first. Equal counts keep first-seen order.
#[instrument(level = "info", skip_all, fields(records = records.len()))]
pub fn keyword_stats(records: &[ArticleRecord]) -> Vec<KeywordStat> {
    let joined: String = records.iter().map(|r| r.keywords.as_str()).collect();
    let normalized = joined.replace(';', " ").to_lowercase();
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    // word -> total occurrences
    let counts = tokens.iter().copied().counts();

    let mut stats: Vec<KeywordStat> = tokens
        .iter()
        .copied()
        .unique()
        .map(|word| KeywordStat {
            word: word.to_string(),
            count: counts[word],
        })
        .filter(|stat| stat.count > 1 && !DENYLIST.contains(&stat.word.as_str()))
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));

    debug!(tokens = tokens.len(), distinct = counts.len(), kept = stats.len(), "Counted keywords");
    stats
}

pub fn keyword_table(stats: &[KeywordStat]) -> Table {
    let mut table = report_table(&["Keyword", "Count"]);
    for stat in stats {
        table.add_row(vec![text_cell(&stat.word), count_cell(stat.count)]);
    }
    table
}
