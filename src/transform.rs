//! Reshape matched articles into [`ArticleRecord`]s, most recent first.

use crate::models::{ArticleRecord, RawArticle};
use tracing::{debug, instrument};

/// Number of keyword entries in a semicolon-delimited keyword string.
///
/// Counts separators and adds one, so an empty string still reports 1.
pub fn keycount(keywords: &str) -> usize {
    keywords.matches(';').count() + 1
}

impl From<RawArticle> for ArticleRecord {
    fn from(article: RawArticle) -> Self {
        // absent keywords and bylines become ""
        let keywords = article.adx_keywords.unwrap_or_default();
        ArticleRecord {
            title: article.title,
            by: article.byline.unwrap_or_default(),
            section: article.section,
            date: article.published_date,
            keycount: keycount(&keywords),
            keywords,
        }
    }
}

/// Sort records by `Date`, newest first. Ties keep their input order.
pub fn sort_by_date_desc(records: &mut [ArticleRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

#[instrument(level = "info", skip_all, fields(count = articles.len()))]
pub fn transform(articles: Vec<RawArticle>) -> Vec<ArticleRecord> {
    let mut records: Vec<ArticleRecord> = articles.into_iter().map(ArticleRecord::from).collect();
    sort_by_date_desc(&mut records);
    debug!(
        newest = ?records.first().map(|r| r.date.as_str()),
        oldest = ?records.last().map(|r| r.date.as_str()),
        "Transformed matched articles"
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, date: &str, keywords: Option<&str>) -> RawArticle {
        RawArticle {
            title: title.to_string(),
            byline: Some(format!("By {title} Author")),
            section: "Opinion".to_string(),
            published_date: date.to_string(),
            adx_keywords: keywords.map(str::to_string),
        }
    }

    #[test]
    fn test_keycount() {
        assert_eq!(keycount("a;b;c"), 3);
        assert_eq!(keycount("single"), 1);
        assert_eq!(keycount(""), 1);
        assert_eq!(keycount(";;"), 3);
    }

    #[test]
    fn test_absent_keywords_yield_keycount_one() {
        let record = ArticleRecord::from(raw("T", "2024-01-01", None));
        assert_eq!(record.keywords, "");
        assert_eq!(record.keycount, 1);
    }

    #[test]
    fn test_null_byline_becomes_empty() {
        let mut article = raw("T", "2024-01-01", Some("x"));
        article.byline = None;
        assert_eq!(ArticleRecord::from(article).by, "");
    }

    #[test]
    fn test_field_projection() {
        let record = ArticleRecord::from(raw("Headline", "2024-02-03", Some("War;Peace")));
        assert_eq!(record, ArticleRecord {
            title: "Headline".to_string(),
            by: "By Headline Author".to_string(),
            section: "Opinion".to_string(),
            date: "2024-02-03".to_string(),
            keywords: "War;Peace".to_string(),
            keycount: 2,
        });
    }

    #[test]
    fn test_keycount_matches_semicolons_for_every_record() {
        let records = transform(vec![
            raw("A", "2024-01-01", Some("a;b;c;d")),
            raw("B", "2024-01-02", Some("")),
            raw("C", "2024-01-03", None),
            raw("D", "2024-01-04", Some("solo")),
        ]);
        for record in &records {
            assert!(record.keycount >= 1);
            assert_eq!(record.keycount, record.keywords.matches(';').count() + 1);
        }
    }

    #[test]
    fn test_sorted_newest_first_and_stable() {
        let records = transform(vec![
            raw("old", "2024-01-01", None),
            raw("tie-first", "2024-03-01", None),
            raw("new", "2024-05-01", None),
            raw("tie-second", "2024-03-01", None),
        ]);
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "tie-first", "tie-second", "old"]);
    }

    #[test]
    fn test_resorting_is_a_no_op() {
        let records = transform(vec![
            raw("a", "2024-02-01", None),
            raw("b", "2024-04-01", None),
            raw("c", "2024-02-01", None),
            raw("d", "2023-12-31", None),
        ]);
        let mut again = records.clone();
        sort_by_date_desc(&mut again);
        assert_eq!(again, records);
    }
}
