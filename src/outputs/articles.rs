//! Row-per-article summary table.

use crate::models::ArticleRecord;
use crate::outputs::{count_cell, report_table, text_cell};
use comfy_table::Table;

/// Build the summary table in the records' order (most recent first).
pub fn article_table(records: &[ArticleRecord]) -> Table {
    let mut table = report_table(&["Title", "Section", "Date Published", "Keywords"]);
    for record in records {
        table.add_row(vec![
            text_cell(&record.title),
            text_cell(&record.section),
            text_cell(&record.date),
            count_cell(record.keycount),
        ]);
    }
    table
}
