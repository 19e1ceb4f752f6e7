//! Everything the pipeline produces from the transformed records.
//!
//! # Submodules
//!
//! - [`articles`]: one row per article, newest first
//! - [`keywords`]: keyword frequency across all matched articles
//! - [`export`]: CSV file written with an atomic replace

use crate::utils::single_line;
use comfy_table::{Cell, CellAlignment, Table, presets};

pub mod articles;
pub mod export;
pub mod keywords;

/// Console table with an ASCII grid: ruled header, no rules between rows.
pub(crate) fn report_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::ASCII_FULL_CONDENSED).set_header(headers.to_vec());
    table
}

/// Cell whose embedded line breaks are collapsed so each record stays on one row.
pub(crate) fn text_cell(text: &str) -> Cell {
    Cell::new(single_line(text))
}

pub(crate) fn count_cell(count: usize) -> Cell {
    Cell::new(count).set_alignment(CellAlignment::Right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_cell_is_single_line() {
        let mut table = report_table(&["Title"]);
        table.add_row(vec![text_cell("line one\nline two")]);
        let rendered = table.to_string();
        assert!(rendered.contains("line one line two"));
        assert_eq!(rendered.lines().filter(|l| l.contains("line")).count(), 1);
    }

    #[test]
    fn test_count_cell_is_right_aligned() {
        let mut table = report_table(&["Count"]);
        table.add_row(vec![count_cell(7)]);
        let row = table
            .to_string()
            .lines()
            .find(|l| l.contains('7'))
            .map(str::to_string)
            .unwrap();
        assert!(row.trim_end().ends_with("7 |"), "{row}");
        assert!(row.contains("    7"), "{row}");
    }
}
