// src/extract/columns.rs

use crate::sheet::CellValue;
use once_cell::sync::Lazy;
use regex::Regex;

/// Annual-total header pattern, e.g. "Total 2015". Years outside 1990-2039
/// are pivot artifacts and are ignored.
static YEAR_TOTAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Total\s*(199\d|20[0-3]\d)").expect("year pattern should parse"));

/// Month headers carry a two-digit sequence prefix, e.g. "[01] Ene 2024".
static MONTH_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\d{2}\]").expect("month pattern should parse"));

/// Trailing months kept for one chart window.
pub const MONTH_WINDOW: usize = 12;

/// Trailing years the historical series keeps, applied after sorting.
pub const YEAR_WINDOW: usize = 10;

/// A data column tied to the year its header names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearColumn {
    pub col: usize,
    pub year: i32,
}

/// A data column tied to the raw month-bucket header above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthColumn {
    pub col: usize,
    pub label: String,
}

/// Year-total columns in source order. The trailing window is NOT applied
/// here: the series extractor slices after sorting by year.
pub fn year_columns(row: &[CellValue]) -> Vec<YearColumn> {
    row.iter()
        .enumerate()
        .filter_map(|(col, cell)| {
            let text = cell.display_text();
            let year = YEAR_TOTAL_RE.captures(&text)?.get(1)?.as_str().parse().ok()?;
            Some(YearColumn { col, year })
        })
        .collect()
}

/// Month-bucket columns in source order, truncated to the trailing window.
/// Column order decides recency; the labels are never date-parsed.
pub fn month_columns(header_row: &[CellValue]) -> Vec<MonthColumn> {
    let mut cols: Vec<MonthColumn> = header_row
        .iter()
        .enumerate()
        .filter_map(|(col, cell)| {
            let text = cell.display_text();
            MONTH_PREFIX_RE
                .is_match(&text)
                .then(|| MonthColumn { col, label: text })
        })
        .collect();
    if cols.len() > MONTH_WINDOW {
        cols.drain(..cols.len() - MONTH_WINDOW);
    }
    cols
}

/// Chart label for a month column: everything after the first "] " delimiter.
pub fn month_label(raw: &str) -> &str {
    raw.split_once("] ").map(|(_, rest)| rest).unwrap_or(raw)
}
