// src/extract/header.rs

use crate::extract::normalize::normalize;
use crate::sheet::RawSheet;

/// Where the header row and the region-label column sit within a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocation {
    pub header_row: usize,
    pub label_col: usize,
}

/// Rows scanned from the top of a sheet before giving up.
pub const HEADER_SCAN_ROWS: usize = 20;

/// Pivot-export marker ("Row Labels" in the Spanish Excel locale) that anchors
/// the header row and names the label column.
const ROW_LABEL_MARKER: &str = "etiquetas de fila";

/// First cell, in row-major order, whose normalized text contains the marker.
/// The workbooks bury it under a variable number of title rows, so position is
/// discovered, never assumed.
pub fn locate_header(sheet: &RawSheet) -> Option<HeaderLocation> {
    for (header_row, row) in sheet.rows().take(HEADER_SCAN_ROWS).enumerate() {
        for (label_col, cell) in row.iter().enumerate() {
            if normalize(&cell.display_text()).contains(ROW_LABEL_MARKER) {
                return Some(HeaderLocation { header_row, label_col });
            }
        }
    }
    None
}
