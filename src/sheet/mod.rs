// src/sheet/mod.rs

use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Sheet names inside the 6_2 workbook.
pub const SHEET_HISTORICAL_ARRIVALS: &str = "Vista07a";
pub const SHEET_ROOMS_AVAILABLE: &str = "Vista05";
pub const SHEET_ROOMS_OCCUPIED: &str = "Vista06a";
pub const SHEET_OCCUPANCY_RATE: &str = "Vista09a";

/// One workbook cell with no coercion applied yet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Cell rendered as comparison text. Integral numbers drop the fraction
    /// so a year cell never shows up as "2015.0".
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Numeric view of the cell. Text must parse as a plain float after
    /// trimming; anything else is treated as missing.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Empty => None,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Number(if *b { 1.0 } else { 0.0 }),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) | Data::Empty => CellValue::Empty,
        }
    }
}

/// Headerless snapshot of one worksheet: a dense, row-major grid anchored at
/// A1 so row and column indices match what the workbook shows.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Densify a calamine range. Cells before the range's start are filled in
    /// as empty rather than shifting the grid.
    pub fn from_range(range: &Range<Data>) -> Self {
        let mut rows = Vec::new();
        if let Some((end_row, end_col)) = range.end() {
            rows.reserve(end_row as usize + 1);
            for row in 0..=end_row {
                let mut cells = Vec::with_capacity(end_col as usize + 1);
                for col in 0..=end_col {
                    let value = range
                        .get_value((row, col))
                        .map(CellValue::from)
                        .unwrap_or(CellValue::Empty);
                    cells.push(value);
                }
                rows.push(cells);
            }
        }
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// One open workbook; sheets are read on demand with no header inference.
pub struct Workbook {
    path: PathBuf,
    inner: Xlsx<BufReader<File>>,
}

impl Workbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = open_workbook(&path)
            .with_context(|| format!("opening workbook {}", path.display()))?;
        Ok(Self { path, inner })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    /// Read one sheet as a raw grid.
    pub fn raw_sheet(&mut self, name: &str) -> Result<RawSheet> {
        let range = self
            .inner
            .worksheet_range(name)
            .with_context(|| format!("reading sheet {:?} from {}", name, self.path.display()))?;
        Ok(RawSheet::from_range(&range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_renders_integral_floats_without_fraction() {
        assert_eq!(CellValue::Number(2015.0).display_text(), "2015");
        assert_eq!(CellValue::Number(0.73).display_text(), "0.73");
        assert_eq!(CellValue::Text("Total 2015".into()).display_text(), "Total 2015");
        assert_eq!(CellValue::Empty.display_text(), "");
    }

    #[test]
    fn to_f64_coerces_numbers_and_numeric_text_only() {
        assert_eq!(CellValue::Number(85.0).to_f64(), Some(85.0));
        assert_eq!(CellValue::Text(" 123.5 ".into()).to_f64(), Some(123.5));
        assert_eq!(CellValue::Text("n.d.".into()).to_f64(), None);
        assert_eq!(CellValue::Empty.to_f64(), None);
    }

    #[test]
    fn from_range_anchors_grid_at_a1() {
        // Range starting at (2, 1) must not shift the grid.
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("Etiquetas de fila".into()));
        range.set_value((3, 2), Data::Float(42.0));

        let sheet = RawSheet::from_range(&range);
        assert_eq!(sheet.row_count(), 4);
        assert_eq!(
            sheet.cell(2, 1),
            Some(&CellValue::Text("Etiquetas de fila".into()))
        );
        assert_eq!(sheet.cell(3, 2), Some(&CellValue::Number(42.0)));
        assert_eq!(sheet.cell(0, 0), Some(&CellValue::Empty));
        assert_eq!(sheet.cell(9, 9), None);
    }

    #[test]
    fn from_range_of_empty_sheet_is_empty() {
        let range: Range<Data> = Range::empty();
        let sheet = RawSheet::from_range(&range);
        assert_eq!(sheet.row_count(), 0);
    }

    #[test]
    fn open_rejects_a_file_that_is_not_a_workbook() {
        use std::io::Write;

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"not a workbook").unwrap();
        assert!(Workbook::open(tmp.path()).is_err());
    }
}
