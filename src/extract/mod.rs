// src/extract/mod.rs
//
// Discovery-based extraction over the raw workbook grids: locate the header
// by marker, select period columns by pattern, match the region row by
// normalized text, then assemble a clean series. Each stage is a pure
// function over the grid and is testable with synthetic sheets.

pub mod columns;
pub mod combined;
pub mod header;
pub mod normalize;
pub mod region;
pub mod series;

pub use columns::{MonthColumn, YearColumn, MONTH_WINDOW, YEAR_WINDOW};
pub use combined::{CombinedMonthly, MonthlySheets};
pub use header::HeaderLocation;
pub use region::MEXICAN_STATES;
pub use series::{MonthlySeries, YearValue};

use crate::sheet::RawSheet;
use thiserror::Error;
use tracing::debug;

/// Why an extraction produced nothing. Callers of the public surface only see
/// the collapsed "no data" signal; the kind goes to the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The row-label marker is absent from the scan window.
    #[error("header marker not found within the scanned rows")]
    HeaderNotFound,

    /// Neither year-total nor month-bucket headers matched any column.
    #[error("no period columns matched in the header area")]
    NoPeriodColumns,

    /// The label column holds no exact or substring match for the query.
    #[error("region {0:?} not found in the label column")]
    RegionNotFound(String),

    /// A combined dataset needs every per-sheet extraction to succeed.
    #[error("only {succeeded} of {required} sheet extractions succeeded")]
    IncompleteAggregate { succeeded: usize, required: usize },
}

/// Yearly arrivals for `region`, or `None` when the sheet cannot provide
/// them. The failure cause is logged, not returned.
pub fn historical_series(sheet: &RawSheet, region: &str) -> Option<Vec<YearValue>> {
    collapse("historical", region, series::extract_historical(sheet, region))
}

/// Twelve-month series for `region` from a single sheet, or `None`.
pub fn monthly_series(sheet: &RawSheet, region: &str) -> Option<MonthlySeries> {
    collapse("monthly", region, series::extract_monthly(sheet, region))
}

/// Combined hotel-activity dataset for `region`, or `None` unless all three
/// sheets resolve.
pub fn combined_monthly(sheets: &MonthlySheets<'_>, region: &str) -> Option<CombinedMonthly> {
    collapse(
        "combined monthly",
        region,
        combined::extract_combined_monthly(sheets, region),
    )
}

fn collapse<T>(what: &str, region: &str, result: Result<T, ExtractError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(region, error = %err, "{what} series not available");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CellValue;

    fn txt(s: &str) -> CellValue {
        CellValue::Text(s.to_owned())
    }

    #[test]
    fn public_surface_collapses_every_failure_kind_to_none() {
        let empty = RawSheet::from_rows(vec![vec![txt("sin marcador")]]);
        assert_eq!(historical_series(&empty, "Colima"), None);
        assert_eq!(monthly_series(&empty, "Colima"), None);

        let sheets = MonthlySheets {
            availability: &empty,
            occupied: &empty,
            occupancy_rate: &empty,
        };
        assert_eq!(combined_monthly(&sheets, "Colima"), None);
    }

    #[test]
    fn public_surface_passes_successful_extractions_through() {
        let sheet = RawSheet::from_rows(vec![
            vec![CellValue::Empty, txt("Total 2019"), txt("Total 2020")],
            vec![txt("Etiquetas de fila"), CellValue::Empty, CellValue::Empty],
            vec![txt("Colima"), CellValue::Number(5.0), CellValue::Number(6.0)],
        ]);
        let series = historical_series(&sheet, "Colima").unwrap();
        assert_eq!(
            series,
            vec![
                YearValue { year: 2019, value: 5.0 },
                YearValue { year: 2020, value: 6.0 },
            ]
        );
    }
}
