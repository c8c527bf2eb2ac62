// src/extract/series.rs

use crate::extract::columns::{self, YEAR_WINDOW};
use crate::extract::header::locate_header;
use crate::extract::region::match_region;
use crate::extract::ExtractError;
use crate::sheet::{CellValue, RawSheet};
use serde::Serialize;

/// One year of the historical arrivals series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// Trailing-window monthly series with the chart labels it was read under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Yearly series for `region`. Year totals live one row above the discovered
/// header; the region row is searched below it. Cells that fail numeric
/// coercion are dropped, and the result is year-ascending, capped at the
/// trailing window.
pub fn extract_historical(sheet: &RawSheet, region: &str) -> Result<Vec<YearValue>, ExtractError> {
    let header = locate_header(sheet).ok_or(ExtractError::HeaderNotFound)?;
    let year_row = header
        .header_row
        .checked_sub(1)
        .ok_or(ExtractError::NoPeriodColumns)?;
    let years = columns::year_columns(sheet.row(year_row).unwrap_or(&[]));
    if years.is_empty() {
        return Err(ExtractError::NoPeriodColumns);
    }
    let data_row = match_region(sheet, header.header_row + 1, header.label_col, region)
        .ok_or_else(|| ExtractError::RegionNotFound(region.to_owned()))?;

    let mut series: Vec<YearValue> = years
        .iter()
        .filter_map(|yc| {
            read_numeric(sheet, data_row, yc.col).map(|value| YearValue { year: yc.year, value })
        })
        .collect();
    series.sort_by_key(|point| point.year);
    if series.len() > YEAR_WINDOW {
        series.drain(..series.len() - YEAR_WINDOW);
    }
    Ok(series)
}

/// Monthly series for `region`. Month buckets sit on the header row itself.
/// Missing or malformed cells are zero-filled so the window keeps its width
/// and stays positionally aligned with other sheets.
pub fn extract_monthly(sheet: &RawSheet, region: &str) -> Result<MonthlySeries, ExtractError> {
    let header = locate_header(sheet).ok_or(ExtractError::HeaderNotFound)?;
    let months = columns::month_columns(sheet.row(header.header_row).unwrap_or(&[]));
    if months.is_empty() {
        return Err(ExtractError::NoPeriodColumns);
    }
    let data_row = match_region(sheet, header.header_row + 1, header.label_col, region)
        .ok_or_else(|| ExtractError::RegionNotFound(region.to_owned()))?;

    let labels = months
        .iter()
        .map(|mc| columns::month_label(&mc.label).to_owned())
        .collect();
    let values = months
        .iter()
        .map(|mc| read_numeric(sheet, data_row, mc.col).unwrap_or(0.0))
        .collect();
    Ok(MonthlySeries { labels, values })
}

/// Coerced cell value; `None` for blanks, non-numeric text, and non-finite
/// floats.
fn read_numeric(sheet: &RawSheet, row: usize, col: usize) -> Option<f64> {
    sheet
        .cell(row, col)
        .and_then(CellValue::to_f64)
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt(s: &str) -> CellValue {
        CellValue::Text(s.to_owned())
    }

    fn num(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    /// Historical layout: a title row, the year-total row, the marker row,
    /// then one data row per region.
    fn historical_sheet(year_cells: Vec<CellValue>, data: Vec<Vec<CellValue>>) -> RawSheet {
        let width = year_cells.len();
        let mut rows = vec![vec![CellValue::Empty; width]];
        rows.push(year_cells);
        let mut marker = vec![txt("Etiquetas de fila")];
        marker.resize(width, CellValue::Empty);
        rows.push(marker);
        rows.extend(data);
        RawSheet::from_rows(rows)
    }

    #[test]
    fn historical_drops_malformed_cells_and_sorts_ascending() {
        let sheet = historical_sheet(
            vec![
                CellValue::Empty,
                txt("Total 2018"),
                txt("Total 2019"),
                txt("Total 2020"),
            ],
            vec![vec![txt("Quintana Roo"), num(f64::NAN), num(100.0), num(200.0)]],
        );

        let series = extract_historical(&sheet, "Quintana Roo").unwrap();
        assert_eq!(
            series,
            vec![
                YearValue { year: 2019, value: 100.0 },
                YearValue { year: 2020, value: 200.0 },
            ]
        );
    }

    #[test]
    fn historical_sorts_out_of_order_year_columns() {
        let sheet = historical_sheet(
            vec![CellValue::Empty, txt("Total 2020"), txt("Total 2018")],
            vec![vec![txt("Sonora"), num(2.0), num(1.0)]],
        );

        let series = extract_historical(&sheet, "Sonora").unwrap();
        assert_eq!(
            series,
            vec![
                YearValue { year: 2018, value: 1.0 },
                YearValue { year: 2020, value: 2.0 },
            ]
        );
    }

    #[test]
    fn historical_keeps_only_the_trailing_ten_years() {
        let mut year_cells = vec![CellValue::Empty];
        let mut data_row = vec![txt("Jalisco")];
        for year in 2010..=2022 {
            year_cells.push(txt(&format!("Total {year}")));
            data_row.push(num((year - 2000) as f64));
        }
        let sheet = historical_sheet(year_cells, vec![data_row]);

        let series = extract_historical(&sheet, "Jalisco").unwrap();
        assert_eq!(series.len(), 10);
        assert_eq!(series.first().map(|p| p.year), Some(2013));
        assert_eq!(series.last().map(|p| p.year), Some(2022));
    }

    #[test]
    fn historical_fails_without_marker_year_columns_or_region() {
        let no_marker = RawSheet::from_rows(vec![vec![txt("Total 2020")]]);
        assert_eq!(
            extract_historical(&no_marker, "Colima"),
            Err(ExtractError::HeaderNotFound)
        );

        let no_years = historical_sheet(
            vec![CellValue::Empty, txt("Promedio")],
            vec![vec![txt("Colima"), num(1.0)]],
        );
        assert_eq!(
            extract_historical(&no_years, "Colima"),
            Err(ExtractError::NoPeriodColumns)
        );

        let sheet = historical_sheet(
            vec![CellValue::Empty, txt("Total 2020")],
            vec![vec![txt("Colima"), num(1.0)]],
        );
        assert_eq!(
            extract_historical(&sheet, "Narnia"),
            Err(ExtractError::RegionNotFound("Narnia".into()))
        );
    }

    #[test]
    fn historical_marker_on_first_row_has_no_year_row_above() {
        let sheet = RawSheet::from_rows(vec![
            vec![txt("Etiquetas de fila"), txt("Total 2020")],
            vec![txt("Colima"), num(1.0)],
        ]);
        assert_eq!(
            extract_historical(&sheet, "Colima"),
            Err(ExtractError::NoPeriodColumns)
        );
    }

    /// Monthly layout: a title row, then the marker row that also carries the
    /// month buckets, then data rows.
    fn monthly_sheet(month_count: usize, data_cells: Vec<CellValue>) -> RawSheet {
        let mut header = vec![txt("Etiquetas de fila")];
        for m in 1..=month_count {
            header.push(txt(&format!("[{m:02}] Mes {m}")));
        }
        let mut data_row = vec![txt("Nayarit")];
        data_row.extend(data_cells);
        RawSheet::from_rows(vec![
            vec![CellValue::Empty; month_count + 1],
            header,
            data_row,
        ])
    }

    #[test]
    fn monthly_zero_fills_missing_cells_and_keeps_the_window_width() {
        let mut cells: Vec<CellValue> = (1..=12).map(|m| num(m as f64)).collect();
        cells[4] = CellValue::Empty;
        let sheet = monthly_sheet(12, cells);

        let series = extract_monthly(&sheet, "Nayarit").unwrap();
        assert_eq!(series.values.len(), 12);
        assert_eq!(series.values[4], 0.0);
        assert_eq!(series.values[0], 1.0);
        assert_eq!(series.values[11], 12.0);
    }

    #[test]
    fn monthly_zero_fills_non_numeric_text() {
        let mut cells: Vec<CellValue> = (1..=12).map(|m| num(m as f64)).collect();
        cells[0] = txt("n.d.");
        let sheet = monthly_sheet(12, cells);

        let series = extract_monthly(&sheet, "Nayarit").unwrap();
        assert_eq!(series.values[0], 0.0);
    }

    #[test]
    fn monthly_labels_come_from_the_header_without_the_prefix() {
        let cells: Vec<CellValue> = (1..=12).map(|m| num(m as f64)).collect();
        let sheet = monthly_sheet(12, cells);

        let series = extract_monthly(&sheet, "Nayarit").unwrap();
        assert_eq!(series.labels[0], "Mes 1");
        assert_eq!(series.labels[11], "Mes 12");
    }

    #[test]
    fn monthly_fails_without_month_columns() {
        let sheet = RawSheet::from_rows(vec![
            vec![txt("Etiquetas de fila"), txt("Total general")],
            vec![txt("Nayarit"), num(1.0)],
        ]);
        assert_eq!(
            extract_monthly(&sheet, "Nayarit"),
            Err(ExtractError::NoPeriodColumns)
        );
    }
}
