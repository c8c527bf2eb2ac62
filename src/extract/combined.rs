// src/extract/combined.rs

use crate::extract::normalize::normalize;
use crate::extract::series::extract_monthly;
use crate::extract::ExtractError;
use crate::sheet::RawSheet;
use serde::Serialize;
use tracing::{debug, warn};

/// The three sheets a combined monthly view is read from.
#[derive(Clone, Copy)]
pub struct MonthlySheets<'a> {
    pub availability: &'a RawSheet,
    pub occupied: &'a RawSheet,
    pub occupancy_rate: &'a RawSheet,
}

/// Positionally aligned monthly hotel activity for one region. Labels come
/// from the availability sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedMonthly {
    pub month_labels: Vec<String>,
    pub availability: Vec<f64>,
    pub occupied: Vec<f64>,
    pub occupancy_rate_pct: Vec<f64>,
}

/// Combined dataset for `region`. All three sheets must yield a series;
/// anything less is reported as an incomplete aggregate rather than a partial
/// dataset, because the combined chart needs all three traces.
pub fn extract_combined_monthly(
    sheets: &MonthlySheets<'_>,
    region: &str,
) -> Result<CombinedMonthly, ExtractError> {
    let availability = extract_monthly(sheets.availability, region);
    let occupied = extract_monthly(sheets.occupied, region);
    let rate = extract_monthly(sheets.occupancy_rate, region);

    match (availability, occupied, rate) {
        (Ok(availability), Ok(occupied), Ok(rate)) => {
            check_alignment("occupied", &availability.labels, &occupied.labels);
            check_alignment("occupancy_rate", &availability.labels, &rate.labels);
            Ok(CombinedMonthly {
                month_labels: availability.labels,
                availability: availability.values,
                occupied: occupied.values,
                occupancy_rate_pct: rate.values.into_iter().map(to_percent).collect(),
            })
        }
        (availability, occupied, rate) => {
            let results = [
                ("availability", &availability),
                ("occupied", &occupied),
                ("occupancy_rate", &rate),
            ];
            let succeeded = results.iter().filter(|(_, r)| r.is_ok()).count();
            for (sheet, result) in results {
                if let Err(err) = result {
                    debug!(sheet, region, error = %err, "monthly extraction failed");
                }
            }
            Err(ExtractError::IncompleteAggregate { succeeded, required: 3 })
        }
    }
}

/// Rate cells flip between fraction and percent across workbook vintages;
/// values at or below 1.0 are fractions.
fn to_percent(value: f64) -> f64 {
    if value <= 1.0 {
        value * 100.0
    } else {
        value
    }
}

/// The combined view relies on positional alignment. Drifted labels are worth
/// a warning, not a failure: published vintages stay aligned even when the
/// label text is edited.
fn check_alignment(sheet: &str, reference: &[String], labels: &[String]) {
    let aligned = reference.len() == labels.len()
        && reference
            .iter()
            .zip(labels)
            .all(|(a, b)| normalize(a) == normalize(b));
    if !aligned {
        warn!(
            sheet,
            "month labels differ from the availability sheet; assuming positional alignment"
        );
    }
}
