// src/extract/region.rs

use crate::extract::normalize::normalize;
use crate::sheet::RawSheet;

/// The 32 federal entities as they are usually queried. The matcher tolerates
/// accent and casing drift, so these are display names, not canonical keys.
pub static MEXICAN_STATES: &[&str] = &[
    "Aguascalientes",
    "Baja California",
    "Baja California Sur",
    "Campeche",
    "Chiapas",
    "Chihuahua",
    "Ciudad de México",
    "Coahuila",
    "Colima",
    "Durango",
    "Guanajuato",
    "Guerrero",
    "Hidalgo",
    "Jalisco",
    "México",
    "Michoacán",
    "Morelos",
    "Nayarit",
    "Nuevo León",
    "Oaxaca",
    "Puebla",
    "Querétaro",
    "Quintana Roo",
    "San Luis Potosí",
    "Sinaloa",
    "Sonora",
    "Tabasco",
    "Tamaulipas",
    "Tlaxcala",
    "Veracruz",
    "Yucatán",
    "Zacatecas",
];

/// Resolve a free-text region to a row index at or below `first_data_row`.
/// An exact normalized match always wins; otherwise the first row whose
/// normalized label contains the query. First-occurring row breaks substring
/// ties.
pub fn match_region(
    sheet: &RawSheet,
    first_data_row: usize,
    label_col: usize,
    region: &str,
) -> Option<usize> {
    let target = normalize(region);
    let mut substring_hit = None;
    for (row_idx, row) in sheet.rows().enumerate().skip(first_data_row) {
        let label = match row.get(label_col) {
            Some(cell) => normalize(&cell.display_text()),
            None => continue,
        };
        if label == target {
            return Some(row_idx);
        }
        if substring_hit.is_none() && !target.is_empty() && label.contains(&target) {
            substring_hit = Some(row_idx);
        }
    }
    substring_hit
}
