//! Scraper and extraction engine for the DataTur hotel-activity workbook:
//! downloads the CETM compendium, reads the `6_2.xlsx` pivot export as raw
//! grids, and extracts clean per-state time series for chart building.

pub mod chart;
pub mod extract;
pub mod fetch;
pub mod sheet;
