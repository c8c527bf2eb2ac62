// src/chart/mod.rs
//
// Figure-building collaborator: turns clean series into Plotly-shaped figure
// specs. Styling always arrives as an explicit parameter; the extraction
// pipeline never sees it.

use crate::extract::{CombinedMonthly, YearValue};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Styling handed down from the host application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartStyle {
    pub palette: Vec<String>,
    pub font_family: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: ["#0576F3", "#36F48C", "#F47806", "#F479F4", "#F3F40B"]
                .iter()
                .map(|c| (*c).to_owned())
                .collect(),
            font_family: "BallingerMono Light".to_owned(),
        }
    }
}

impl ChartStyle {
    fn color<'a>(&'a self, index: usize, fallback: &'a str) -> &'a str {
        self.palette.get(index).map(String::as_str).unwrap_or(fallback)
    }
}

const FALLBACK_PRIMARY: &str = "#1f2a44";
const FALLBACK_SECONDARY: &str = "#889064";
const FALLBACK_ACCENT: &str = "#ff9f18";

/// Bar figure for the yearly arrivals series.
pub fn historical_figure(region: &str, series: &[YearValue], style: &ChartStyle) -> Value {
    let years: Vec<i32> = series.iter().map(|p| p.year).collect();
    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let text: Vec<String> = values.iter().map(|v| format_thousands(*v)).collect();
    let range = match (years.first(), years.last()) {
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => String::new(),
    };

    json!({
        "data": [{
            "type": "bar",
            "x": years,
            "y": values,
            "marker": { "color": style.color(0, FALLBACK_PRIMARY) },
            "text": text,
            "textposition": "outside",
        }],
        "layout": {
            "title": { "text": format!("Llegada de Turistas - {region} ({range})"), "x": 0 },
            "yaxis": { "title": "Turistas" },
            "template": "plotly_white",
            "font": { "family": style.font_family },
            "height": 450,
            "margin": { "l": 20, "r": 20, "t": 50, "b": 20 },
        },
    })
}

/// Grouped bars plus a right-axis occupancy line for the combined monthly
/// dataset.
pub fn combined_monthly_figure(region: &str, data: &CombinedMonthly, style: &ChartStyle) -> Value {
    let occupied_text: Vec<String> = data.occupied.iter().map(|v| format_thousands(*v)).collect();
    let rate_text: Vec<String> = data
        .occupancy_rate_pct
        .iter()
        .map(|v| format!("{v:.1}%"))
        .collect();

    json!({
        "data": [
            {
                "type": "bar",
                "name": "Cuartos Disponibles",
                "x": data.month_labels,
                "y": data.availability,
                "marker": { "color": style.color(0, FALLBACK_PRIMARY) },
            },
            {
                "type": "bar",
                "name": "Cuartos Ocupados",
                "x": data.month_labels,
                "y": data.occupied,
                "marker": { "color": style.color(1, FALLBACK_SECONDARY) },
                "text": occupied_text,
                "textposition": "auto",
            },
            {
                "type": "scatter",
                "name": "% Ocupación",
                "mode": "lines+markers+text",
                "x": data.month_labels,
                "y": data.occupancy_rate_pct,
                "line": { "color": style.color(2, FALLBACK_ACCENT), "width": 3 },
                "text": rate_text,
                "textposition": "top center",
                "yaxis": "y2",
            },
        ],
        "layout": {
            "title": { "text": format!("Actividad Hotelera (Últimos 12 Meses) - {region}"), "x": 0 },
            "yaxis": { "title": "Cuartos" },
            "yaxis2": { "title": "%", "overlaying": "y", "side": "right", "range": [0, 105], "showgrid": false },
            "barmode": "group",
            "template": "plotly_white",
            "font": { "family": style.font_family },
            "legend": { "orientation": "h", "y": -0.2, "x": 0.5, "xanchor": "center" },
            "height": 550,
            "margin": { "l": 20, "r": 20, "t": 50, "b": 20 },
        },
    })
}

/// Deterministic stand-in the host shows when a region has no extractable
/// data.
pub fn placeholder_figure(title: &str, style: &ChartStyle) -> Value {
    let values = [320.0, 450.0, 180.0, 390.0, 275.0, 430.0];
    let labels: Vec<String> = (1..=values.len()).map(|i| format!("Dato {i}")).collect();
    let colors = colors_for_n(values.len(), &style.palette);

    json!({
        "data": [{
            "type": "bar",
            "x": labels,
            "y": values,
            "marker": { "color": colors },
        }],
        "layout": {
            "title": { "text": format!("Simulación: {title}"), "font": { "size": 18 } },
            "template": "plotly_white",
            "font": { "family": style.font_family, "size": 14 },
            "margin": { "t": 30, "b": 30 },
        },
    })
}

/// Cycle the palette to cover `n` marks.
fn colors_for_n(n: usize, palette: &[String]) -> Vec<String> {
    if palette.is_empty() {
        return vec![FALLBACK_PRIMARY.to_owned(); n];
    }
    (0..n).map(|i| palette[i % palette.len()].clone()).collect()
}

/// Value label in the "12,345" style used on the bars.
fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}
