use anyhow::Result;
use cetmscraper::{
    chart::{self, ChartStyle},
    extract::{self, normalize::normalize, MonthlySheets},
    fetch,
    sheet::{
        Workbook, SHEET_HISTORICAL_ARRIVALS, SHEET_OCCUPANCY_RATE, SHEET_ROOMS_AVAILABLE,
        SHEET_ROOMS_OCCUPIED,
    },
};
use reqwest::Client;
use std::{env, fs, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();
    info!("startup");

    // ─── 2) configure dirs + region + style ──────────────────────────
    let client = Client::new();
    let data_dir = PathBuf::from("data");
    let figures_dir = PathBuf::from("figures");
    fs::create_dir_all(&figures_dir)?;
    let region = env::args().nth(1).unwrap_or_else(|| "Quintana Roo".to_owned());
    let style = ChartStyle::default();

    // ─── 3) fetch the workbook ───────────────────────────────────────
    let workbook_path = fetch::fetch_workbook(&client, &data_dir).await?;

    // ─── 4) read the sheets as raw grids ─────────────────────────────
    let mut workbook = Workbook::open(&workbook_path)?;
    let historical = workbook.raw_sheet(SHEET_HISTORICAL_ARRIVALS)?;
    let availability = workbook.raw_sheet(SHEET_ROOMS_AVAILABLE)?;
    let occupied = workbook.raw_sheet(SHEET_ROOMS_OCCUPIED)?;
    let occupancy_rate = workbook.raw_sheet(SHEET_OCCUPANCY_RATE)?;

    // ─── 5) extract series + build figures ───────────────────────────
    let historical_figure = match extract::historical_series(&historical, &region) {
        Some(series) => {
            info!(region = %region, points = series.len(), "historical series extracted");
            chart::historical_figure(&region, &series, &style)
        }
        None => {
            warn!(region = %region, "no historical data; using placeholder");
            chart::placeholder_figure(&format!("Llegada de Turistas - {region}"), &style)
        }
    };

    let sheets = MonthlySheets {
        availability: &availability,
        occupied: &occupied,
        occupancy_rate: &occupancy_rate,
    };
    let monthly_figure = match extract::combined_monthly(&sheets, &region) {
        Some(data) => {
            info!(region = %region, months = data.month_labels.len(), "combined monthly dataset extracted");
            chart::combined_monthly_figure(&region, &data, &style)
        }
        None => {
            warn!(region = %region, "no monthly data; using placeholder");
            chart::placeholder_figure(&format!("Actividad Hotelera - {region}"), &style)
        }
    };

    // ─── 6) write figure specs ───────────────────────────────────────
    let slug = normalize(&region).replace(' ', "_");
    for (name, figure) in [("historico", &historical_figure), ("mensual", &monthly_figure)] {
        let path = figures_dir.join(format!("{slug}_{name}.json"));
        fs::write(&path, serde_json::to_vec_pretty(figure)?)?;
        info!(path = %path.display(), "wrote figure");
    }

    info!("all done");
    Ok(())
}
