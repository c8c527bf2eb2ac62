// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::{header, Client};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::info;
use zip::ZipArchive;

/// Where SECTUR publishes the compendium archive.
const COMPENDIUM_ZIP_URL: &str =
    "https://datatur.sectur.gob.mx/Documentos%20compartidos/CETM2023.zip";

/// Workbook we need inside the archive: the hotel-activity table 6_2.
const WORKBOOK_FILE: &str = "6_2.xlsx";

/// DataTur rejects bare clients.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Download the compendium and unpack the hotel-activity workbook into
/// `dest_dir`, returning its path. A cached copy short-circuits the download.
pub async fn fetch_workbook(client: &Client, dest_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dest_dir = dest_dir.as_ref();
    let dest_path = dest_dir.join(WORKBOOK_FILE);
    if dest_path.exists() {
        info!(path = %dest_path.display(), "workbook already cached");
        return Ok(dest_path);
    }
    fs::create_dir_all(dest_dir)
        .await
        .with_context(|| format!("creating {}", dest_dir.display()))?;

    info!(url = COMPENDIUM_ZIP_URL, "downloading compendium archive");
    let bytes = client
        .get(COMPENDIUM_ZIP_URL)
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .timeout(DOWNLOAD_TIMEOUT)
        .send()
        .await
        .with_context(|| format!("GET {COMPENDIUM_ZIP_URL}"))?
        .error_for_status()?
        .bytes()
        .await
        .context("reading compendium archive body")?;
    info!(size_bytes = bytes.len(), "downloaded compendium archive");

    let workbook = extract_workbook(&bytes)?;
    fs::write(&dest_path, &workbook)
        .await
        .with_context(|| format!("writing {}", dest_path.display()))?;
    info!(path = %dest_path.display(), "unpacked workbook");
    Ok(dest_path)
}

/// Pull the workbook entry out of the archive, tolerating case and
/// `6.2`/`6_2` naming drift across vintages.
fn extract_workbook(zip_bytes: &[u8]) -> Result<Vec<u8>> {
    let mut archive =
        ZipArchive::new(Cursor::new(zip_bytes)).context("opening compendium archive")?;
    let entry_name = archive
        .file_names()
        .find(|name| is_workbook_entry(name))
        .map(str::to_owned)
        .context("workbook entry not found in compendium archive")?;

    let mut entry = archive
        .by_name(&entry_name)
        .with_context(|| format!("reading archive entry {entry_name:?}"))?;
    let mut buf = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut buf)
        .with_context(|| format!("extracting {entry_name:?}"))?;
    Ok(buf)
}

fn is_workbook_entry(name: &str) -> bool {
    let name = name.to_lowercase();
    (name.contains("6_2") || name.contains("6.2"))
        && (name.ends_with(".xlsx") || name.ends_with(".xls"))
}
