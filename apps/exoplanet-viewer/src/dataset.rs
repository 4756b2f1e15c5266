//! Planet record lookup: identifier from the page URL, record from the dataset.

use serde::Deserialize;
use thiserror::Error;

/// Dataset location relative to the viewer page.
pub const DATASET_PATH: &str = "../data/exoplanetas_dados.json";

/// Query-string parameter carrying the planetary system id.
pub const ID_PARAM: &str = "sy_id";

/// One row of the exoplanet dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanetRecord {
    pub sy_id: f64,
    pub pl_name: String,
    /// Stellar effective temperature, K.
    pub st_teff: f64,
    /// Stellar luminosity, log10 of solar units.
    pub st_lum: f64,
    /// Stellar radius, solar radii.
    pub st_rad: f64,
    /// Planet radius, Earth radii.
    pub pl_rade: f64,
    /// Orbital semi-major axis, AU.
    pub pl_orbsmax: f64,
    /// Distance to the system. Carried, not rendered.
    #[serde(default)]
    pub sy_dist: f64,
    /// Inner habitable-zone boundary factor.
    #[serde(rename = "Ai")]
    pub hz_inner: f64,
    /// Outer habitable-zone boundary factor.
    #[serde(rename = "Ae")]
    pub hz_outer: f64,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid or missing sy_id in URL: {0:?}")]
    InvalidIdentifier(String),

    #[error("failed to load planet data: {0}")]
    Fetch(#[from] exo_web::FetchError),

    #[error("no planet found with sy_id {0}")]
    RecordNotFound(f64),

    #[error("malformed planet data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse the raw `sy_id` query value. Absent, blank, unparseable and
/// non-finite values are all rejected.
pub fn parse_identifier(raw: Option<&str>) -> Result<f64, DatasetError> {
    let raw = raw.unwrap_or("");
    match raw.trim().parse::<f64>() {
        Ok(id) if id.is_finite() => Ok(id),
        _ => Err(DatasetError::InvalidIdentifier(raw.to_string())),
    }
}

/// Find the first record whose `sy_id` equals `id` in a JSON array of records.
/// Only the matching row is decoded; other rows may have missing or null fields.
pub fn select_record(json: &str, id: f64) -> Result<PlanetRecord, DatasetError> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let row = rows
        .into_iter()
        .find(|row| row.get("sy_id").and_then(serde_json::Value::as_f64) == Some(id))
        .ok_or(DatasetError::RecordNotFound(id))?;
    Ok(serde_json::from_value(row)?)
}

/// Parse a single record literal.
pub fn parse_record(json: &str) -> Result<PlanetRecord, DatasetError> {
    Ok(serde_json::from_str(json)?)
}

/// Resolve the record named by the page's `sy_id` from the dataset at `path`.
/// One attempt; every failure is terminal for the page load.
pub async fn resolve(path: &str) -> Result<PlanetRecord, DatasetError> {
    let id = parse_identifier(exo_web::page::query_param(ID_PARAM).as_deref())?;
    log::info!("resolving sy_id {id} from {path}");
    let json = exo_web::page::fetch_text(path).await?;
    let record = select_record(&json, id)?;
    log::info!("loaded {}", record.pl_name);
    Ok(record)
}
