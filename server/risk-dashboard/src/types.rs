//! Request/response types for the dashboard API.

use chrono::NaiveDate;
use fire_risk_engine::types::FactorScore;
use fire_risk_engine::zone::ZoneInfo;
use fire_risk_engine::{EnvironmentalReading, IntensityPoint, LatLon, Zone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AssessQuery {
  #[serde(default)]
  pub location: Option<String>,
  /// DD-MM-YYYY or YYYY-MM-DD.
  #[serde(default)]
  pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  /// Registry baseline reading with a synthetic heatmap.
  Baseline,
  /// Weather table reading with detection-derived heatmap.
  Observed,
}

#[derive(Debug, Serialize)]
pub struct AssessResponse {
  pub location: String,
  pub center: LatLon,
  pub zoom: u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date: Option<NaiveDate>,
  pub mode: Mode,
  pub profile: String,
  /// False when no reading resolved and the neutral score was used.
  pub weather_available: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reading: Option<EnvironmentalReading>,
  pub score: f64,
  pub zone: Zone,
  pub zone_info: &'static ZoneInfo,
  pub stars: u8,
  pub star_display: String,
  pub factors: Vec<FactorScore>,
  pub hotspot_count: usize,
  pub points: Vec<IntensityPoint>,
}

#[derive(Debug, Serialize)]
pub struct LocationSummary {
  pub name: String,
  pub center: LatLon,
  pub zoom: u8,
  pub has_baseline: bool,
}

#[derive(Debug, Serialize)]
pub struct DatesResponse {
  pub dates: Vec<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub latest: Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_error: Option<String>,
}
