//! Core types for the risk engine (JSON contracts + internal models).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::WeightConfig;
use crate::zone::Zone;

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

/// A scoring slot. Moisture is a single slot fed by either precipitation or dry days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
  Temperature,
  Humidity,
  WindSpeed,
  Moisture,
  Vegetation,
  FireHistory,
  SettlementProximity,
  Elevation,
  WeatherType,
}

impl Factor {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Temperature => "temperature",
      Self::Humidity => "humidity",
      Self::WindSpeed => "wind_speed",
      Self::Moisture => "moisture",
      Self::Vegetation => "vegetation_index",
      Self::FireHistory => "historical_fire_count",
      Self::SettlementProximity => "settlement_distance_km",
      Self::Elevation => "elevation_m",
      Self::WeatherType => "weather_type",
    }
  }
}

impl std::fmt::Display for Factor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ---------------------------------------------------------------------------
// Inbound readings
// ---------------------------------------------------------------------------

/// Environmental readings for one location (and optionally one date).
///
/// Required values are still `Option` so a missing field surfaces as
/// `MissingRequiredFactor` instead of a deserialization failure or a silent zero.
/// `precipitation` and `dry_days` are alternate encodings of the moisture slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub temperature: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub humidity: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub wind_speed: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub precipitation: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dry_days: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub vegetation_index: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub historical_fire_count: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub settlement_distance_km: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub elevation_m: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub weather_type: Option<String>,
}

impl EnvironmentalReading {
  /// Weather-only reading with precipitation as the moisture encoding.
  pub fn weather(temperature: f64, humidity: f64, wind_speed: f64, precipitation: f64) -> Self {
    Self {
      temperature: Some(temperature),
      humidity: Some(humidity),
      wind_speed: Some(wind_speed),
      precipitation: Some(precipitation),
      ..Self::default()
    }
  }

  /// Weather-only reading with dry days as the moisture encoding.
  pub fn with_dry_days(temperature: f64, humidity: f64, wind_speed: f64, dry_days: u32) -> Self {
    Self {
      temperature: Some(temperature),
      humidity: Some(humidity),
      wind_speed: Some(wind_speed),
      dry_days: Some(dry_days),
      ..Self::default()
    }
  }

  /// The moisture slot's value, preferring the measured precipitation amount.
  pub fn moisture(&self) -> Option<Moisture> {
    match (self.precipitation, self.dry_days) {
      (Some(mm), _) => Some(Moisture::Precipitation(mm)),
      (None, Some(days)) => Some(Moisture::DryDays(days)),
      (None, None) => None,
    }
  }
}

/// The two encodings of moisture deficit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Moisture {
  Precipitation(f64),
  DryDays(u32),
}

// ---------------------------------------------------------------------------
// Detections and map points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayNight {
  #[serde(rename = "D")]
  Day,
  #[serde(rename = "N")]
  Night,
}

impl DayNight {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "d" | "day" => Some(Self::Day),
      "n" | "night" => Some(Self::Night),
      _ => None,
    }
  }
}

/// One satellite/sensor fire detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotDetection {
  pub latitude: f64,
  pub longitude: f64,
  /// Kelvin; roughly 300-400 for active fires.
  pub brightness_temperature: f64,
  /// Megawatts; roughly 0-100.
  pub fire_radiative_power: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub daynight: Option<DayNight>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub acquired: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
  pub lat: f64,
  pub lon: f64,
}

impl LatLon {
  pub const fn new(lat: f64, lon: f64) -> Self {
    Self { lat, lon }
  }
}

/// Heatmap point; serializes as `[lat, lon, intensity]` for map libraries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct IntensityPoint {
  pub latitude: f64,
  pub longitude: f64,
  pub intensity: f64,
}

impl From<[f64; 3]> for IntensityPoint {
  fn from([latitude, longitude, intensity]: [f64; 3]) -> Self {
    Self {
      latitude,
      longitude,
      intensity,
    }
  }
}

impl From<IntensityPoint> for [f64; 3] {
  fn from(p: IntensityPoint) -> Self {
    [p.latitude, p.longitude, p.intensity]
  }
}

// ---------------------------------------------------------------------------
// Assessment output
// ---------------------------------------------------------------------------

/// The input a factor was normalized from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
  Number(f64),
  Label(String),
}

/// One factor's contribution to the final score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScore {
  pub factor: Factor,
  /// `None` when an optional factor was absent from the reading.
  pub raw: Option<RawValue>,
  /// Normalized sub-score in [0, 1].
  pub normalized: f64,
  pub weight: f64,
  /// weight * normalized
  pub contribution: f64,
}

/// Result of one scoring call. Factors appear in configuration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
  pub score: f64,
  pub zone: Zone,
  pub factors: Vec<FactorScore>,
}

// ---------------------------------------------------------------------------
// CLI contract (stdin -> stdout)
// ---------------------------------------------------------------------------

/// Where the weights come from: a preset name or an inline configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WeightSource {
  Profile(String),
  Custom(WeightConfig),
}

impl Default for WeightSource {
  fn default() -> Self {
    Self::Profile("extended".to_string())
  }
}

/// One JSON request. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
  pub reading: EnvironmentalReading,
  #[serde(default)]
  pub weights: WeightSource,
  #[serde(default)]
  pub center: Option<LatLon>,
  #[serde(default)]
  pub detections: Vec<HotspotDetection>,
}

/// One JSON response.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
  pub assessment_id: String,
  pub profile: String,
  pub score: f64,
  pub zone: Zone,
  pub label: &'static str,
  pub color: &'static str,
  pub alert: &'static str,
  pub stars: u8,
  pub star_display: String,
  pub factors: Vec<FactorScore>,
  pub points: Vec<IntensityPoint>,
}

/// Structured error output for invalid requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
