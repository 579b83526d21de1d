//! Scoring and heatmap configuration with the published presets as defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::types::{Factor, LatLon};

/// Allowed drift when checking that weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Normalization curves
// ---------------------------------------------------------------------------

/// Maps a raw numeric value onto [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Curve {
  /// `floor` below `low`, `ceiling` at or above `high`, linear in between.
  /// Inverse factors simply have `floor > ceiling`.
  Ramp {
    low: f64,
    high: f64,
    floor: f64,
    ceiling: f64,
  },
  /// First band containing the value wins; `above` covers everything past the last band.
  Bands { bands: Vec<Band>, above: f64 },
}

/// Upper-bounded band. `closed` includes the bound itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
  pub upper: f64,
  #[serde(default)]
  pub closed: bool,
  pub value: f64,
}

impl Curve {
  pub const fn ramp(low: f64, high: f64, floor: f64, ceiling: f64) -> Self {
    Self::Ramp {
      low,
      high,
      floor,
      ceiling,
    }
  }
}

/// Categorical multipliers for weather labels (matched case-insensitively).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTable {
  pub values: BTreeMap<String, f64>,
  /// Used for labels not present in `values`.
  pub unknown: f64,
}

impl Default for LabelTable {
  fn default() -> Self {
    let values = [
      ("hot", 1.0),
      ("clear", 0.9),
      ("sunny", 0.9),
      ("windy", 0.8),
      ("haze", 0.7),
      ("partly_cloudy", 0.6),
      ("cloudy", 0.4),
      ("storm", 0.3),
      ("fog", 0.2),
      ("drizzle", 0.2),
      ("rain", 0.1),
      ("snow", 0.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    Self {
      values,
      unknown: 0.5,
    }
  }
}

/// Breakpoints for every factor, independent of which factors a profile weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Curves {
  pub temperature: Curve,
  pub humidity: Curve,
  pub wind_speed: Curve,
  pub precipitation: Curve,
  pub dry_days: Curve,
  pub vegetation_index: Curve,
  pub historical_fire_count: Curve,
  pub settlement_distance_km: Curve,
  pub elevation_m: Curve,
  pub weather_type: LabelTable,
}

impl Default for Curves {
  fn default() -> Self {
    Self {
      temperature: Curve::ramp(25.0, 40.0, 0.0, 1.0),
      humidity: Curve::ramp(20.0, 70.0, 1.0, 0.0),
      // Calm air still carries a baseline risk.
      wind_speed: Curve::ramp(5.0, 25.0, 0.2, 1.0),
      precipitation: Curve::ramp(0.0, 10.0, 1.0, 0.0),
      dry_days: Curve::ramp(7.0, 30.0, 0.0, 1.0),
      // Dense canopy (NDVI 0.6-0.9) and above is held at the ceiling.
      vegetation_index: Curve::ramp(0.2, 0.6, 0.0, 1.0),
      historical_fire_count: Curve::ramp(0.0, 10.0, 0.0, 1.0),
      settlement_distance_km: Curve::ramp(0.5, 5.0, 1.0, 0.0),
      elevation_m: Curve::Bands {
        bands: vec![
          Band {
            upper: 500.0,
            closed: false,
            value: 0.3,
          },
          Band {
            upper: 1500.0,
            closed: true,
            value: 0.7,
          },
        ],
        above: 0.4,
      },
      weather_type: LabelTable::default(),
    }
  }
}

// ---------------------------------------------------------------------------
// Weight configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeight {
  pub factor: Factor,
  pub weight: f64,
}

/// A complete scoring configuration: which factors count, how much, and their curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
  #[serde(default = "custom_name")]
  pub name: String,
  pub factors: Vec<FactorWeight>,
  #[serde(default)]
  pub curves: Curves,
}

fn custom_name() -> String {
  "custom".to_string()
}

impl WeightConfig {
  pub fn new(name: impl Into<String>, weights: &[(Factor, f64)]) -> Self {
    Self {
      name: name.into(),
      factors: weights
        .iter()
        .map(|&(factor, weight)| FactorWeight { factor, weight })
        .collect(),
      curves: Curves::default(),
    }
  }

  /// Four-factor weather-only set.
  pub fn weather() -> Self {
    Self::new(
      "weather",
      &[
        (Factor::Temperature, 0.35),
        (Factor::Humidity, 0.25),
        (Factor::WindSpeed, 0.25),
        (Factor::Moisture, 0.15),
      ],
    )
  }

  /// Eight-factor set with vegetation, fire history, proximity and elevation.
  pub fn extended() -> Self {
    Self::new(
      "extended",
      &[
        (Factor::Temperature, 0.25),
        (Factor::Humidity, 0.20),
        (Factor::WindSpeed, 0.15),
        (Factor::Moisture, 0.12),
        (Factor::Vegetation, 0.10),
        (Factor::FireHistory, 0.08),
        (Factor::SettlementProximity, 0.05),
        (Factor::Elevation, 0.05),
      ],
    )
  }

  /// Weather set with a categorical weather-type multiplier.
  pub fn conditions() -> Self {
    Self::new(
      "conditions",
      &[
        (Factor::Temperature, 0.30),
        (Factor::Humidity, 0.20),
        (Factor::WindSpeed, 0.20),
        (Factor::Moisture, 0.15),
        (Factor::WeatherType, 0.15),
      ],
    )
  }

  pub fn preset(name: &str) -> Option<Self> {
    match name.trim().to_ascii_lowercase().as_str() {
      "weather" | "weather_only" => Some(Self::weather()),
      "extended" | "full" => Some(Self::extended()),
      "conditions" | "weather_type" => Some(Self::conditions()),
      _ => None,
    }
  }

  pub fn with_curves(mut self, curves: Curves) -> Self {
    self.curves = curves;
    self
  }

  pub fn weight_of(&self, factor: Factor) -> Option<f64> {
    self
      .factors
      .iter()
      .find(|fw| fw.factor == factor)
      .map(|fw| fw.weight)
  }

  /// Checks weights are finite, non-negative, unique per factor, and sum to 1.0,
  /// and that every ramp has `low < high`.
  pub fn validate(&self) -> Result<(), RiskError> {
    if self.factors.is_empty() {
      return Err(RiskError::config("factors", "at least one factor is required"));
    }
    let mut seen = Vec::with_capacity(self.factors.len());
    for fw in &self.factors {
      if !fw.weight.is_finite() || fw.weight < 0.0 {
        return Err(RiskError::config(
          fw.factor.as_str(),
          "weight must be a finite, non-negative number",
        ));
      }
      if seen.contains(&fw.factor) {
        return Err(RiskError::config(fw.factor.as_str(), "factor listed twice"));
      }
      seen.push(fw.factor);
    }
    let sum: f64 = self.factors.iter().map(|fw| fw.weight).sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
      return Err(RiskError::config(
        "factors",
        &format!("weights must sum to 1.0, got {:.6}", sum),
      ));
    }

    let c = &self.curves;
    for (name, curve) in [
      ("temperature", &c.temperature),
      ("humidity", &c.humidity),
      ("wind_speed", &c.wind_speed),
      ("precipitation", &c.precipitation),
      ("dry_days", &c.dry_days),
      ("vegetation_index", &c.vegetation_index),
      ("historical_fire_count", &c.historical_fire_count),
      ("settlement_distance_km", &c.settlement_distance_km),
      ("elevation_m", &c.elevation_m),
    ] {
      if let Curve::Ramp { low, high, .. } = curve {
        if !(low < high) {
          return Err(RiskError::config(name, "ramp requires low < high"));
        }
      }
    }
    Ok(())
  }
}

impl Default for WeightConfig {
  fn default() -> Self {
    Self::extended()
  }
}

// ---------------------------------------------------------------------------
// Heatmap configuration
// ---------------------------------------------------------------------------

/// Tunables for the spatial intensity generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensityConfig {
  /// Brightness temperature mapped to 0.0 (Kelvin).
  pub brightness_min_k: f64,
  /// Kelvin span from `brightness_min_k` to 1.0.
  pub brightness_span_k: f64,
  /// Radiative power mapped to 1.0 (MW).
  pub power_max_mw: f64,
  pub power_weight: f64,
  pub brightness_weight: f64,
  /// Lower clamp for derived intensities.
  pub min_intensity: f64,
  /// Synthetic scatter: points = base_points + points_per_score * round(score).
  pub base_points: usize,
  pub points_per_score: usize,
  /// Half-width of the synthetic scatter box, in degrees.
  pub spread_deg: f64,
  pub intensity_low_factor: f64,
  pub intensity_high_factor: f64,
  pub seed: u64,
  pub fallback_center: LatLon,
  pub fallback_intensity: f64,
}

impl Default for IntensityConfig {
  fn default() -> Self {
    Self {
      brightness_min_k: 300.0,
      brightness_span_k: 100.0,
      power_max_mw: 100.0,
      power_weight: 0.6,
      brightness_weight: 0.4,
      min_intensity: 0.1,
      base_points: 15,
      points_per_score: 3,
      spread_deg: 0.3,
      intensity_low_factor: 0.5,
      intensity_high_factor: 1.2,
      seed: 42,
      fallback_center: LatLon::new(36.7783, -119.4179),
      fallback_intensity: 0.1,
    }
  }
}
