//! Location registry: map centers and optional baseline readings, injected into callers.

use std::path::Path;

use fire_risk_engine::{EnvironmentalReading, LatLon};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub name: String,
  pub center: LatLon,
  #[serde(default = "default_zoom")]
  pub zoom: u8,
  /// Static reading used when no dated weather is requested.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub baseline: Option<EnvironmentalReading>,
}

fn default_zoom() -> u8 {
  9
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRegistry {
  /// Location used when a caller names none.
  pub default: String,
  pub locations: Vec<Location>,
}

impl LocationRegistry {
  pub fn new(default: impl Into<String>, locations: Vec<Location>) -> Self {
    Self {
      default: default.into(),
      locations,
    }
  }

  /// Case-insensitive lookup.
  pub fn get(&self, name: &str) -> Option<&Location> {
    let wanted = name.trim().to_lowercase();
    self
      .locations
      .iter()
      .find(|l| l.name.to_lowercase() == wanted)
  }

  /// The default location, or `None` if `default` names no entry.
  pub fn default_location(&self) -> Option<&Location> {
    self.get(&self.default)
  }

  pub fn names(&self) -> Vec<&str> {
    self.locations.iter().map(|l| l.name.as_str()).collect()
  }

  /// Baseline reading for a location, distinct from "reading with zero values".
  pub fn baseline(&self, name: &str) -> Result<&EnvironmentalReading, DataError> {
    self
      .get(name)
      .and_then(|l| l.baseline.as_ref())
      .ok_or_else(|| DataError::unresolvable(name, None))
  }

  pub fn from_json_str(json: &str) -> Result<Self, DataError> {
    Ok(serde_json::from_str(json)?)
  }

  pub fn from_path(path: &Path) -> Result<Self, DataError> {
    let raw = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    Self::from_json_str(&raw)
  }

  /// Monitoring sites with full baseline readings.
  pub fn demo_sites() -> Self {
    let site = |name: &str, lat, lon, reading| Location {
      name: name.to_string(),
      center: LatLon::new(lat, lon),
      zoom: 9,
      baseline: Some(reading),
    };
    Self::new(
      "California, USA",
      vec![
        site("California, USA", 36.7783, -119.4179, baseline(38.0, 25.0, 20.0, 28, 0.45, 12, 1.5, 500.0)),
        site("Patiala, Punjab", 30.3398, 76.3869, baseline(35.0, 45.0, 12.0, 15, 0.65, 3, 1.2, 250.0)),
        site("Dehradun, Uttarakhand", 30.3165, 78.0322, baseline(32.0, 55.0, 8.0, 20, 0.78, 7, 0.8, 640.0)),
        site("Nagpur, Maharashtra", 21.1458, 79.0882, baseline(38.0, 30.0, 15.0, 25, 0.55, 5, 2.5, 310.0)),
        site("Shimla, Himachal Pradesh", 31.1048, 77.1734, baseline(28.0, 60.0, 10.0, 12, 0.82, 8, 1.5, 2200.0)),
      ],
    )
  }

  /// State-level map centers for dated weather lookups.
  pub fn us_states() -> Self {
    let state = |name: &str, lat, lon| Location {
      name: name.to_string(),
      center: LatLon::new(lat, lon),
      zoom: 6,
      baseline: None,
    };
    Self::new(
      "California",
      vec![
        state("California", 36.7783, -119.4179),
        state("Texas", 31.9686, -99.9018),
        state("Florida", 27.6648, -81.5158),
        state("Oregon", 43.8041, -120.5542),
        state("Washington", 47.7511, -120.7401),
      ],
    )
  }

  /// US states followed by the demo sites; defaults to California.
  pub fn builtin() -> Self {
    let mut reg = Self::us_states();
    reg.locations.extend(Self::demo_sites().locations);
    reg
  }
}

impl Default for LocationRegistry {
  fn default() -> Self {
    Self::builtin()
  }
}

#[allow(clippy::too_many_arguments)]
fn baseline(
  temperature: f64,
  humidity: f64,
  wind_speed: f64,
  dry_days: u32,
  ndvi: f64,
  fire_count: u32,
  settlement_km: f64,
  elevation_m: f64,
) -> EnvironmentalReading {
  EnvironmentalReading {
    vegetation_index: Some(ndvi),
    historical_fire_count: Some(fire_count),
    settlement_distance_km: Some(settlement_km),
    elevation_m: Some(elevation_m),
    ..EnvironmentalReading::with_dry_days(temperature, humidity, wind_speed, dry_days)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_has_states_and_sites() {
    let reg = LocationRegistry::builtin();
    assert_eq!(reg.locations.len(), 10);
    assert_eq!(reg.get("texas").unwrap().zoom, 6);
    let shimla = reg.get("Shimla, Himachal Pradesh").unwrap();
    assert_eq!(shimla.baseline.as_ref().unwrap().elevation_m, Some(2200.0));
  }

  #[test]
  fn default_location_resolves_by_name() {
    let reg = LocationRegistry::us_states();
    assert!(reg.get("Atlantis").is_none());
    assert_eq!(reg.default_location().unwrap().name, "California");

    let dangling = LocationRegistry::new("Atlantis", reg.locations.clone());
    assert!(dangling.default_location().is_none());
  }

  #[test]
  fn baseline_missing_is_unresolvable() {
    let reg = LocationRegistry::builtin();
    assert!(reg.baseline("Oregon").is_err());
    assert!(reg.baseline("Nowhere").is_err());
    assert_eq!(reg.baseline("Nagpur, Maharashtra").unwrap().dry_days, Some(25));
  }

  #[test]
  fn registry_loads_from_json() {
    let json = r#"{
      "default": "Canberra",
      "locations": [
        {"name": "Canberra", "center": {"lat": -35.28, "lon": 149.13}},
        {"name": "Hobart", "center": {"lat": -42.88, "lon": 147.33}, "zoom": 7,
         "baseline": {"temperature": 27.0, "humidity": 35.0, "wind_speed": 30.0, "precipitation": 0.0}}
      ]
    }"#;
    let reg = LocationRegistry::from_json_str(json).unwrap();
    assert_eq!(reg.get("canberra").unwrap().zoom, 9);
    assert_eq!(reg.baseline("Hobart").unwrap().wind_speed, Some(30.0));
  }
}
