//! Dashboard settings from environment variables.

use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 5005;
pub const DEFAULT_FIRMS_CSV: &str = "nasa_firms_data.csv";
pub const DEFAULT_WEATHER_CSV: &str = "weather_data.csv";
pub const DEFAULT_PROFILE: &str = "weather";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
  pub port: u16,
  pub firms_csv: PathBuf,
  pub weather_csv: PathBuf,
  /// Registry JSON; the built-in registry is used when unset.
  pub locations: Option<PathBuf>,
  /// Weight profile for dated (weather CSV) assessments.
  pub profile: String,
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      port: DEFAULT_PORT,
      firms_csv: PathBuf::from(DEFAULT_FIRMS_CSV),
      weather_csv: PathBuf::from(DEFAULT_WEATHER_CSV),
      locations: None,
      profile: DEFAULT_PROFILE.to_string(),
    }
  }
}

impl DashboardConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build from any key lookup (the environment in production, a map in tests).
  pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let mut cfg = Self::default();
    if let Some(port) = get("PORT") {
      cfg.port = port
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort {
          key: "PORT",
          value: port.clone(),
        })?;
    }
    if let Some(p) = get("RISKRADAR_FIRMS_CSV") {
      cfg.firms_csv = PathBuf::from(p);
    }
    if let Some(p) = get("RISKRADAR_WEATHER_CSV") {
      cfg.weather_csv = PathBuf::from(p);
    }
    cfg.locations = get("RISKRADAR_LOCATIONS")
      .filter(|p| !p.trim().is_empty())
      .map(PathBuf::from);
    if let Some(profile) = get("RISKRADAR_PROFILE") {
      cfg.profile = profile;
    }
    Ok(cfg)
  }
}
