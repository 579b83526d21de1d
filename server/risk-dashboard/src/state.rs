//! Shared state: engines, registry, and per-file caches.

use std::sync::{Arc, Mutex};

use fire_risk_engine::{Engine, RiskError};
use hotspot_data::{
  load_detections, load_weather, DetectionSet, LocationRegistry, RecordCache, WeatherTable,
};

use crate::config::DashboardConfig;
use crate::error::SourceError;

pub struct AppState {
  pub config: DashboardConfig,
  pub registry: LocationRegistry,
  /// Scores dated weather rows (profile from config).
  pub dated_engine: Engine,
  /// Scores registry baselines with every factor.
  pub baseline_engine: Engine,
  firms: Mutex<RecordCache<DetectionSet>>,
  weather: Mutex<RecordCache<WeatherTable>>,
}

impl AppState {
  pub fn new(config: DashboardConfig, registry: LocationRegistry) -> Result<Self, RiskError> {
    let dated_engine = Engine::from_profile(&config.profile)?;
    let baseline_engine = Engine::from_profile("extended")?;
    Ok(Self {
      config,
      registry,
      dated_engine,
      baseline_engine,
      firms: Mutex::new(RecordCache::new()),
      weather: Mutex::new(RecordCache::new()),
    })
  }

  /// FIRMS detections, reparsed only when the file changes.
  ///
  /// The stat and any reparse run on the blocking pool; the lock is only taken there.
  pub async fn detections(self: &Arc<Self>) -> Result<Arc<DetectionSet>, SourceError> {
    let state = Arc::clone(self);
    let set = tokio::task::spawn_blocking(move || {
      let mut cache = state.firms.lock().unwrap_or_else(|e| e.into_inner());
      cache.get_or_load(&state.config.firms_csv, load_detections)
    })
    .await??;
    Ok(set)
  }

  pub async fn weather(self: &Arc<Self>) -> Result<Arc<WeatherTable>, SourceError> {
    let state = Arc::clone(self);
    let table = tokio::task::spawn_blocking(move || {
      let mut cache = state.weather.lock().unwrap_or_else(|e| e.into_inner());
      cache.get_or_load(&state.config.weather_csv, load_weather)
    })
    .await??;
    Ok(table)
  }
}

pub type SharedState = Arc<AppState>;
