//! Engine: a validated weight configuration plus heatmap settings.

use crate::config::{IntensityConfig, WeightConfig};
use crate::error::RiskError;
use crate::intensity;
use crate::score;
use crate::types::*;
use crate::zone;

/// Stateless scoring engine. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Engine {
  weights: WeightConfig,
  intensity: IntensityConfig,
}

impl Engine {
  /// Validates `weights` up front so later calls only fail on bad readings.
  pub fn new(weights: WeightConfig, intensity: IntensityConfig) -> Result<Self, RiskError> {
    weights.validate()?;
    Ok(Self { weights, intensity })
  }

  pub fn with_defaults() -> Self {
    Self {
      weights: WeightConfig::default(),
      intensity: IntensityConfig::default(),
    }
  }

  pub fn from_profile(name: &str) -> Result<Self, RiskError> {
    let weights =
      WeightConfig::preset(name).ok_or_else(|| RiskError::UnknownProfile(name.to_string()))?;
    Self::new(weights, IntensityConfig::default())
  }

  pub fn weights(&self) -> &WeightConfig {
    &self.weights
  }

  pub fn intensity(&self) -> &IntensityConfig {
    &self.intensity
  }

  pub fn assess(&self, reading: &EnvironmentalReading) -> Result<RiskAssessment, RiskError> {
    score::score(reading, &self.weights)
  }

  pub fn heatmap(
    &self,
    detections: &[HotspotDetection],
    center: Option<LatLon>,
    score: f64,
  ) -> Vec<IntensityPoint> {
    intensity::heatmap_points(detections, center, score, &self.intensity)
  }

  /// Full request: score, classify, build the heatmap, and stamp a stable id.
  pub fn process(&self, request: &Request) -> Result<Response, RiskError> {
    let assessment = self.assess(&request.reading)?;
    let points = self.heatmap(&request.detections, request.center, assessment.score);
    let assessment_id = assessment_id(request, &self.weights)?;
    let info = assessment.zone.info();

    Ok(Response {
      assessment_id,
      profile: self.weights.name.clone(),
      score: assessment.score,
      zone: assessment.zone,
      label: info.label,
      color: info.color,
      alert: info.alert,
      stars: zone::stars(assessment.score),
      star_display: zone::star_display(assessment.score),
      factors: assessment.factors,
      points,
    })
  }
}

/// Resolve a request's weight source into an engine.
pub fn engine_for(source: &WeightSource) -> Result<Engine, RiskError> {
  match source {
    WeightSource::Profile(name) => Engine::from_profile(name),
    WeightSource::Custom(cfg) => Engine::new(cfg.clone(), IntensityConfig::default()),
  }
}

/// Stable id: hash of the reading, weights, center and detections.
fn assessment_id(request: &Request, weights: &WeightConfig) -> Result<String, RiskError> {
  let mut hasher = blake3::Hasher::new();
  hasher.update(&serde_json::to_vec(&request.reading)?);
  hasher.update(b"|");
  hasher.update(&serde_json::to_vec(weights)?);
  hasher.update(b"|");
  hasher.update(&serde_json::to_vec(&request.center)?);
  hasher.update(b"|");
  hasher.update(&serde_json::to_vec(&request.detections)?);
  let hex = hasher.finalize().to_hex();
  Ok(format!("ra-{}", &hex[..16]))
}
