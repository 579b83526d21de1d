//! Weighted aggregation of normalized factors into a 0-10 score.

use crate::config::WeightConfig;
use crate::error::RiskError;
use crate::normalize;
use crate::types::{EnvironmentalReading, Factor, FactorScore, RiskAssessment};
use crate::zone;

pub const MAX_SCORE: f64 = 10.0;

/// Factors every reading must carry, whatever the weights.
pub const REQUIRED: [Factor; 4] = [
  Factor::Temperature,
  Factor::Humidity,
  Factor::WindSpeed,
  Factor::Moisture,
];

/// Score a reading: 10 * sum(weight * factor), clamped to [0, 10].
///
/// Required factors (temperature, humidity, wind speed, moisture) must be present even
/// when the configuration gives them no weight; optional ones contribute 0.0 when absent.
pub fn score(
  reading: &EnvironmentalReading,
  weights: &WeightConfig,
) -> Result<RiskAssessment, RiskError> {
  weights.validate()?;

  let mut required = Vec::with_capacity(REQUIRED.len());
  for factor in REQUIRED {
    match normalize::factor(reading, factor, &weights.curves)? {
      Some(value) => required.push((factor, value)),
      None => return Err(RiskError::MissingRequiredFactor(factor)),
    }
  }

  let mut factors = Vec::with_capacity(weights.factors.len());
  for fw in &weights.factors {
    let value = match required.iter().find(|(f, _)| *f == fw.factor) {
      Some((_, value)) => Some(value.clone()),
      None => normalize::factor(reading, fw.factor, &weights.curves)?,
    };
    let (raw, normalized) = match value {
      Some((raw, normalized)) => (Some(raw), normalized),
      None => (None, 0.0),
    };
    factors.push(FactorScore {
      factor: fw.factor,
      raw,
      normalized,
      weight: fw.weight,
      contribution: fw.weight * normalized,
    });
  }

  let total: f64 = factors.iter().map(|f| f.contribution).sum();
  let score = (total * MAX_SCORE).clamp(0.0, MAX_SCORE);
  let zone = zone::classify(score);

  tracing::debug!(profile = %weights.name, score, ?zone, "scored reading");

  Ok(RiskAssessment {
    score,
    zone,
    factors,
  })
}
