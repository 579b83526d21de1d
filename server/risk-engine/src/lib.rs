//! RiskRadar Fire Risk Engine — deterministic, rule-based scoring.
//!
//! Normalizes environmental readings through configurable piecewise curves, combines
//! them with explicit weights into a 0-10 score, classifies the score into a risk zone,
//! and builds heatmap intensity points from detections or a seeded synthetic scatter.
//!
//! No DB, no network; pure computation.

pub mod config;
pub mod engine;
pub mod error;
pub mod intensity;
pub mod normalize;
pub mod score;
pub mod types;
pub mod zone;

pub use config::{Curve, Curves, IntensityConfig, WeightConfig};
pub use engine::Engine;
pub use error::RiskError;
pub use score::score;
pub use types::{
  EnvironmentalReading, Factor, HotspotDetection, IntensityPoint, LatLon, Request, Response,
  RiskAssessment,
};
pub use zone::{classify, Zone};

/// Run the engine on a parsed request and return the response (no I/O).
pub fn run(request: &Request) -> Result<Response, RiskError> {
  engine::engine_for(&request.weights)?.process(request)
}
