//! Structured error types for the risk engine.

use thiserror::Error;

use crate::types::Factor;

#[derive(Debug, Error)]
pub enum RiskError {
  #[error("missing required factor: {0}")]
  MissingRequiredFactor(Factor),

  #[error("non-finite value for {factor}")]
  NonFiniteValue { factor: String },

  #[error("config: {field}: {reason}")]
  InvalidConfig { field: String, reason: String },

  #[error("unknown weight profile: {0}")]
  UnknownProfile(String),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl RiskError {
  pub fn config(field: &str, reason: &str) -> Self {
    Self::InvalidConfig {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn non_finite(factor: impl Into<String>) -> Self {
    Self::NonFiniteValue {
      factor: factor.into(),
    }
  }

  /// The input field an error points at, if any.
  pub fn field(&self) -> Option<String> {
    match self {
      Self::MissingRequiredFactor(f) => Some(f.as_str().to_string()),
      Self::NonFiniteValue { factor } => Some(factor.clone()),
      Self::InvalidConfig { field, .. } => Some(field.clone()),
      Self::UnknownProfile(_) => Some("weights".to_string()),
      Self::Json(_) | Self::Io(_) => None,
    }
  }
}
