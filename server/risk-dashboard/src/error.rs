//! Error types for the dashboard service.

use hotspot_data::DataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{key} must be a valid port number, got {value:?}")]
  InvalidPort { key: &'static str, value: String },
}

/// Failure to produce a cached data source.
#[derive(Debug, Error)]
pub enum SourceError {
  #[error(transparent)]
  Data(#[from] DataError),

  #[error("loader task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}
