//! Structured error types for the data sources.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
  #[error("io: {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("csv: {0}")]
  Csv(#[from] csv::Error),

  #[error("{}: missing columns {columns:?}", .path.display())]
  MissingColumns { path: PathBuf, columns: Vec<String> },

  #[error("record {line}: {field}: {reason}")]
  MalformedRecord {
    line: u64,
    field: String,
    reason: String,
  },

  #[error("no reading for {location}{}", on_date(.date))]
  UnresolvableLocation {
    location: String,
    date: Option<NaiveDate>,
  },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

fn on_date(date: &Option<NaiveDate>) -> String {
  date.map(|d| format!(" on {}", d)).unwrap_or_default()
}

impl DataError {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  pub fn malformed(line: u64, field: &str, reason: impl Into<String>) -> Self {
    Self::MalformedRecord {
      line,
      field: field.to_string(),
      reason: reason.into(),
    }
  }

  pub fn unresolvable(location: &str, date: Option<NaiveDate>) -> Self {
    Self::UnresolvableLocation {
      location: location.to_string(),
      date,
    }
  }
}
