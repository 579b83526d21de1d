//! NASA FIRMS hotspot CSV loading and date filtering.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;
use fire_risk_engine::types::DayNight;
use fire_risk_engine::HotspotDetection;
use serde::Serialize;

use crate::error::DataError;
use crate::table::{self, Columns};

pub const FIRMS_COLUMNS: [&str; 6] = [
  "latitude",
  "longitude",
  "bright_t31",
  "frp",
  "daynight",
  "acq_date",
];

/// Parsed detections plus the number of rows that were skipped as malformed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionSet {
  pub detections: Vec<HotspotDetection>,
  pub skipped: usize,
}

impl DetectionSet {
  pub fn len(&self) -> usize {
    self.detections.len()
  }

  pub fn is_empty(&self) -> bool {
    self.detections.is_empty()
  }

  /// Detections acquired on `date`. Rows without a parseable date never match.
  pub fn on_date(&self, date: NaiveDate) -> Vec<HotspotDetection> {
    self
      .detections
      .iter()
      .filter(|d| d.acquired == Some(date))
      .cloned()
      .collect()
  }

  /// Sorted, de-duplicated acquisition dates.
  pub fn available_dates(&self) -> Vec<NaiveDate> {
    self
      .detections
      .iter()
      .filter_map(|d| d.acquired)
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect()
  }

  pub fn latest_date(&self) -> Option<NaiveDate> {
    self.detections.iter().filter_map(|d| d.acquired).max()
  }
}

/// Load a FIRMS CSV. Missing columns fail the file; bad rows are skipped and counted.
pub fn load_detections(path: &Path) -> Result<DetectionSet, DataError> {
  let (mut reader, columns) = table::open(path, &FIRMS_COLUMNS)?;

  let mut set = DetectionSet::default();
  for record in reader.records() {
    let record = match record {
      Ok(r) => r,
      Err(e) => {
        tracing::warn!(file = %path.display(), error = %e, "skipping unreadable FIRMS row");
        set.skipped += 1;
        continue;
      }
    };
    match parse_detection(&record, &columns) {
      Ok(d) => set.detections.push(d),
      Err(e) => {
        tracing::warn!(file = %path.display(), error = %e, "skipping malformed FIRMS row");
        set.skipped += 1;
      }
    }
  }

  tracing::info!(
    file = %path.display(),
    detections = set.detections.len(),
    skipped = set.skipped,
    "loaded FIRMS detections"
  );
  Ok(set)
}

fn parse_detection(record: &csv::StringRecord, columns: &Columns) -> Result<HotspotDetection, DataError> {
  Ok(HotspotDetection {
    latitude: table::parse_f64(record, columns, "latitude")?,
    longitude: table::parse_f64(record, columns, "longitude")?,
    brightness_temperature: table::parse_f64(record, columns, "bright_t31")?,
    fire_radiative_power: table::parse_f64(record, columns, "frp")?,
    daynight: columns
      .get(record, "daynight")
      .and_then(DayNight::from_str_loose),
    acquired: columns.get(record, "acq_date").and_then(table::parse_date),
  })
}
