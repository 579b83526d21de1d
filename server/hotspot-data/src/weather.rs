//! Daily weather CSV: readings keyed by (location, date).

use std::path::Path;

use chrono::NaiveDate;
use fire_risk_engine::EnvironmentalReading;
use serde::Serialize;

use crate::error::DataError;
use crate::table::{self, Columns};

pub const WEATHER_COLUMNS: [&str; 6] = [
  "date",
  "location",
  "temperature",
  "humidity",
  "wind_speed",
  "precipitation",
];

#[derive(Debug, Clone, Serialize)]
pub struct WeatherRow {
  pub date: NaiveDate,
  pub location: String,
  pub reading: EnvironmentalReading,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WeatherTable {
  pub rows: Vec<WeatherRow>,
  pub skipped: usize,
}

impl WeatherTable {
  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// First row for `location` (case-insensitive) on `date`.
  pub fn lookup(&self, location: &str, date: NaiveDate) -> Result<&EnvironmentalReading, DataError> {
    let wanted = location.trim().to_lowercase();
    self
      .rows
      .iter()
      .find(|r| r.date == date && r.location.to_lowercase() == wanted)
      .map(|r| &r.reading)
      .ok_or_else(|| DataError::unresolvable(location, Some(date)))
  }
}

/// Load a weather CSV. Missing columns fail the file; bad rows are skipped and counted.
pub fn load_weather(path: &Path) -> Result<WeatherTable, DataError> {
  let (mut reader, columns) = table::open(path, &WEATHER_COLUMNS)?;

  let mut out = WeatherTable::default();
  for record in reader.records() {
    let parsed = record
      .map_err(DataError::from)
      .and_then(|r| parse_row(&r, &columns));
    match parsed {
      Ok(row) => out.rows.push(row),
      Err(e) => {
        tracing::warn!(file = %path.display(), error = %e, "skipping malformed weather row");
        out.skipped += 1;
      }
    }
  }

  tracing::info!(
    file = %path.display(),
    rows = out.rows.len(),
    skipped = out.skipped,
    "loaded weather table"
  );
  Ok(out)
}

fn parse_row(record: &csv::StringRecord, columns: &Columns) -> Result<WeatherRow, DataError> {
  let line = table::line_of(record);
  let date = columns
    .get(record, "date")
    .and_then(table::parse_date)
    .ok_or_else(|| DataError::malformed(line, "date", "expected DD-MM-YYYY or YYYY-MM-DD"))?;
  let location = columns
    .get(record, "location")
    .ok_or_else(|| DataError::malformed(line, "location", "missing value"))?
    .to_string();

  let reading = EnvironmentalReading::weather(
    table::parse_f64(record, columns, "temperature")?,
    table::parse_f64(record, columns, "humidity")?,
    table::parse_f64(record, columns, "wind_speed")?,
    table::parse_f64(record, columns, "precipitation")?,
  );
  Ok(WeatherRow {
    date,
    location,
    reading,
  })
}
