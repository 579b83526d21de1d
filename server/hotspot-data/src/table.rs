//! Shared CSV plumbing: header checks, field parsing, date formats.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use crate::error::DataError;

/// Accepted date layouts, tried in order.
pub const DATE_FORMATS: [&str; 3] = ["%d-%m-%Y", "%Y-%m-%d", "%d/%m/%Y"];

/// Open a headered CSV and fail fast if any required column is absent.
pub fn open(path: &Path, required: &[&str]) -> Result<(Reader<File>, Columns), DataError> {
  let file = File::open(path).map_err(|e| DataError::io(path, e))?;
  let mut reader = ReaderBuilder::new()
    .trim(Trim::All)
    .flexible(true)
    .from_reader(file);

  let headers = reader.headers()?.clone();
  let columns = Columns::new(&headers, required).map_err(|missing| DataError::MissingColumns {
    path: path.to_path_buf(),
    columns: missing,
  })?;
  Ok((reader, columns))
}

/// Header positions of the required columns (matched case-insensitively).
#[derive(Debug, Clone)]
pub struct Columns {
  names: Vec<String>,
  positions: Vec<usize>,
}

impl Columns {
  pub fn new(headers: &StringRecord, required: &[&str]) -> Result<Self, Vec<String>> {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_ascii_lowercase()).collect();
    let mut positions = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for name in required {
      match lowered.iter().position(|h| h == name) {
        Some(i) => positions.push(i),
        None => missing.push((*name).to_string()),
      }
    }
    if !missing.is_empty() {
      return Err(missing);
    }
    Ok(Self {
      names: required.iter().map(|s| (*s).to_string()).collect(),
      positions,
    })
  }

  /// Raw field for a required column; `None` if the row is short or the cell empty.
  pub fn get<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
    let idx = self.names.iter().position(|n| n == name)?;
    record
      .get(self.positions[idx])
      .filter(|s| !s.is_empty())
  }
}

pub fn line_of(record: &StringRecord) -> u64 {
  record.position().map(|p| p.line()).unwrap_or(0)
}

pub fn parse_f64(record: &StringRecord, columns: &Columns, name: &str) -> Result<f64, DataError> {
  let line = line_of(record);
  let raw = columns
    .get(record, name)
    .ok_or_else(|| DataError::malformed(line, name, "missing value"))?;
  let value: f64 = raw
    .parse()
    .map_err(|_| DataError::malformed(line, name, format!("not a number: {:?}", raw)))?;
  if !value.is_finite() {
    return Err(DataError::malformed(line, name, "not finite"));
  }
  Ok(value)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  DATE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
