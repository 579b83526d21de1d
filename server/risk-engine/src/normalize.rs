//! Map raw readings onto [0, 1] sub-scores.
//!
//! Out-of-domain values are clamped by the curve, never rejected.

use crate::config::{Curve, Curves, LabelTable};
use crate::error::RiskError;
use crate::types::{EnvironmentalReading, Factor, Moisture, RawValue};

/// Evaluate a curve at `x`. The result is clamped to [0, 1].
pub fn apply(curve: &Curve, x: f64) -> f64 {
  let v = match curve {
    Curve::Ramp {
      low,
      high,
      floor,
      ceiling,
    } => {
      if x < *low {
        *floor
      } else if x >= *high {
        *ceiling
      } else {
        floor + (ceiling - floor) * (x - low) / (high - low)
      }
    }
    Curve::Bands { bands, above } => bands
      .iter()
      .find(|b| x < b.upper || (b.closed && x == b.upper))
      .map(|b| b.value)
      .unwrap_or(*above),
  };
  v.clamp(0.0, 1.0)
}

/// Case-insensitive label lookup; spaces and dashes match underscores.
pub fn lookup(table: &LabelTable, label: &str) -> f64 {
  let key = label.trim().to_ascii_lowercase().replace([' ', '-'], "_");
  table
    .values
    .get(&key)
    .copied()
    .unwrap_or(table.unknown)
    .clamp(0.0, 1.0)
}

/// Normalize one factor from a reading.
///
/// Returns `Ok(None)` when the factor is absent, `Err` when its value is not finite.
pub fn factor(
  reading: &EnvironmentalReading,
  factor: Factor,
  curves: &Curves,
) -> Result<Option<(RawValue, f64)>, RiskError> {
  let numeric = |value: Option<f64>, name: &str, curve: &Curve| match value {
    Some(x) if !x.is_finite() => Err(RiskError::non_finite(name)),
    Some(x) => Ok(Some((RawValue::Number(x), apply(curve, x)))),
    None => Ok(None),
  };

  match factor {
    Factor::Temperature => numeric(reading.temperature, "temperature", &curves.temperature),
    Factor::Humidity => numeric(reading.humidity, "humidity", &curves.humidity),
    Factor::WindSpeed => numeric(reading.wind_speed, "wind_speed", &curves.wind_speed),
    Factor::Moisture => match reading.moisture() {
      Some(Moisture::Precipitation(mm)) => {
        numeric(Some(mm), "precipitation", &curves.precipitation)
      }
      Some(Moisture::DryDays(days)) => {
        numeric(Some(f64::from(days)), "dry_days", &curves.dry_days)
      }
      None => Ok(None),
    },
    Factor::Vegetation => numeric(
      reading.vegetation_index,
      "vegetation_index",
      &curves.vegetation_index,
    ),
    Factor::FireHistory => numeric(
      reading.historical_fire_count.map(f64::from),
      "historical_fire_count",
      &curves.historical_fire_count,
    ),
    Factor::SettlementProximity => numeric(
      reading.settlement_distance_km,
      "settlement_distance_km",
      &curves.settlement_distance_km,
    ),
    Factor::Elevation => numeric(reading.elevation_m, "elevation_m", &curves.elevation_m),
    Factor::WeatherType => Ok(reading.weather_type.as_ref().map(|label| {
      (
        RawValue::Label(label.clone()),
        lookup(&curves.weather_type, label),
      )
    })),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  fn curves() -> Curves {
    Curves::default()
  }

  #[test]
  fn temperature_breakpoints() {
    let c = curves();
    assert_eq!(apply(&c.temperature, 25.0), 0.0);
    assert_eq!(apply(&c.temperature, 40.0), 1.0);
    assert_relative_eq!(apply(&c.temperature, 32.5), 0.5, epsilon = 1e-12);
    // Clamped, not rejected.
    assert_eq!(apply(&c.temperature, -10.0), 0.0);
    assert_eq!(apply(&c.temperature, 55.0), 1.0);
  }

  #[test]
  fn humidity_is_inverse() {
    let c = curves();
    assert_eq!(apply(&c.humidity, 70.0), 0.0);
    assert_eq!(apply(&c.humidity, 20.0), 1.0);
    assert_relative_eq!(apply(&c.humidity, 45.0), 0.5, epsilon = 1e-12);
    assert_eq!(apply(&c.humidity, 100.0), 0.0);
    assert_eq!(apply(&c.humidity, 0.0), 1.0);
  }

  #[test]
  fn wind_has_calm_baseline() {
    let c = curves();
    assert_relative_eq!(apply(&c.wind_speed, 5.0), 0.2, epsilon = 1e-12);
    assert_relative_eq!(apply(&c.wind_speed, 0.0), 0.2, epsilon = 1e-12);
    assert_eq!(apply(&c.wind_speed, 25.0), 1.0);
    assert_relative_eq!(apply(&c.wind_speed, 15.0), 0.6, epsilon = 1e-12);
  }

  #[test]
  fn moisture_encodings() {
    let c = curves();
    assert_eq!(apply(&c.precipitation, 0.0), 1.0);
    assert_eq!(apply(&c.precipitation, 10.0), 0.0);
    assert_relative_eq!(apply(&c.precipitation, 2.5), 0.75, epsilon = 1e-12);
    assert_eq!(apply(&c.dry_days, 3.0), 0.0);
    assert_eq!(apply(&c.dry_days, 30.0), 1.0);
    assert_relative_eq!(apply(&c.dry_days, 18.5), 0.5, epsilon = 1e-12);
  }

  #[test]
  fn vegetation_plateau_holds_ceiling() {
    let c = curves();
    assert_eq!(apply(&c.vegetation_index, -0.4), 0.0);
    assert_eq!(apply(&c.vegetation_index, 0.2), 0.0);
    assert_relative_eq!(apply(&c.vegetation_index, 0.4), 0.5, epsilon = 1e-12);
    for ndvi in [0.6, 0.75, 0.9, 1.0] {
      assert_eq!(apply(&c.vegetation_index, ndvi), 1.0, "ndvi {}", ndvi);
    }
  }

  #[test]
  fn proximity_and_history() {
    let c = curves();
    assert_eq!(apply(&c.settlement_distance_km, 0.2), 1.0);
    assert_eq!(apply(&c.settlement_distance_km, 8.0), 0.0);
    assert_relative_eq!(apply(&c.settlement_distance_km, 2.75), 0.5, epsilon = 1e-12);
    assert_eq!(apply(&c.historical_fire_count, 0.0), 0.0);
    assert_relative_eq!(apply(&c.historical_fire_count, 3.0), 0.3, epsilon = 1e-12);
    assert_eq!(apply(&c.historical_fire_count, 12.0), 1.0);
  }

  #[test]
  fn elevation_bands_are_not_monotonic() {
    let c = curves();
    assert_eq!(apply(&c.elevation_m, 250.0), 0.3);
    assert_eq!(apply(&c.elevation_m, 499.9), 0.3);
    assert_eq!(apply(&c.elevation_m, 500.0), 0.7);
    assert_eq!(apply(&c.elevation_m, 1500.0), 0.7);
    assert_eq!(apply(&c.elevation_m, 1500.1), 0.4);
    assert_eq!(apply(&c.elevation_m, 2200.0), 0.4);
  }

  #[test]
  fn weather_labels() {
    let table = LabelTable::default();
    assert_eq!(lookup(&table, "Clear"), 0.9);
    assert_eq!(lookup(&table, "rain"), 0.1);
    assert_eq!(lookup(&table, "partly cloudy"), 0.6);
    assert_eq!(lookup(&table, "volcanic ash"), 0.5);
  }

  #[test]
  fn precipitation_wins_when_both_encodings_present() {
    let reading = EnvironmentalReading {
      precipitation: Some(0.0),
      dry_days: Some(0),
      ..EnvironmentalReading::default()
    };
    let (raw, value) = factor(&reading, Factor::Moisture, &curves()).unwrap().unwrap();
    assert_eq!(raw, RawValue::Number(0.0));
    assert_eq!(value, 1.0);
  }

  #[test]
  fn non_finite_value_is_an_error() {
    let reading = EnvironmentalReading {
      humidity: Some(f64::NAN),
      ..EnvironmentalReading::default()
    };
    let err = factor(&reading, Factor::Humidity, &curves()).unwrap_err();
    assert!(err.to_string().contains("humidity"));
  }

  #[test]
  fn absent_factor_is_none() {
    let reading = EnvironmentalReading::default();
    assert!(factor(&reading, Factor::Vegetation, &curves()).unwrap().is_none());
    assert!(factor(&reading, Factor::WeatherType, &curves()).unwrap().is_none());
  }
}
