//! Integration tests for the fire risk engine.

use fire_risk_engine::types::ErrorOutput;
use fire_risk_engine::{
  classify, run, score, EnvironmentalReading, Request, RiskError, WeightConfig, Zone,
};

fn fixture_request() -> Request {
  let json = r#"{
    "reading": {
      "temperature": 32.0,
      "humidity": 55.0,
      "wind_speed": 8.0,
      "dry_days": 20,
      "vegetation_index": 0.78,
      "historical_fire_count": 7,
      "settlement_distance_km": 0.8,
      "elevation_m": 640
    },
    "weights": "extended",
    "center": {"lat": 30.3165, "lon": 78.0322},
    "detections": [
      {"latitude": 30.31, "longitude": 78.04, "brightness_temperature": 350.0, "fire_radiative_power": 50.0, "daynight": "D", "acquired": "2026-01-15"},
      {"latitude": 30.35, "longitude": 78.01, "brightness_temperature": 310.0, "fire_radiative_power": 4.0}
    ]
  }"#;
  serde_json::from_str(json).unwrap()
}

#[test]
fn fixture_request_produces_full_response() {
  let out = run(&fixture_request()).unwrap();

  assert!(out.assessment_id.starts_with("ra-"));
  assert_eq!(out.profile, "extended");
  assert!(out.score > 0.0 && out.score <= 10.0);
  assert_eq!(out.zone, classify(out.score));
  assert_eq!(out.label, out.zone.info().label);
  assert_eq!(out.factors.len(), 8);

  // Detections present: one derived point each, coordinates preserved.
  assert_eq!(out.points.len(), 2);
  assert_eq!(out.points[0].latitude, 30.31);
  assert!((out.points[0].intensity - 0.5).abs() < 1e-12);
  assert!((out.points[1].intensity - 0.1).abs() < 1e-12);
}

#[test]
fn deterministic_output_across_runs() {
  let json1 = serde_json::to_string(&run(&fixture_request()).unwrap()).unwrap();
  let json2 = serde_json::to_string(&run(&fixture_request()).unwrap()).unwrap();
  assert_eq!(json1, json2, "Same inputs must produce identical JSON output");
}

#[test]
fn synthetic_heatmap_is_reproducible() {
  let mut req = fixture_request();
  req.detections.clear();
  let a = run(&req).unwrap();
  let b = run(&req).unwrap();
  assert_eq!(a.points, b.points);
  assert_eq!(a.points.len(), 15 + 3 * usize::from(a.stars));
}

#[test]
fn points_serialize_as_triples() {
  let out = run(&fixture_request()).unwrap();
  let value = serde_json::to_value(&out).unwrap();
  let first = &value["points"][0];
  assert!(first.is_array());
  assert_eq!(first.as_array().unwrap().len(), 3);
}

#[test]
fn unknown_fields_are_ignored() {
  let json = r#"{
    "reading": {"temperature": 30.0, "humidity": 40.0, "wind_speed": 10.0, "precipitation": 1.0, "pressure_hpa": 1012},
    "weights": "weather",
    "some_unknown_field": "should be ignored"
  }"#;
  let req: Request = serde_json::from_str(json).unwrap();
  assert!(run(&req).is_ok());
}

#[test]
fn custom_weights_inline() {
  let json = r#"{
    "reading": {"temperature": 40.0, "humidity": 90.0, "wind_speed": 0.0, "precipitation": 20.0},
    "weights": {
      "name": "heat-only",
      "factors": [{"factor": "temperature", "weight": 1.0}]
    }
  }"#;
  let req: Request = serde_json::from_str(json).unwrap();
  let out = run(&req).unwrap();
  assert_eq!(out.profile, "heat-only");
  assert_eq!(out.score, 10.0);
  assert_eq!(out.zone, Zone::Danger);
}

#[test]
fn missing_required_factor_gives_clear_error() {
  let json = r#"{
    "reading": {"temperature": 30.0, "humidity": 40.0, "wind_speed": 10.0},
    "weights": "weather"
  }"#;
  let req: Request = serde_json::from_str(json).unwrap();
  let err = run(&req).unwrap_err();
  assert!(matches!(err, RiskError::MissingRequiredFactor(_)));

  let out = ErrorOutput::new(err.to_string()).with_field(err.field().unwrap());
  assert_eq!(out.field.as_deref(), Some("moisture"));
}

#[test]
fn score_stays_in_range_across_grid() {
  let cfg = WeightConfig::extended();
  for t in [-20.0, 0.0, 25.0, 32.5, 40.0, 60.0] {
    for h in [0.0, 20.0, 45.0, 70.0, 100.0] {
      for w in [0.0, 5.0, 15.0, 25.0, 120.0] {
        for p in [-1.0, 0.0, 5.0, 10.0, 300.0] {
          let mut reading = EnvironmentalReading::weather(t, h, w, p);
          reading.vegetation_index = Some(0.7);
          reading.historical_fire_count = Some(50);
          reading.settlement_distance_km = Some(0.0);
          reading.elevation_m = Some(900.0);
          let s = score(&reading, &cfg).unwrap().score;
          assert!((0.0..=10.0).contains(&s), "score {} out of range", s);
        }
      }
    }
  }
}

#[test]
fn score_is_monotonic_in_weather_factors() {
  let cfg = WeightConfig::weather();
  let base = |t: f64, h: f64, p: f64| {
    score(&EnvironmentalReading::weather(t, h, 12.0, p), &cfg)
      .unwrap()
      .score
  };

  let mut prev = f64::MIN;
  for t in (0..=50).map(f64::from) {
    let s = base(t, 40.0, 3.0);
    assert!(s >= prev, "temperature {} decreased score", t);
    prev = s;
  }

  let mut prev = f64::MAX;
  for h in (0..=100).map(f64::from) {
    let s = base(30.0, h, 3.0);
    assert!(s <= prev, "humidity {} increased score", h);
    prev = s;
  }

  let mut prev = f64::MAX;
  for p in (0..=30).map(|p| f64::from(p) * 0.5) {
    let s = base(30.0, 40.0, p);
    assert!(s <= prev, "precipitation {} increased score", p);
    prev = s;
  }
}
