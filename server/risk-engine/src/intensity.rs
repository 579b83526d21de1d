//! Heatmap intensity points: derived from detections, or a seeded synthetic scatter.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::IntensityConfig;
use crate::score::MAX_SCORE;
use crate::types::{HotspotDetection, IntensityPoint, LatLon};
use crate::zone;

/// Intensity of one detection from its radiative power and brightness temperature.
///
/// Returns `None` for detections with non-finite fields.
pub fn detection_intensity(d: &HotspotDetection, config: &IntensityConfig) -> Option<f64> {
  let fields = [
    d.latitude,
    d.longitude,
    d.brightness_temperature,
    d.fire_radiative_power,
  ];
  if fields.iter().any(|v| !v.is_finite()) {
    return None;
  }
  let brightness_norm =
    ((d.brightness_temperature - config.brightness_min_k) / config.brightness_span_k).clamp(0.0, 1.0);
  let power_norm = (d.fire_radiative_power / config.power_max_mw).clamp(0.0, 1.0);
  let intensity = config.power_weight * power_norm + config.brightness_weight * brightness_norm;
  Some(intensity.clamp(config.min_intensity, 1.0))
}

/// One point per usable detection, coordinates preserved.
pub fn derived_points(detections: &[HotspotDetection], config: &IntensityConfig) -> Vec<IntensityPoint> {
  detections
    .iter()
    .filter_map(|d| match detection_intensity(d, config) {
      Some(intensity) => Some(IntensityPoint {
        latitude: d.latitude,
        longitude: d.longitude,
        intensity,
      }),
      None => {
        tracing::warn!(?d, "skipping detection with non-finite fields");
        None
      }
    })
    .collect()
}

/// Number of synthetic points for a score.
pub fn synthetic_count(score: f64, config: &IntensityConfig) -> usize {
  config.base_points + config.points_per_score * usize::from(zone::round_score(score))
}

/// Deterministic scatter around `center`, denser and hotter for higher scores.
///
/// The generator is reseeded on every call, so identical inputs give identical points.
pub fn synthetic_points(center: LatLon, score: f64, config: &IntensityConfig) -> Vec<IntensityPoint> {
  let score = if score.is_finite() {
    score.clamp(0.0, MAX_SCORE)
  } else {
    0.0
  };
  let base = score / MAX_SCORE;
  let low = config.intensity_low_factor * base;
  let high = (config.intensity_high_factor * base).min(1.0).max(low);
  let spread = config.spread_deg.abs();

  let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
  (0..synthetic_count(score, config))
    .map(|_| {
      let lat_offset = rng.random_range(-spread..=spread);
      let lon_offset = rng.random_range(-spread..=spread);
      let intensity = rng.random_range(low..=high);
      IntensityPoint {
        latitude: center.lat + lat_offset,
        longitude: center.lon + lon_offset,
        intensity,
      }
    })
    .collect()
}

pub fn fallback_point(config: &IntensityConfig) -> IntensityPoint {
  IntensityPoint {
    latitude: config.fallback_center.lat,
    longitude: config.fallback_center.lon,
    intensity: config.fallback_intensity,
  }
}

/// Pick the heatmap mode: detections if any, else a synthetic scatter around `center`,
/// else the single fallback point.
///
/// Supplied detections always select the derived mode; if none of them are usable the
/// result is the fallback point, never a synthetic scatter.
pub fn heatmap_points(
  detections: &[HotspotDetection],
  center: Option<LatLon>,
  score: f64,
  config: &IntensityConfig,
) -> Vec<IntensityPoint> {
  if !detections.is_empty() {
    let points = derived_points(detections, config);
    if points.is_empty() {
      tracing::warn!(supplied = detections.len(), "no usable detections, using fallback point");
      return vec![fallback_point(config)];
    }
    return points;
  }
  match center {
    Some(c) => synthetic_points(c, score, config),
    None => vec![fallback_point(config)],
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  fn detection(bt: f64, frp: f64) -> HotspotDetection {
    HotspotDetection {
      latitude: 36.5,
      longitude: -119.2,
      brightness_temperature: bt,
      fire_radiative_power: frp,
      daynight: None,
      acquired: None,
    }
  }

  #[test]
  fn mid_range_detection_is_half_intensity() {
    let cfg = IntensityConfig::default();
    assert_relative_eq!(detection_intensity(&detection(350.0, 50.0), &cfg).unwrap(), 0.5, epsilon = 1e-12);
  }

  #[test]
  fn derived_intensity_is_clamped() {
    let cfg = IntensityConfig::default();
    assert_relative_eq!(detection_intensity(&detection(250.0, 0.0), &cfg).unwrap(), 0.1);
    assert_relative_eq!(detection_intensity(&detection(500.0, 400.0), &cfg).unwrap(), 1.0);
  }

  #[test]
  fn derived_points_preserve_coordinates_and_skip_bad_rows() {
    let cfg = IntensityConfig::default();
    let mut bad = detection(350.0, 50.0);
    bad.fire_radiative_power = f64::NAN;
    let points = derived_points(&[detection(330.0, 20.0), bad], &cfg);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].latitude, 36.5);
    assert_eq!(points[0].longitude, -119.2);
  }

  #[test]
  fn synthetic_count_follows_rounded_score() {
    let cfg = IntensityConfig::default();
    assert_eq!(synthetic_count(8.0, &cfg), 39);
    assert_eq!(synthetic_count(0.0, &cfg), 15);
    assert_eq!(synthetic_count(2.5, &cfg), 21);
  }

  #[test]
  fn synthetic_points_are_reproducible_and_bounded() {
    let cfg = IntensityConfig::default();
    let center = LatLon::new(30.3165, 78.0322);
    let a = synthetic_points(center, 8.0, &cfg);
    let b = synthetic_points(center, 8.0, &cfg);
    assert_eq!(a, b);
    assert_eq!(a.len(), 39);
    for p in &a {
      assert!((p.latitude - center.lat).abs() <= 0.3 + 1e-9);
      assert!((p.longitude - center.lon).abs() <= 0.3 + 1e-9);
      assert!(p.intensity >= 0.4 - 1e-9 && p.intensity <= 0.96 + 1e-9, "{}", p.intensity);
    }
  }

  #[test]
  fn synthetic_intensity_caps_at_one() {
    let cfg = IntensityConfig::default();
    let points = synthetic_points(LatLon::new(0.0, 0.0), 10.0, &cfg);
    assert!(points.iter().all(|p| p.intensity >= 0.5 && p.intensity <= 1.0));
  }

  #[test]
  fn mode_selection() {
    let cfg = IntensityConfig::default();
    let center = Some(LatLon::new(31.1048, 77.1734));

    let derived = heatmap_points(&[detection(350.0, 50.0)], center, 9.0, &cfg);
    assert_eq!(derived.len(), 1);

    let synthetic = heatmap_points(&[], center, 4.0, &cfg);
    assert_eq!(synthetic.len(), 27);

    let fallback = heatmap_points(&[], None, 4.0, &cfg);
    assert_eq!(fallback, vec![fallback_point(&cfg)]);
    assert_eq!(fallback[0].intensity, 0.1);
  }

  #[test]
  fn unusable_detections_never_fall_through_to_synthetic() {
    let cfg = IntensityConfig::default();
    let mut bad = detection(350.0, 50.0);
    bad.latitude = f64::NAN;
    let mut also_bad = detection(330.0, 20.0);
    also_bad.brightness_temperature = f64::INFINITY;

    let points = heatmap_points(&[bad, also_bad], Some(LatLon::new(1.0, 1.0)), 8.0, &cfg);
    assert_eq!(points, vec![fallback_point(&cfg)]);
  }
}
