//! Risk zones, their display metadata, and the star rating.

use serde::{Deserialize, Serialize};

pub const SAFE_MAX: f64 = 3.0;
pub const MODERATE_MAX: f64 = 6.0;
pub const MAX_STARS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Zone {
  Safe,
  Moderate,
  Danger,
}

/// Static display data for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneInfo {
  pub label: &'static str,
  pub color: &'static str,
  pub marker_color: &'static str,
  pub icon: &'static str,
  pub alert: &'static str,
}

const SAFE_INFO: ZoneInfo = ZoneInfo {
  label: "SAFE ZONE",
  color: "#28a745",
  marker_color: "green",
  icon: "✅",
  alert: "LOW RISK – Conditions stable. Continue routine monitoring.",
};

const MODERATE_INFO: ZoneInfo = ZoneInfo {
  label: "MODERATE RISK",
  color: "#fd7e14",
  marker_color: "orange",
  icon: "⚠️",
  alert: "MODERATE RISK – Increase monitoring frequency. Prepare response teams.",
};

const DANGER_INFO: ZoneInfo = ZoneInfo {
  label: "DANGER ZONE",
  color: "#dc3545",
  marker_color: "red",
  icon: "🚨",
  alert: "HIGH FIRE RISK ALERT – Immediate surveillance required. Deploy patrol units and notify authorities immediately.",
};

impl Zone {
  pub fn info(self) -> &'static ZoneInfo {
    match self {
      Self::Safe => &SAFE_INFO,
      Self::Moderate => &MODERATE_INFO,
      Self::Danger => &DANGER_INFO,
    }
  }
}

/// Upper bounds are inclusive: 3.0 is SAFE, 6.0 is MODERATE.
pub fn classify(score: f64) -> Zone {
  if score <= SAFE_MAX {
    Zone::Safe
  } else if score <= MODERATE_MAX {
    Zone::Moderate
  } else {
    Zone::Danger
  }
}

/// Round half to even, so 2.5 -> 2 and 3.5 -> 4.
pub fn round_score(score: f64) -> u8 {
  if !score.is_finite() {
    return 0;
  }
  score.round_ties_even().clamp(0.0, f64::from(MAX_STARS)) as u8
}

/// Filled stars out of ten.
pub fn stars(score: f64) -> u8 {
  round_score(score)
}

pub fn star_display(score: f64) -> String {
  let filled = usize::from(stars(score));
  let empty = usize::from(MAX_STARS) - filled;
  format!("{}{}", "⭐".repeat(filled), "☆".repeat(empty))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zone_boundaries() {
    assert_eq!(classify(0.0), Zone::Safe);
    assert_eq!(classify(3.0), Zone::Safe);
    assert_eq!(classify(3.01), Zone::Moderate);
    assert_eq!(classify(6.0), Zone::Moderate);
    assert_eq!(classify(6.01), Zone::Danger);
    assert_eq!(classify(10.0), Zone::Danger);
  }

  #[test]
  fn rounding_is_half_to_even() {
    assert_eq!(round_score(2.5), 2);
    assert_eq!(round_score(3.5), 4);
    assert_eq!(round_score(2.51), 3);
    assert_eq!(round_score(7.49), 7);
    assert_eq!(round_score(-1.0), 0);
    assert_eq!(round_score(12.0), 10);
    assert_eq!(round_score(f64::NAN), 0);
  }

  #[test]
  fn star_display_has_ten_slots() {
    let s = star_display(6.6);
    assert_eq!(s.matches('⭐').count(), 7);
    assert_eq!(s.matches('☆').count(), 3);
    assert_eq!(star_display(0.0), "☆".repeat(10));
  }

  #[test]
  fn zone_metadata() {
    assert_eq!(Zone::Safe.info().label, "SAFE ZONE");
    assert_eq!(Zone::Moderate.info().marker_color, "orange");
    assert!(Zone::Danger.info().alert.starts_with("HIGH FIRE RISK ALERT"));
  }

  #[test]
  fn zone_serializes_uppercase() {
    assert_eq!(serde_json::to_string(&Zone::Danger).unwrap(), "\"DANGER\"");
  }
}
