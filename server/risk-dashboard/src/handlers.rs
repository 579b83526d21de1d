//! HTTP handlers for the dashboard API.

use axum::{
  extract::{Query, State},
  http::StatusCode,
  Json,
};
use chrono::NaiveDate;
use fire_risk_engine::types::ErrorOutput;
use fire_risk_engine::{classify, zone, Engine, EnvironmentalReading, RiskAssessment};
use hotspot_data::table::parse_date;
use hotspot_data::Location;

use crate::state::SharedState;
use crate::types::{AssessQuery, AssessResponse, DatesResponse, LocationSummary, Mode};

/// Score used when no weather reading resolves for the requested location/date.
pub const NEUTRAL_SCORE: f64 = 5.0;

type ApiError = (StatusCode, Json<ErrorOutput>);

fn api_error(status: StatusCode, message: impl Into<String>, field: &str) -> ApiError {
  (status, Json(ErrorOutput::new(message).with_field(field)))
}

pub async fn health() -> &'static str {
  "ok"
}

pub async fn locations(State(state): State<SharedState>) -> Json<Vec<LocationSummary>> {
  let list = state
    .registry
    .locations
    .iter()
    .map(|l| LocationSummary {
      name: l.name.clone(),
      center: l.center,
      zoom: l.zoom,
      has_baseline: l.baseline.is_some(),
    })
    .collect();
  Json(list)
}

pub async fn dates(State(state): State<SharedState>) -> Json<DatesResponse> {
  match state.detections().await {
    Ok(set) => Json(DatesResponse {
      dates: set.available_dates(),
      latest: set.latest_date(),
      source_error: None,
    }),
    Err(e) => {
      tracing::warn!(error = %e, "FIRMS data unavailable");
      Json(DatesResponse {
        dates: Vec::new(),
        latest: None,
        source_error: Some(e.to_string()),
      })
    }
  }
}

pub async fn assess(
  State(state): State<SharedState>,
  Query(query): Query<AssessQuery>,
) -> Result<Json<AssessResponse>, ApiError> {
  let location = match query.location.as_deref() {
    Some(name) => state.registry.get(name),
    None => state.registry.default_location(),
  }
  .ok_or_else(|| {
    let requested = query
      .location
      .as_deref()
      .unwrap_or(state.registry.default.as_str());
    api_error(
      StatusCode::NOT_FOUND,
      format!("unknown location: {}", requested),
      "location",
    )
  })?;

  let date = match query.date.as_deref() {
    Some(raw) => Some(parse_date(raw).ok_or_else(|| {
      api_error(
        StatusCode::BAD_REQUEST,
        format!("invalid date {:?}; expected DD-MM-YYYY or YYYY-MM-DD", raw),
        "date",
      )
    })?),
    None => None,
  };

  let response = match (date, location.baseline.as_ref()) {
    (None, Some(reading)) => baseline_assessment(&state, location, reading),
    (Some(date), _) => Ok(observed_assessment(&state, location, date).await),
    (None, None) => {
      // No baseline: use the latest day with detections, as the date picker does.
      let latest = state.detections().await.ok().and_then(|set| set.latest_date());
      match latest {
        Some(date) => Ok(observed_assessment(&state, location, date).await),
        None => Err(api_error(
          StatusCode::UNPROCESSABLE_ENTITY,
          format!("{} has no baseline reading and no dated data", location.name),
          "date",
        )),
      }
    }
  };
  response.map(Json)
}

fn baseline_assessment(
  state: &SharedState,
  location: &Location,
  reading: &EnvironmentalReading,
) -> Result<AssessResponse, ApiError> {
  let engine = &state.baseline_engine;
  let assessment = engine.assess(reading).map_err(|e| {
    let mut body = ErrorOutput::new(e.to_string());
    if let Some(field) = e.field() {
      body = body.with_field(field);
    }
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body))
  })?;
  let points = engine.heatmap(&[], Some(location.center), assessment.score);

  Ok(respond(
    engine,
    location,
    None,
    Mode::Baseline,
    Some(reading.clone()),
    assessment,
    0,
    points,
  ))
}

async fn observed_assessment(
  state: &SharedState,
  location: &Location,
  date: NaiveDate,
) -> AssessResponse {
  let engine = &state.dated_engine;

  let reading = match state.weather().await {
    Ok(table) => match table.lookup(&location.name, date) {
      Ok(r) => Some(r.clone()),
      Err(e) => {
        tracing::info!(error = %e, "using neutral score");
        None
      }
    },
    Err(e) => {
      tracing::warn!(error = %e, "weather data unavailable, using neutral score");
      None
    }
  };

  let scored = reading.as_ref().and_then(|r| match engine.assess(r) {
    Ok(a) => Some(a),
    Err(e) => {
      tracing::warn!(location = %location.name, %date, error = %e, "weather row not scorable");
      None
    }
  });
  let weather_available = scored.is_some();
  let assessment = scored.unwrap_or_else(|| RiskAssessment {
    score: NEUTRAL_SCORE,
    zone: classify(NEUTRAL_SCORE),
    factors: Vec::new(),
  });

  let detections = match state.detections().await {
    Ok(set) => set.on_date(date),
    Err(e) => {
      tracing::warn!(error = %e, "FIRMS data unavailable");
      Vec::new()
    }
  };
  // Observed mode never synthesizes: no detections means the fallback point.
  let points = engine.heatmap(&detections, None, assessment.score);

  let mut out = respond(
    engine,
    location,
    Some(date),
    Mode::Observed,
    reading.filter(|_| weather_available),
    assessment,
    detections.len(),
    points,
  );
  out.weather_available = weather_available;
  out
}

#[allow(clippy::too_many_arguments)]
fn respond(
  engine: &Engine,
  location: &Location,
  date: Option<NaiveDate>,
  mode: Mode,
  reading: Option<EnvironmentalReading>,
  assessment: RiskAssessment,
  hotspot_count: usize,
  points: Vec<fire_risk_engine::IntensityPoint>,
) -> AssessResponse {
  AssessResponse {
    location: location.name.clone(),
    center: location.center,
    zoom: location.zoom,
    date,
    mode,
    profile: engine.weights().name.clone(),
    weather_available: true,
    reading,
    score: assessment.score,
    zone: assessment.zone,
    zone_info: assessment.zone.info(),
    stars: zone::stars(assessment.score),
    star_display: zone::star_display(assessment.score),
    factors: assessment.factors,
    hotspot_count,
    points,
  }
}
