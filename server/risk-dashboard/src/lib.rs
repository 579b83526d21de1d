//! RiskRadar Dashboard API
//!
//! HTTP service that scores a location (baseline or dated), classifies its zone, and
//! returns heatmap points for the map front-end. Bind to 127.0.0.1 by default.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod types;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub use config::DashboardConfig;
pub use error::{ConfigError, SourceError};
pub use handlers::{assess, dates, health, locations, NEUTRAL_SCORE};
pub use state::{AppState, SharedState};

pub fn router(state: SharedState) -> Router {
  Router::new()
    .route("/health", get(handlers::health))
    .route("/locations", get(handlers::locations))
    .route("/dates", get(handlers::dates))
    .route("/assess", get(handlers::assess))
    .layer(CorsLayer::permissive())
    .with_state(state)
}
