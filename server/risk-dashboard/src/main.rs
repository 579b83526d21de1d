//! Binary entrypoint for the RiskRadar dashboard API.

use std::net::SocketAddr;
use std::sync::Arc;

use hotspot_data::LocationRegistry;
use risk_dashboard::{router, AppState, DashboardConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = DashboardConfig::from_env()?;
  let registry = match &config.locations {
    Some(path) => LocationRegistry::from_path(path)?,
    None => LocationRegistry::builtin(),
  };
  tracing::info!(
    locations = registry.locations.len(),
    profile = %config.profile,
    firms = %config.firms_csv.display(),
    weather = %config.weather_csv.display(),
    "starting dashboard"
  );

  let port = config.port;
  let state = Arc::new(AppState::new(config, registry)?);
  let app = router(state);

  let addr = SocketAddr::from(([127, 0, 0, 1], port));
  tracing::info!("risk-dashboard listening on http://{}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
