//! Binary entrypoint: read one JSON request from stdin, write one JSON response to stdout.
//!
//! Invalid requests produce an ErrorOutput object on stdout and exit code 1.
//! Logs go to stderr; set RUST_LOG=fire_risk_engine=debug for per-factor detail.

use fire_risk_engine::types::ErrorOutput;
use fire_risk_engine::{run, Request, RiskError};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(io::stderr)
    .init();

  if let Err(e) = run_binary() {
    tracing::error!(error = %e, "request failed");
    let mut err = ErrorOutput::new(e.to_string());
    if let Some(field) = e.field() {
      err = err.with_field(field);
    }
    let mut stdout = io::stdout();
    let _ = serde_json::to_writer(&mut stdout, &err);
    let _ = writeln!(stdout);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), RiskError> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let request: Request = serde_json::from_str(&raw)?;

  let out = run(&request)?;
  let mut stdout = io::stdout();
  serde_json::to_writer(&mut stdout, &out)?;
  writeln!(stdout)?;
  Ok(())
}
