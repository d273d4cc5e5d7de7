//! Binary entrypoint for the prediction API.

use std::sync::Arc;

use prediction_api::{app, AppState, ServiceConfig};
use regime_scorer::{logging, ScoringConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  logging::init();
  let config = ServiceConfig::from_env();
  let state = Arc::new(AppState::new(
    ScoringConfig::default(),
    config.cache_capacity,
  ));

  let addr = config.socket_addr();
  info!("prediction-api listening on http://{}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app(state)).await?;

  Ok(())
}
