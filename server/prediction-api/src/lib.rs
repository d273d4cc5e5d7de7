//! Regime Prediction API
//!
//! HTTP service exposing the heuristic regime scorer under the remote model's
//! contract, so the dashboard can point at it when the trained model is down.

mod config;
mod error;
mod handlers;
mod state;
mod types;

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use handlers::{batch_predict, features, health, predict};
pub use state::AppState;
pub use types::{FeaturesResponse, RulesInfo};

/// Build the router with permissive CORS and request tracing.
pub fn app(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/predict", post(predict))
    .route("/batch_predict", post(batch_predict))
    .route("/features", get(features))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
