//! Error responses for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use regime_scorer::{ErrorOutput, ScorerError};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Scorer(#[from] ScorerError),

  #[error("internal: {0}")]
  Internal(String),
}

impl ApiError {
  pub fn internal(msg: impl Into<String>) -> Self {
    Self::Internal(msg.into())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      Self::Scorer(e) => {
        warn!("rejected request: {}", e);
        let mut body = ErrorOutput::new(e.to_string());
        if let Some(field) = e.field() {
          body = body.with_field(field);
        }
        (StatusCode::BAD_REQUEST, body)
      }
      Self::Internal(msg) => {
        error!("internal error: {}", msg);
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          ErrorOutput::new("internal error"),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
