//! HTTP handlers mirroring the remote model-serving contract.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use regime_scorer::{
  BatchPredictRequest, BatchPredictResponse, BatchRunner, HealthResponse, InputRecord,
  PredictResponse,
};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::FeaturesResponse;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
  let endpoints: BTreeMap<String, String> = [
    ("/health", "service and model status"),
    ("/predict", "score one record"),
    ("/batch_predict", "score an ordered list of records"),
    ("/features", "accepted fields and scoring rules"),
  ]
  .into_iter()
  .map(|(k, v)| (k.to_string(), v.to_string()))
  .collect();

  Json(HealthResponse {
    status: "ok".into(),
    model_loaded: true,
    mode: Some("heuristic".into()),
    endpoints,
    started_at: Some(state.started_at.to_rfc3339()),
  })
}

pub async fn predict(
  State(state): State<Arc<AppState>>,
  Json(record): Json<InputRecord>,
) -> Json<PredictResponse> {
  let score = state.runner.scorer().score(&record);
  Json(PredictResponse {
    predictions: vec![score.prediction],
    probabilities: Some(vec![score.probabilities()]),
    scores: vec![score],
  })
}

pub async fn batch_predict(
  State(state): State<Arc<AppState>>,
  Json(req): Json<BatchPredictRequest>,
) -> Result<Json<BatchPredictResponse>, ApiError> {
  BatchRunner::require_non_empty(&req.records)?;

  let count = req.records.len();
  let worker_state = Arc::clone(&state);
  let batch = tokio::task::spawn_blocking(move || worker_state.score_cached(&req.records))
    .await
    .map_err(|e| ApiError::internal(format!("scoring task failed: {}", e)))??;

  info!(
    records = count,
    high_risk = batch.summary.high_risk_count,
    "batch scored"
  );
  Ok(Json(BatchPredictResponse::from(batch.as_ref())))
}

pub async fn features(State(state): State<Arc<AppState>>) -> Json<FeaturesResponse> {
  Json(FeaturesResponse::new(state.runner.config()))
}
