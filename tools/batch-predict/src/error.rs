//! Error type for the batch-predict tool.

use regime_scorer::ScorerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("csv: {0}")]
  Csv(#[from] csv::Error),

  #[error("http: {0}")]
  Http(#[from] reqwest::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error(transparent)]
  Scorer(#[from] ScorerError),

  #[error("missing required columns: {0}")]
  MissingColumns(String),

  #[error("api returned {status}: {body}")]
  Remote { status: u16, body: String },

  #[error("api returned {got} predictions for {expected} records")]
  CountMismatch { expected: usize, got: usize },
}
