//! Structured error types for the regime scorer.

use thiserror::Error;

/// The scorer itself never fails on a well-typed record; these errors come
/// from boundary checks and wire decoding.
#[derive(Debug, Error)]
pub enum ScorerError {
  #[error("invalid value for {field}: {value}")]
  InvalidFieldValue { field: String, value: String },

  #[error("empty batch: at least one record is required")]
  EmptyBatchInput,

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl ScorerError {
  pub fn invalid_value(field: &str, value: &str) -> Self {
    Self::InvalidFieldValue {
      field: field.to_string(),
      value: value.to_string(),
    }
  }

  /// Name of the offending input field, when there is one.
  pub fn field(&self) -> Option<&str> {
    match self {
      Self::InvalidFieldValue { field, .. } => Some(field),
      Self::EmptyBatchInput => Some("records"),
      Self::Json(_) => None,
    }
  }
}
