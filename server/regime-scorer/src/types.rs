//! Core types for the regime scorer (JSON contracts + scoring output).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ScorerError;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// One affiliation case. Every field is optional; a missing field simply
/// matches no risk indicator. Unknown fields are silently ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputRecord {
  #[serde(rename = "Genero", default, skip_serializing_if = "Option::is_none")]
  pub genero: Option<String>,
  #[serde(rename = "Grupo_etario", default, skip_serializing_if = "Option::is_none")]
  pub grupo_etario: Option<String>,
  #[serde(
    rename = "Régimen",
    alias = "Regimen",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub regimen: Option<String>,
  #[serde(rename = "Tipo_afiliado", default, skip_serializing_if = "Option::is_none")]
  pub tipo_afiliado: Option<String>,
  #[serde(rename = "Departamento", default, skip_serializing_if = "Option::is_none")]
  pub departamento: Option<String>,
  #[serde(rename = "Municipio", default, skip_serializing_if = "Option::is_none")]
  pub municipio: Option<String>,
  #[serde(rename = "Zona", default, skip_serializing_if = "Option::is_none")]
  pub zona: Option<String>,
  #[serde(rename = "Nivel_Sisben", default, skip_serializing_if = "Option::is_none")]
  pub nivel_sisben: Option<String>,
  #[serde(rename = "Estado_afiliado", default, skip_serializing_if = "Option::is_none")]
  pub estado_afiliado: Option<String>,
  #[serde(
    rename = "Condicion_beneficiario",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub condicion_beneficiario: Option<String>,
}

/// Batch request body. Older dashboards sent the list under `data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchPredictRequest {
  #[serde(alias = "data")]
  pub records: Vec<InputRecord>,
}

/// Ordered age-bracket labels used by the affiliation databases.
pub const AGE_GROUPS: [&str; 12] = [
  "< 1", "1 a 5", "5 a 15", "15 a 19", "19 a 45", "45 a 50", "50 a 55", "55 a 60", "60 a 65",
  "65 a 70", "70 a 75", "> 75",
];

// ---------------------------------------------------------------------------
// Prediction + indicators
// ---------------------------------------------------------------------------

/// Binary class. On the wire it is the integer 0 (low risk, contributivo)
/// or 1 (high risk, subsidiado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Prediction {
  Low,
  High,
}

impl Prediction {
  pub fn is_high(self) -> bool {
    self == Self::High
  }
}

impl From<Prediction> for u8 {
  fn from(p: Prediction) -> u8 {
    match p {
      Prediction::Low => 0,
      Prediction::High => 1,
    }
  }
}

impl TryFrom<u8> for Prediction {
  type Error = ScorerError;

  fn try_from(v: u8) -> Result<Self, Self::Error> {
    match v {
      0 => Ok(Self::Low),
      1 => Ok(Self::High),
      other => Err(ScorerError::invalid_value("prediction", &other.to_string())),
    }
  }
}

/// One matched heuristic condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
  ElderlyAgeGroup,
  SubsidizedRegime,
  RuralZone,
  LowSisbenLevel,
}

impl Indicator {
  pub fn explanation(self) -> &'static str {
    match self {
      Self::ElderlyAgeGroup => "Age group 65 or older",
      Self::SubsidizedRegime => "Affiliated to the subsidized regime",
      Self::RuralZone => "Affiliation zone is rural",
      Self::LowSisbenLevel => "Sisben level 1 or 2",
    }
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
  pub prediction: Prediction,
  pub confidence: f64,
  pub risk_indicator_count: u32,
  #[serde(default)]
  pub indicators: Vec<Indicator>,
  #[serde(default)]
  pub explanations: Vec<String>,
}

impl ScoreResult {
  /// `[P(low), P(high)]`, in the order the remote model reports them.
  pub fn probabilities(&self) -> [f64; 2] {
    let other = ((1.0 - self.confidence) * 100.0).round() / 100.0;
    match self.prediction {
      Prediction::High => [other, self.confidence],
      Prediction::Low => [self.confidence, other],
    }
  }
}

/// Aggregate counters over one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
  pub total: usize,
  pub high_risk_count: usize,
  pub low_risk_count: usize,
  /// high_risk_count / total; 0 for an empty batch.
  pub high_risk_rate: f64,
  pub mean_confidence: f64,
}

/// Results positionally aligned with the input records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
  pub results: Vec<ScoreResult>,
  pub summary: BatchSummary,
}

impl BatchResult {
  pub fn len(&self) -> usize {
    self.results.len()
  }

  pub fn is_empty(&self) -> bool {
    self.results.is_empty()
  }
}

/// Per-value slice of a batch for one input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureBreakdown {
  pub value: String,
  pub total: usize,
  pub high_risk_count: usize,
  pub high_risk_rate: f64,
}

// ---------------------------------------------------------------------------
// Remote model contract
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictResponse {
  pub predictions: Vec<Prediction>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub probabilities: Option<Vec<[f64; 2]>>,
  /// Only the heuristic service fills this in.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub scores: Vec<ScoreResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchPredictResponse {
  pub predictions: Vec<Prediction>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub probabilities: Option<Vec<[f64; 2]>>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub results: Vec<ScoreResult>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub summary: Option<BatchSummary>,
}

impl From<&BatchResult> for BatchPredictResponse {
  fn from(batch: &BatchResult) -> Self {
    Self {
      predictions: batch.results.iter().map(|r| r.prediction).collect(),
      probabilities: Some(batch.results.iter().map(ScoreResult::probabilities).collect()),
      results: batch.results.clone(),
      summary: Some(batch.summary.clone()),
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthResponse {
  #[serde(default)]
  pub status: String,
  #[serde(default)]
  pub model_loaded: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mode: Option<String>,
  #[serde(default)]
  pub endpoints: BTreeMap<String, String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub started_at: Option<String>,
}

/// Structured error output for rejected input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
