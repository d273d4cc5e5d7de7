//! Prediction sources: the remote model or the local heuristic.

use regime_scorer::{BatchRunner, BatchSummary, InputRecord, PredictResponse, Prediction};
use tracing::warn;

use crate::client::ApiClient;
use crate::error::ToolError;

/// One scored row, positionally aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPrediction {
  pub prediction: Prediction,
  /// Absent when the remote model returns no probabilities.
  pub confidence: Option<f64>,
  /// Only known in simulation mode.
  pub indicators: Option<u32>,
}

pub trait Predictor {
  fn name(&self) -> &'static str;
  fn predict(&self, records: &[InputRecord]) -> Result<Vec<RowPrediction>, ToolError>;
}

/// Local rule-based scoring ("simulation mode").
#[derive(Default)]
pub struct HeuristicPredictor {
  runner: BatchRunner,
}

impl Predictor for HeuristicPredictor {
  fn name(&self) -> &'static str {
    "simulation"
  }

  fn predict(&self, records: &[InputRecord]) -> Result<Vec<RowPrediction>, ToolError> {
    let batch = self.runner.score_batch(records);
    Ok(
      batch
        .results
        .into_iter()
        .map(|r| RowPrediction {
          prediction: r.prediction,
          confidence: Some(r.confidence),
          indicators: Some(r.risk_indicator_count),
        })
        .collect(),
    )
  }
}

pub struct RemotePredictor<'a> {
  pub client: &'a ApiClient,
}

impl Predictor for RemotePredictor<'_> {
  fn name(&self) -> &'static str {
    "api"
  }

  fn predict(&self, records: &[InputRecord]) -> Result<Vec<RowPrediction>, ToolError> {
    let response = self.client.batch_predict(records)?;
    rows_from_remote(records.len(), &response.predictions, response.probabilities.as_deref())
  }
}

/// Pair remote predictions with their probabilities, checking the count.
pub fn rows_from_remote(
  expected: usize,
  predictions: &[Prediction],
  probabilities: Option<&[[f64; 2]]>,
) -> Result<Vec<RowPrediction>, ToolError> {
  if predictions.len() != expected {
    return Err(ToolError::CountMismatch {
      expected,
      got: predictions.len(),
    });
  }
  Ok(
    predictions
      .iter()
      .enumerate()
      .map(|(i, &prediction)| RowPrediction {
        prediction,
        confidence: probabilities
          .and_then(|p| p.get(i))
          .map(|p| if prediction.is_high() { p[1] } else { p[0] }),
        indicators: None,
      })
      .collect(),
  )
}

/// Use the remote model when it is healthy and loaded; otherwise, or if the
/// call fails, fall back to the heuristic. Returns the source actually used.
pub fn predict_with_fallback(
  client: Option<&ApiClient>,
  records: &[InputRecord],
) -> Result<(&'static str, Vec<RowPrediction>), ToolError> {
  let heuristic = HeuristicPredictor::default();
  let Some(client) = client else {
    return Ok((heuristic.name(), heuristic.predict(records)?));
  };

  match client.health() {
    Ok(h) if h.model_loaded => {
      let remote = RemotePredictor { client };
      match remote.predict(records) {
        Ok(rows) => return Ok((remote.name(), rows)),
        Err(e) => warn!("remote batch prediction failed, using simulation mode: {}", e),
      }
    }
    Ok(_) => warn!(url = client.base_url(), "model not loaded, using simulation mode"),
    Err(e) => warn!(url = client.base_url(), "api unavailable, using simulation mode: {}", e),
  }
  Ok((heuristic.name(), heuristic.predict(records)?))
}

/// Single-record counterpart of [`predict_with_fallback`].
pub fn predict_one_with_fallback(
  client: Option<&ApiClient>,
  record: &InputRecord,
) -> Result<(&'static str, PredictResponse), ToolError> {
  if let Some(client) = client {
    match client.health() {
      Ok(h) if h.model_loaded => match client.predict(record) {
        Ok(response) => return Ok(("api", response)),
        Err(e) => warn!("remote prediction failed, using simulation mode: {}", e),
      },
      Ok(_) => warn!(url = client.base_url(), "model not loaded, using simulation mode"),
      Err(e) => warn!(url = client.base_url(), "api unavailable, using simulation mode: {}", e),
    }
  }

  let score = regime_scorer::score(record);
  Ok((
    "simulation",
    PredictResponse {
      predictions: vec![score.prediction],
      probabilities: Some(vec![score.probabilities()]),
      scores: vec![score],
    },
  ))
}

/// Counters over scored rows; mean confidence over rows that carry one.
pub fn summarize(rows: &[RowPrediction]) -> BatchSummary {
  let total = rows.len();
  let high_risk_count = rows.iter().filter(|r| r.prediction.is_high()).count();
  let confidences: Vec<f64> = rows.iter().filter_map(|r| r.confidence).collect();
  let mean_confidence = if confidences.is_empty() {
    0.0
  } else {
    let mean = confidences.iter().sum::<f64>() / confidences.len() as f64;
    (mean * 100.0).round() / 100.0
  };

  BatchSummary {
    total,
    high_risk_count,
    low_risk_count: total - high_risk_count,
    high_risk_rate: if total > 0 {
      high_risk_count as f64 / total as f64
    } else {
      0.0
    },
    mean_confidence,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rec(age: &str) -> InputRecord {
    InputRecord {
      grupo_etario: Some(age.into()),
      ..InputRecord::default()
    }
  }

  #[test]
  fn heuristic_rows_carry_indicators() {
    let rows = HeuristicPredictor::default()
      .predict(&[rec("> 75"), rec("5 a 15")])
      .unwrap();
    assert_eq!(rows[0].prediction, Prediction::High);
    assert_eq!(rows[0].indicators, Some(2));
    assert_eq!(rows[1].confidence, Some(0.7));
  }

  #[test]
  fn remote_rows_pick_probability_of_predicted_class() {
    let rows = rows_from_remote(
      2,
      &[Prediction::Low, Prediction::High],
      Some(&[[0.8, 0.2], [0.35, 0.65]][..]),
    )
    .unwrap();
    assert_eq!(rows[0].confidence, Some(0.8));
    assert_eq!(rows[1].confidence, Some(0.65));
    assert!(rows.iter().all(|r| r.indicators.is_none()));
  }

  #[test]
  fn remote_count_mismatch_is_rejected() {
    let err = rows_from_remote(3, &[Prediction::Low], None).unwrap_err();
    assert!(matches!(err, ToolError::CountMismatch { expected: 3, got: 1 }));
  }

  #[test]
  fn offline_uses_simulation() {
    let (source, rows) = predict_with_fallback(None, &[rec("> 75")]).unwrap();
    assert_eq!(source, "simulation");
    assert_eq!(rows.len(), 1);
  }

  #[test]
  fn unreachable_api_falls_back() {
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let (source, rows) = predict_with_fallback(Some(&client), &[rec("19 a 45")]).unwrap();
    assert_eq!(source, "simulation");
    assert_eq!(rows[0].prediction, Prediction::Low);
  }

  #[test]
  fn single_record_offline() {
    let (source, response) = predict_one_with_fallback(None, &rec("70 a 75")).unwrap();
    assert_eq!(source, "simulation");
    assert_eq!(response.predictions, vec![Prediction::High]);
    assert_eq!(response.scores[0].confidence, 0.6);
  }

  #[test]
  fn summary_without_confidences() {
    let rows = rows_from_remote(2, &[Prediction::High, Prediction::High], None).unwrap();
    let s = summarize(&rows);
    assert_eq!(s.high_risk_count, 2);
    assert_eq!(s.high_risk_rate, 1.0);
    assert_eq!(s.mean_confidence, 0.0);
    assert_eq!(summarize(&[]).total, 0);
  }
}
