//! Aggregate counters and per-field cross-tabs over scored batches.

use std::collections::BTreeMap;

use crate::field::Field;
use crate::score::round2;
use crate::types::{BatchSummary, FeatureBreakdown, InputRecord, Prediction, ScoreResult};

/// Label used for records that lack the broken-down field.
pub const MISSING_VALUE: &str = "(sin dato)";

/// Counts, high-risk rate and mean confidence. An empty slice yields zeros.
pub fn summarize(results: &[ScoreResult]) -> BatchSummary {
  let total = results.len();
  let high_risk_count = results.iter().filter(|r| r.prediction.is_high()).count();
  let (high_risk_rate, mean_confidence) = if total > 0 {
    let conf_sum: f64 = results.iter().map(|r| r.confidence).sum();
    (
      high_risk_count as f64 / total as f64,
      round2(conf_sum / total as f64),
    )
  } else {
    (0.0, 0.0)
  };

  BatchSummary {
    total,
    high_risk_count,
    low_risk_count: total - high_risk_count,
    high_risk_rate,
    mean_confidence,
  }
}

/// High-risk rate per distinct value of `field`, sorted by value.
///
/// `records` and `predictions` are paired positionally; extra entries on
/// either side are ignored. Works for remote predictions as well as local ones.
pub fn breakdown(
  records: &[InputRecord],
  predictions: &[Prediction],
  field: Field,
) -> Vec<FeatureBreakdown> {
  let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
  for (record, prediction) in records.iter().zip(predictions) {
    let key = field.get(record).unwrap_or(MISSING_VALUE);
    let entry = groups.entry(key).or_insert((0, 0));
    entry.0 += 1;
    if prediction.is_high() {
      entry.1 += 1;
    }
  }

  groups
    .into_iter()
    .map(|(value, (total, high))| FeatureBreakdown {
      value: value.to_string(),
      total,
      high_risk_count: high,
      high_risk_rate: high as f64 / total as f64,
    })
    .collect()
}
