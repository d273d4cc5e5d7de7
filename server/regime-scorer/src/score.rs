//! Additive point rule: indicator total, classification and confidence.

use crate::config::ScoringConfig;
use crate::rules;
use crate::types::{InputRecord, Prediction, ScoreResult};

/// Deterministic, side-effect-free scorer for single records.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
  config: ScoringConfig,
}

impl RiskScorer {
  pub fn new(config: ScoringConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &ScoringConfig {
    &self.config
  }

  /// Score one record. Never fails and never mutates the record.
  pub fn score(&self, record: &InputRecord) -> ScoreResult {
    let indicators = rules::matched_indicators(record, &self.config);
    let count: u32 = indicators
      .iter()
      .map(|&i| rules::weight(i, &self.config))
      .sum();

    let prediction = if count >= self.config.high_risk_threshold {
      Prediction::High
    } else {
      Prediction::Low
    };
    let confidence = compute_confidence(prediction, count, &self.config);
    let explanations = indicators
      .iter()
      .map(|i| i.explanation().to_string())
      .collect();

    ScoreResult {
      prediction,
      confidence,
      risk_indicator_count: count,
      indicators,
      explanations,
    }
  }
}

/// Score with the default rules.
pub fn score(record: &InputRecord) -> ScoreResult {
  RiskScorer::default().score(record)
}

/// Branch formula, capped, clamped to [0, 1], rounded to 2 decimals.
pub fn compute_confidence(prediction: Prediction, indicators: u32, config: &ScoringConfig) -> f64 {
  let n = f64::from(indicators);
  let raw = match prediction {
    Prediction::High => config.high_confidence_base + n * config.high_confidence_step,
    Prediction::Low => config.low_confidence_base - n * config.low_confidence_step,
  };
  round2(raw.min(config.confidence_cap).clamp(0.0, 1.0))
}

pub(crate) fn round2(v: f64) -> f64 {
  (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Indicator;

  fn record(age: &str, regimen: &str, zona: &str, sisben: &str) -> InputRecord {
    InputRecord {
      grupo_etario: Some(age.into()),
      regimen: Some(regimen.into()),
      zona: Some(zona.into()),
      nivel_sisben: Some(sisben.into()),
      ..InputRecord::default()
    }
  }

  #[test]
  fn every_indicator_caps_confidence() {
    let out = score(&record("> 75", "Subsidiado", "Rural - Dispersal", "1"));
    assert_eq!(out.risk_indicator_count, 5);
    assert_eq!(out.prediction, Prediction::High);
    assert_eq!(out.confidence, 0.95);
    assert_eq!(out.explanations.len(), 4);
  }

  #[test]
  fn no_indicator_is_low_risk() {
    let out = score(&record("19 a 45", "Contributivo", "Urbana", "3"));
    assert_eq!(out.risk_indicator_count, 0);
    assert_eq!(out.prediction, Prediction::Low);
    assert_eq!(out.confidence, 0.70);
    assert!(out.indicators.is_empty());
  }

  #[test]
  fn one_indicator_stays_low() {
    let out = score(&record("19 a 45", "Subsidiado", "Urbana", "3"));
    assert_eq!(out.risk_indicator_count, 1);
    assert_eq!(out.prediction, Prediction::Low);
    assert_eq!(out.confidence, 0.6);
  }

  #[test]
  fn age_alone_reaches_threshold() {
    let out = score(&record("65 a 70", "Contributivo", "Urbana", "4"));
    assert_eq!(out.indicators, vec![Indicator::ElderlyAgeGroup]);
    assert_eq!(out.risk_indicator_count, 2);
    assert_eq!(out.prediction, Prediction::High);
    assert_eq!(out.confidence, 0.6);
  }

  #[test]
  fn high_branch_steps() {
    let config = ScoringConfig::default();
    assert_eq!(compute_confidence(Prediction::High, 2, &config), 0.6);
    assert_eq!(compute_confidence(Prediction::High, 3, &config), 0.75);
    assert_eq!(compute_confidence(Prediction::High, 4, &config), 0.9);
    assert_eq!(compute_confidence(Prediction::High, 5, &config), 0.95);
  }

  #[test]
  fn low_branch_is_clamped_at_zero() {
    // Only reachable when the threshold is raised above the default.
    let config = ScoringConfig {
      high_risk_threshold: 100,
      ..ScoringConfig::default()
    };
    assert_eq!(compute_confidence(Prediction::Low, 7, &config), 0.0);
    assert_eq!(compute_confidence(Prediction::Low, 12, &config), 0.0);
  }

  #[test]
  fn empty_record_does_not_fail() {
    let out = score(&InputRecord::default());
    assert_eq!(out.prediction, Prediction::Low);
    assert_eq!(out.confidence, 0.7);
  }

  #[test]
  fn scoring_leaves_record_untouched() {
    let r = record("> 75", "Subsidiado", "Rural", "1");
    let before = r.clone();
    let _ = score(&r);
    assert_eq!(r, before);
  }
}
