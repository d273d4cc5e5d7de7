//! Scoring configuration with the heuristic's default constants.

use serde::Serialize;

/// Rule weights, classification threshold and confidence formula.
///
/// Serialized (minus execution knobs) into the memo cache key, so two runners
/// with different rules never share cached results.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringConfig {
  /// Age brackets that count as elderly.
  pub elderly_age_groups: Vec<String>,
  pub elderly_age_weight: u32,
  /// Régimen value that counts as subsidized (exact match).
  pub subsidized_regime: String,
  pub subsidized_weight: u32,
  /// Case-sensitive substring searched for in Zona.
  pub rural_marker: String,
  pub rural_weight: u32,
  /// Sisbén levels treated as vulnerable (exact match).
  pub low_sisben_levels: Vec<String>,
  pub low_sisben_weight: u32,
  /// Indicator total at or above which a record is high risk.
  pub high_risk_threshold: u32,
  pub high_confidence_base: f64,
  pub high_confidence_step: f64,
  pub low_confidence_base: f64,
  pub low_confidence_step: f64,
  /// Upper bound applied to both confidence branches.
  pub confidence_cap: f64,
  /// Batches at or above this size are scored on the rayon pool.
  #[serde(skip)]
  pub parallel_threshold: usize,
}

impl Default for ScoringConfig {
  fn default() -> Self {
    Self {
      elderly_age_groups: vec!["> 75".into(), "70 a 75".into(), "65 a 70".into()],
      elderly_age_weight: 2,
      subsidized_regime: "Subsidiado".into(),
      subsidized_weight: 1,
      rural_marker: "Rural".into(),
      rural_weight: 1,
      low_sisben_levels: vec!["1".into(), "2".into()],
      low_sisben_weight: 1,
      high_risk_threshold: 2,
      high_confidence_base: 0.30,
      high_confidence_step: 0.15,
      low_confidence_base: 0.70,
      low_confidence_step: 0.10,
      confidence_cap: 0.95,
      parallel_threshold: 1024,
    }
  }
}
