//! Response types specific to the HTTP service.

use regime_scorer::{Field, ScoringConfig, AGE_GROUPS};
use serde::Serialize;

/// `GET /features`: accepted inputs and the active scoring rules.
#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
  pub fields: Vec<&'static str>,
  pub required: Vec<&'static str>,
  pub age_groups: Vec<&'static str>,
  pub rules: RulesInfo,
}

#[derive(Debug, Serialize)]
pub struct RulesInfo {
  pub elderly_age_groups: Vec<String>,
  pub elderly_age_weight: u32,
  pub subsidized_regime: String,
  pub subsidized_weight: u32,
  pub rural_marker: String,
  pub rural_weight: u32,
  pub low_sisben_levels: Vec<String>,
  pub low_sisben_weight: u32,
  pub high_risk_threshold: u32,
}

impl FeaturesResponse {
  pub fn new(config: &ScoringConfig) -> Self {
    Self {
      fields: Field::ALL.iter().map(|f| f.column()).collect(),
      required: Field::REQUIRED.iter().map(|f| f.column()).collect(),
      age_groups: AGE_GROUPS.to_vec(),
      rules: RulesInfo {
        elderly_age_groups: config.elderly_age_groups.clone(),
        elderly_age_weight: config.elderly_age_weight,
        subsidized_regime: config.subsidized_regime.clone(),
        subsidized_weight: config.subsidized_weight,
        rural_marker: config.rural_marker.clone(),
        rural_weight: config.rural_weight,
        low_sisben_levels: config.low_sisben_levels.clone(),
        low_sisben_weight: config.low_sisben_weight,
        high_risk_threshold: config.high_risk_threshold,
      },
    }
  }
}
