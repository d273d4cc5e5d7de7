//! Risk indicators matched from record fields.

use crate::config::ScoringConfig;
use crate::types::{Indicator, InputRecord};

/// Indicators matched by `record`, in rule order. Missing fields and values
/// outside the known sets match nothing.
pub fn matched_indicators(record: &InputRecord, config: &ScoringConfig) -> Vec<Indicator> {
  let mut matched = Vec::new();

  if let Some(age) = record.grupo_etario.as_deref() {
    if config.elderly_age_groups.iter().any(|g| g == age) {
      matched.push(Indicator::ElderlyAgeGroup);
    }
  }
  if record.regimen.as_deref() == Some(config.subsidized_regime.as_str()) {
    matched.push(Indicator::SubsidizedRegime);
  }
  if let Some(zona) = record.zona.as_deref() {
    if !config.rural_marker.is_empty() && zona.contains(config.rural_marker.as_str()) {
      matched.push(Indicator::RuralZone);
    }
  }
  if let Some(level) = record.nivel_sisben.as_deref() {
    if config.low_sisben_levels.iter().any(|l| l == level) {
      matched.push(Indicator::LowSisbenLevel);
    }
  }

  matched
}

/// Points contributed by one indicator.
pub fn weight(indicator: Indicator, config: &ScoringConfig) -> u32 {
  match indicator {
    Indicator::ElderlyAgeGroup => config.elderly_age_weight,
    Indicator::SubsidizedRegime => config.subsidized_weight,
    Indicator::RuralZone => config.rural_weight,
    Indicator::LowSisbenLevel => config.low_sisben_weight,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

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
  fn all_four_rules_match() {
    let r = record("70 a 75", "Subsidiado", "Rural - Resto Rural", "2");
    let got = matched_indicators(&r, &ScoringConfig::default());
    assert_eq!(
      got,
      vec![
        Indicator::ElderlyAgeGroup,
        Indicator::SubsidizedRegime,
        Indicator::RuralZone,
        Indicator::LowSisbenLevel
      ]
    );
  }

  #[test]
  fn rural_match_is_case_sensitive_substring() {
    let config = ScoringConfig::default();
    let hit = record("19 a 45", "Contributivo", "Rural - Dispersal", "3");
    let miss = record("19 a 45", "Contributivo", "zona rural", "3");
    assert_eq!(matched_indicators(&hit, &config), vec![Indicator::RuralZone]);
    assert!(matched_indicators(&miss, &config).is_empty());
  }

  #[test]
  fn sixty_to_sixty_five_is_not_elderly() {
    let r = record("60 a 65", "Contributivo", "Urbana", "NO APLICA");
    assert!(matched_indicators(&r, &ScoringConfig::default()).is_empty());
  }

  #[test]
  fn missing_fields_match_nothing() {
    assert!(matched_indicators(&InputRecord::default(), &ScoringConfig::default()).is_empty());
  }

  #[test]
  fn default_weights() {
    let config = ScoringConfig::default();
    assert_eq!(weight(Indicator::ElderlyAgeGroup, &config), 2);
    assert_eq!(weight(Indicator::SubsidizedRegime, &config), 1);
    assert_eq!(weight(Indicator::RuralZone, &config), 1);
    assert_eq!(weight(Indicator::LowSisbenLevel, &config), 1);
  }
}
