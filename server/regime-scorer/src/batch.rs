//! Ordered batch scoring with aggregate counters.

use rayon::prelude::*;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::error::ScorerError;
use crate::score::RiskScorer;
use crate::summary;
use crate::types::{BatchResult, InputRecord, ScoreResult};

/// Applies a [`RiskScorer`] to every record of a batch. Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
  scorer: RiskScorer,
}

impl BatchRunner {
  pub fn new(config: ScoringConfig) -> Self {
    Self {
      scorer: RiskScorer::new(config),
    }
  }

  pub fn scorer(&self) -> &RiskScorer {
    &self.scorer
  }

  pub fn config(&self) -> &ScoringConfig {
    self.scorer.config()
  }

  /// Score `records`, keeping output index i paired with input index i.
  ///
  /// An empty slice yields an empty result with zeroed counters; callers that
  /// must reject empty uploads use [`BatchRunner::require_non_empty`] first.
  pub fn score_batch(&self, records: &[InputRecord]) -> BatchResult {
    let parallel = records.len() >= self.config().parallel_threshold;
    debug!(records = records.len(), parallel, "scoring batch");

    // Indexed collect keeps input order on the parallel path too.
    let results: Vec<ScoreResult> = if parallel {
      records.par_iter().map(|r| self.scorer.score(r)).collect()
    } else {
      records.iter().map(|r| self.scorer.score(r)).collect()
    };

    let summary = summary::summarize(&results);
    BatchResult { results, summary }
  }

  /// Boundary check for batch uploads.
  pub fn require_non_empty(records: &[InputRecord]) -> Result<(), ScorerError> {
    if records.is_empty() {
      return Err(ScorerError::EmptyBatchInput);
    }
    Ok(())
  }
}

/// Score a batch with the default rules.
pub fn score_batch(records: &[InputRecord]) -> BatchResult {
  BatchRunner::default().score_batch(records)
}
