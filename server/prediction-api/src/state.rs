//! Shared application state.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use regime_scorer::{
  content_hash, BatchCache, BatchResult, BatchRunner, InputRecord, ScoringConfig,
};

use crate::error::ApiError;

pub struct AppState {
  pub runner: BatchRunner,
  pub cache: Mutex<BatchCache>,
  pub started_at: DateTime<Utc>,
}

impl AppState {
  pub fn new(scoring: ScoringConfig, cache_capacity: usize) -> Self {
    Self {
      runner: BatchRunner::new(scoring),
      cache: Mutex::new(BatchCache::with_capacity(cache_capacity)),
      started_at: Utc::now(),
    }
  }

  /// Score a batch through the memo cache. The lock is held only for the
  /// lookup and the insert, never while scoring.
  pub fn score_cached(&self, records: &[InputRecord]) -> Result<Arc<BatchResult>, ApiError> {
    self.score_cached_with(records, |r| self.runner.score_batch(r))
  }

  fn score_cached_with<F>(&self, records: &[InputRecord], score: F) -> Result<Arc<BatchResult>, ApiError>
  where
    F: FnOnce(&[InputRecord]) -> BatchResult,
  {
    let key = content_hash(self.runner.config(), records);
    if let Some(hit) = self.lock_cache()?.get(&key) {
      return Ok(hit);
    }

    let result = Arc::new(score(records));
    self.lock_cache()?.insert(key, Arc::clone(&result));
    Ok(result)
  }

  fn lock_cache(&self) -> Result<MutexGuard<'_, BatchCache>, ApiError> {
    self
      .cache
      .lock()
      .map_err(|_| ApiError::internal("batch cache lock poisoned"))
  }
}

impl Default for AppState {
  fn default() -> Self {
    Self::new(ScoringConfig::default(), 32)
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
  fn cache_is_unlocked_while_scoring() {
    let state = AppState::default();
    let slow = [rec("> 75")];
    let other = [rec("19 a 45")];

    let result = state
      .score_cached_with(&slow, |records| {
        assert!(state.cache.try_lock().is_ok(), "cache lock held during scoring");
        // A different batch goes through while the first one is still scoring.
        let inner = state.score_cached(&other).unwrap();
        assert_eq!(inner.summary.low_risk_count, 1);
        state.runner.score_batch(records)
      })
      .unwrap();

    assert_eq!(result.summary.high_risk_count, 1);
    assert_eq!(state.cache.lock().unwrap().len(), 2);
  }

  #[test]
  fn second_call_is_a_cache_hit() {
    let state = AppState::default();
    let records = [rec("70 a 75")];
    let first = state.score_cached(&records).unwrap();
    let second = state
      .score_cached_with(&records, |_| panic!("scored again on a cache hit"))
      .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
  }
}
