//! Caller-owned memo cache for batch results, keyed by content hash.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::batch::BatchRunner;
use crate::config::ScoringConfig;
use crate::types::{BatchResult, InputRecord};

/// A stable hex string identifying one (rules, batch) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

/// Hash the scoring rules plus every record, in order.
///
/// Records are hashed through their JSON form, which omits absent fields, so
/// `{}` and a record with every field `None` hash the same.
pub fn content_hash(config: &ScoringConfig, records: &[InputRecord]) -> ContentHash {
  let mut hasher = blake3::Hasher::new();
  // Plain data structs; serialization to a Vec cannot fail.
  let rules = serde_json::to_vec(config).unwrap_or_default();
  hasher.update(&rules);
  hasher.update(&(records.len() as u64).to_le_bytes());
  for record in records {
    hasher.update(b"|");
    hasher.update(&serde_json::to_vec(record).unwrap_or_default());
  }

  let hex = hasher.finalize().to_hex();
  ContentHash(hex[..32].to_string())
}

/// Bounded memo of batch results. Oldest entries are evicted first.
#[derive(Debug)]
pub struct BatchCache {
  capacity: usize,
  entries: HashMap<ContentHash, Arc<BatchResult>>,
  order: VecDeque<ContentHash>,
}

impl BatchCache {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      capacity: capacity.max(1),
      entries: HashMap::new(),
      order: VecDeque::new(),
    }
  }

  /// Look up a previously stored result.
  pub fn get(&self, key: &ContentHash) -> Option<Arc<BatchResult>> {
    let hit = self.entries.get(key).map(Arc::clone);
    debug!(key = %key.0, hit = hit.is_some(), "batch cache lookup");
    hit
  }

  /// Store a result, evicting the oldest entry when full. Storing a key that
  /// is already present replaces its value without touching the order.
  pub fn insert(&mut self, key: ContentHash, result: Arc<BatchResult>) {
    if self.entries.contains_key(&key) {
      self.entries.insert(key, result);
      return;
    }
    if self.entries.len() >= self.capacity {
      if let Some(oldest) = self.order.pop_front() {
        self.entries.remove(&oldest);
      }
    }
    self.order.push_back(key.clone());
    self.entries.insert(key, result);
  }

  /// Return the cached result for `records`, scoring and storing it on a miss.
  ///
  /// Scoring happens while `self` is borrowed; shared caches should use
  /// [`BatchCache::get`] and [`BatchCache::insert`] around an unlocked score.
  pub fn get_or_score(&mut self, runner: &BatchRunner, records: &[InputRecord]) -> Arc<BatchResult> {
    let key = content_hash(runner.config(), records);
    if let Some(hit) = self.get(&key) {
      return hit;
    }
    let result = Arc::new(runner.score_batch(records));
    self.insert(key, Arc::clone(&result));
    result
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn clear(&mut self) {
    self.entries.clear();
    self.order.clear();
  }
}

impl Default for BatchCache {
  fn default() -> Self {
    Self::with_capacity(16)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rec(zona: &str) -> InputRecord {
    InputRecord {
      zona: Some(zona.into()),
      ..InputRecord::default()
    }
  }

  #[test]
  fn same_batch_same_hash() {
    let config = ScoringConfig::default();
    let a = content_hash(&config, &[rec("Rural"), rec("Urbana")]);
    let b = content_hash(&config, &[rec("Rural"), rec("Urbana")]);
    assert_eq!(a, b);
    assert_eq!(a.0.len(), 32);
    assert!(a.0.chars().all(|c| c.is_ascii_hexdigit()));
  }

  #[test]
  fn order_changes_hash() {
    let config = ScoringConfig::default();
    let a = content_hash(&config, &[rec("Rural"), rec("Urbana")]);
    let b = content_hash(&config, &[rec("Urbana"), rec("Rural")]);
    assert_ne!(a, b);
  }

  #[test]
  fn rules_change_hash() {
    let records = [rec("Rural")];
    let a = content_hash(&ScoringConfig::default(), &records);
    let b = content_hash(
      &ScoringConfig {
        high_risk_threshold: 3,
        ..ScoringConfig::default()
      },
      &records,
    );
    assert_ne!(a, b);
  }

  #[test]
  fn hit_returns_same_allocation() {
    let runner = BatchRunner::default();
    let mut cache = BatchCache::with_capacity(4);
    let records = [rec("Rural")];
    let first = cache.get_or_score(&runner, &records);
    let second = cache.get_or_score(&runner, &records);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
  }

  #[test]
  fn evicts_oldest_when_full() {
    let runner = BatchRunner::default();
    let mut cache = BatchCache::with_capacity(2);
    let first = cache.get_or_score(&runner, &[rec("a")]);
    cache.get_or_score(&runner, &[rec("b")]);
    cache.get_or_score(&runner, &[rec("c")]);
    assert_eq!(cache.len(), 2);

    // "a" was evicted, so this is a fresh allocation.
    let again = cache.get_or_score(&runner, &[rec("a")]);
    assert!(!Arc::ptr_eq(&first, &again));

    cache.clear();
    assert!(cache.is_empty());
  }

  #[test]
  fn get_and_insert_round_trip() {
    let runner = BatchRunner::default();
    let mut cache = BatchCache::with_capacity(2);
    let records = [rec("Rural")];
    let key = content_hash(runner.config(), &records);
    assert!(cache.get(&key).is_none());

    let result = Arc::new(runner.score_batch(&records));
    cache.insert(key.clone(), Arc::clone(&result));
    assert!(Arc::ptr_eq(&cache.get(&key).unwrap(), &result));

    // Re-inserting the same key keeps a single entry.
    cache.insert(key.clone(), Arc::new(runner.score_batch(&records)));
    assert_eq!(cache.len(), 1);
    let other = content_hash(runner.config(), &[rec("b")]);
    let third = content_hash(runner.config(), &[rec("c")]);
    cache.insert(other.clone(), Arc::clone(&result));
    cache.insert(third, Arc::clone(&result));
    assert_eq!(cache.len(), 2);
    assert!(cache.get(&key).is_none());
    assert!(cache.get(&other).is_some());
  }
}
