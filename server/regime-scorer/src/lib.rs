//! Regime Risk Scorer — heuristic fallback for the regime classification model.
//!
//! Scores affiliation records with a fixed additive point rule, runs ordered
//! batches with aggregate counters, and memoizes batch results by content hash.
//!
//! No DB, no network; pure computation.

pub mod batch;
pub mod cache;
pub mod config;
pub mod error;
pub mod field;
pub mod logging;
pub mod rules;
pub mod score;
pub mod summary;
pub mod types;

pub use batch::{score_batch, BatchRunner};
pub use cache::{content_hash, BatchCache, ContentHash};
pub use config::ScoringConfig;
pub use error::ScorerError;
pub use field::Field;
pub use score::{score, RiskScorer};
pub use summary::breakdown;
pub use types::{
  BatchPredictRequest, BatchPredictResponse, BatchResult, BatchSummary, ErrorOutput,
  FeatureBreakdown, HealthResponse, Indicator, InputRecord, PredictResponse, Prediction,
  ScoreResult, AGE_GROUPS,
};
