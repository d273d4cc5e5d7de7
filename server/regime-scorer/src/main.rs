//! Binary entrypoint: read one JSON document from stdin, write one to stdout.
//!
//! A single record object yields a ScoreResult; an object carrying `records`
//! (or `data`) yields a BatchResult.

use regime_scorer::{logging, BatchPredictRequest, BatchRunner, InputRecord};
use serde_json::Value;
use std::io::{self, Read, Write};
use tracing::error;

fn main() {
  logging::init();
  if let Err(e) = run_binary() {
    error!("regime-scorer error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let doc: Value = serde_json::from_str(&raw)?;

  let runner = BatchRunner::default();
  let is_batch = doc.get("records").is_some() || doc.get("data").is_some();
  let json = if is_batch {
    let req: BatchPredictRequest = serde_json::from_value(doc)?;
    serde_json::to_vec(&runner.score_batch(&req.records))?
  } else {
    let record: InputRecord = serde_json::from_value(doc)?;
    serde_json::to_vec(&runner.scorer().score(&record))?
  };

  io::stdout().write_all(&json)?;
  Ok(())
}
