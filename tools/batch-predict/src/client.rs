//! Blocking client for the remote regime model API.

use std::time::Duration;

use regime_scorer::{
  BatchPredictRequest, BatchPredictResponse, HealthResponse, InputRecord, PredictResponse,
};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::ToolError;

pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
pub const PREDICT_TIMEOUT: Duration = Duration::from_secs(30);
pub const BATCH_TIMEOUT: Duration = Duration::from_secs(120);

pub struct ApiClient {
  base_url: String,
  client: Client,
}

impl ApiClient {
  pub fn new(base_url: &str) -> Result<Self, ToolError> {
    let client = Client::builder().build()?;
    Ok(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      client,
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  pub fn health(&self) -> Result<HealthResponse, ToolError> {
    let response = self
      .client
      .get(self.url("/health"))
      .timeout(HEALTH_TIMEOUT)
      .send()?;
    decode(response)
  }

  pub fn predict(&self, record: &InputRecord) -> Result<PredictResponse, ToolError> {
    let response = self
      .client
      .post(self.url("/predict"))
      .json(record)
      .timeout(PREDICT_TIMEOUT)
      .send()?;
    decode(response)
  }

  pub fn batch_predict(&self, records: &[InputRecord]) -> Result<BatchPredictResponse, ToolError> {
    let body = BatchPredictRequest {
      records: records.to_vec(),
    };
    let response = self
      .client
      .post(self.url("/batch_predict"))
      .json(&body)
      .timeout(BATCH_TIMEOUT)
      .send()?;
    decode(response)
  }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ToolError> {
  let status = response.status();
  if !status.is_success() {
    let body = response.text().unwrap_or_default();
    return Err(ToolError::Remote {
      status: status.as_u16(),
      body,
    });
  }
  Ok(response.json()?)
}
