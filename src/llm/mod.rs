mod gemini;

#[cfg(test)]
pub mod fake;

pub use gemini::GeminiProvider;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
  #[error("API request failed: {0}")]
  RequestFailed(String),

  #[error("API request timed out")]
  Timeout,

  #[error("API returned error: {status} - {message}")]
  ApiError { status: u16, message: String },

  #[error("Failed to parse response: {0}")]
  ParseError(String),

  #[error("Model returned no text")]
  EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      LlmError::Timeout
    } else {
      LlmError::RequestFailed(err.to_string())
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationOptions {
  pub temperature: f32,
  pub max_output_tokens: u32,
}

#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
  /// Send a single-turn prompt and return the model's raw text.
  async fn complete(
    &self,
    api_key: &str,
    prompt: &str,
    options: &GenerationOptions,
  ) -> Result<String, LlmError>;

  fn provider_name(&self) -> &'static str;

  fn model_name(&self) -> &str;
}
