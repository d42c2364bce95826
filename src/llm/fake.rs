use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationOptions, LlmError, LlmProvider};

#[derive(Debug, Clone)]
pub enum FakeReply {
  Text(String),
  Fail,
  Timeout,
}

/// Returns a canned reply and records what it was asked.
#[derive(Debug)]
pub struct FakeProvider {
  reply: FakeReply,
  calls: AtomicUsize,
  last_prompt: Mutex<Option<String>>,
  last_options: Mutex<Option<GenerationOptions>>,
}

impl FakeProvider {
  pub fn new(reply: FakeReply) -> Self {
    Self {
      reply,
      calls: AtomicUsize::new(0),
      last_prompt: Mutex::new(None),
      last_options: Mutex::new(None),
    }
  }

  pub fn text(reply: &str) -> Self {
    Self::new(FakeReply::Text(reply.to_string()))
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn last_prompt(&self) -> Option<String> {
    self.last_prompt.lock().unwrap().clone()
  }

  pub fn last_options(&self) -> Option<GenerationOptions> {
    *self.last_options.lock().unwrap()
  }
}

#[async_trait]
impl LlmProvider for FakeProvider {
  async fn complete(
    &self,
    _api_key: &str,
    prompt: &str,
    options: &GenerationOptions,
  ) -> Result<String, LlmError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
    *self.last_options.lock().unwrap() = Some(*options);

    match &self.reply {
      FakeReply::Text(text) => Ok(text.clone()),
      FakeReply::Fail => Err(LlmError::RequestFailed("connection refused".to_string())),
      FakeReply::Timeout => Err(LlmError::Timeout),
    }
  }

  fn provider_name(&self) -> &'static str {
    "fake"
  }

  fn model_name(&self) -> &str {
    "fake-model"
  }
}
