use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::{GenerationOptions, LlmError, LlmProvider};

#[derive(Debug)]
pub struct GeminiProvider {
  base_url: String,
  model: String,
  client: reqwest::Client,
}

impl GeminiProvider {
  pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, LlmError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      model: model.to_string(),
      client,
    })
  }

  fn endpoint(&self) -> String {
    format!("{}/models/{}:generateContent", self.base_url, self.model)
  }

  /// The key goes in the `x-goog-api-key` header, never in the URL.
  fn http_request(
    &self,
    api_key: &str,
    prompt: &str,
    options: &GenerationOptions,
  ) -> Result<reqwest::Request, LlmError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
      "x-goog-api-key",
      HeaderValue::from_str(api_key).map_err(|err| LlmError::RequestFailed(err.to_string()))?,
    );

    let request = self
      .client
      .post(self.endpoint())
      .headers(headers)
      .json(&build_request(prompt, options))
      .build()?;
    Ok(request)
  }
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
  contents: Vec<Content<'a>>,
  #[serde(rename = "generationConfig")]
  generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
  role: &'static str,
  parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
  text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
  temperature: f32,
  max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
  content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
  #[serde(default)]
  parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
  text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
  error: GeminiApiError,
}

#[derive(Deserialize)]
struct GeminiApiError {
  message: String,
}

fn build_request<'a>(prompt: &'a str, options: &GenerationOptions) -> GeminiRequest<'a> {
  GeminiRequest {
    contents: vec![Content {
      role: "user",
      parts: vec![Part { text: prompt }],
    }],
    generation_config: GenerationConfig {
      temperature: options.temperature,
      max_output_tokens: options.max_output_tokens,
    },
  }
}

fn extract_text(body: &str) -> Result<String, LlmError> {
  let response: GeminiResponse =
    serde_json::from_str(body).map_err(|e| LlmError::ParseError(e.to_string()))?;

  let text: String = response
    .candidates
    .into_iter()
    .next()
    .and_then(|c| c.content)
    .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
    .unwrap_or_default();

  if text.trim().is_empty() {
    return Err(LlmError::EmptyResponse);
  }
  Ok(text)
}

#[async_trait]
impl LlmProvider for GeminiProvider {
  async fn complete(
    &self,
    api_key: &str,
    prompt: &str,
    options: &GenerationOptions,
  ) -> Result<String, LlmError> {
    let request = self.http_request(api_key, prompt, options)?;
    let resp = self.client.execute(request).await?;

    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
      let message = serde_json::from_str::<GeminiErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
      return Err(LlmError::ApiError {
        status: status.as_u16(),
        message,
      });
    }

    extract_text(&body)
  }

  fn provider_name(&self) -> &'static str {
    "gemini"
  }

  fn model_name(&self) -> &str {
    &self.model
  }
}
