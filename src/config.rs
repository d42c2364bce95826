use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::llm::GenerationOptions;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
  pub listen_addr: String,
  pub catalog_path: PathBuf,
  pub api_base_url: String,
  pub model: String,
  pub api_key_env: String,
  pub temperature: f32,
  pub products_max_output_tokens: u32,
  pub feature_max_output_tokens: u32,
  pub catalog_prompt_budget: usize,
  pub upstream_timeout_secs: u64,
  pub fallbacks_path: Option<PathBuf>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      listen_addr: "127.0.0.1:3000".to_string(),
      catalog_path: PathBuf::from("tv_feed.json"),
      api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
      model: "gemini-1.5-flash".to_string(),
      api_key_env: "GEMINI_API_KEY".to_string(),
      temperature: 0.7,
      products_max_output_tokens: 2000,
      feature_max_output_tokens: 1000,
      catalog_prompt_budget: 15_000,
      upstream_timeout_secs: 30,
      fallbacks_path: None,
    }
  }
}

impl AppConfig {
  pub fn products_generation(&self) -> GenerationOptions {
    GenerationOptions {
      temperature: self.temperature,
      max_output_tokens: self.products_max_output_tokens,
    }
  }

  pub fn feature_generation(&self) -> GenerationOptions {
    GenerationOptions {
      temperature: self.temperature,
      max_output_tokens: self.feature_max_output_tokens,
    }
  }
}

pub fn load_or_init(path: &Path) -> anyhow::Result<AppConfig> {
  if path.exists() {
    let data = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&data)?;
    Ok(config)
  } else {
    let config = AppConfig::default();
    save_config(path, &config)?;
    Ok(config)
  }
}

pub fn save_config(path: &Path, config: &AppConfig) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(config)?;
  std::fs::write(path, json)?;
  Ok(())
}

/// Where the model credential comes from. Read on every request so a key
/// added to the environment after startup is picked up.
#[derive(Clone, Debug)]
pub enum Credentials {
  Env(String),
  Fixed(Option<String>),
}

impl Credentials {
  pub fn api_key(&self) -> Result<String, ApiError> {
    let key = match self {
      Credentials::Env(var) => std::env::var(var).ok(),
      Credentials::Fixed(key) => key.clone(),
    };
    match key {
      Some(k) if !k.trim().is_empty() => Ok(k.trim().to_string()),
      _ => Err(ApiError::Configuration("API key not configured".to_string())),
    }
  }
}
