use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;

use tv_storefront::config::{load_or_init, Credentials};
use tv_storefront::fallback::FallbackTable;
use tv_storefront::llm::{GeminiProvider, LlmProvider};
use tv_storefront::logger;
use tv_storefront::router::{run_router, RouterState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let log_path = std::env::var_os("STOREFRONT_LOG_FILE").map(PathBuf::from);
  logger::init(log_path.as_deref())?;

  let config_path = std::env::var_os("STOREFRONT_CONFIG")
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from("storefront.json"));
  let mut config = load_or_init(&config_path)
    .with_context(|| format!("loading config {}", config_path.display()))?;
  if let Ok(addr) = std::env::var("STOREFRONT_ADDR") {
    config.listen_addr = addr;
  }

  let fallbacks = match &config.fallbacks_path {
    Some(path) => FallbackTable::load(path)?,
    None => FallbackTable::default(),
  };

  let provider = GeminiProvider::new(
    &config.api_base_url,
    &config.model,
    Duration::from_secs(config.upstream_timeout_secs),
  )?;
  let provider: Arc<dyn LlmProvider> = Arc::new(provider);

  let listener = std::net::TcpListener::bind(&config.listen_addr)
    .with_context(|| format!("binding {}", config.listen_addr))?;
  tracing::info!(
    addr = %listener.local_addr()?,
    model = provider.model_name(),
    catalog = %config.catalog_path.display(),
    "storefront starting up"
  );

  let state = RouterState {
    started_at: Instant::now(),
    credentials: Credentials::Env(config.api_key_env.clone()),
    config: Arc::new(config),
    provider,
    fallbacks: Arc::new(fallbacks),
  };

  run_router(listener, state).await
}
