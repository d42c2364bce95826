use std::net::TcpListener;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog;
use crate::config::{AppConfig, Credentials};
use crate::error::ApiError;
use crate::fallback::FallbackTable;
use crate::llm::LlmProvider;
use crate::mock::{self, MockReply};
use crate::models::{
  FeatureDescriptionRequest, FeatureDescriptionResponse, GenerateProductsRequest, MockChatRequest,
  RecommendationResponse,
};
use crate::recommend::Recommender;

pub struct RouterState {
  pub started_at: Instant,
  pub config: Arc<AppConfig>,
  pub provider: Arc<dyn LlmProvider>,
  pub fallbacks: Arc<FallbackTable>,
  pub credentials: Credentials,
}

impl RouterState {
  fn recommender(&self) -> Recommender<'_> {
    Recommender {
      provider: self.provider.as_ref(),
      config: &self.config,
      fallbacks: &self.fallbacks,
    }
  }
}

pub fn build_router(state: RouterState) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/api/generate-products", post(generate_products))
    .route("/api/feature-description", post(feature_description))
    .route("/api/mock-chat", post(mock_chat))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
    .with_state(Arc::new(state))
}

pub async fn run_router(listener: TcpListener, state: RouterState) -> anyhow::Result<()> {
  listener.set_nonblocking(true)?;
  let listener = tokio::net::TcpListener::from_std(listener)?;
  axum::serve(listener, build_router(state)).await?;
  Ok(())
}

async fn health(State(state): State<Arc<RouterState>>) -> Json<serde_json::Value> {
  let uptime = state.started_at.elapsed().as_millis() as u64;
  Json(serde_json::json!({
    "status": "ok",
    "version": env!("CARGO_PKG_VERSION"),
    "uptime_ms": uptime
  }))
}

fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
  body
    .map(|Json(inner)| inner)
    .map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))
}

fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
    _ => Err(ApiError::InvalidInput(message.to_string())),
  }
}

async fn generate_products(
  State(state): State<Arc<RouterState>>,
  body: Result<Json<GenerateProductsRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
  let query = required(parse_body(body)?.query, "Query is required")?;
  tracing::info!(%query, "recommendation requested");

  let key = state.credentials.api_key()?;
  let catalog = catalog::load(&state.config.catalog_path).await?;

  let response = state.recommender().recommend(&key, &catalog, &query).await;
  Ok(Json(response))
}

async fn feature_description(
  State(state): State<Arc<RouterState>>,
  body: Result<Json<FeatureDescriptionRequest>, JsonRejection>,
) -> Result<Json<FeatureDescriptionResponse>, ApiError> {
  let feature = required(parse_body(body)?.feature, "Feature name is required")?;
  let key = state.credentials.api_key()?;

  let response = state.recommender().describe_feature(&key, &feature).await;
  Ok(Json(response))
}

async fn mock_chat(
  body: Result<Json<MockChatRequest>, JsonRejection>,
) -> Result<Json<MockReply>, ApiError> {
  let query = required(parse_body(body)?.query, "Query is required")?;
  Ok(Json(mock::respond(&query)))
}
