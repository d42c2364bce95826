use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::error::UpstreamFailure;
use crate::fallback::FallbackTable;
use crate::llm::LlmProvider;
use crate::models::{FeatureDescriptionResponse, Recommendation, RecommendationResponse};
use crate::prompts::{build_feature_prompt, build_recommendation_prompt};
use crate::shape::parse_recommendation;

pub struct Recommender<'a> {
  pub provider: &'a dyn LlmProvider,
  pub config: &'a AppConfig,
  pub fallbacks: &'a FallbackTable,
}

impl Recommender<'_> {
  /// Never fails: anything that goes wrong upstream ends in the fallback.
  pub async fn recommend(
    &self,
    api_key: &str,
    catalog: &Catalog,
    query: &str,
  ) -> RecommendationResponse {
    match self.try_recommend(api_key, catalog, query).await {
      Ok(recommendation) => {
        let chat_response = format!(
          "I found {} great Samsung TV options based on your query: \"{}\"",
          recommendation.product_cards.len(),
          query
        );
        RecommendationResponse {
          recommendation,
          chat_response,
          success: true,
        }
      }
      Err(err) => {
        tracing::warn!(
          error = %err,
          provider = self.provider.provider_name(),
          model = self.provider.model_name(),
          "recommendation fell back to canned response"
        );
        self.fallbacks.recommendation_for(query)
      }
    }
  }

  async fn try_recommend(
    &self,
    api_key: &str,
    catalog: &Catalog,
    query: &str,
  ) -> Result<Recommendation, UpstreamFailure> {
    let excerpt = catalog.prompt_excerpt(self.config.catalog_prompt_budget);
    let prompt = build_recommendation_prompt(query, &excerpt);

    let raw = self
      .provider
      .complete(api_key, &prompt, &self.config.products_generation())
      .await?;
    tracing::debug!(len = raw.len(), "model reply received");

    let recommendation = parse_recommendation(&raw)?;
    tracing::info!(cards = recommendation.product_cards.len(), "recommendation parsed");
    Ok(recommendation)
  }

  pub async fn describe_feature(&self, api_key: &str, feature: &str) -> FeatureDescriptionResponse {
    let prompt = build_feature_prompt(feature);
    let result = self
      .provider
      .complete(api_key, &prompt, &self.config.feature_generation())
      .await;

    match result {
      Ok(text) if !text.trim().is_empty() => FeatureDescriptionResponse {
        feature: feature.to_string(),
        description: text.trim().to_string(),
        success: true,
      },
      other => {
        if let Err(err) = other {
          tracing::warn!(error = %err, feature, "feature description fell back to canned text");
        }
        FeatureDescriptionResponse {
          feature: feature.to_string(),
          description: self.fallbacks.feature_description_for(feature),
          success: false,
        }
      }
    }
  }
}
