use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Price {
  pub current: String,
  pub suggested: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
  pub front_image: String,
  pub images: Vec<String>,
  pub tv_type: String,
  pub size: String,
  pub top_features: Vec<String>,
  pub price: Price,
  pub available_sizes: Vec<String>,
  pub description: String,
}

/// The canonical shape the chat page renders.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
  pub title: String,
  pub description: String,
  pub product_cards: Vec<ProductCard>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
  #[serde(flatten)]
  pub recommendation: Recommendation,
  pub chat_response: String,
  pub success: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GenerateProductsRequest {
  #[serde(default)]
  pub query: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FeatureDescriptionRequest {
  #[serde(default)]
  pub feature: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeatureDescriptionResponse {
  pub feature: String,
  pub description: String,
  pub success: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MockChatRequest {
  #[serde(default)]
  pub query: Option<String>,
}
