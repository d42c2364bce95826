use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Price, ProductCard};
use crate::prompts::DEFAULT_TV_IMAGE;

pub const PLACEHOLDER_IMAGE: &str = DEFAULT_TV_IMAGE;
pub const MAX_FEATURES: usize = 5;
pub const PRICE_UNAVAILABLE: &str = "Price unavailable";
const DEFAULT_NAME: &str = "Samsung TV";

/// A product card as the page holds it, with an id for the comparison tray.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Card {
  pub id: String,
  #[serde(flatten)]
  pub product: ProductCard,
}

/// An assistant reply after normalization.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NormalizedReply {
  pub title: Option<String>,
  pub description: Option<String>,
  pub text: String,
  pub cards: Vec<Card>,
  pub comparison: Option<Vec<Card>>,
  pub proactive_tip: Option<String>,
  pub success: bool,
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
  value
    .get(key)
    .and_then(Value::as_str)
    .map(str::trim)
    .filter(|s| !s.is_empty())
}

fn first_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
  keys.iter().find_map(|k| non_empty_str(value, k))
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
  value
    .get(key)
    .and_then(Value::as_array)
    .map(|items| {
      items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
    })
    .unwrap_or_default()
}

fn number_price(n: &serde_json::Number) -> String {
  match (n.as_u64(), n.as_f64()) {
    (Some(whole), _) => format!("${whole}"),
    (None, Some(f)) => format!("${f:.2}"),
    _ => PRICE_UNAVAILABLE.to_string(),
  }
}

fn scalar_price(value: &Value) -> Option<String> {
  match value {
    Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
    Value::Number(n) => Some(number_price(n)),
    _ => None,
  }
}

pub fn normalize_price(value: Option<&Value>) -> Price {
  match value {
    Some(Value::Object(map)) => Price {
      current: map
        .get("current")
        .and_then(scalar_price)
        .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string()),
      suggested: map.get("suggested").and_then(scalar_price),
    },
    Some(other) => Price {
      current: scalar_price(other).unwrap_or_else(|| PRICE_UNAVAILABLE.to_string()),
      suggested: None,
    },
    None => Price {
      current: PRICE_UNAVAILABLE.to_string(),
      suggested: None,
    },
  }
}

/// The display name a raw card would get, if it has one.
pub fn raw_card_name(value: &Value) -> Option<&str> {
  first_str(value, &["tvType", "name"])
}

/// Every field is optional; demo cards (`name`, `image`, `specs`) are read too.
pub fn normalize_product(value: &Value) -> ProductCard {
  let specs = value.get("specs").unwrap_or(&Value::Null);

  let mut images = string_list(value, "images");
  let front_image = first_str(value, &["frontImage", "image"])
    .map(str::to_string)
    .or_else(|| images.first().cloned())
    .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
  if images.is_empty() {
    images.push(front_image.clone());
  }

  let size = non_empty_str(value, "size")
    .or_else(|| non_empty_str(specs, "size"))
    .unwrap_or_default()
    .to_string();

  let mut available_sizes = string_list(value, "availableSizes");
  if available_sizes.is_empty() && !size.is_empty() {
    available_sizes.push(size.clone());
  }

  let mut top_features = string_list(value, "topFeatures");
  if top_features.is_empty() {
    top_features = string_list(value, "features");
  }
  top_features.truncate(MAX_FEATURES);

  let price = normalize_price(value.get("price").or_else(|| specs.get("price")));

  ProductCard {
    front_image,
    images,
    tv_type: raw_card_name(value).unwrap_or(DEFAULT_NAME).to_string(),
    size,
    top_features,
    price,
    available_sizes,
    description: first_str(value, &["description", "learn_more"])
      .unwrap_or_default()
      .to_string(),
  }
}

/// Normalizes a card and gives it an id. An existing string id is kept so
/// the comparison tray can recognize the same card twice.
pub fn normalize_card(value: &Value) -> Card {
  let id = non_empty_str(value, "id")
    .map(str::to_string)
    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
  Card {
    id,
    product: normalize_product(value),
  }
}

fn card_list(value: &Value, keys: &[&str]) -> Vec<Card> {
  keys
    .iter()
    .find_map(|k| value.get(*k).and_then(Value::as_array))
    .map(|items| items.iter().filter(|v| v.is_object()).map(normalize_card).collect())
    .unwrap_or_default()
}

/// Accepts both the recommendation envelope (`productCards`, `chatResponse`)
/// and the mock assistant reply (`cards`, `response_text`).
pub fn normalize_reply(value: &Value) -> NormalizedReply {
  let cards = card_list(value, &["productCards", "cards"]);
  let comparison = value
    .get("comparison")
    .filter(|v| v.is_array())
    .map(|_| card_list(value, &["comparison"]));

  NormalizedReply {
    title: non_empty_str(value, "title").map(str::to_string),
    description: non_empty_str(value, "description").map(str::to_string),
    text: first_str(value, &["chatResponse", "response_text"])
      .unwrap_or_default()
      .to_string(),
    cards,
    comparison,
    proactive_tip: non_empty_str(value, "proactive_tip").map(str::to_string),
    success: value.get("success").and_then(Value::as_bool).unwrap_or(true),
  }
}
