use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::models::Recommendation;
use crate::normalize::{normalize_product, raw_card_name};

pub const MAX_CARDS: usize = 6;

lazy_static! {
  static ref CURRENCY: Regex = Regex::new(r"^\$\d{1,3}(,\d{3})*(\.\d{2})?$|^\$\d+(\.\d{2})?$").unwrap();
}

/// Why a model reply could not be turned into a [`Recommendation`].
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
  #[error("response is not valid JSON: {0}")]
  InvalidJson(String),

  #[error("response is not a JSON object")]
  NotAnObject,

  #[error("missing required key `{0}`")]
  MissingKey(&'static str),

  #[error("key `{0}` has the wrong type")]
  WrongType(&'static str),

  #[error("no usable product cards")]
  NoUsableCards,
}

pub fn is_currency(text: &str) -> bool {
  CURRENCY.is_match(text)
}

/// Removes a surrounding Markdown code fence, with or without a `json` tag.
pub fn strip_code_fence(raw: &str) -> &str {
  let text = raw.trim();
  let Some(inner) = text.strip_prefix("```").and_then(|t| t.strip_suffix("```")) else {
    return text;
  };
  let inner = inner
    .strip_prefix("json")
    .or_else(|| inner.strip_prefix("JSON"))
    .unwrap_or(inner);
  inner.trim()
}

fn required_str(
  object: &serde_json::Map<String, Value>,
  key: &'static str,
) -> Result<String, ShapeError> {
  match object.get(key) {
    None => Err(ShapeError::MissingKey(key)),
    Some(Value::String(s)) => Ok(s.trim().to_string()),
    Some(_) => Err(ShapeError::WrongType(key)),
  }
}

pub fn parse_recommendation(raw: &str) -> Result<Recommendation, ShapeError> {
  let text = strip_code_fence(raw);
  let value: Value =
    serde_json::from_str(text).map_err(|e| ShapeError::InvalidJson(e.to_string()))?;
  let object = value.as_object().ok_or(ShapeError::NotAnObject)?;

  let title = required_str(object, "title")?;
  let description = required_str(object, "description")?;
  let raw_cards = match object.get("productCards") {
    None => return Err(ShapeError::MissingKey("productCards")),
    Some(Value::Array(cards)) => cards,
    Some(_) => return Err(ShapeError::WrongType("productCards")),
  };

  let product_cards: Vec<_> = raw_cards
    .iter()
    .filter(|card| card.is_object() && raw_card_name(card).is_some())
    .map(normalize_product)
    .filter(|card| is_currency(&card.price.current))
    .take(MAX_CARDS)
    .collect();

  if product_cards.is_empty() {
    return Err(ShapeError::NoUsableCards);
  }

  Ok(Recommendation {
    title,
    description,
    product_cards,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn card(name: &str, price: &str) -> String {
    format!(
      r#"{{"frontImage":"f.jpg","images":["f.jpg"],"tvType":"{name}","size":"55\"","topFeatures":["HDR"],"price":{{"current":"{price}","suggested":null}},"availableSizes":["55\""],"description":"Nice."}}"#
    )
  }

  fn payload(cards: &[String]) -> String {
    format!(
      r#"{{"title":"Great TVs","description":"Picked for you.","productCards":[{}]}}"#,
      cards.join(",")
    )
  }

  #[test]
  fn strips_json_fence() {
    assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(strip_code_fence("  ```\n[1]\n```  "), "[1]");
    assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
    assert_eq!(strip_code_fence("```"), "```");
  }

  #[test]
  fn currency_pattern() {
    for ok in ["$999", "$1,299", "$12,499.99", "$1299", "$849.50"] {
      assert!(is_currency(ok), "{ok} should match");
    }
    for bad in ["999", "$", "Price unavailable", "$1,29", "USD 999", "$9.9"] {
      assert!(!is_currency(bad), "{bad} should not match");
    }
  }

  #[test]
  fn parses_fenced_payload() {
    let raw = format!("```json\n{}\n```", payload(&[card("Samsung Neo QLED 4K QN90C", "$1,299")]));
    let rec = parse_recommendation(&raw).expect("payload should parse");
    assert_eq!(rec.title, "Great TVs");
    assert_eq!(rec.product_cards.len(), 1);
    assert_eq!(rec.product_cards[0].tv_type, "Samsung Neo QLED 4K QN90C");
    assert_eq!(rec.product_cards[0].available_sizes, vec!["55\"".to_string()]);
  }

  #[test]
  fn missing_top_level_key_is_rejected() {
    let raw = r#"{"title":"Great TVs","productCards":[]}"#;
    assert_eq!(parse_recommendation(raw), Err(ShapeError::MissingKey("description")));
  }

  #[test]
  fn bare_array_is_rejected() {
    let raw = format!("[{}]", card("QN90C", "$999"));
    assert_eq!(parse_recommendation(&raw), Err(ShapeError::NotAnObject));
  }

  #[test]
  fn truncated_json_is_rejected() {
    let raw = &payload(&[card("QN90C", "$999")])[..40];
    assert!(matches!(parse_recommendation(raw), Err(ShapeError::InvalidJson(_))));
  }

  #[test]
  fn wrong_types_are_rejected() {
    let raw = r#"{"title":5,"description":"d","productCards":[]}"#;
    assert_eq!(parse_recommendation(raw), Err(ShapeError::WrongType("title")));
    let raw = r#"{"title":"t","description":"d","productCards":{}}"#;
    assert_eq!(parse_recommendation(raw), Err(ShapeError::WrongType("productCards")));
  }

  #[test]
  fn unusable_cards_are_dropped() {
    let raw = payload(&[
      card("", "$999"),
      card("QN90C", "call us"),
      card("Crystal UHD", "$499"),
    ]);
    let rec = parse_recommendation(&raw).unwrap();
    assert_eq!(rec.product_cards.len(), 1);
    assert_eq!(rec.product_cards[0].tv_type, "Crystal UHD");
  }

  #[test]
  fn no_usable_cards_is_an_error() {
    let raw = payload(&[card("", "$999")]);
    assert_eq!(parse_recommendation(&raw), Err(ShapeError::NoUsableCards));
    assert_eq!(parse_recommendation(&payload(&[])), Err(ShapeError::NoUsableCards));
  }

  #[test]
  fn at_most_six_cards_are_kept() {
    let cards: Vec<String> = (0..9).map(|i| card(&format!("TV {i}"), "$999")).collect();
    let rec = parse_recommendation(&payload(&cards)).unwrap();
    assert_eq!(rec.product_cards.len(), MAX_CARDS);
    assert_eq!(rec.product_cards[5].tv_type, "TV 5");
  }
}
