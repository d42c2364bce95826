//! Canned answers for when the model is unreachable or unusable.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::models::{Price, ProductCard, Recommendation, RecommendationResponse};

const QUERY_PLACEHOLDER: &str = "{query}";
const FEATURE_PLACEHOLDER: &str = "{feature}";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FallbackBucket {
  /// Matched as substrings of the lowercased query.
  pub keywords: Vec<String>,
  pub title: String,
  pub description: String,
  pub product_cards: Vec<ProductCard>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GenericFallback {
  pub title: String,
  /// `{query}` is replaced with the shopper's text.
  pub description: String,
  pub product_cards: Vec<ProductCard>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FallbackTable {
  pub buckets: Vec<FallbackBucket>,
  pub generic: GenericFallback,
  pub chat_response: String,
  pub features: BTreeMap<String, String>,
  /// `{feature}` is replaced with the requested feature name.
  pub generic_feature: String,
}

impl FallbackTable {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let data = std::fs::read_to_string(path)
      .with_context(|| format!("reading fallback table {}", path.display()))?;
    let table = serde_json::from_str(&data)
      .with_context(|| format!("parsing fallback table {}", path.display()))?;
    Ok(table)
  }

  /// The first bucket with a keyword in the query wins.
  pub fn bucket_for(&self, query: &str) -> Option<&FallbackBucket> {
    let query = query.to_lowercase();
    self
      .buckets
      .iter()
      .find(|bucket| bucket.keywords.iter().any(|k| query.contains(&k.to_lowercase())))
  }

  pub fn recommendation_for(&self, query: &str) -> RecommendationResponse {
    let recommendation = match self.bucket_for(query) {
      Some(bucket) => Recommendation {
        title: bucket.title.clone(),
        description: bucket.description.clone(),
        product_cards: bucket.product_cards.clone(),
      },
      None => Recommendation {
        title: self.generic.title.clone(),
        description: self.generic.description.replace(QUERY_PLACEHOLDER, query),
        product_cards: self.generic.product_cards.clone(),
      },
    };

    RecommendationResponse {
      recommendation,
      chat_response: self.chat_response.clone(),
      success: false,
    }
  }

  /// Exact-name lookup; unknown names get the generic sentence.
  pub fn feature_description_for(&self, feature: &str) -> String {
    self
      .features
      .get(feature)
      .cloned()
      .unwrap_or_else(|| self.generic_feature.replace(FEATURE_PLACEHOLDER, feature))
  }
}

fn card(
  front_image: &str,
  tv_type: &str,
  size: &str,
  top_features: &[&str],
  price: (&str, &str),
  available_sizes: &[&str],
  description: &str,
) -> ProductCard {
  ProductCard {
    front_image: front_image.to_string(),
    images: vec![front_image.to_string()],
    tv_type: tv_type.to_string(),
    size: size.to_string(),
    top_features: top_features.iter().map(|s| s.to_string()).collect(),
    price: Price {
      current: price.0.to_string(),
      suggested: Some(price.1.to_string()),
    },
    available_sizes: available_sizes.iter().map(|s| s.to_string()).collect(),
    description: description.to_string(),
  }
}

fn bucket(
  keywords: &[&str],
  title: &str,
  description: &str,
  product_cards: Vec<ProductCard>,
) -> FallbackBucket {
  FallbackBucket {
    keywords: keywords.iter().map(|s| s.to_string()).collect(),
    title: title.to_string(),
    description: description.to_string(),
    product_cards,
  }
}

impl Default for FallbackTable {
  fn default() -> Self {
    let neo_qled = card(
      "https://images.samsung.com/is/image/samsung/assets/us/tvs/gallery-qn90c.jpg",
      "Samsung Neo QLED 4K QN90C",
      "65\"",
      &["Neo Quantum Processor 4K", "Quantum HDR 32X", "144Hz Gaming", "Motion Xcelerator Turbo Pro"],
      ("$1,299", "$1,599"),
      &["43\"", "50\"", "55\"", "65\"", "75\"", "85\""],
      "A bright Mini LED panel with a 144Hz refresh rate and low input lag keeps fast games smooth and sharp.",
    );
    let oled = card(
      "https://images.samsung.com/is/image/samsung/assets/us/tvs/gallery-s90c.jpg",
      "Samsung OLED 4K S90C",
      "65\"",
      &["Quantum Dot OLED", "Pantone Validated Color", "Dolby Atmos", "144Hz Refresh Rate"],
      ("$1,599", "$1,999"),
      &["55\"", "65\"", "77\"", "83\""],
      "Self-lit pixels deliver perfect blacks and rich color for a true cinema feel at home.",
    );
    let crystal = card(
      "https://images.samsung.com/is/image/samsung/assets/us/tvs/gallery-cu7000.jpg",
      "Samsung Crystal UHD CU7000",
      "43\"",
      &["Crystal Processor 4K", "PurColor", "Smart TV with Tizen", "Slim Design"],
      ("$299", "$349"),
      &["43\"", "50\"", "55\"", "65\"", "75\""],
      "A slim 4K screen that fits a dresser or wall mount and streams everything out of the box.",
    );
    let big_qled = card(
      "https://images.samsung.com/is/image/samsung/assets/us/tvs/gallery-q80c.jpg",
      "Samsung QLED 4K Q80C",
      "85\"",
      &["Quantum Processor 4K", "Direct Full Array", "Object Tracking Sound", "Quantum HDR+"],
      ("$2,199", "$2,799"),
      &["55\"", "65\"", "75\"", "85\"", "98\""],
      "An 85-inch QLED with full-array backlighting that keeps a huge picture bright and even.",
    );
    let generic = card(
      "https://images.samsung.com/is/image/samsung/assets/us/tvs/gallery-neo-qled.jpg",
      "Samsung Neo QLED TV",
      "55\"",
      &["4K Resolution", "Smart TV", "HDR"],
      ("$999", "$1,199"),
      &["55\"", "65\""],
      "Great Samsung TV option for your needs.",
    );

    Self {
      buckets: vec![
        bucket(
          &["gaming"],
          "Ultimate Gaming TVs",
          "Fast refresh rates and low input lag for smooth, responsive gameplay.",
          vec![neo_qled.clone(), oled.clone()],
        ),
        bucket(
          &["bedroom", "small"],
          "Perfect Bedroom Entertainment",
          "Compact Samsung TVs that fit neatly into bedrooms and smaller spaces without giving up picture quality.",
          vec![crystal.clone()],
        ),
        bucket(
          &["4k", "movie"],
          "Cinematic 4K Experience",
          "Deep contrast and vivid color that bring movie nights to life.",
          vec![oled, neo_qled.clone()],
        ),
        bucket(
          &["large", "big"],
          "Big Screen Spectacular",
          "Room-filling screens that stay bright and sharp from every seat.",
          vec![big_qled, neo_qled],
        ),
        bucket(
          &["budget", "cheap"],
          "Great Value TVs",
          "Reliable 4K picture and smart features at a friendly price.",
          vec![crystal],
        ),
      ],
      generic: GenericFallback {
        title: "Samsung TV Recommendations".to_string(),
        description: "Here are some Samsung TVs that could suit \"{query}\".".to_string(),
        product_cards: vec![generic],
      },
      chat_response: "I'm having some technical difficulties, but here's a great TV recommendation.".to_string(),
      features: BTreeMap::from([
        (
          "OLED".to_string(),
          "OLED technology delivers perfect blacks and infinite contrast by controlling each individual pixel. Unlike traditional LED TVs, OLED pixels emit their own light and can turn completely off, creating true blacks that make colors pop with incredible vibrancy.".to_string(),
        ),
        (
          "QLED".to_string(),
          "QLED uses quantum dots to produce pure, accurate colors across a wider spectrum. Samsung's QLED displays deliver 100% Color Volume, ensuring brilliant colors at any brightness level.".to_string(),
        ),
        (
          "4K".to_string(),
          "4K Ultra HD resolution delivers four times the detail of Full HD with over 8 million pixels. Every scene comes alive with incredible clarity and fine detail.".to_string(),
        ),
        (
          "HDR".to_string(),
          "HDR technology expands the range of colors and contrast for more realistic images. HDR reveals details in both shadows and highlights.".to_string(),
        ),
        (
          "Smart TV".to_string(),
          "Built-in smart functionality gives you access to all your favorite streaming apps and content without additional devices.".to_string(),
        ),
      ]),
      generic_feature: "{feature} enhances your Samsung TV viewing experience with advanced technology.".to_string(),
    }
  }
}
