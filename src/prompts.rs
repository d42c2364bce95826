//! Prompt text sent to the model.

pub const DEFAULT_TV_IMAGE: &str =
  "https://images.samsung.com/is/image/samsung/assets/us/tvs/default-tv.jpg";

pub const MAX_TITLE_WORDS: usize = 8;

pub struct PriceTier {
  pub name: &'static str,
  pub range: &'static str,
  pub keywords: &'static [&'static str],
}

/// Most specific names first; the model is told to use the first match.
pub const PRICE_TIERS: &[PriceTier] = &[
  PriceTier {
    name: "Ultra-premium",
    range: "$3000+",
    keywords: &["8K", "QN9", "QN800", "QN900"],
  },
  PriceTier {
    name: "Premium",
    range: "$1500-3000",
    keywords: &["Neo QLED", "OLED", "S90", "S95"],
  },
  PriceTier {
    name: "Mid-range",
    range: "$800-1500",
    keywords: &["QLED", "The Frame", "Q80", "Q70"],
  },
  PriceTier {
    name: "Budget",
    range: "$400-800",
    keywords: &["Crystal UHD", "UHD", "CU7", "DU7"],
  },
];

const RESPONSE_SCHEMA: &str = r#"{
  "title": "SHORT_HEADLINE_FOR_THIS_SET",
  "description": "ONE_OR_TWO_SENTENCES_SUMMARISING_WHY_THESE_TVS_FIT",
  "productCards": [
    {
      "frontImage": "REAL_IMAGE_URL_FROM_DATA",
      "images": ["REAL_IMAGE_URL_1", "REAL_IMAGE_URL_2", "REAL_IMAGE_URL_3"],
      "tvType": "REAL_SAMSUNG_MODEL_NAME",
      "size": "55\"",
      "topFeatures": ["REAL_FEATURE_1", "REAL_FEATURE_2", "REAL_FEATURE_3"],
      "price": { "current": "$1,299", "suggested": "$1,599" },
      "availableSizes": ["43\"", "55\"", "65\"", "75\""],
      "description": "2-3 sentences on why this TV suits the query."
    }
  ]
}"#;

fn price_tier_lines() -> String {
  PRICE_TIERS
    .iter()
    .map(|tier| {
      format!(
        "   - {} ({}): model names containing {}",
        tier.name,
        tier.range,
        tier
          .keywords
          .iter()
          .map(|k| format!("\"{k}\""))
          .collect::<Vec<_>>()
          .join(", ")
      )
    })
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn build_recommendation_prompt(query: &str, catalog_excerpt: &str) -> String {
  format!(
    r#"You are a Samsung TV recommendation assistant. Based on the user query, recommend the most suitable TVs from the actual Samsung TV catalog below.

User Query: "{query}"

REAL SAMSUNG TV CATALOG:
{catalog_excerpt}

EXTRACTION RULES:
1. Use REAL image URLs from the "images" arrays. Put the first one in "frontImage" and up to three in "images".
2. Use REAL model names from "modelCode" or "shortDescription" for "tvType".
3. Take features from "gamingFeatures", "display", "audio" and "connectivity". At most 5 per TV in "topFeatures".
4. Take sizes from the "variants" array. Use the most popular size as "size" and list all of them in "availableSizes".
5. Price each TV by its tier. Use the first tier whose keywords appear in the model name:
{tiers}
6. Write descriptions that explain specifically why each TV matches the user's query.

OUTPUT RULES:
- "title": at most {max_title_words} words.
- "description": at most 2 sentences.
- "productCards": between 3 and 6 TVs.
- If no real image is available use "{default_image}".

Respond with ONLY a JSON object in exactly this shape:
{schema}"#,
    tiers = price_tier_lines(),
    max_title_words = MAX_TITLE_WORDS,
    default_image = DEFAULT_TV_IMAGE,
    schema = RESPONSE_SCHEMA,
  )
}

pub fn build_feature_prompt(feature: &str) -> String {
  format!(
    r#"You are a Samsung TV technology expert. Explain the feature "{feature}" in a compelling way for TV shoppers.

Write 2-3 paragraphs (150-250 words) that:
1. Explain what the feature is in simple terms
2. Focus on benefits and why customers should care
3. Use engaging, sales-focused language
4. Be specific to Samsung when relevant

Feature: "{feature}""#
  )
}
