use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::comparison::MAX_COMPARED;
use crate::normalize::{normalize_card, Card};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MockSpecs {
  pub size: String,
  pub refresh_rate: String,
  pub price: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MockCard {
  pub id: String,
  pub name: String,
  pub image: String,
  pub specs: MockSpecs,
  pub learn_more: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MockReply {
  pub response_text: String,
  pub cards: Vec<MockCard>,
  pub proactive_tip: Option<String>,
  pub comparison: Option<Vec<MockCard>>,
}

lazy_static! {
  static ref TV_NAME: Regex = Regex::new(
    r"(?i)Neo OLED 4K|Samsung QLED TV|Neo QLED 4K|Vision AI Smart TV|QLED 4K QE1D|Crystal UHD U7900F"
  )
  .unwrap();
  static ref BASE_CARDS: Vec<MockCard> = vec![
    mock_card(
      "tv1",
      "Neo OLED 4K",
      "https://images.samsung.com/is/image/samsung/p6pim/us/qn75qn1efafxza/gallery/us-neo-qled-qn75qn1efafxza-front-black-546228291?$product-details-jpg$",
      ("65in", "120Hz", "$999"),
      "QLED offers vibrant colors...",
    ),
    mock_card(
      "tv2",
      "Samsung QLED TV",
      "https://image-us.samsung.com/SamsungUS/home/television-home-theater/tvs/the-terrace/08272024/QN55LST7DAFXZA_007_Front3_Titan_Black_Scom_1600x1200.jpg?$product-details-jpg$",
      ("75in", "120Hz", "$1499"),
      "OLED delivers deep blacks...",
    ),
    mock_card(
      "tv3",
      "Neo QLED 4K",
      "https://image-us.samsung.com/SamsungUS/home/television-home-theater/tvs/the-terrace/08262024/QN55LST7DAFXZA_007_Front3_Titan_Black_Scom_1600x1200.jpg?$product-details-jpg$",
      ("55in", "60Hz", "$799"),
      "4K for sharp visuals...",
    ),
    mock_card(
      "tv4",
      "Vision AI Smart TV",
      "https://images.samsung.com/is/image/samsung/p6pim/us/qn75qef1afxza/gallery/us-qled-qef1-548500-qn75qef1afxza-547033885?$product-details-jpg$",
      ("65in", "120Hz", "$999"),
      "QLED offers vibrant colors...",
    ),
    mock_card(
      "tv5",
      "QLED 4K QE1D",
      "https://image-us.samsung.com/SamsungUS/home/television-home-theater/tvs/qled-4k-tvs/0715202439102/70_65-S.COM_Version_1_V01.jpg?$product-details-jpg$",
      ("75in", "120Hz", "$1499"),
      "OLED delivers deep blacks...",
    ),
    mock_card(
      "tv6",
      "Crystal UHD U7900F",
      "https://images.samsung.com/is/image/samsung/p6pim/us/un58u7900ffxza/gallery/us-uhd-4k-tv-un58u7900ffxza-front-black-548283704?$product-details-jpg$",
      ("55in", "60Hz", "$799"),
      "4K for sharp visuals...",
    ),
  ];
}

fn mock_card(
  id: &str,
  name: &str,
  image: &str,
  specs: (&str, &str, &str),
  learn_more: &str,
) -> MockCard {
  MockCard {
    id: id.to_string(),
    name: name.to_string(),
    image: image.to_string(),
    specs: MockSpecs {
      size: specs.0.to_string(),
      refresh_rate: specs.1.to_string(),
      price: specs.2.to_string(),
    },
    learn_more: learn_more.to_string(),
  }
}

impl MockCard {
  pub fn to_card(&self) -> Card {
    normalize_card(&serde_json::json!({
      "id": self.id,
      "name": self.name,
      "image": self.image,
      "specs": {
        "size": self.specs.size,
        "refresh_rate": self.specs.refresh_rate,
        "price": self.specs.price
      },
      "learn_more": self.learn_more
    }))
  }
}

pub fn base_cards() -> &'static [MockCard] {
  &BASE_CARDS
}

pub fn find_card(name: &str) -> Option<&'static MockCard> {
  BASE_CARDS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// The first demo TV named anywhere in the text.
pub fn named_card(text: &str) -> Option<&'static MockCard> {
  TV_NAME.find(text).and_then(|m| find_card(m.as_str()))
}

fn dollars(price: &str) -> Option<f64> {
  price.trim_start_matches('$').replace(',', "").parse().ok()
}

fn named_cards(query: &str) -> Vec<&'static MockCard> {
  let names: Vec<&str> = TV_NAME.find_iter(query).map(|m| m.as_str()).collect();
  BASE_CARDS
    .iter()
    .filter(|c| names.iter().any(|n| c.name.eq_ignore_ascii_case(n)))
    .collect()
}

pub fn respond(query: &str) -> MockReply {
  let lower = query.to_lowercase();

  let mut cards: Vec<MockCard> = base_cards().to_vec();
  let mut comparison = None;
  let mut response_text = format!("Found {} TVs matching \"{}\":", cards.len(), query);
  // Case-sensitive: "Gaming" still gets the tip.
  let mut proactive_tip = if query.contains("gaming") {
    None
  } else {
    Some("Would you like to learn about OLED technology or gaming TVs?".to_string())
  };

  if lower.contains("under $1000") {
    cards.retain(|tv| dollars(&tv.specs.price).is_some_and(|p| p < 1000.0));
    response_text = format!("Found {} TVs under $1000:", cards.len());
  } else if lower.contains("75 inches") {
    cards.retain(|tv| tv.specs.size.contains("75in"));
    response_text = format!("Found {} TVs over 75 inches:", cards.len());
  } else if lower.contains("120hz") {
    cards.retain(|tv| tv.specs.refresh_rate.contains("120Hz"));
    response_text = format!("Found {} TVs with 120Hz refresh rate:", cards.len());
  }

  if lower.contains("compare") || lower.contains("selected tvs") {
    let selected: Vec<MockCard> =
      named_cards(query).into_iter().take(MAX_COMPARED).cloned().collect();
    if selected.len() >= 2 {
      response_text = format!("Comparing {} TVs:", selected.len());
      proactive_tip = None;
      comparison = Some(selected);
    } else {
      response_text = "Please select at least 2 TVs to compare.".to_string();
      proactive_tip =
        Some("Add more TVs to compare (e.g., \"add Neo OLED 4K to comparison\").".to_string());
    }
    cards.clear();
  } else if lower.contains("add") && lower.contains("comparison") {
    response_text = match named_card(query) {
      Some(tv) => format!("Added {} to comparison.", tv.name),
      None => "TV not found. Try again (e.g., \"add Samsung QLED TV\").".to_string(),
    };
    proactive_tip =
      Some("Add up to 3 TVs and say \"compare selected TVs\" to view comparison.".to_string());
    cards.clear();
  } else if lower.contains("remove") && lower.contains("comparison") {
    response_text = match named_card(query) {
      Some(tv) => format!("Removed {} from comparison.", tv.name),
      None => "TV not found.".to_string(),
    };
    proactive_tip = Some("Add or compare TVs to continue.".to_string());
    cards.clear();
  }

  MockReply {
    response_text,
    cards,
    proactive_tip,
    comparison,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn names(cards: &[MockCard]) -> Vec<&str> {
    cards.iter().map(|c| c.name.as_str()).collect()
  }

  #[test]
  fn plain_query_lists_everything_with_tip() {
    let reply = respond("show me TVs");
    assert_eq!(reply.cards.len(), 6);
    assert_eq!(reply.response_text, "Found 6 TVs matching \"show me TVs\":");
    assert!(reply.proactive_tip.unwrap().contains("OLED technology"));
    assert!(reply.comparison.is_none());
  }

  #[test]
  fn gaming_query_has_no_tip() {
    assert!(respond("a gaming tv").proactive_tip.is_none());
    assert!(respond("Gaming TV").proactive_tip.is_some());
  }

  #[test]
  fn named_card_ignores_case() {
    assert_eq!(named_card("add samsung qled tv please").map(|c| c.id.as_str()), Some("tv2"));
    assert!(named_card("add the fancy one").is_none());
  }

  #[test]
  fn demo_card_converts_to_tray_card() {
    let card = find_card("Neo QLED 4K").unwrap().to_card();
    assert_eq!(card.id, "tv3");
    assert_eq!(card.product.tv_type, "Neo QLED 4K");
    assert_eq!(card.product.size, "55in");
    assert_eq!(card.product.price.current, "$799");
  }

  #[test]
  fn price_filter() {
    let reply = respond("TVs under $1000 please");
    assert_eq!(
      names(&reply.cards),
      vec!["Neo OLED 4K", "Neo QLED 4K", "Vision AI Smart TV", "Crystal UHD U7900F"]
    );
    assert_eq!(reply.response_text, "Found 4 TVs under $1000:");
  }

  #[test]
  fn size_and_refresh_filters() {
    let reply = respond("anything 75 inches?");
    assert_eq!(names(&reply.cards), vec!["Samsung QLED TV", "QLED 4K QE1D"]);

    let reply = respond("I want 120Hz");
    assert_eq!(reply.cards.len(), 4);
    assert_eq!(reply.response_text, "Found 4 TVs with 120Hz refresh rate:");
  }

  #[test]
  fn compare_two_named_tvs() {
    let reply = respond("compare neo oled 4k and Crystal UHD U7900F");
    let comparison = reply.comparison.expect("two TVs should compare");
    assert_eq!(names(&comparison), vec!["Neo OLED 4K", "Crystal UHD U7900F"]);
    assert_eq!(reply.response_text, "Comparing 2 TVs:");
    assert!(reply.cards.is_empty());
    assert!(reply.proactive_tip.is_none());
  }

  #[test]
  fn compare_caps_at_three() {
    let reply = respond("compare Neo OLED 4K, Samsung QLED TV, Neo QLED 4K and QLED 4K QE1D");
    assert_eq!(reply.comparison.unwrap().len(), MAX_COMPARED);
  }

  #[test]
  fn compare_needs_two() {
    let reply = respond("compare selected TVs");
    assert!(reply.comparison.is_none());
    assert_eq!(reply.response_text, "Please select at least 2 TVs to compare.");
    assert!(reply.proactive_tip.unwrap().starts_with("Add more TVs"));
  }

  #[test]
  fn add_and_remove_commands() {
    let reply = respond("add samsung qled tv to comparison");
    assert_eq!(reply.response_text, "Added Samsung QLED TV to comparison.");
    assert!(reply.cards.is_empty());

    let reply = respond("add the fancy one to comparison");
    assert!(reply.response_text.starts_with("TV not found. Try again"));

    let reply = respond("remove Neo QLED 4K from comparison");
    assert_eq!(reply.response_text, "Removed Neo QLED 4K from comparison.");
    assert_eq!(reply.proactive_tip.as_deref(), Some("Add or compare TVs to continue."));
  }
}
