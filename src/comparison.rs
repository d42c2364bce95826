use thiserror::Error;

use crate::normalize::Card;

pub const MAX_COMPARED: usize = 3;

#[derive(Debug, Error, PartialEq)]
pub enum ComparisonError {
  #[error("Max 3 TVs can be selected for comparison")]
  Full,

  #[error("TV {0} is already in the comparison")]
  Duplicate(String),
}

/// The compare tray. Holds at most three cards, never the same id twice.
#[derive(Debug, Default, Clone)]
pub struct ComparisonSet {
  cards: Vec<Card>,
}

impl ComparisonSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, card: Card) -> Result<(), ComparisonError> {
    if self.contains(&card.id) {
      return Err(ComparisonError::Duplicate(card.id));
    }
    if self.cards.len() >= MAX_COMPARED {
      return Err(ComparisonError::Full);
    }
    self.cards.push(card);
    Ok(())
  }

  pub fn remove(&mut self, id: &str) -> Option<Card> {
    let idx = self.cards.iter().position(|c| c.id == id)?;
    Some(self.cards.remove(idx))
  }

  /// Adds the card if absent, removes it if present. Returns whether the
  /// card is selected afterwards.
  pub fn toggle(&mut self, card: Card) -> Result<bool, ComparisonError> {
    if self.remove(&card.id).is_some() {
      return Ok(false);
    }
    self.add(card)?;
    Ok(true)
  }

  pub fn clear(&mut self) {
    self.cards.clear();
  }

  pub fn contains(&self, id: &str) -> bool {
    self.cards.iter().any(|c| c.id == id)
  }

  pub fn is_full(&self) -> bool {
    self.cards.len() >= MAX_COMPARED
  }

  pub fn can_compare(&self) -> bool {
    self.cards.len() >= 2
  }

  pub fn len(&self) -> usize {
    self.cards.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  pub fn cards(&self) -> &[Card] {
    &self.cards
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::normalize::normalize_card;
  use serde_json::json;

  fn card(id: &str) -> Card {
    normalize_card(&json!({ "id": id, "tvType": format!("TV {id}"), "price": "$999" }))
  }

  #[test]
  fn holds_at_most_three() {
    let mut set = ComparisonSet::new();
    for id in ["a", "b", "c"] {
      set.add(card(id)).unwrap();
    }
    assert!(set.is_full());
    assert_eq!(set.add(card("d")), Err(ComparisonError::Full));
    assert_eq!(set.len(), MAX_COMPARED);
  }

  #[test]
  fn rejects_duplicates() {
    let mut set = ComparisonSet::new();
    set.add(card("a")).unwrap();
    assert_eq!(set.add(card("a")), Err(ComparisonError::Duplicate("a".to_string())));
    assert_eq!(set.len(), 1);
  }

  #[test]
  fn toggle_adds_then_removes() {
    let mut set = ComparisonSet::new();
    assert_eq!(set.toggle(card("a")), Ok(true));
    assert!(set.contains("a"));
    assert_eq!(set.toggle(card("a")), Ok(false));
    assert!(set.is_empty());
  }

  #[test]
  fn toggle_on_full_set_removes_selected_card() {
    let mut set = ComparisonSet::new();
    for id in ["a", "b", "c"] {
      set.add(card(id)).unwrap();
    }
    assert_eq!(set.toggle(card("b")), Ok(false));
    assert_eq!(set.toggle(card("d")), Ok(true));
    let ids: Vec<&str> = set.cards().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "d"]);
  }

  #[test]
  fn compare_needs_two_cards() {
    let mut set = ComparisonSet::new();
    set.add(card("a")).unwrap();
    assert!(!set.can_compare());
    set.add(card("b")).unwrap();
    assert!(set.can_compare());
    assert!(set.remove("a").is_some());
    assert!(set.remove("a").is_none());
    set.clear();
    assert!(set.is_empty());
  }
}
