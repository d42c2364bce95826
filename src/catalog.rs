use std::io::ErrorKind;
use std::path::Path;

use crate::error::ApiError;

/// The TV feed, kept as loosely typed JSON. Its shape is the feed owner's
/// business; the prompt only needs a serialized slice of it.
#[derive(Debug, Clone)]
pub struct Catalog {
  entries: serde_json::Value,
}

impl Catalog {
  pub fn from_value(entries: serde_json::Value) -> Self {
    Self { entries }
  }

  /// Number of entries when the feed is a top-level array.
  pub fn entry_count(&self) -> Option<usize> {
    self.entries.as_array().map(|a| a.len())
  }

  /// Compact serialization cut to at most `budget` characters.
  pub fn prompt_excerpt(&self, budget: usize) -> String {
    let mut text = self.entries.to_string();
    if let Some((idx, _)) = text.char_indices().nth(budget) {
      text.truncate(idx);
    }
    text
  }
}

pub async fn load(path: &Path) -> Result<Catalog, ApiError> {
  let data = match tokio::fs::read_to_string(path).await {
    Ok(data) => data,
    Err(err) if err.kind() == ErrorKind::NotFound => {
      tracing::error!(path = %path.display(), "catalog file missing");
      return Err(ApiError::DataUnavailable("TV data not found".to_string()));
    }
    Err(err) => {
      tracing::error!(path = %path.display(), error = %err, "catalog file unreadable");
      return Err(ApiError::DataUnavailable("Error reading TV data".to_string()));
    }
  };

  let entries: serde_json::Value = serde_json::from_str(&data).map_err(|err| {
    tracing::error!(path = %path.display(), error = %err, "catalog file is not valid JSON");
    ApiError::DataUnavailable("Error reading TV data".to_string())
  })?;

  let catalog = Catalog::from_value(entries);
  tracing::debug!(entries = ?catalog.entry_count(), "catalog loaded");
  Ok(catalog)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[tokio::test]
  async fn load_reads_json_feed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tv_feed.json");
    std::fs::write(&path, r#"[{"modelCode":"QN65QN90C"},{"modelCode":"UN55CU7000"}]"#).unwrap();

    let catalog = load(&path).await.expect("feed should load");
    assert_eq!(catalog.entry_count(), Some(2));
  }

  #[tokio::test]
  async fn missing_file_is_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(&dir.path().join("nope.json")).await.unwrap_err();
    assert_eq!(err, ApiError::DataUnavailable("TV data not found".to_string()));
  }

  #[tokio::test]
  async fn invalid_json_is_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tv_feed.json");
    std::fs::write(&path, "[{ not json").unwrap();

    let err = load(&path).await.unwrap_err();
    assert_eq!(err, ApiError::DataUnavailable("Error reading TV data".to_string()));
  }

  #[test]
  fn excerpt_respects_budget() {
    let catalog =
      Catalog::from_value(json!([{ "modelCode": "QN65QN90C", "shortDescription": "Neo QLED" }]));
    let full = catalog.prompt_excerpt(usize::MAX);
    assert_eq!(full, r#"[{"modelCode":"QN65QN90C","shortDescription":"Neo QLED"}]"#);

    let cut = catalog.prompt_excerpt(10);
    assert_eq!(cut.chars().count(), 10);
    assert!(full.starts_with(&cut));
  }

  #[test]
  fn excerpt_cuts_on_char_boundary() {
    let catalog = Catalog::from_value(json!(["ééééé"]));
    let cut = catalog.prompt_excerpt(4);
    assert_eq!(cut, "[\"éé");
  }
}
