use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Console output always; with a path, the
/// same events are also appended to that file without colour codes.
pub fn init(log_path: Option<&Path>) -> anyhow::Result<()> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let console = fmt::layer().with_timer(ChronoUtc::rfc_3339());

  let file = match log_path {
    Some(path) => {
      let file = OpenOptions::new().create(true).append(true).open(path)?;
      Some(
        fmt::layer()
          .with_ansi(false)
          .with_timer(ChronoUtc::rfc_3339())
          .with_writer(Mutex::new(file)),
      )
    }
    None => None,
  };

  tracing_subscriber::registry()
    .with(filter)
    .with(console)
    .with(file)
    .try_init()?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn writes_timestamped_lines_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.log");
    init(Some(&path)).unwrap();

    tracing::info!("storefront log line");

    let contents = std::fs::read_to_string(&path).unwrap();
    let line = contents
      .lines()
      .find(|l| l.contains("storefront log line"))
      .expect("event should reach the log file");
    assert!(line.contains("INFO"));
    assert!(!line.contains('\u{1b}'), "file output should carry no colour codes");

    let stamp = line.split_whitespace().next().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok(), "bad timestamp {stamp}");
  }
}
