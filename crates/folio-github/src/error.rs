use std::io;

use thiserror::Error;

/// Error type for repository data sources.
#[derive(Debug, Error)]
pub enum SourceError {
  #[error("Invalid GitHub URL: {0}")]
  InvalidUrl(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Rate limited by the GitHub API: {0}")]
  RateLimited(String),

  #[error("Network error: {0}")]
  Network(String),

  #[error("Failed to decode response: {0}")]
  Decode(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

impl SourceError {
  /// Map a non-success HTTP status from the GitHub API to an error.
  ///
  /// The API answers both permission problems and exhausted rate limits with
  /// `403`, so both are reported as [`SourceError::RateLimited`].
  #[must_use]
  pub fn from_status(status: u16, resource: &str) -> Self {
    match status {
      404 => Self::NotFound(resource.to_string()),
      403 | 429 => Self::RateLimited(format!("{resource} (HTTP {status})")),
      _ => Self::Network(format!("{resource}: HTTP {status}")),
    }
  }

  /// Whether retrying later could succeed.
  #[must_use]
  pub const fn is_transient(&self) -> bool {
    matches!(self, Self::RateLimited(_) | Self::Network(_))
  }
}
