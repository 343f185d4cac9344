use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
  cache::ResponseCache,
  error::SourceError,
  repo::{CacheKey, RepoRef, ResourceKind},
};

/// License block of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
  pub name:    String,
  pub spdx_id: Option<String>,
}

/// Repository metadata, shaped like the GitHub repository API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoMetadata {
  pub name:           String,
  pub full_name:      String,
  pub description:    Option<String>,
  #[serde(rename = "stargazers_count")]
  pub stars:          u64,
  #[serde(rename = "forks_count")]
  pub forks:          u64,
  pub language:       Option<String>,
  pub topics:         Vec<String>,
  pub license:        Option<License>,
  pub homepage:       Option<String>,
  pub default_branch: Option<String>,
  pub created_at:     Option<String>,
  pub updated_at:     Option<String>,
}

impl RepoMetadata {
  /// Root URL of raw files on the default branch, for resolving relative
  /// README image paths.
  #[must_use]
  pub fn raw_content_base(&self) -> Option<String> {
    let branch = self.default_branch.as_deref()?;
    if self.full_name.is_empty() {
      return None;
    }
    Some(format!(
      "https://raw.githubusercontent.com/{}/{branch}",
      self.full_name
    ))
  }
}

/// Something that can provide a repository's README and metadata.
pub trait RepositorySource {
  /// Raw Markdown of the repository README.
  ///
  /// # Errors
  ///
  /// Returns an error if the README cannot be found or read.
  fn readme(&self, repo: &RepoRef) -> Result<String, SourceError>;

  /// Repository metadata.
  ///
  /// # Errors
  ///
  /// Returns an error if the metadata cannot be found or parsed.
  fn metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, SourceError>;
}

/// A [`RepositorySource`] that answers from `cache` when it can.
///
/// Only successful responses are cached.
#[derive(Debug)]
pub struct CachedSource<S, C> {
  source: S,
  cache:  C,
}

impl<S: RepositorySource, C: ResponseCache> CachedSource<S, C> {
  pub const fn new(source: S, cache: C) -> Self {
    Self { source, cache }
  }

  pub const fn cache(&self) -> &C {
    &self.cache
  }

  pub const fn inner(&self) -> &S {
    &self.source
  }
}

impl<S: RepositorySource, C: ResponseCache> RepositorySource
  for CachedSource<S, C>
{
  fn readme(&self, repo: &RepoRef) -> Result<String, SourceError> {
    let key = CacheKey::new(ResourceKind::Readme, repo);
    if let Some(cached) = self.cache.get(&key) {
      return Ok(cached);
    }

    debug!("Fetching README for {repo}");
    let readme = self.source.readme(repo)?;
    self.cache.set(key, readme.clone());
    Ok(readme)
  }

  fn metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, SourceError> {
    let key = CacheKey::new(ResourceKind::Metadata, repo);
    if let Some(cached) = self.cache.get(&key) {
      match serde_json::from_str(&cached) {
        Ok(metadata) => return Ok(metadata),
        Err(e) => warn!("Discarding unreadable cache entry {key}: {e}"),
      }
    }

    debug!("Fetching metadata for {repo}");
    let metadata = self.source.metadata(repo)?;
    self.cache.set(key, serde_json::to_string(&metadata)?);
    Ok(metadata)
  }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Fine in tests")]
mod tests {
  use std::cell::Cell;

  use super::*;
  use crate::cache::{MemoryCache, NoCache};

  /// Counts how often the wrapped source is actually asked.
  #[derive(Default)]
  struct Counting {
    calls: Cell<usize>,
  }

  impl RepositorySource for Counting {
    fn readme(&self, repo: &RepoRef) -> Result<String, SourceError> {
      self.calls.set(self.calls.get() + 1);
      if repo.repo == "missing" {
        return Err(SourceError::NotFound(repo.to_string()));
      }
      Ok(format!("# {}", repo.repo))
    }

    fn metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, SourceError> {
      self.calls.set(self.calls.get() + 1);
      Ok(RepoMetadata {
        name: repo.repo.clone(),
        full_name: repo.to_string(),
        stars: 7,
        ..RepoMetadata::default()
      })
    }
  }

  #[test]
  fn test_cached_source_hits_cache() {
    let source = CachedSource::new(Counting::default(), MemoryCache::default());
    let repo = RepoRef::new("o", "r");

    assert_eq!(source.readme(&repo).unwrap(), "# r");
    assert_eq!(source.readme(&repo).unwrap(), "# r");
    assert_eq!(source.metadata(&repo).unwrap().stars, 7);
    assert_eq!(source.metadata(&repo).unwrap().stars, 7);
    assert_eq!(source.inner().calls.get(), 2);
    assert_eq!(source.cache().len(), 2);
  }

  #[test]
  fn test_errors_are_not_cached() {
    let source = CachedSource::new(Counting::default(), MemoryCache::default());
    let repo = RepoRef::new("o", "missing");
    assert!(source.readme(&repo).is_err());
    assert!(source.readme(&repo).is_err());
    assert_eq!(source.inner().calls.get(), 2);
    assert!(source.cache().is_empty());
  }

  #[test]
  fn test_no_cache_always_fetches() {
    let source = CachedSource::new(Counting::default(), NoCache);
    let repo = RepoRef::new("o", "r");
    source.readme(&repo).unwrap();
    source.readme(&repo).unwrap();
    assert_eq!(source.inner().calls.get(), 2);
  }

  #[test]
  fn test_metadata_from_api_shape() {
    let json = r#"{
      "name": "regex",
      "full_name": "rust-lang/regex",
      "description": "An implementation of regular expressions for Rust.",
      "stargazers_count": 3500,
      "forks_count": 460,
      "language": "Rust",
      "topics": ["regex", "rust"],
      "license": {"key": "mit", "name": "MIT License", "spdx_id": "MIT"},
      "default_branch": "master",
      "private": false
    }"#;
    let metadata: RepoMetadata = serde_json::from_str(json).unwrap();
    assert_eq!(metadata.stars, 3500);
    assert_eq!(
      metadata.raw_content_base().as_deref(),
      Some("https://raw.githubusercontent.com/rust-lang/regex/master")
    );
    assert_eq!(metadata.license.unwrap().spdx_id.as_deref(), Some("MIT"));
  }
}
