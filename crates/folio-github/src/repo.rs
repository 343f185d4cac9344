//! Repository references and the cache keys derived from them.
use std::{fmt, sync::LazyLock};

use log::error;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

static GITHUB_URL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"github\.com/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)")
    .unwrap_or_else(|e| {
      error!("Failed to compile GITHUB_URL regex: {e}");
      never_matching_regex()
    })
});

#[allow(
  clippy::expect_used,
  reason = "This pattern is a constant and always compiles"
)]
fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").expect("never-matching regex should compile")
}

/// Whether `part` can be a GitHub owner or repository name.
///
/// Only ASCII letters, digits, `_`, `.` and `-` are allowed, and the
/// relative path names `.` and `..` are not names.
fn is_valid_part(part: &str) -> bool {
  !part.is_empty()
    && part != "."
    && part != ".."
    && part
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// An `owner/repo` pair on GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
  pub owner: String,
  pub repo:  String,
}

impl RepoRef {
  #[must_use]
  pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
    Self {
      owner: owner.into(),
      repo:  repo.into(),
    }
  }

  /// Extract the repository from a GitHub URL.
  ///
  /// Anything containing `github.com/<owner>/<repo>` is accepted, a trailing
  /// `.git` is dropped.
  ///
  /// # Errors
  ///
  /// Returns [`SourceError::InvalidUrl`] if the URL names no repository or
  /// either name is not a valid GitHub name.
  pub fn parse(url: &str) -> Result<Self, SourceError> {
    let caps = GITHUB_URL
      .captures(url)
      .ok_or_else(|| SourceError::InvalidUrl(url.to_string()))?;

    let owner = caps.get(1).map_or("", |m| m.as_str());
    let repo = caps.get(2).map_or("", |m| m.as_str());
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    if !is_valid_part(owner) || !is_valid_part(repo) {
      return Err(SourceError::InvalidUrl(url.to_string()));
    }
    Ok(Self::new(owner, repo))
  }

  /// Check that both names are plain GitHub names, safe to use as path
  /// components.
  ///
  /// # Errors
  ///
  /// Returns [`SourceError::InvalidUrl`] naming the pair otherwise.
  pub fn validate(&self) -> Result<(), SourceError> {
    if is_valid_part(&self.owner) && is_valid_part(&self.repo) {
      Ok(())
    } else {
      Err(SourceError::InvalidUrl(format!("{}/{}", self.owner, self.repo)))
    }
  }

  /// API path of the repository metadata.
  #[must_use]
  pub fn metadata_endpoint(&self) -> String {
    format!("/repos/{}/{}", self.owner, self.repo)
  }

  /// API path of a file in the repository, `README.md` by default.
  #[must_use]
  pub fn contents_endpoint(&self, path: Option<&str>) -> String {
    format!(
      "/repos/{}/{}/contents/{}",
      self.owner,
      self.repo,
      path.unwrap_or("README.md")
    )
  }
}

impl fmt::Display for RepoRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.repo)
  }
}

/// The kind of response stored in a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
  Readme,
  Metadata,
}

impl ResourceKind {
  const fn prefix(self) -> &'static str {
    match self {
      Self::Readme => "readme",
      Self::Metadata => "repo",
    }
  }
}

/// Cache key of one resource of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
  pub kind:  ResourceKind,
  pub owner: String,
  pub repo:  String,
}

impl CacheKey {
  #[must_use]
  pub fn new(kind: ResourceKind, repo: &RepoRef) -> Self {
    Self {
      kind,
      owner: repo.owner.clone(),
      repo: repo.repo.clone(),
    }
  }
}

impl fmt::Display for CacheKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}/{}", self.kind.prefix(), self.owner, self.repo)
  }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Fine in tests")]
mod tests {
  use super::*;

  #[test]
  fn test_parse_variants() {
    let expected = RepoRef::new("rust-lang", "regex");
    for url in [
      "https://github.com/rust-lang/regex",
      "https://github.com/rust-lang/regex.git",
      "git@github.com/rust-lang/regex.git",
      "https://github.com/rust-lang/regex/tree/master/src",
      "github.com/rust-lang/regex?tab=readme",
    ] {
      assert_eq!(RepoRef::parse(url).unwrap(), expected, "{url}");
    }
  }

  #[test]
  fn test_parse_rejects() {
    for url in [
      "",
      "https://gitlab.com/a/b",
      "https://github.com/only-owner",
      "https://github.com/../secret",
      "https://github.com/octo/..",
      "https://github.com/./demo",
      "https://github.com/octo/..git",
    ] {
      assert!(
        matches!(RepoRef::parse(url), Err(SourceError::InvalidUrl(_))),
        "{url}"
      );
    }
  }

  #[test]
  fn test_parse_stops_at_disallowed_characters() {
    assert_eq!(
      RepoRef::parse("https://github.com/octo/demo#readme").unwrap(),
      RepoRef::new("octo", "demo")
    );
    assert_eq!(
      RepoRef::parse("https://github.com/octo/demo%2F..").unwrap(),
      RepoRef::new("octo", "demo")
    );
  }

  #[test]
  fn test_validate() {
    assert!(RepoRef::new("octo", "demo.rs").validate().is_ok());
    for (owner, repo) in [("..", "secret"), ("octo", "."), ("a/b", "c"), ("", "r")] {
      assert!(
        matches!(
          RepoRef::new(owner, repo).validate(),
          Err(SourceError::InvalidUrl(_))
        ),
        "{owner}/{repo}"
      );
    }
  }

  #[test]
  fn test_endpoints() {
    let repo = RepoRef::new("o", "r");
    assert_eq!(repo.metadata_endpoint(), "/repos/o/r");
    assert_eq!(repo.contents_endpoint(None), "/repos/o/r/contents/README.md");
    assert_eq!(
      repo.contents_endpoint(Some("docs/README.md")),
      "/repos/o/r/contents/docs/README.md"
    );
  }

  #[test]
  fn test_cache_key_display() {
    let repo = RepoRef::new("o", "r");
    assert_eq!(
      CacheKey::new(ResourceKind::Readme, &repo).to_string(),
      "readme-o/r"
    );
    assert_eq!(
      CacheKey::new(ResourceKind::Metadata, &repo).to_string(),
      "repo-o/r"
    );
  }
}
