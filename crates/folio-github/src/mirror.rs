use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use log::debug;

use crate::{
  contents::{api_error, decode_contents_response},
  error::SourceError,
  repo::RepoRef,
  source::{RepoMetadata, RepositorySource},
};

/// README file names tried in order.
const README_NAMES: &[&str] = &["README.md", "readme.md", "Readme.md", "README"];

/// File holding repository metadata in the GitHub API shape.
const METADATA_FILE: &str = "repo.json";

/// Offline source reading from a mirror directory.
///
/// Two layouts are understood, checked in this order:
///
/// - checked-out files: `<root>/<owner>/<repo>/{README.md,repo.json}`
/// - saved API responses, stored under their endpoint path:
///   `<root>/repos/<owner>/<repo>.json` for metadata and
///   `<root>/repos/<owner>/<repo>/contents/README.md.json` for the README
///
/// Saved API error bodies are reported as the error the status maps to.
#[derive(Debug, Clone)]
pub struct MirrorSource {
  root: PathBuf,
}

impl MirrorSource {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  #[must_use]
  pub fn root(&self) -> &Path {
    &self.root
  }

  fn repo_dir(&self, repo: &RepoRef) -> Result<PathBuf, SourceError> {
    repo.validate()?;
    Ok(self.root.join(&repo.owner).join(&repo.repo))
  }

  /// Path of a saved response for an API endpoint.
  fn snapshot(&self, endpoint: &str) -> PathBuf {
    self
      .root
      .join(format!("{}.json", endpoint.trim_start_matches('/')))
  }
}

fn read(path: &Path) -> Result<String, SourceError> {
  fs::read_to_string(path).map_err(|e| {
    if e.kind() == io::ErrorKind::NotFound {
      SourceError::NotFound(path.display().to_string())
    } else {
      SourceError::Io(e)
    }
  })
}

impl RepositorySource for MirrorSource {
  fn readme(&self, repo: &RepoRef) -> Result<String, SourceError> {
    let dir = self.repo_dir(repo)?;
    if let Some(path) = README_NAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|p| p.is_file())
    {
      debug!("Reading README from {}", path.display());
      return read(&path);
    }

    let snapshot = self.snapshot(&repo.contents_endpoint(None));
    if snapshot.is_file() {
      debug!("Decoding saved contents response {}", snapshot.display());
      return decode_contents_response(&read(&snapshot)?);
    }

    Err(SourceError::NotFound(format!(
      "README of {repo} under {}",
      self.root.display()
    )))
  }

  fn metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, SourceError> {
    let path = self.repo_dir(repo)?.join(METADATA_FILE);
    let path = if path.is_file() {
      path
    } else {
      self.snapshot(&repo.metadata_endpoint())
    };

    let content = read(&path)?;
    if let Some(err) = api_error(&content) {
      return Err(err);
    }
    Ok(serde_json::from_str(&content)?)
  }
}
