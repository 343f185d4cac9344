//! Repository data sources for folio.
//!
//! The portfolio shows each project's README and a short metadata summary.
//! This crate models where that data comes from without doing any network
//! I/O itself:
//!
//! - [`RepoRef`] parses GitHub URLs into `owner/repo` pairs
//! - [`RepositorySource`] is implemented by anything that can produce a
//!   README and [`RepoMetadata`], such as the offline [`MirrorSource`]
//! - [`CachedSource`] wraps a source with an injected [`ResponseCache`]
//! - [`decode_contents_response`] unpacks the contents API payload and
//!   [`api_error`] maps API error bodies onto [`SourceError`]
//!
//! ```
//! use folio_github::{CacheKey, RepoRef, ResourceKind};
//!
//! let repo = RepoRef::parse("https://github.com/rust-lang/regex.git").unwrap();
//! assert_eq!(repo.to_string(), "rust-lang/regex");
//! assert_eq!(
//!   CacheKey::new(ResourceKind::Readme, &repo).to_string(),
//!   "readme-rust-lang/regex"
//! );
//! ```
pub mod cache;
pub mod contents;
pub mod error;
pub mod mirror;
pub mod repo;
pub mod source;

pub use cache::{DEFAULT_TTL, MemoryCache, NoCache, ResponseCache};
pub use contents::{api_error, decode_contents_response};
pub use error::SourceError;
pub use mirror::MirrorSource;
pub use repo::{CacheKey, RepoRef, ResourceKind};
pub use source::{CachedSource, License, RepoMetadata, RepositorySource};
