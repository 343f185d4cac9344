//! Types for the folio-markdown public API.
use serde::{Deserialize, Serialize};

/// A heading encountered while converting a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Heading text with emoji removed, before inline formatting.
  pub text:  String,
  /// Heading level (1-6).
  pub level: u8,
  /// Anchor ID emitted on the heading element, unique within the document.
  pub id:    String,
}

/// Result of converting a Markdown document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered HTML fragment.
  pub html: String,

  /// Headings in document order (for a table of contents).
  pub headers: Vec<Header>,

  /// Text of the first level-1 heading, if any.
  pub title: Option<String>,
}
