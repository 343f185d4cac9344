//! Configuration types for the Markdown converter.
//!
//! # Examples
//!
//! ```
//! use folio_markdown::{FencePolicy, MarkdownConverter, MarkdownOptionsBuilder};
//!
//! let options = MarkdownOptionsBuilder::new()
//!   .strip_emoji(false)
//!   .unterminated_fence(FencePolicy::Drop)
//!   .build();
//!
//! let converter = MarkdownConverter::new(options);
//! assert_eq!(converter.convert("```\nnever closed"), "");
//! ```
use serde::{Deserialize, Serialize};

pub use crate::render::DiagramSource;
use crate::inline::InlineOptions;

/// Fence tag that routes a block to the diagram renderer by default.
pub const DEFAULT_DIAGRAM_LANGUAGE: &str = "mermaid";

/// What to do with a code fence that is still open at the end of input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FencePolicy {
  /// Discard the buffered lines.
  Drop,
  /// Render the buffered lines as if the fence had been closed.
  #[default]
  Flush,
}

/// What to do with a table row outside of any table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BareRowPolicy {
  /// Emit nothing for the row.
  Drop,
  /// Render the row text as a paragraph.
  #[default]
  Paragraph,
}

/// Options for configuring the Markdown converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
  /// Fence language (case-insensitive) rendered as a diagram container.
  /// An empty string disables diagram handling.
  pub diagram_language: String,

  /// Remove emoji from text before inline processing.
  pub strip_emoji: bool,

  /// Handling of a fence left open at the end of the document.
  pub unterminated_fence: FencePolicy,

  /// Handling of table rows that belong to no table.
  pub bare_table_rows: BareRowPolicy,

  /// Whether diagram source is written raw or escaped.
  pub diagram_source: DiagramSource,

  /// Optional: base URL for relative image sources, e.g. the raw content
  /// root of the repository the README came from.
  pub image_base_url: Option<String>,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      diagram_language:   DEFAULT_DIAGRAM_LANGUAGE.to_string(),
      strip_emoji:        true,
      unterminated_fence: FencePolicy::default(),
      bare_table_rows:    BareRowPolicy::default(),
      diagram_source:     DiagramSource::default(),
      image_base_url:     None,
    }
  }
}

impl MarkdownOptions {
  /// Options for the inline processor derived from these options.
  #[must_use]
  pub fn inline(&self) -> InlineOptions<'_> {
    InlineOptions {
      strip_emoji:    self.strip_emoji,
      image_base_url: self.image_base_url.as_deref(),
    }
  }

  /// Whether a fence language tag selects the diagram renderer.
  #[must_use]
  pub fn is_diagram_language(&self, tag: &str) -> bool {
    !self.diagram_language.is_empty()
      && tag.eq_ignore_ascii_case(&self.diagram_language)
  }
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the fence language treated as a diagram.
  #[must_use]
  pub fn diagram_language(mut self, language: impl Into<String>) -> Self {
    self.options.diagram_language = language.into();
    self
  }

  /// Enable or disable emoji removal.
  #[must_use]
  pub const fn strip_emoji(mut self, enabled: bool) -> Self {
    self.options.strip_emoji = enabled;
    self
  }

  /// Set the policy for fences left open at the end of input.
  #[must_use]
  pub const fn unterminated_fence(mut self, policy: FencePolicy) -> Self {
    self.options.unterminated_fence = policy;
    self
  }

  /// Set the policy for table rows outside a table.
  #[must_use]
  pub const fn bare_table_rows(mut self, policy: BareRowPolicy) -> Self {
    self.options.bare_table_rows = policy;
    self
  }

  /// Set how diagram source is emitted.
  #[must_use]
  pub const fn diagram_source(mut self, policy: DiagramSource) -> Self {
    self.options.diagram_source = policy;
    self
  }

  /// Set the base URL for relative image sources.
  #[must_use]
  pub fn image_base_url(mut self, url: impl Into<String>) -> Self {
    self.options.image_base_url = Some(url.into());
    self
  }

  /// Build the final options.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}

/// Markdown to HTML converter.
///
/// Holds only its options; every conversion starts from fresh state, so a
/// converter can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
  pub(crate) options: MarkdownOptions,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let options = MarkdownOptions::default();
    assert_eq!(options.diagram_language, "mermaid");
    assert!(options.strip_emoji);
    assert_eq!(options.unterminated_fence, FencePolicy::Flush);
    assert_eq!(options.bare_table_rows, BareRowPolicy::Paragraph);
    assert_eq!(options.diagram_source, DiagramSource::Raw);
  }

  #[test]
  fn test_builder() {
    let options = MarkdownOptionsBuilder::new()
      .diagram_language("graphviz")
      .bare_table_rows(BareRowPolicy::Drop)
      .diagram_source(DiagramSource::Escaped)
      .image_base_url("https://example.com")
      .build();
    assert!(options.is_diagram_language("GraphViz"));
    assert!(!options.is_diagram_language("mermaid"));
    assert_eq!(options.bare_table_rows, BareRowPolicy::Drop);
    assert_eq!(options.inline().image_base_url, Some("https://example.com"));
  }

  #[test]
  fn test_empty_diagram_language_disables_diagrams() {
    let options = MarkdownOptionsBuilder::new().diagram_language("").build();
    assert!(!options.is_diagram_language(""));
  }
}
