//! # folio-markdown
//!
//! A small, line-oriented Markdown to HTML converter used to display
//! repository READMEs inside the portfolio's project popover. It supports the
//! subset of GitHub Flavored Markdown that READMEs actually lean on: headings
//! with anchors, lists and task lists, tables, fenced code blocks, GitHub
//! alerts, `<details>` blocks and Mermaid diagrams.
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_markdown::{MarkdownConverter, MarkdownOptions};
//!
//! let converter = MarkdownConverter::new(MarkdownOptions::default());
//! let result = converter.render("# Hello World\n\nThis is **bold** text.");
//!
//! assert!(result.html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
//! assert_eq!(result.title.as_deref(), Some("Hello World"));
//! ```
//!
//! For the common case there is a free function using the default options:
//!
//! ```rust
//! let html = folio_markdown::convert("- [x] ship it");
//! assert!(html.contains("checked disabled"));
//! ```
//!
//! ## Output contract
//!
//! The returned HTML is a fragment meant to be injected by the caller. It
//! exposes a few hooks the presentation layer wires up after mounting:
//!
//! - `button.copy-code-btn` inside every code block, for click-to-copy
//! - `div.mermaid[id]` holding diagram source for asynchronous rendering
//! - `div.markdown-alert-{note,tip,important,warning,caution}` callouts
//!
//! Conversion is total: malformed input degrades to paragraphs, it never
//! fails and never panics. Every pattern is a `regex` automaton, so the work
//! is linear in the size of the document.

pub mod converter;
pub mod inline;
pub mod render;
mod types;
pub mod utils;

pub use crate::{
  converter::{
    BareRowPolicy,
    DiagramSource,
    FencePolicy,
    MarkdownConverter,
    MarkdownOptions,
    MarkdownOptionsBuilder,
  },
  inline::{InlineOptions, process_inline, process_inline_with},
  render::{
    DiagramIds,
    Language,
    language_info,
    language_label,
    render_code_block,
    render_diagram_block,
  },
  types::{Header, MarkdownResult},
  utils::{anchor_id, escape_html, strip_emoji},
};

/// Convert a Markdown document to an HTML fragment using the default options.
///
/// Empty input yields an empty string.
#[must_use]
pub fn convert(markdown: &str) -> String {
  MarkdownConverter::default().convert(markdown)
}
