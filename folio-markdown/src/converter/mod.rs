//! Line-oriented Markdown to HTML conversion.
//!
//! The converter makes a single forward pass over the input. Fenced code and
//! lists are buffered until they close, tables are streamed row by row, and
//! every other line is classified and rendered on its own.
mod blocks;
mod core;
mod state;
pub mod types;

pub use self::types::{
  BareRowPolicy,
  DEFAULT_DIAGRAM_LANGUAGE,
  DiagramSource,
  FencePolicy,
  MarkdownConverter,
  MarkdownOptions,
  MarkdownOptionsBuilder,
};
