//! Block renderers invoked by the converter when a fence closes.
//!
//! - [`code`]: escaped, labelled code blocks with a copy button hook
//! - [`diagram`]: containers for diagrams rendered later by the page
//! - [`languages`]: display labels and icon glyphs for fence languages
pub mod code;
pub mod diagram;
pub mod languages;

pub use self::{
  code::render_code_block,
  diagram::{DiagramIds, DiagramSource, render_diagram_block, render_diagram_block_with},
  languages::{Language, language_icon, language_info, language_label},
};
