use log::trace;
use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::utils::escape_html;

/// How diagram source is written into the emitted container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramSource {
  /// Verbatim source text. Diagram renderers read it back from the element.
  #[default]
  Raw,
  /// HTML-escaped source. The element's text content is still the original
  /// source, but markup in it can no longer create elements.
  Escaped,
}

/// Element id generator for the diagrams of one document.
///
/// Ids combine a per-document sequence number with a random suffix, so two
/// diagrams in one document never collide and fragments rendered separately
/// are unlikely to either.
#[derive(Debug, Clone, Default)]
pub struct DiagramIds {
  issued: usize,
}

impl DiagramIds {
  /// Create a generator starting at the first diagram.
  #[must_use]
  pub const fn new() -> Self {
    Self { issued: 0 }
  }

  /// Number of ids handed out so far.
  #[must_use]
  pub const fn issued(&self) -> usize {
    self.issued
  }

  /// Produce the next id.
  pub fn next_id(&mut self) -> String {
    self.issued += 1;
    let salt: u32 = rand::rng().random();
    format!("mermaid-{}-{salt:08x}", self.issued)
  }
}

/// Wrap diagram source in a container for the external renderer.
///
/// The diagram is not rendered here. The inner `div.mermaid` carries a
/// unique id and the source text; the page script picks it up after the HTML
/// has been mounted.
#[must_use]
pub fn render_diagram_block(source: &str) -> String {
  render_diagram_block_with(source, &mut DiagramIds::new(), DiagramSource::Raw)
}

/// Like [`render_diagram_block`], drawing ids from `ids`.
#[must_use]
pub fn render_diagram_block_with(
  source: &str,
  ids: &mut DiagramIds,
  policy: DiagramSource,
) -> String {
  let clean = source.replace("\r\n", "\n").replace('\r', "\n");
  let clean = clean.trim();
  let id = ids.next_id();
  trace!("Emitting diagram container {id} ({} bytes)", clean.len());

  let body = match policy {
    DiagramSource::Raw => clean.into(),
    DiagramSource::Escaped => escape_html(clean),
  };

  format!(
    r#"<div class="mermaid-wrapper"><div class="mermaid" id="{id}">{body}</div></div>"#
  )
}
