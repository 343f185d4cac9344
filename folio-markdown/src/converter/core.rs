use log::debug;

use super::{state::ParseState, types::MarkdownOptions};
use crate::{MarkdownConverter, types::MarkdownResult};

impl MarkdownConverter {
  /// Create a converter with the given options.
  #[must_use]
  pub const fn new(options: MarkdownOptions) -> Self {
    Self { options }
  }

  /// Options this converter was built with.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Convert Markdown to an HTML fragment.
  ///
  /// Empty input yields an empty string.
  #[must_use]
  pub fn convert(&self, markdown: &str) -> String {
    self.render(markdown).html
  }

  /// Convert Markdown and collect the headings and title along the way.
  #[must_use]
  pub fn render(&self, markdown: &str) -> MarkdownResult {
    if markdown.is_empty() {
      return MarkdownResult::default();
    }

    let mut state = ParseState::new(&self.options);
    let mut lines = markdown.lines().peekable();
    while let Some(line) = lines.next() {
      state.push_line(line, lines.peek().copied());
    }

    let result = state.finish();
    debug!(
      "Converted {} byte(s) of Markdown into {} byte(s) of HTML with {} \
       heading(s)",
      markdown.len(),
      result.html.len(),
      result.headers.len()
    );
    result
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{BareRowPolicy, FencePolicy, MarkdownOptionsBuilder};

  fn convert(markdown: &str) -> String {
    MarkdownConverter::default().convert(markdown)
  }

  #[test]
  fn test_empty_input() {
    assert_eq!(convert(""), "");
    let result = MarkdownConverter::default().render("");
    assert!(result.headers.is_empty());
    assert!(result.title.is_none());
  }

  #[test]
  fn test_trailing_newline_adds_no_spacer() {
    assert_eq!(convert("hello\n"), "<p>hello</p>");
    assert_eq!(
      convert("a\n\nb"),
      "<p>a</p>\n<div class=\"md-spacer my-2\"></div>\n<p>b</p>"
    );
  }

  #[test]
  fn test_list_kinds_do_not_merge() {
    let html = convert("- a\n- b\n1. c");
    assert_eq!(html, "<ul><li>a</li><li>b</li></ul>\n<ol><li>c</li></ol>");
  }

  #[test]
  fn test_ordered_list_start() {
    assert_eq!(convert("3. c\n4. d"), r#"<ol start="3"><li>c</li><li>d</li></ol>"#);
  }

  #[test]
  fn test_fence_closes_open_list() {
    let html = convert("- item\n```\ncode\n```");
    let list_end = html.find("</ul>").unwrap_or(usize::MAX);
    let block = html.find("code-block-container").unwrap_or(0);
    assert!(list_end < block, "{html}");
  }

  #[test]
  fn test_heading_anchors_are_unique() {
    let result = MarkdownConverter::default().render("## Setup\n## Setup\n## Setup");
    let ids: Vec<_> = result.headers.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["setup", "setup-1", "setup-2"]);
  }

  #[test]
  fn test_symbol_only_heading_gets_fallback_anchor() {
    let result = MarkdownConverter::default().render("# !!!");
    assert_eq!(result.headers[0].id, "section");
  }

  #[test]
  fn test_title_is_first_h1() {
    let result =
      MarkdownConverter::default().render("## Intro\n# 🚀 Rocket\n# Second");
    assert_eq!(result.title.as_deref(), Some("Rocket"));
  }

  #[test]
  fn test_table_is_closed_once() {
    let html = convert("| a | b |\n| --- | --- |\n| 1 | 2 |\nafter");
    assert_eq!(html.matches("<table").count(), 1);
    assert_eq!(html.matches("</table>").count(), 1);
    assert!(html.ends_with("</tbody></table>\n<p>after</p>"), "{html}");
  }

  #[test]
  fn test_table_closed_at_end_of_input() {
    let html = convert("| a |\n|---|\n| 1 |");
    assert!(html.ends_with("</tbody></table>"), "{html}");
  }

  #[test]
  fn test_bare_row_policy() {
    assert_eq!(convert("| lonely |"), "<p>| lonely |</p>");
    let converter = MarkdownConverter::new(
      MarkdownOptionsBuilder::new()
        .bare_table_rows(BareRowPolicy::Drop)
        .build(),
    );
    assert_eq!(converter.convert("| lonely |"), "");
  }

  #[test]
  fn test_unterminated_fence_policy() {
    assert!(convert("```rust\nfn main() {}").contains("fn main() {}"));
    let converter = MarkdownConverter::new(
      MarkdownOptionsBuilder::new()
        .unterminated_fence(FencePolicy::Drop)
        .build(),
    );
    assert_eq!(converter.convert("intro\n```rust\nfn main() {}"), "<p>intro</p>");
  }

  #[test]
  fn test_diagram_ids_unique_within_document() {
    let html = convert("```mermaid\ngraph TD\n```\n```mermaid\ngraph LR\n```");
    assert_eq!(html.matches(r#"id="mermaid-"#).count(), 2);
    assert!(html.contains(r#"id="mermaid-1-"#), "{html}");
    assert!(html.contains(r#"id="mermaid-2-"#), "{html}");
  }
}
