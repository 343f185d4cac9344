#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
use folio_markdown::{
  DiagramIds,
  DiagramSource,
  language_info,
  language_label,
  render::render_diagram_block_with,
  render_code_block,
  render_diagram_block,
};

#[test]
fn test_code_block_structure() {
  let html = render_code_block("\n\nfn main() {}\r\n\n", "rust");
  assert!(html.starts_with(r#"<div class="code-block-container">"#));
  assert!(html.ends_with("</code></pre></div>"));
  assert!(html.contains(r#"<code class="language-rust">fn main() {}</code>"#));
  assert!(html.contains(r#"<button type="button" class="copy-code-btn""#));
}

#[test]
fn test_code_block_escapes_all_specials() {
  let html = render_code_block(r#"a & b < c > d " e ' f"#, "text");
  assert!(
    html.contains("a &amp; b &lt; c &gt; d &quot; e &#x27; f"),
    "{html}"
  );
}

#[test]
fn test_code_block_keeps_indentation() {
  let html = render_code_block("def f():\n    return 1", "py");
  assert!(html.contains("def f():\n    return 1"));
  assert!(html.contains(r#"<span class="code-block-label">Python</span>"#));
}

#[test]
fn test_code_block_hostile_language() {
  let html = render_code_block("x", r#""><img src=x onerror=alert(1)>"#);
  assert!(!html.contains("<img"), "{html}");
}

#[test]
fn test_language_labels() {
  assert_eq!(language_label("js"), "JavaScript");
  assert_eq!(language_label("TS"), "TypeScript");
  assert_eq!(language_label("zig"), "Zig");
  assert_eq!(language_label(""), "Code");
  assert!(language_info("bash").is_some());
  assert!(language_info("klingon").is_none());
}

#[test]
fn test_diagram_block_is_raw() {
  let html = render_diagram_block("\r\ngraph TD\r\n  A-->B<br/>\r\n");
  assert!(html.starts_with(r#"<div class="mermaid-wrapper"><div class="mermaid" id="mermaid-1-"#));
  assert!(html.ends_with(">graph TD\n  A-->B<br/></div></div>"), "{html}");
}

#[test]
fn test_diagram_ids_are_sequential() {
  let mut ids = DiagramIds::new();
  let first = render_diagram_block_with("a", &mut ids, DiagramSource::Raw);
  let second = render_diagram_block_with("b", &mut ids, DiagramSource::Raw);
  assert_eq!(ids.issued(), 2);
  assert!(first.contains(r#"id="mermaid-1-"#));
  assert!(second.contains(r#"id="mermaid-2-"#));
}

#[test]
fn test_diagram_escaped_policy() {
  let mut ids = DiagramIds::new();
  let html = render_diagram_block_with("A-->B", &mut ids, DiagramSource::Escaped);
  assert!(html.contains(">A--&gt;B<"));
}
