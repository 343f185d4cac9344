#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
use folio_markdown::{InlineOptions, process_inline, process_inline_with};

#[test]
fn test_stage_order() {
  assert_eq!(
    process_inline("**bold** *it* `code` ~~del~~ ==mark== H~2~O x^2^"),
    concat!(
      "<strong>bold</strong> <em>it</em> ",
      r#"<code class="md-code">code</code> <del>del</del> "#,
      r#"<mark class="md-mark">mark</mark> H<sub>2</sub>O x<sup>2</sup>"#,
    )
  );
}

#[test]
fn test_code_span_is_escaped_and_inert() {
  assert_eq!(
    process_inline("`<b>x</b> ~y~`"),
    r#"<code class="md-code">&lt;b&gt;x&lt;/b&gt; &#126;y&#126;</code>"#
  );
}

#[test]
fn test_kbd_is_restyled() {
  assert_eq!(
    process_inline("Press <kbd>Ctrl</kbd>+<KBD>C</KBD>"),
    r#"Press <kbd class="md-kbd">Ctrl</kbd>+<kbd class="md-kbd">C</kbd>"#
  );
}

#[test]
fn test_raw_html_is_escaped() {
  let html = process_inline(r#"<img src=x onerror="alert(1)">"#);
  assert!(!html.contains("<img"));
}

#[test]
fn test_unmatched_delimiters_survive() {
  assert_eq!(process_inline("**open"), "**open");
  assert_eq!(process_inline("a * b"), "a * b");
  assert_eq!(process_inline("`tick"), "`tick");
}

#[test]
fn test_linked_badge() {
  let html = process_inline(
    "[![CI](https://img.shields.io/badge/ci-passing-green)](https://ci.example.com)",
  );
  assert!(html.contains(r#"<span class="md-link"><img src="https://img.shields.io/badge/ci-passing-green""#), "{html}");
  assert!(!html.contains("ci.example.com"));
}

#[test]
fn test_data_image_allowed_other_data_blocked() {
  assert!(process_inline("![p](data:image/png;base64,AAAA)").contains("<img"));
  assert!(!process_inline("![p](data:text/html;base64,AAAA)").contains("<img"));
}

#[test]
fn test_options_without_emoji_stripping() {
  let options = InlineOptions {
    strip_emoji:    false,
    image_base_url: None,
  };
  assert_eq!(process_inline_with("**🎉**", &options), "<strong>🎉</strong>");
}
