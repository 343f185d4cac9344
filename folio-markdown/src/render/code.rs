use std::fmt::Write;

use log::trace;

use super::languages::{language_icon, language_label};
use crate::utils::{
  codeblock::{language_class, language_tag, normalize_code},
  escape_html,
};

const COPY_ICON: &str = r#"<svg class="copy-code-icon" width="16" height="16" fill="none" stroke="currentColor" viewBox="0 0 24 24" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M8 16H6a2 2 0 01-2-2V6a2 2 0 012-2h8a2 2 0 012 2v2m-6 12h8a2 2 0 002-2v-8a2 2 0 00-2-2h-8a2 2 0 00-2 2v8a2 2 0 002 2z" /></svg>"#;

/// Render a fenced code block.
///
/// `language` is the fence info string; only its first token is used. The
/// body is normalized (line endings, surrounding blank lines) and escaped,
/// it never goes through inline processing. The header carries a
/// `copy-code-btn` button for the page script to wire up.
#[must_use]
pub fn render_code_block(code: &str, language: &str) -> String {
  let tag = language_tag(language);
  let body = normalize_code(code);
  trace!("Rendering {} byte code block tagged '{tag}'", body.len());

  let mut html = String::with_capacity(body.len() + 640);
  html.push_str(r#"<div class="code-block-container">"#);
  let _ = write!(
    html,
    r#"<div class="code-block-header"><div class="code-block-title"><span class="code-block-icon" aria-hidden="true">{icon}</span><span class="code-block-label">{label}</span></div>"#,
    icon = escape_html(language_icon(tag)),
    label = escape_html(&language_label(tag)),
  );
  let _ = write!(
    html,
    r#"<button type="button" class="copy-code-btn" title="Copy code" aria-label="Copy code">{COPY_ICON}</button></div>"#
  );
  let _ = write!(
    html,
    r#"<pre class="code-block"><code class="{class}">{code}</code></pre></div>"#,
    class = language_class(tag),
    code = escape_html(&body),
  );
  html
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_code_block_escapes_body() {
    let html = render_code_block("<script>alert('x')</script>", "html");
    assert!(html.contains("&lt;script&gt;alert("));
    assert!(!html.contains("<script>"));
    assert!(html.contains(r#"<code class="language-html">"#));
  }

  #[test]
  fn test_code_block_header() {
    let html = render_code_block("fn main() {}", "rust");
    assert!(html.contains(r#"<span class="code-block-label">Rust</span>"#));
    assert!(html.contains(r#"<span class="code-block-icon" aria-hidden="true">RS</span>"#));
    assert!(html.contains(r#"class="copy-code-btn""#));
  }

  #[test]
  fn test_code_block_without_language() {
    let html = render_code_block("plain", "");
    assert!(html.contains(r#"<span class="code-block-label">Code</span>"#));
    assert!(html.contains(r#"<code class="language-text">plain</code>"#));
  }

  #[test]
  fn test_code_block_label_is_escaped() {
    let html = render_code_block("x", "<b>");
    assert!(html.contains("&lt;b&gt;"));
    assert!(!html.contains("<b>"));
  }

  #[test]
  fn test_code_block_trims_blank_lines() {
    let html = render_code_block("\n\n    indented\r\n\n", "text");
    assert!(html.contains(r#"<code class="language-text">    indented</code>"#));
  }
}
