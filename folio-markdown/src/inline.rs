//! Inline span processing.
//!
//! [`process_inline_with`] runs a fixed sequence of independent transforms
//! over one line of text. Emoji are removed and the text is HTML-escaped
//! before the first pattern runs, so every tag in the output was produced by
//! one of the stages below:
//!
//! 1. images `![alt](src)`
//! 2. links `[text](url)`, rendered as styled text without the href
//! 3. bold `**x**` / `__x__`
//! 4. italic `*x*` / `_x_`
//! 5. code spans `` `x` ``
//! 6. strikethrough `~~x~~`
//! 7. highlight `==x==`
//! 8. subscript `~x~` and superscript `^x^`
//! 9. keyboard keys `<kbd>x</kbd>`
//!
//! Bold runs before italic so single delimiters do not eat double ones.
//! Image attribute values and code span bodies have their delimiter
//! characters encoded as numeric entities, which only protects them from the
//! stages that run afterwards. Code spans come after bold and italic, so an
//! `_` or `*` inside backticks can still pair with one outside and the
//! resulting tags nest badly.
use std::sync::LazyLock;

use log::{trace, warn};
use regex::{Captures, Regex};

use crate::utils::{compile_regex, escape_html, strip_emoji};

static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("IMAGE", r"!\[([^\]]*)\]\(\s*([^)\s]+)(?:\s+[^)]*)?\)")
});
static LINK: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("LINK", r"\[([^\]]+)\]\(([^)]+)\)"));
static BOLD_STARS: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("BOLD_STARS", r"\*\*(.+?)\*\*"));
static BOLD_UNDERSCORES: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("BOLD_UNDERSCORES", r"__(.+?)__"));
static ITALIC_STAR: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("ITALIC_STAR", r"\*(.+?)\*"));
static ITALIC_UNDERSCORE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("ITALIC_UNDERSCORE", r"_(.+?)_"));
static CODE_SPAN: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("CODE_SPAN", r"`([^`]+)`"));
static STRIKETHROUGH: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("STRIKETHROUGH", r"~~(.*?)~~"));
static HIGHLIGHT: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("HIGHLIGHT", r"==(.*?)=="));
static SUBSCRIPT: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("SUBSCRIPT", r"~([^~]+)~"));
static SUPERSCRIPT: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("SUPERSCRIPT", r"\^([^\^]+)\^"));
// `<kbd>` arrives escaped, this is the one tag allowed back through.
static KBD: LazyLock<Regex> = LazyLock::new(|| {
  compile_regex("KBD", r"(?i)&lt;kbd&gt;(.+?)&lt;/kbd&gt;")
});

type InlineStage = fn(&str) -> String;

/// Stages after images, in application order.
const STAGES: &[(&str, InlineStage)] = &[
  ("links", links),
  ("bold", bold),
  ("italic", italic),
  ("code", code_spans),
  ("strikethrough", strikethrough),
  ("highlight", highlight),
  ("subscript", subscript),
  ("superscript", superscript),
  ("kbd", keyboard_keys),
];

/// Schemes that are never emitted as an image source.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "file:"];

/// Options for inline processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineOptions<'a> {
  /// Remove emoji before escaping.
  pub strip_emoji:    bool,
  /// Base URL that relative image sources are resolved against.
  pub image_base_url: Option<&'a str>,
}

impl Default for InlineOptions<'_> {
  fn default() -> Self {
    Self {
      strip_emoji:    true,
      image_base_url: None,
    }
  }
}

/// Process inline Markdown in `text` with default options.
#[must_use]
pub fn process_inline(text: &str) -> String {
  process_inline_with(text, &InlineOptions::default())
}

/// Process inline Markdown in `text`.
///
/// Total over all input: unmatched delimiters are left in place.
#[must_use]
pub fn process_inline_with(text: &str, options: &InlineOptions<'_>) -> String {
  let text = if options.strip_emoji {
    strip_emoji(text)
  } else {
    text.into()
  };
  let escaped = escape_html(&text);

  let mut html = images(&escaped, options.image_base_url);
  for (name, stage) in STAGES {
    let next = stage(&html);
    if next != html {
      trace!("Inline stage '{name}' rewrote span");
    }
    html = next;
  }
  html
}

fn substitute(text: &str, pattern: &Regex, replacement: &str) -> String {
  pattern.replace_all(text, replacement).into_owned()
}

/// Encode characters that later stages treat as delimiters.
fn shield(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '*' => out.push_str("&#42;"),
      '_' => out.push_str("&#95;"),
      '~' => out.push_str("&#126;"),
      '^' => out.push_str("&#94;"),
      '=' => out.push_str("&#61;"),
      '`' => out.push_str("&#96;"),
      '[' => out.push_str("&#91;"),
      ']' => out.push_str("&#93;"),
      _ => out.push(c),
    }
  }
  out
}

/// Resolve an image source, or `None` if it must not be emitted.
///
/// `src` is already HTML-escaped.
fn image_source(src: &str, base: Option<&str>) -> Option<String> {
  let lowered = src.to_ascii_lowercase();
  if BLOCKED_SCHEMES.iter().any(|s| lowered.starts_with(s))
    || (lowered.starts_with("data:") && !lowered.starts_with("data:image/"))
  {
    return None;
  }

  let is_relative = !lowered.contains("://")
    && !lowered.starts_with("data:")
    && !lowered.starts_with("//")
    && !lowered.starts_with('#');

  match base {
    Some(base) if is_relative => {
      let path = src.trim_start_matches("./").trim_start_matches('/');
      Some(format!(
        "{}/{path}",
        escape_html(base.trim_end_matches('/'))
      ))
    },
    _ => Some(src.to_string()),
  }
}

fn images(text: &str, base: Option<&str>) -> String {
  IMAGE
    .replace_all(text, |caps: &Captures<'_>| {
      let alt = &caps[1];
      image_source(&caps[2], base).map_or_else(
        || {
          warn!("Dropping image with disallowed source '{}'", &caps[2]);
          format!(r#"<span class="md-image-alt">{alt}</span>"#)
        },
        |src| {
          format!(
            r#"<img src="{}" alt="{}" class="md-image" loading="lazy" />"#,
            shield(&src),
            shield(alt)
          )
        },
      )
    })
    .into_owned()
}

fn links(text: &str) -> String {
  // The popover is a sandboxed preview, the destination is dropped.
  substitute(text, &LINK, r#"<span class="md-link">${1}</span>"#)
}

fn bold(text: &str) -> String {
  let text = substitute(text, &BOLD_STARS, "<strong>${1}</strong>");
  substitute(&text, &BOLD_UNDERSCORES, "<strong>${1}</strong>")
}

fn italic(text: &str) -> String {
  let text = substitute(text, &ITALIC_STAR, "<em>${1}</em>");
  substitute(&text, &ITALIC_UNDERSCORE, "<em>${1}</em>")
}

fn code_spans(text: &str) -> String {
  CODE_SPAN
    .replace_all(text, |caps: &Captures<'_>| {
      format!(r#"<code class="md-code">{}</code>"#, shield(&caps[1]))
    })
    .into_owned()
}

fn strikethrough(text: &str) -> String {
  substitute(text, &STRIKETHROUGH, "<del>${1}</del>")
}

fn highlight(text: &str) -> String {
  substitute(text, &HIGHLIGHT, r#"<mark class="md-mark">${1}</mark>"#)
}

fn subscript(text: &str) -> String {
  substitute(text, &SUBSCRIPT, "<sub>${1}</sub>")
}

fn superscript(text: &str) -> String {
  substitute(text, &SUPERSCRIPT, "<sup>${1}</sup>")
}

fn keyboard_keys(text: &str) -> String {
  substitute(text, &KBD, r#"<kbd class="md-kbd">${1}</kbd>"#)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plain_text_is_escaped() {
    assert_eq!(process_inline("a < b & c"), "a &lt; b &amp; c");
    assert_eq!(
      process_inline("<script>alert(1)</script>"),
      "&lt;script&gt;alert(1)&lt;/script&gt;"
    );
  }

  #[test]
  fn test_emphasis() {
    assert_eq!(process_inline("**a** and __b__"), "<strong>a</strong> and <strong>b</strong>");
    assert_eq!(process_inline("*a* and _b_"), "<em>a</em> and <em>b</em>");
  }

  #[test]
  fn test_emoji_does_not_break_bold() {
    assert_eq!(process_inline("**bold 🎉 text**"), "<strong>bold  text</strong>");
  }

  #[test]
  fn test_emoji_kept_when_disabled() {
    let options = InlineOptions {
      strip_emoji: false,
      ..InlineOptions::default()
    };
    assert_eq!(process_inline_with("hi 🎉", &options), "hi 🎉");
  }

  #[test]
  fn test_link_drops_destination() {
    let html = process_inline("see [the docs](https://example.com/docs)");
    assert_eq!(html, r#"see <span class="md-link">the docs</span>"#);
    assert!(!html.contains("href"));
  }

  #[test]
  fn test_image_before_link() {
    let html = process_inline("![logo](img/logo.png)");
    assert_eq!(
      html,
      r#"<img src="img/logo.png" alt="logo" class="md-image" loading="lazy" />"#
    );
  }

  #[test]
  fn test_image_source_is_shielded() {
    let html = process_inline("![my_logo](assets/my_logo_v2.png)");
    assert!(html.contains(r#"src="assets/my&#95;logo&#95;v2.png""#));
    assert!(!html.contains("<em>"));
  }

  #[test]
  fn test_image_with_title() {
    let html = process_inline(r#"![a](b.png "Title")"#);
    assert!(html.contains(r#"src="b.png""#));
  }

  #[test]
  fn test_image_blocked_scheme() {
    let html = process_inline("![x](javascript:alert(1))");
    assert!(!html.contains("<img"));
    assert!(html.contains(r#"<span class="md-image-alt">x</span>"#));
  }

  #[test]
  fn test_image_relative_to_base() {
    let options = InlineOptions {
      image_base_url: Some("https://raw.githubusercontent.com/o/r/main/"),
      ..InlineOptions::default()
    };
    let html = process_inline_with("![d](./docs/demo.gif)", &options);
    assert!(html.contains(r#"src="https://raw.githubusercontent.com/o/r/main/docs/demo.gif""#));

    let html = process_inline_with("![d](https://cdn.example.com/a.png)", &options);
    assert!(html.contains(r#"src="https://cdn.example.com/a.png""#));
  }

  #[test]
  fn test_badge_inside_link() {
    let html = process_inline("[![CI](https://ci.example.com/badge.svg)](https://ci.example.com)");
    assert!(html.starts_with(r#"<span class="md-link"><img src="https://ci.example.com/badge.svg""#));
    assert!(html.ends_with("</span>"));
  }

  #[test]
  fn test_code_span_is_escaped_and_shielded() {
    assert_eq!(
      process_inline("`<div>`"),
      r#"<code class="md-code">&lt;div&gt;</code>"#
    );
    assert_eq!(
      process_inline("`a ~~b~~ ==c==`"),
      r#"<code class="md-code">a &#126;&#126;b&#126;&#126; &#61;&#61;c&#61;&#61;</code>"#
    );
  }

  #[test]
  fn test_emphasis_runs_before_code_spans() {
    assert_eq!(
      process_inline("Use `snake_case` and my_var_name"),
      r#"Use <code class="md-code">snake<em>case</code> and my</em>var_name"#
    );
    assert_eq!(
      process_inline("`snake_case` alone"),
      r#"<code class="md-code">snake&#95;case</code> alone"#
    );
  }

  #[test]
  fn test_strike_highlight_sub_sup() {
    assert_eq!(process_inline("~~old~~"), "<del>old</del>");
    assert_eq!(process_inline("==new=="), r#"<mark class="md-mark">new</mark>"#);
    assert_eq!(process_inline("H~2~O"), "H<sub>2</sub>O");
    assert_eq!(process_inline("x^2^"), "x<sup>2</sup>");
  }

  #[test]
  fn test_kbd_passthrough() {
    assert_eq!(
      process_inline("press <kbd>Ctrl</kbd>+<kbd>C</kbd>"),
      r#"press <kbd class="md-kbd">Ctrl</kbd>+<kbd class="md-kbd">C</kbd>"#
    );
  }

  #[test]
  fn test_unmatched_delimiters_survive() {
    assert_eq!(process_inline("2 * 3 = 6"), "2 * 3 = 6");
    assert_eq!(process_inline("**open"), "**open");
  }
}
