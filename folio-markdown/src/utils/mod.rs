use std::{borrow::Cow, sync::LazyLock};
pub mod codeblock;
pub mod emoji;

use log::error;
use regex::Regex;

pub use self::emoji::{is_emoji, strip_emoji};

static NON_ANCHOR_CHARS: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("NON_ANCHOR_CHARS", r"[^a-z0-9\s-]"));
static ANCHOR_SEPARATORS: LazyLock<Regex> =
  LazyLock::new(|| compile_regex("ANCHOR_SEPARATORS", r"[\s-]+"));

/// Escape text for use in HTML content or a quoted attribute value.
///
/// Covers `&`, `<`, `>`, `"` and `'`. Returns the input unchanged (borrowed)
/// when nothing needs escaping.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
  html_escape::encode_quoted_attribute(text)
}

/// Derive a URL fragment identifier from heading text.
///
/// Lowercases, drops everything outside `[a-z0-9]`, whitespace and hyphens,
/// turns whitespace runs into single hyphens and trims hyphens at both ends.
///
/// ```
/// assert_eq!(folio_markdown::anchor_id("Getting Started!"), "getting-started");
/// ```
#[must_use]
pub fn anchor_id(text: &str) -> String {
  let lowered = text.to_lowercase();
  let kept = NON_ANCHOR_CHARS.replace_all(&lowered, "");
  ANCHOR_SEPARATORS
    .replace_all(kept.trim(), "-")
    .trim_matches('-')
    .to_string()
}

/// Capitalize the first letter of a string.
#[must_use]
pub fn capitalize_first(s: &str) -> String {
  let mut chars = s.chars();
  chars.next().map_or_else(String::new, |c| {
    c.to_uppercase().collect::<String>() + chars.as_str()
  })
}

/// Compile a pattern used by one of the static matchers.
///
/// A pattern that fails to compile is logged and replaced by
/// [`never_matching_regex`], so the rule it backs is simply skipped.
pub(crate) fn compile_regex(name: &str, pattern: &str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|e| {
    error!(
      "Failed to compile {name} regex: {e}\n Falling back to never matching \
       regex."
    );
    never_matching_regex()
  })
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile. It will
/// never match any input, which is safer than using a trivial regex like `^$`
/// which would match empty strings.
#[must_use]
pub fn never_matching_regex() -> Regex {
  #[allow(clippy::expect_used, reason = "This pattern is guaranteed to be valid")]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}
