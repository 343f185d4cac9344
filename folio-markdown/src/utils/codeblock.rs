//! Helpers for fenced code blocks: fence detection, info strings and body
//! normalization.

/// Fence marker opening and closing a code block.
pub const FENCE: &str = "```";

/// If `line` is a fence line, return the info string that follows the
/// backticks (trimmed, possibly empty).
///
/// Leading indentation is ignored. Any line starting with three backticks
/// counts, so a closing fence with trailing text still closes the block.
#[must_use]
pub fn fence_info(line: &str) -> Option<&str> {
  line
    .trim()
    .strip_prefix(FENCE)
    .map(|rest| rest.trim_start_matches('`').trim())
}

/// Extract the language tag from a fence info string.
///
/// Only the first whitespace-separated token is considered, so
/// `rust title="main.rs"` yields `rust`.
#[must_use]
pub fn language_tag(info: &str) -> &str {
  info.split_whitespace().next().unwrap_or_default()
}

/// Build a `language-*` class name that is safe inside an attribute.
///
/// Characters outside `[A-Za-z0-9_+#.-]` are dropped; an empty tag becomes
/// `language-text`.
#[must_use]
pub fn language_class(tag: &str) -> String {
  let safe: String = tag
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '#' | '.' | '-'))
    .collect::<String>()
    .to_ascii_lowercase();

  if safe.is_empty() {
    "language-text".to_string()
  } else {
    format!("language-{safe}")
  }
}

/// Normalize line endings to `\n` and drop leading and trailing blank lines.
///
/// Indentation of the remaining lines is preserved.
#[must_use]
pub fn normalize_code(code: &str) -> String {
  let unified = code.replace("\r\n", "\n").replace('\r', "\n");
  let lines: Vec<&str> = unified.split('\n').collect();

  let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
    return String::new();
  };
  let end = lines
    .iter()
    .rposition(|l| !l.trim().is_empty())
    .unwrap_or(start);

  lines[start..=end].join("\n")
}
