//! Display names and icon glyphs for fence languages.
use crate::utils::capitalize_first;

/// Display information for a known code block language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
  /// Human readable name shown in the code block header.
  pub label: &'static str,
  /// Short glyph rendered in the header badge.
  pub icon:  &'static str,
}

impl Language {
  const fn new(label: &'static str, icon: &'static str) -> Self {
    Self { label, icon }
  }
}

/// Glyph used for languages without a dedicated badge.
pub const GENERIC_ICON: &str = "{ }";

/// Look up a language tag (case-insensitive), accepting common aliases.
#[must_use]
pub fn language_info(tag: &str) -> Option<Language> {
  let language = match tag.to_ascii_lowercase().as_str() {
    "javascript" | "js" | "mjs" | "cjs" => Language::new("JavaScript", "JS"),
    "typescript" | "ts" | "mts" => Language::new("TypeScript", "TS"),
    "jsx" | "react" => Language::new("React", "JSX"),
    "tsx" => Language::new("React (TSX)", "TSX"),
    "vue" => Language::new("Vue.js", "VUE"),
    "node" | "nodejs" => Language::new("Node.js", "JS"),
    "python" | "py" | "python3" => Language::new("Python", "PY"),
    "rust" | "rs" => Language::new("Rust", "RS"),
    "go" | "golang" => Language::new("Go", "GO"),
    "java" => Language::new("Java", "JV"),
    "kotlin" | "kt" => Language::new("Kotlin", "KT"),
    "c" | "h" => Language::new("C", "C"),
    "cpp" | "c++" | "cxx" | "hpp" => Language::new("C++", "C++"),
    "csharp" | "cs" | "c#" => Language::new("C#", "C#"),
    "ruby" | "rb" => Language::new("Ruby", "RB"),
    "php" => Language::new("PHP", "PHP"),
    "swift" => Language::new("Swift", "SW"),
    "bash" | "sh" | "zsh" => Language::new("Bash", "$_"),
    "shell" | "console" | "shell-session" => Language::new("Shell", "$_"),
    "powershell" | "ps1" | "pwsh" => Language::new("PowerShell", "PS"),
    "html" | "htm" => Language::new("HTML", "HTML"),
    "css" => Language::new("CSS", "CSS"),
    "scss" | "sass" => Language::new("Sass", "CSS"),
    "json" | "jsonc" => Language::new("JSON", "{}"),
    "yaml" | "yml" => Language::new("YAML", "YML"),
    "toml" => Language::new("TOML", "TOML"),
    "xml" => Language::new("XML", "XML"),
    "sql" => Language::new("SQL", "SQL"),
    "markdown" | "md" => Language::new("Markdown", "MD"),
    "diff" | "patch" => Language::new("Diff", "+-"),
    "dockerfile" | "docker" => Language::new("Dockerfile", "DKR"),
    "makefile" | "make" => Language::new("Makefile", "MK"),
    "nix" => Language::new("Nix", "NIX"),
    "text" | "txt" | "plaintext" => Language::new("Text", "TXT"),
    _ => return None,
  };
  Some(language)
}

/// Label shown for a fence language.
///
/// Known languages use their display name, unknown tags are capitalized and
/// an empty tag falls back to `Code`.
#[must_use]
pub fn language_label(tag: &str) -> String {
  if tag.is_empty() {
    return "Code".to_string();
  }
  language_info(tag).map_or_else(|| capitalize_first(tag), |l| l.label.to_string())
}

/// Icon glyph for a fence language.
#[must_use]
pub fn language_icon(tag: &str) -> &'static str {
  language_info(tag).map_or(GENERIC_ICON, |l| l.icon)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_language_label_aliases() {
    assert_eq!(language_label("js"), "JavaScript");
    assert_eq!(language_label("JavaScript"), "JavaScript");
    assert_eq!(language_label("yml"), "YAML");
    assert_eq!(language_label("Dockerfile"), "Dockerfile");
  }

  #[test]
  fn test_language_label_fallbacks() {
    assert_eq!(language_label("elixir"), "Elixir");
    assert_eq!(language_label(""), "Code");
  }

  #[test]
  fn test_language_icon() {
    assert_eq!(language_icon("py"), "PY");
    assert_eq!(language_icon("brainfuck"), GENERIC_ICON);
  }
}
