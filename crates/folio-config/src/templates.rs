use crate::error::ConfigError;

/// Default configuration in TOML, with every field explained.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# folio configuration file

# Directory holding offline repository mirrors laid out as
# <mirror_dir>/<owner>/<repo>/README.md and repo.json
# mirror_dir = "mirror"

# Default output file. Output goes to stdout when unset.
# output = "readme.html"

# Seconds a fetched README or metadata record stays cached
cache_ttl_secs = 300

[markdown]
# Fence language rendered as a diagram container instead of a code block.
# Leave empty to render every fence as code.
diagram_language = "mermaid"

# Remove emoji from text before rendering
strip_emoji = true

# What to do with a code fence still open at the end of a document:
# "flush" renders what was buffered, "drop" discards it
unterminated_fence = "flush"

# What to do with a table row that belongs to no table:
# "paragraph" renders it as text, "drop" discards it
bare_table_rows = "paragraph"

# How diagram source is written: "raw" or "escaped"
diagram_source = "raw"

# Base URL for relative image paths in READMEs
# image_base_url = "https://raw.githubusercontent.com/owner/repo/main"
"#;

/// Default configuration in JSON format.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "cache_ttl_secs": 300,
  "markdown": {
    "diagram_language": "mermaid",
    "strip_emoji": true,
    "unterminated_fence": "flush",
    "bare_table_rows": "paragraph",
    "diagram_source": "raw"
  }
}
"#;

/// Get the default configuration template for `format` (`toml` or `json`).
///
/// # Errors
///
/// Returns an error if the format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, ConfigError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => {
      Err(ConfigError::Config(format!(
        "Unsupported config format: {format}"
      )))
    },
  }
}
