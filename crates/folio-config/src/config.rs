use std::{
  fs,
  path::{Path, PathBuf},
  time::Duration,
};

use folio_markdown::MarkdownOptions;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, templates};

/// Default number of seconds a fetched response stays cached.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;

/// File names looked up, in order, when no config file is given.
const CONFIG_FILENAMES: &[&str] = &[
  "folio.toml",
  "folio.json",
  ".folio.toml",
  ".folio.json",
  ".config/folio.toml",
  ".config/folio.json",
];

/// Configuration for the folio README renderer.
///
/// Fields are loaded from a TOML or JSON file; anything missing falls back to
/// its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory of offline repository mirrors.
  pub mirror_dir: Option<PathBuf>,

  /// Default output file for rendered HTML.
  pub output: Option<PathBuf>,

  /// Seconds a fetched response stays cached.
  pub cache_ttl_secs: u64,

  /// Options passed to the Markdown converter.
  pub markdown: MarkdownOptions,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      mirror_dir:     None,
      output:         None,
      cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
      markdown:       MarkdownOptions::default(),
    }
  }
}

impl Config {
  /// Cache expiry as a [`Duration`].
  #[must_use]
  pub const fn cache_ttl(&self) -> Duration {
    Duration::from_secs(self.cache_ttl_secs)
  }

  /// Load configuration from a TOML or JSON file, chosen by extension.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match extension.as_deref() {
      Some("json") => {
        serde_json::from_str(&content)
          .map_err(ConfigError::from)
          .map_err(|e| {
            ConfigError::Config(format!(
              "Failed to parse JSON config from {}: {}",
              path.display(),
              e
            ))
          })
      },
      Some("toml") => {
        toml::from_str(&content)
          .map_err(ConfigError::from)
          .map_err(|e| {
            ConfigError::Config(format!(
              "Failed to parse TOML config from {}: {}",
              path.display(),
              e
            ))
          })
      },
      Some(_) => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from the given files, merged in order.
  ///
  /// With no files, a config file is looked up in the current directory and
  /// the user's config directory; without one the defaults are used.
  ///
  /// # Errors
  ///
  /// Returns an error if any file cannot be loaded or the result is invalid.
  pub fn load(config_files: &[PathBuf]) -> Result<Self, ConfigError> {
    let config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged = Self::from_file(first)?;
      for path in rest {
        merged.merge(Self::from_file(path)?);
      }
      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
      merged
    } else if let Some(discovered) = Self::find_config_file() {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      Self::default()
    };

    config.validate()?;
    Ok(config)
  }

  /// Merge another config into this one.
  ///
  /// A field of `other` replaces the current value when it is set: [`Some`]
  /// for optional fields, anything but the default for the rest. A later
  /// file therefore only overrides what it actually mentions.
  pub fn merge(&mut self, other: Self) {
    let defaults = Self::default();

    if other.mirror_dir.is_some() {
      self.mirror_dir = other.mirror_dir;
    }
    if other.output.is_some() {
      self.output = other.output;
    }
    if other.cache_ttl_secs != defaults.cache_ttl_secs {
      self.cache_ttl_secs = other.cache_ttl_secs;
    }

    let ours = &mut self.markdown;
    let theirs = other.markdown;
    let base = defaults.markdown;
    if theirs.diagram_language != base.diagram_language {
      ours.diagram_language = theirs.diagram_language;
    }
    if theirs.strip_emoji != base.strip_emoji {
      ours.strip_emoji = theirs.strip_emoji;
    }
    if theirs.unterminated_fence != base.unterminated_fence {
      ours.unterminated_fence = theirs.unterminated_fence;
    }
    if theirs.bare_table_rows != base.bare_table_rows {
      ours.bare_table_rows = theirs.bare_table_rows;
    }
    if theirs.diagram_source != base.diagram_source {
      ours.diagram_source = theirs.diagram_source;
    }
    if theirs.image_base_url.is_some() {
      ours.image_base_url = theirs.image_base_url;
    }
  }

  /// Search for a config file in common locations.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    if let Some(found) = Self::find_config_file_in(&current_dir) {
      return Some(found);
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
      let xdg_config_dir = PathBuf::from(xdg_config_home);
      for filename in &["folio.toml", "folio.json"] {
        let config_path = xdg_config_dir.join(filename);
        if config_path.exists() {
          return Some(config_path);
        }
      }
    }

    if let Ok(home) = std::env::var("HOME") {
      let home_config_dir = PathBuf::from(home).join(".config").join("folio");
      for filename in &["config.toml", "config.json"] {
        let config_path = home_config_dir.join(filename);
        if config_path.exists() {
          return Some(config_path);
        }
      }
    }

    None
  }

  /// Look for one of the known config file names directly under `dir`.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Check that configured paths exist.
  ///
  /// # Errors
  ///
  /// Returns an error if the mirror directory is set but is not a directory.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref mirror_dir) = self.mirror_dir
      && !mirror_dir.is_dir()
    {
      return Err(ConfigError::Config(format!(
        "Mirror directory does not exist: {}",
        mirror_dir.display()
      )));
    }
    Ok(())
  }

  /// Serialize the configuration as TOML.
  ///
  /// # Errors
  ///
  /// Returns an error if the configuration cannot be represented as TOML.
  pub fn to_toml(&self) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(self)?)
  }

  /// Write a commented default configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = templates::get_template(format)?;

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}
