//! Implementation of the folio subcommands.
use std::{
  fs,
  io::{self, Read, Write},
  path::Path,
};

use color_eyre::eyre::{Context, Result, bail};
use folio_config::Config;
use folio_github::{
  CachedSource,
  MemoryCache,
  MirrorSource,
  RepoRef,
  RepositorySource,
  SourceError,
};
use folio_markdown::{MarkdownConverter, MarkdownOptions};
use log::{debug, info, warn};

/// What `folio render` prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
  #[default]
  Html,
  TitleOnly,
  Json,
}

impl RenderMode {
  #[must_use]
  pub const fn from_flags(title_only: bool, json: bool) -> Self {
    match (title_only, json) {
      (true, _) => Self::TitleOnly,
      (false, true) => Self::Json,
      (false, false) => Self::Html,
    }
  }
}

/// Convert `markdown` and format the result for `mode`.
///
/// # Errors
///
/// Returns an error if the JSON output cannot be serialized.
pub fn render_document(
  options: &MarkdownOptions,
  markdown: &str,
  mode: RenderMode,
) -> Result<String> {
  let converter = MarkdownConverter::new(options.clone());
  let result = converter.render(markdown);
  debug!(
    "Rendered document with {} heading(s), title {:?}",
    result.headers.len(),
    result.title
  );

  Ok(match mode {
    RenderMode::Html => result.html,
    RenderMode::TitleOnly => result.title.unwrap_or_default(),
    RenderMode::Json => {
      serde_json::to_string_pretty(&result)
        .wrap_err("Failed to serialize render result")?
    },
  })
}

/// `folio render`: convert a file or stdin.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output written.
pub fn render(
  config: &Config,
  input: Option<&Path>,
  output: Option<&Path>,
  mode: RenderMode,
) -> Result<()> {
  let markdown = read_input(input)?;
  let rendered = render_document(&config.markdown, &markdown, mode)?;
  write_output(output.or(config.output.as_deref()), &rendered)
}

/// Render the README of the repository at `url` from a mirror directory.
///
/// When the mirrored metadata names a default branch and no image base URL is
/// configured, relative images are resolved against the repository's raw
/// content URL. Metadata that is missing or temporarily unavailable is
/// skipped with a warning.
///
/// # Errors
///
/// Returns an error if the URL is not a GitHub repository, no mirror
/// directory is configured, or the README cannot be read.
pub fn readme_html(
  config: &Config,
  url: &str,
  mirror: Option<&Path>,
) -> Result<String> {
  let repo = RepoRef::parse(url)?;
  let Some(mirror_dir) = mirror.or(config.mirror_dir.as_deref()) else {
    bail!(
      "No mirror directory configured. Pass --mirror or set mirror_dir in the \
       configuration."
    );
  };

  let source = CachedSource::new(
    MirrorSource::new(mirror_dir),
    MemoryCache::new(config.cache_ttl()),
  );

  let mut options = config.markdown.clone();
  match source.metadata(&repo) {
    Ok(metadata) => {
      info!(
        "{}: {} ({} stars, {} forks{})",
        metadata.full_name,
        metadata.description.as_deref().unwrap_or("no description"),
        metadata.stars,
        metadata.forks,
        metadata
          .language
          .as_deref()
          .map(|l| format!(", {l}"))
          .unwrap_or_default()
      );
      if options.image_base_url.is_none() {
        options.image_base_url = metadata.raw_content_base();
      }
    },
    Err(SourceError::NotFound(what)) => {
      warn!("No metadata for {repo}: {what} not found");
    },
    Err(e) if e.is_transient() => {
      warn!("Skipping metadata for {repo}, try again later: {e}");
    },
    Err(e) => {
      return Err(e)
        .wrap_err_with(|| format!("Failed to read metadata for {repo}"));
    },
  }

  let markdown = match source.readme(&repo) {
    Ok(markdown) => markdown,
    Err(e) if e.is_transient() => {
      bail!("README for {repo} is temporarily unavailable, try again later: {e}")
    },
    Err(e) => {
      return Err(e).wrap_err_with(|| format!("Failed to read README for {repo}"));
    },
  };
  debug!("Cached responses: {}", source.cache().keys().join(", "));
  render_document(&options, &markdown, RenderMode::Html)
}

/// `folio readme`: render a mirrored repository README.
///
/// # Errors
///
/// See [`readme_html`]; also fails if the output cannot be written.
pub fn readme(
  config: &Config,
  url: &str,
  mirror: Option<&Path>,
  output: Option<&Path>,
) -> Result<()> {
  let html = readme_html(config, url, mirror)?;
  write_output(output.or(config.output.as_deref()), &html)
}

/// `folio init`: write a default configuration file.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or it cannot
/// be written.
pub fn init(output: &Path, format: &str, force: bool) -> Result<()> {
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
    info!("Created directory: {}", parent.display());
  }

  Config::generate_default_config(format, output).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", output.display())
  })?;

  info!(
    "Configuration file created successfully. Edit it to customize \
     rendering."
  );
  Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
  match input {
    Some(path) if path != Path::new("-") => {
      fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))
    },
    _ => {
      let mut buffer = String::new();
      io::stdin()
        .read_to_string(&mut buffer)
        .wrap_err("Failed to read Markdown from stdin")?;
      Ok(buffer)
    },
  }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
  if let Some(path) = output {
    fs::write(path, content)
      .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    return Ok(());
  }

  let mut stdout = io::stdout().lock();
  writeln!(stdout, "{content}").wrap_err("Failed to write to stdout")?;
  Ok(())
}
