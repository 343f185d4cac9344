use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for folio
#[derive(Parser, Debug)]
#[command(author, version, about = "folio: render repository READMEs for a portfolio")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,
}

/// All supported subcommands for the folio CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Convert a Markdown file to an HTML fragment.
  Render {
    /// Markdown file to read. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// File to write the HTML to. Writes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print only the document title (text of the first level 1 heading).
    #[arg(long, conflicts_with = "json")]
    title_only: bool,

    /// Print the HTML, headings and title as JSON.
    #[arg(long)]
    json: bool,
  },

  /// Render the README of a GitHub repository from a local mirror.
  Readme {
    /// Repository URL, e.g. `https://github.com/owner/repo`.
    url: String,

    /// Mirror directory laid out as `<owner>/<repo>/README.md`. Overrides
    /// `mirror_dir` from the configuration.
    #[arg(short, long)]
    mirror: Option<PathBuf>,

    /// File to write the HTML to. Writes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Initialize a new folio configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "folio.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
