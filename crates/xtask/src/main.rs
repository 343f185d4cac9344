use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;

const BIN_NAME: &str = "folio";

#[derive(Parser)]
#[command(author, version, about)]
struct Xtask {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build distribution artifacts for the folio CLI
  Dist {
    /// Output directory for generated files.
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Generate only this artifact.
    #[arg(long, value_enum)]
    only: Option<Artifact>,
  },

  /// Render a Markdown file into a standalone page for checking the
  /// fragment's class hooks in a browser.
  Preview {
    /// Markdown file to render.
    input: PathBuf,

    /// Page to write.
    #[arg(short, long, default_value = "dist/preview.html")]
    output: PathBuf,
  },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Artifact {
  Completions,
  Manpage,
}

fn main() -> Result<()> {
  match Xtask::parse().command {
    Commands::Dist { output_dir, only } => {
      if only != Some(Artifact::Manpage) {
        generate_completions(&output_dir)?;
      }
      if only != Some(Artifact::Completions) {
        generate_manpage(&output_dir)?;
      }
    },
    Commands::Preview { input, output } => preview(&input, &output)?,
  }

  Ok(())
}

/// Generate shell completions for every shell clap supports.
fn generate_completions(output_dir: &Path) -> Result<()> {
  let completions_dir = output_dir.join("completions");
  fs::create_dir_all(&completions_dir)?;
  let mut cmd = folio::cli::Cli::command();
  for &shell in Shell::value_variants() {
    generate_to(shell, &mut cmd, BIN_NAME, &completions_dir)
      .with_context(|| format!("Failed to generate {shell} completions"))?;
  }
  println!(
    "Shell completions generated in {}",
    completions_dir.display()
  );
  Ok(())
}

/// Generate the folio manpage.
fn generate_manpage(output_dir: &Path) -> Result<()> {
  let man_dir = output_dir.join("man");
  fs::create_dir_all(&man_dir)?;
  let file_path = man_dir.join(format!("{BIN_NAME}.1"));
  let mut file = fs::File::create(&file_path).with_context(|| {
    format!("Failed to create manpage file at {}", file_path.display())
  })?;
  Man::new(folio::cli::Cli::command())
    .render(&mut file)
    .context("Failed to render manpage")?;
  println!("Manpage generated at {}", file_path.display());
  Ok(())
}

/// Wrap a rendered README in a bare page that loads Mermaid.
fn preview(input: &Path, output: &Path) -> Result<()> {
  let markdown = fs::read_to_string(input)
    .with_context(|| format!("Failed to read {}", input.display()))?;
  let result = folio_markdown::MarkdownConverter::default().render(&markdown);
  let title = result.title.as_deref().unwrap_or("Preview");

  let page = format!(
    r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>{title}</title>
    <script type="module">
      import mermaid from "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs";
      mermaid.run({{ querySelector: ".mermaid" }});
      for (const btn of document.querySelectorAll(".copy-code-btn")) {{
        btn.addEventListener("click", () =>
          navigator.clipboard.writeText(btn.closest(".code-block-container").querySelector("code").innerText));
      }}
    </script>
  </head>
  <body>
{html}
  </body>
</html>
"#,
    title = folio_markdown::escape_html(title),
    html = result.html,
  );

  if let Some(parent) = output.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(output, page)
    .with_context(|| format!("Failed to write {}", output.display()))?;
  println!("Preview written to {}", output.display());
  Ok(())
}
