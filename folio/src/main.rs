use color_eyre::eyre::{Context, Result};
use folio::{
  cli::{Cli, Commands},
  commands::{self, RenderMode},
};
use folio_config::Config;
use log::{LevelFilter, debug};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    return commands::init(output, format, *force);
  }

  let config = Config::load(&cli.config_files)
    .wrap_err("Failed to load configuration")?;
  if cli.verbose {
    debug!("Resolved configuration:\n{}", config.to_toml()?);
  }

  match &cli.command {
    Commands::Render {
      input,
      output,
      title_only,
      json,
    } => {
      commands::render(
        &config,
        input.as_deref(),
        output.as_deref(),
        RenderMode::from_flags(*title_only, *json),
      )
    },
    Commands::Readme {
      url,
      mirror,
      output,
    } => commands::readme(&config, url, mirror.as_deref(), output.as_deref()),
    Commands::Init { .. } => Ok(()),
  }
}
