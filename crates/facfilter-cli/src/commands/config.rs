//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use facfilter_core::FacfilterConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file (default: --config, else the default location)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(config_path),
        ConfigCommand::Init(init_args) => init_config(init_args, config_path),
        ConfigCommand::Path => show_path(config_path),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("facfilter")
        .join("config.json")
}

/// Load the configuration named by `--config`, else the default file if it
/// exists, else built-in defaults.
pub fn load(config_path: Option<&str>) -> anyhow::Result<FacfilterConfig> {
    if let Some(path) = config_path {
        return Ok(FacfilterConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(FacfilterConfig::from_file(&default_path)?)
    } else {
        Ok(FacfilterConfig::default())
    }
}

/// Print the configuration `filter` and `batch` would run with.
fn show_config(config_path: Option<&str>) -> anyhow::Result<()> {
    // A missing --config file is an error from load(), not a fallback.
    let source = resolve_path(config_path);
    if config_path.is_none() && !source.exists() {
        println!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            source.display()
        );
    }

    let config = load(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let output_path = args
        .output
        .unwrap_or_else(|| resolve_path(config_path));

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    FacfilterConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn show_path(config_path: Option<&str>) -> anyhow::Result<()> {
    let path = resolve_path(config_path);
    let origin = if config_path.is_some() { "--config" } else { "default" };

    println!("Configuration file ({}): {}", origin, path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else if config_path.is_some() {
        println!("Status: {}", style("missing").red());
    } else {
        println!("Status: {}", style("not created, using defaults").yellow());
        println!("Run 'facfilter config init' to create one.");
    }

    Ok(())
}

/// The file `load` reads: `--config` when given, else the default location.
fn resolve_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}
