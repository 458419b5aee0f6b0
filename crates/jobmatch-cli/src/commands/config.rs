//! Configuration management commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use jobmatch_cli::config::CONFIG_FILE_NAME;
use jobmatch_cli::Config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Where to write the file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        path: PathBuf,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(cmd: ConfigCommands, config: &Config, source: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config, source),
        ConfigCommands::Init { path, force } => init(&path, force),
    }
}

fn show(config: &Config, source: Option<&Path>) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    match source {
        Some(path) => println!("# Config file: {}\n", path.display()),
        None => println!("# No configuration file found, using defaults\n"),
    }

    let rendered = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    println!("{rendered}");

    Ok(())
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::write_default(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Configuration file created: {}", path.display());

    Ok(())
}
