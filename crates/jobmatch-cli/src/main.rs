//! jobmatch CLI - Q-learning table for job match scores
//!
//! Builds a table of states x job categories, applies simulated reward
//! updates, and prints the table before and after.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unused_async)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobmatch_cli::render::{render, OutputFormat};
use jobmatch_cli::Config;
use jobmatch_rl::initialize;

mod commands;

use commands::{config, select, session, simulate, ShapeArgs};

#[derive(Parser)]
#[command(name = "jobmatch")]
#[command(author, version, about = "Q-Learning Table for Job Match Score", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $JOBMATCH_CONFIG, ./jobmatch.toml, then ~/.config/jobmatch/jobmatch.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a freshly initialized Q-table
    Show {
        #[command(flatten)]
        table: ShapeArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Simulate reward updates for every state-action pair
    Simulate(simulate::SimulateArgs),

    /// Choose an action for a state with epsilon-greedy selection
    Select(select::SelectArgs),

    /// Start an interactive session that keeps one table alive
    Session(session::SessionArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.clone());
    let config = Config::load_from(config_path.as_deref()).context("Failed to load configuration")?;

    // Initialize logging based on verbosity
    let log_level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("jobmatch={log_level},jobmatch_cli={log_level},jobmatch_rl={log_level}")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!(?config_path, "Configuration loaded");

    match cli.command {
        Commands::Show { table, format } => show_table(&table, format, &config).await,
        Commands::Simulate(args) => simulate::run(args, &config).await,
        Commands::Select(args) => select::run(args, &config).await,
        Commands::Session(args) => session::run(args, &config).await,
        Commands::Config(cmd) => config::run(cmd, &config, config_path.as_deref()).await,
    }
}

async fn show_table(args: &ShapeArgs, format: OutputFormat, config: &Config) -> Result<()> {
    let (states, actions) = args.apply(config).labels();
    let table = initialize(&states, &actions).context("Failed to initialize Q-table")?;

    if format == OutputFormat::Table {
        println!("Q-Table:");
    }
    print!("{}", render(&table, format)?);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}
