//! Batch simulation: print the table, update every pair, print it again

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use jobmatch_cli::render::{render, OutputFormat};
use jobmatch_cli::Config;
use jobmatch_rl::Session;

use super::TableArgs;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Number of update passes over every state-action pair
    #[arg(short, long, default_value = "1")]
    pub batches: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub async fn run(args: SimulateArgs, config: &Config) -> Result<()> {
    let simulation = args.table.apply(config);
    let (states, actions) = simulation.labels();

    let mut session = Session::new(&states, &actions, config.params()?)
        .context("Failed to initialize Q-table")?;
    let mut rewards = simulation.reward_source()?;

    let initial = session.table().clone();
    for _ in 0..args.batches {
        session.simulate_batch(&mut rewards)?;
    }

    let stats = session.stats();
    info!(
        "Applied {} updates over {} batches, average reward {:.3}",
        stats.total_updates,
        stats.batches,
        stats.average_reward()
    );

    match args.format {
        OutputFormat::Table => {
            println!("Q-Table:");
            print!("{}", render(&initial, args.format)?);
            println!();
            println!("Updated Q-Table:");
            print!("{}", render(session.table(), args.format)?);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "initial": initial.snapshot(),
                "updated": session.table().snapshot(),
                "params": session.params(),
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
