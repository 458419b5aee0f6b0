//! Interactive session over stdin

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use jobmatch_cli::render::OutputFormat;
use jobmatch_cli::repl::{Flow, Repl, ReplCommand, HELP};
use jobmatch_cli::Config;
use jobmatch_rl::Session;

use super::TableArgs;

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Output format for printed tables
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub async fn run(args: SessionArgs, config: &Config) -> Result<()> {
    let simulation = args.table.apply(config);
    let (states, actions) = simulation.labels();

    let session = Session::new(&states, &actions, config.params()?)
        .context("Failed to initialize Q-table")?;
    let mut repl = Repl::new(
        session,
        simulation.reward_source()?,
        simulation.selection_rng(),
        args.format,
    );

    println!("Q-Learning Table for Job Match Score");
    println!("{HELP}\n");

    let mut stdout = std::io::stdout();
    repl.execute(ReplCommand::Show, &mut stdout)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let flow = ReplCommand::parse(&line).and_then(|command| match command {
            Some(command) => repl.execute(command, &mut stdout),
            None => Ok(Flow::Continue),
        });

        match flow {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => println!("Error: {e}"),
        }
    }

    let stats = repl.session().stats();
    info!(
        "Session ended after {} updates, average reward {:.3}",
        stats.total_updates,
        stats.average_reward()
    );

    Ok(())
}
