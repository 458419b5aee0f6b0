//! Epsilon-greedy action selection over a (optionally trained) table

use anyhow::{Context, Result};
use clap::Args;

use jobmatch_cli::Config;
use jobmatch_rl::{QLearning, Session};

use super::TableArgs;

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// State to choose an action for
    #[arg(short, long, default_value = "State 1")]
    pub state: String,

    #[command(flatten)]
    pub table: TableArgs,

    /// Exploration rate (defaults to learning.epsilon)
    #[arg(short, long)]
    pub epsilon: Option<f64>,

    /// Simulated update passes to run before selecting
    #[arg(long, default_value = "0")]
    pub train: usize,

    /// Number of selections to draw
    #[arg(long, default_value = "1")]
    pub trials: usize,
}

pub async fn run(args: SelectArgs, config: &Config) -> Result<()> {
    let simulation = args.table.apply(config);
    let (states, actions) = simulation.labels();

    let configured = config.params()?;
    let params = QLearning::new(
        configured.alpha(),
        configured.gamma(),
        args.epsilon.unwrap_or(configured.epsilon()),
    )?;

    let mut session =
        Session::new(&states, &actions, params).context("Failed to initialize Q-table")?;
    let mut rewards = simulation.reward_source()?;
    let mut rng = simulation.selection_rng();

    for _ in 0..args.train {
        session.simulate_batch(&mut rewards)?;
    }

    let mut counts = vec![0usize; session.table().num_actions()];
    for _ in 0..args.trials {
        let action = session.select_action(&args.state, &mut rng)?;
        if let Some(index) = session.table().actions().iter().position(|a| a == action) {
            counts[index] += 1;
        }
    }

    let best = session.table().best_action(&args.state)?;
    println!(
        "State: {} (epsilon {}, {} training passes)",
        args.state,
        params.epsilon(),
        args.train
    );
    println!("Greedy action: {best}\n");
    println!("{:<30} {:>10} {:>8}", "ACTION", "Q-VALUE", "CHOSEN");
    println!("{}", "-".repeat(50));
    for (action, count) in session.table().actions().iter().zip(&counts) {
        let value = session.table().get(&args.state, action)?;
        println!("{action:<30} {value:>10.4} {count:>8}");
    }

    Ok(())
}
