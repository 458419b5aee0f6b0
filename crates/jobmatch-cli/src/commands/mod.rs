//! CLI command modules

pub mod config;
pub mod select;
pub mod session;
pub mod simulate;

use clap::Args;

use jobmatch_cli::config::SimulationConfig;
use jobmatch_cli::Config;

/// Table shape options
#[derive(Args, Debug, Clone, Default)]
pub struct ShapeArgs {
    /// Number of states ("State 1" .. "State N")
    #[arg(short = 'n', long)]
    pub states: Option<usize>,

    /// Comma-separated job categories used as actions
    #[arg(short, long)]
    pub actions: Option<String>,
}

impl ShapeArgs {
    /// Overlay command line options on the configured simulation settings
    pub fn apply(&self, config: &Config) -> SimulationConfig {
        let mut simulation = config.simulation.clone();
        if let Some(states) = self.states {
            simulation.num_states = states;
        }
        if let Some(actions) = &self.actions {
            simulation.actions.clone_from(actions);
        }
        simulation
    }
}

/// Shape plus seed, for commands that draw rewards or explore
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Seed for reproducible rewards and action selection
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TableArgs {
    pub fn apply(&self, config: &Config) -> SimulationConfig {
        let mut simulation = self.shape.apply(config);
        if self.seed.is_some() {
            simulation.seed = self.seed;
        }
        simulation
    }
}
