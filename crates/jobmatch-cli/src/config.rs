//! Configuration loading for the jobmatch CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{ConfigBuilder, Environment, File};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use jobmatch_core::{parse_actions, state_labels, JobMatchError, DEFAULT_ACTIONS};
use jobmatch_rl::{QLearning, UniformReward};

/// Name of the configuration file looked up in the working and user config directories
pub const CONFIG_FILE_NAME: &str = "jobmatch.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "JOBMATCH_CONFIG";

/// Configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub learning: LearningConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Learning rate
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    /// Exploration rate for action selection
    pub epsilon: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        let params = QLearning::default();
        Self {
            alpha: params.alpha(),
            gamma: params.gamma(),
            epsilon: params.epsilon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_states: usize,
    /// Comma-separated job categories
    pub actions: String,
    pub reward_min: i64,
    pub reward_max: i64,
    /// Seed for reproducible rewards and selection; entropy when unset
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_states: 2,
            actions: DEFAULT_ACTIONS.to_string(),
            reward_min: -10,
            reward_max: 10,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// The file to load: an explicit path, then `$JOBMATCH_CONFIG`, then discovery
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| {
                std::env::var_os(CONFIG_PATH_ENV)
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            })
            .or_else(Self::find_config_file)
    }

    /// Load configuration from `path` and `JOBMATCH__*` environment variables
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigBuilder::<config::builder::DefaultState>::default();

        if let Some(path) = path {
            tracing::info!("Loading config from: {:?}", path);
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        } else {
            tracing::info!("No config file found, using defaults");
        }

        // Add environment variables with JOBMATCH prefix, e.g. JOBMATCH__LEARNING__ALPHA
        builder = builder.add_source(
            Environment::with_prefix("JOBMATCH")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Find the configuration file
    pub fn find_config_file() -> Option<PathBuf> {
        // Check in order: ./jobmatch.toml, ~/.config/jobmatch/jobmatch.toml
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config").join("jobmatch").join(CONFIG_FILE_NAME);
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }

    pub fn validate(&self) -> Result<(), JobMatchError> {
        self.params()?;

        if self.simulation.num_states == 0 {
            return Err(JobMatchError::Config(
                "simulation.num_states must be at least 1".to_string(),
            ));
        }
        if parse_actions(&self.simulation.actions).is_empty() {
            return Err(JobMatchError::Config(
                "simulation.actions must name at least one action".to_string(),
            ));
        }
        if self.simulation.reward_min > self.simulation.reward_max {
            return Err(JobMatchError::Config(format!(
                "simulation.reward_min ({}) exceeds simulation.reward_max ({})",
                self.simulation.reward_min, self.simulation.reward_max
            )));
        }

        Ok(())
    }

    /// Learning parameters as a validated [`QLearning`]
    pub fn params(&self) -> Result<QLearning, JobMatchError> {
        QLearning::new(
            self.learning.alpha,
            self.learning.gamma,
            self.learning.epsilon,
        )
    }

    /// Default configuration rendered as TOML
    pub fn default_toml() -> Result<String, JobMatchError> {
        toml::to_string_pretty(&Self::default()).map_err(|e| JobMatchError::Config(e.to_string()))
    }

    /// Write the default configuration to `path`, replacing any existing file
    pub fn write_default(path: &Path) -> Result<(), JobMatchError> {
        std::fs::write(path, Self::default_toml()?)?;
        Ok(())
    }
}

impl SimulationConfig {
    /// State and action labels for a new table
    pub fn labels(&self) -> (Vec<String>, Vec<String>) {
        (state_labels(self.num_states), parse_actions(&self.actions))
    }

    /// Reward source over `[reward_min, reward_max]`
    pub fn reward_source(&self) -> Result<UniformReward, JobMatchError> {
        match self.seed {
            Some(seed) => UniformReward::seeded(self.reward_min, self.reward_max, seed),
            None => UniformReward::new(self.reward_min, self.reward_max),
        }
    }

    /// Generator for action selection, independent of the reward stream
    pub fn selection_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        }
    }
}
