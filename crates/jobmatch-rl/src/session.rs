//! Session - owns the live Q-table and coordinates batch updates

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use jobmatch_core::{JobMatchError, Result, Reward};

use crate::algorithm::{update_cell, QLearning};
use crate::q_table::QTable;
use crate::reward::RewardSource;

/// A single user's working context: one live table plus its parameters.
///
/// The host decides when to reinitialize; nothing here recreates the table
/// implicitly.
#[derive(Debug, Clone)]
pub struct Session {
    table: QTable,
    params: QLearning,
    stats: SessionStats,
}

impl Session {
    /// Start a session with a zero-filled table over `states` x `actions`
    pub fn new<S, A>(states: &[S], actions: &[A], params: QLearning) -> Result<Self>
    where
        S: AsRef<str>,
        A: AsRef<str>,
    {
        let table = QTable::new(states, actions)?;

        info!(
            "Session started with {} states, {} actions",
            table.num_states(),
            table.num_actions()
        );

        Ok(Self {
            table,
            params,
            stats: SessionStats::default(),
        })
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn params(&self) -> QLearning {
        self.params
    }

    pub fn set_params(&mut self, params: QLearning) {
        self.params = params;
    }

    /// Discard the table and start over from zeros with the same labels
    pub fn reinitialize(&mut self) {
        self.table = self.table.zeroed_like();
        self.stats = SessionStats::default();
        info!("Q-table reinitialized");
    }

    /// Discard the table and start over with new labels.
    ///
    /// On error the current table is kept.
    pub fn reinitialize_with<S, A>(&mut self, states: &[S], actions: &[A]) -> Result<()>
    where
        S: AsRef<str>,
        A: AsRef<str>,
    {
        self.table = QTable::new(states, actions)?;
        self.stats = SessionStats::default();
        info!(
            "Q-table reinitialized with {} states, {} actions",
            self.table.num_states(),
            self.table.num_actions()
        );
        Ok(())
    }

    /// Apply one update with the session's parameters
    pub fn update(&mut self, state: &str, action: &str, reward: Reward) -> Result<f64> {
        let new_q = self.params.update(&mut self.table, state, action, reward)?;
        self.stats.record(reward);
        Ok(new_q)
    }

    /// Update every (state, action) pair once, row by row, each with a fresh reward.
    ///
    /// Stops at the first non-finite reward; cells already updated keep their values.
    pub fn simulate_batch<W: RewardSource + ?Sized>(&mut self, rewards: &mut W) -> Result<BatchReport> {
        let alpha = self.params.alpha();
        let gamma = self.params.gamma();
        let mut report = BatchReport::default();

        for row in 0..self.table.num_states() {
            for col in 0..self.table.num_actions() {
                let reward = rewards.next_reward(&self.table.states()[row], &self.table.actions()[col]);
                JobMatchError::check_finite("reward", reward)?;

                let before = self.table.value_at(row, col);
                let after = update_cell(&mut self.table, row, col, reward, alpha, gamma);

                report.updates += 1;
                report.total_reward += reward;
                report.max_change = report.max_change.max((after - before).abs());
                self.stats.record(reward);
            }
        }

        self.stats.batches += 1;
        debug!(
            "Batch {} applied {} updates, total reward {}",
            self.stats.batches, report.updates, report.total_reward
        );

        Ok(report)
    }

    /// Epsilon-greedy choice with the session's exploration rate
    pub fn select_action<R: Rng + ?Sized>(&self, state: &str, rng: &mut R) -> Result<&str> {
        self.params.select(&self.table, state, rng)
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}

/// Running statistics since the last (re)initialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub batches: u64,
    pub total_updates: u64,
    pub total_reward: f64,
}

impl SessionStats {
    fn record(&mut self, reward: Reward) {
        self.total_updates += 1;
        self.total_reward += reward;
    }

    pub fn average_reward(&self) -> f64 {
        if self.total_updates > 0 {
            self.total_reward / self.total_updates as f64
        } else {
            0.0
        }
    }
}

/// Outcome of one [`Session::simulate_batch`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub updates: usize,
    pub total_reward: f64,
    /// Largest absolute change to any single cell
    pub max_change: f64,
}
