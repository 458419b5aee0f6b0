//! One-step Q-learning update and epsilon-greedy selection

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use jobmatch_core::{JobMatchError, Result, Reward};

use crate::q_table::QTable;

/// Q-learning hyperparameters, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QLearning {
    alpha: f64,
    gamma: f64,
    epsilon: f64,
}

impl QLearning {
    pub fn new(alpha: f64, gamma: f64, epsilon: f64) -> Result<Self> {
        Ok(Self {
            alpha: JobMatchError::check_unit_interval("alpha", alpha)?,
            gamma: JobMatchError::check_unit_interval("gamma", gamma)?,
            epsilon: JobMatchError::check_unit_interval("epsilon", epsilon)?,
        })
    }

    /// Learning rate
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Discount factor
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Apply one update to `table` with these parameters
    pub fn update(
        &self,
        table: &mut QTable,
        state: &str,
        action: &str,
        reward: Reward,
    ) -> Result<f64> {
        apply_update(table, state, action, reward, self.alpha, self.gamma)
    }

    /// Epsilon-greedy choice in `state` with this exploration rate
    pub fn select<'a, R: Rng + ?Sized>(
        &self,
        table: &'a QTable,
        state: &str,
        rng: &mut R,
    ) -> Result<&'a str> {
        select_action(table, state, self.epsilon, rng)
    }
}

impl Default for QLearning {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
        }
    }
}

/// Apply `Q(s,a) <- Q(s,a) + alpha * (r + gamma * max_a' Q(s,a') - Q(s,a))`.
///
/// The bootstrap term is the maximum over the *same* state's row: there is
/// no transition to a separate next state. Returns the new cell value. On
/// error the table is left untouched.
pub fn apply_update(
    table: &mut QTable,
    state: &str,
    action: &str,
    reward: Reward,
    alpha: f64,
    gamma: f64,
) -> Result<f64> {
    JobMatchError::check_unit_interval("alpha", alpha)?;
    JobMatchError::check_unit_interval("gamma", gamma)?;
    JobMatchError::check_finite("reward", reward)?;

    let (row, col) = table.locate(state, action)?;
    let new_q = update_cell(table, row, col, reward, alpha, gamma);

    debug!(state, action, reward, new_q, "Q-value updated");

    Ok(new_q)
}

/// Update by position; parameters are assumed already validated
pub(crate) fn update_cell(
    table: &mut QTable,
    row: usize,
    col: usize,
    reward: Reward,
    alpha: f64,
    gamma: f64,
) -> f64 {
    let max_next_q = table.row_max(row);
    let cell = table.cell_mut(row, col);
    let current_q = *cell;

    let temporal_difference = reward + gamma * max_next_q - current_q;
    *cell = current_q + alpha * temporal_difference;
    *cell
}

/// Epsilon-greedy action selection.
///
/// With probability `epsilon` an action is drawn uniformly from the state's
/// actions; otherwise the highest-valued action is returned, ties going to
/// the lowest action index.
pub fn select_action<'a, R: Rng + ?Sized>(
    table: &'a QTable,
    state: &str,
    epsilon: f64,
    rng: &mut R,
) -> Result<&'a str> {
    JobMatchError::check_unit_interval("epsilon", epsilon)?;
    let row = table.state_position(state)?;

    let col = if rng.gen::<f64>() < epsilon {
        rng.gen_range(0..table.num_actions())
    } else {
        table.best_column(row)
    };

    let action = table.actions()[col].as_str();
    debug!(state, action, epsilon, "Action selected");

    Ok(action)
}
