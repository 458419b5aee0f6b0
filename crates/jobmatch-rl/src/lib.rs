//! jobmatch RL - Tabular Q-learning over job categories
//!
//! This crate holds the Q-table store, the one-step update rule, an
//! epsilon-greedy selector, reward sources for simulation, and the
//! [`Session`] context a front end keeps alive between interactions.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithm;
pub mod q_table;
pub mod reward;
pub mod session;

pub use algorithm::{apply_update, select_action, QLearning};
pub use q_table::{initialize, QTable, RowSnapshot, TableSnapshot};
pub use reward::{ConstantReward, RewardSource, ScriptedReward, UniformReward};
pub use session::{BatchReport, Session, SessionStats};
