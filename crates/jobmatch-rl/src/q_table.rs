//! Q-Table store: state label -> action label -> quality value

use std::collections::HashMap;

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use tracing::warn;

use jobmatch_core::{ActionId, JobMatchError, LabelKind, Result, StateId};

/// Tabular Q-value store.
///
/// Rows are states and columns are actions, both kept in insertion order.
/// Every state carries the same action set because values live in one dense
/// matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    states: Vec<StateId>,
    actions: Vec<ActionId>,
    state_index: HashMap<StateId, usize>,
    action_index: HashMap<ActionId, usize>,
    values: Array2<f64>,
}

impl QTable {
    /// Create a zero-filled table over `states` x `actions`.
    ///
    /// Duplicate labels collapse to one key at the position of their first
    /// occurrence.
    pub fn new<S, A>(states: &[S], actions: &[A]) -> Result<Self>
    where
        S: AsRef<str>,
        A: AsRef<str>,
    {
        let (states, state_index) = index_labels(LabelKind::State, states)?;
        let (actions, action_index) = index_labels(LabelKind::Action, actions)?;
        let values = Array2::zeros((states.len(), actions.len()));

        Ok(Self {
            states,
            actions,
            state_index,
            action_index,
            values,
        })
    }

    /// A fresh zero-filled table over the same labels
    pub fn zeroed_like(&self) -> Self {
        Self {
            states: self.states.clone(),
            actions: self.actions.clone(),
            state_index: self.state_index.clone(),
            action_index: self.action_index.clone(),
            values: Array2::zeros(self.values.raw_dim()),
        }
    }

    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    pub fn contains_state(&self, state: &str) -> bool {
        self.state_index.contains_key(state)
    }

    pub fn contains_action(&self, action: &str) -> bool {
        self.action_index.contains_key(action)
    }

    /// Current quality value for (state, action)
    pub fn get(&self, state: &str, action: &str) -> Result<f64> {
        let (row, col) = self.locate(state, action)?;
        Ok(self.values[[row, col]])
    }

    /// All action values of `state`, in action order
    pub fn row(&self, state: &str) -> Result<ArrayView1<'_, f64>> {
        let row = self.state_position(state)?;
        Ok(self.values.row(row))
    }

    /// Largest action value of `state`
    pub fn max_value(&self, state: &str) -> Result<f64> {
        let row = self.state_position(state)?;
        Ok(self.row_max(row))
    }

    /// Action with the largest value in `state`; ties go to the lowest action index
    pub fn best_action(&self, state: &str) -> Result<&str> {
        let row = self.state_position(state)?;
        Ok(self.actions[self.best_column(row)].as_str())
    }

    /// Iterate over every (state, action, value) in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.states.iter().enumerate().flat_map(move |(row, state)| {
            self.actions
                .iter()
                .enumerate()
                .map(move |(col, action)| (state.as_str(), action.as_str(), self.values[[row, col]]))
        })
    }

    /// Ordered, serializable view of the table
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            actions: self.actions.clone(),
            rows: self
                .states
                .iter()
                .zip(self.values.rows())
                .map(|(state, values)| RowSnapshot {
                    state: state.clone(),
                    values: values.to_vec(),
                })
                .collect(),
        }
    }

    pub(crate) fn state_position(&self, state: &str) -> Result<usize> {
        self.state_index
            .get(state)
            .copied()
            .ok_or_else(|| JobMatchError::state_not_found(state))
    }

    pub(crate) fn action_position(&self, action: &str) -> Result<usize> {
        self.action_index
            .get(action)
            .copied()
            .ok_or_else(|| JobMatchError::action_not_found(action))
    }

    pub(crate) fn locate(&self, state: &str, action: &str) -> Result<(usize, usize)> {
        Ok((self.state_position(state)?, self.action_position(action)?))
    }

    pub(crate) fn row_max(&self, row: usize) -> f64 {
        self.values
            .row(row)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub(crate) fn best_column(&self, row: usize) -> usize {
        let mut best = 0;
        for (col, &value) in self.values.row(row).iter().enumerate() {
            if value > self.values[[row, best]] {
                best = col;
            }
        }
        best
    }

    pub(crate) fn value_at(&self, row: usize, col: usize) -> f64 {
        self.values[[row, col]]
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        &mut self.values[[row, col]]
    }
}

/// Construct a zero-filled table; see [`QTable::new`]
pub fn initialize<S, A>(states: &[S], actions: &[A]) -> Result<QTable>
where
    S: AsRef<str>,
    A: AsRef<str>,
{
    QTable::new(states, actions)
}

fn index_labels<L: AsRef<str>>(
    kind: LabelKind,
    labels: &[L],
) -> Result<(Vec<String>, HashMap<String, usize>)> {
    if labels.is_empty() {
        return Err(JobMatchError::InvalidArgument(format!(
            "{kind} list must not be empty"
        )));
    }

    let mut ordered = Vec::with_capacity(labels.len());
    let mut index = HashMap::with_capacity(labels.len());

    for label in labels {
        let label = label.as_ref();
        if index.contains_key(label) {
            warn!("Duplicate {} label {:?} collapsed", kind, label);
            continue;
        }
        index.insert(label.to_string(), ordered.len());
        ordered.push(label.to_string());
    }

    Ok((ordered, index))
}

/// Serializable view of a [`QTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub actions: Vec<ActionId>,
    pub rows: Vec<RowSnapshot>,
}

/// One state row in a [`TableSnapshot`]; `values` follow the snapshot's action order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub state: StateId,
    pub values: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> QTable {
        QTable::new(&["S1", "S2"], &["X", "Y"]).unwrap()
    }

    #[test]
    fn test_new_is_zero_filled() {
        let table = sample_table();

        assert_eq!(table.states(), ["S1", "S2"]);
        assert_eq!(table.actions(), ["X", "Y"]);
        for (_, _, value) in table.iter() {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn test_empty_labels_rejected() {
        let empty: [&str; 0] = [];

        let err = QTable::new(&empty, &["X"]).unwrap_err();
        assert!(matches!(err, JobMatchError::InvalidArgument(_)));

        let err = QTable::new(&["S1"], &empty).unwrap_err();
        assert!(matches!(err, JobMatchError::InvalidArgument(_)));
    }

    #[test]
    fn test_duplicate_labels_collapse() {
        let table = QTable::new(&["S1", "S2", "S1"], &["X", "Y", "X"]).unwrap();

        assert_eq!(table.states(), ["S1", "S2"]);
        assert_eq!(table.actions(), ["X", "Y"]);
        assert_eq!(table.iter().count(), 4);
    }

    #[test]
    fn test_get_unknown_keys() {
        let table = sample_table();

        assert!(matches!(
            table.get("S3", "X"),
            Err(JobMatchError::KeyNotFound {
                kind: LabelKind::State,
                ..
            })
        ));
        assert!(matches!(
            table.get("S1", "Z"),
            Err(JobMatchError::KeyNotFound {
                kind: LabelKind::Action,
                ..
            })
        ));
    }

    #[test]
    fn test_max_and_best_action() {
        let mut table = sample_table();
        *table.cell_mut(0, 0) = 2.0;
        *table.cell_mut(0, 1) = 5.0;

        assert_eq!(table.max_value("S1").unwrap(), 5.0);
        assert_eq!(table.best_action("S1").unwrap(), "Y");
    }

    #[test]
    fn test_best_action_tie_goes_to_first() {
        let table = QTable::new(&["S1"], &["A", "B", "C"]).unwrap();
        assert_eq!(table.best_action("S1").unwrap(), "A");
    }

    #[test]
    fn test_max_of_negative_row() {
        let mut table = sample_table();
        *table.cell_mut(1, 0) = -3.0;
        *table.cell_mut(1, 1) = -1.5;

        assert_eq!(table.max_value("S2").unwrap(), -1.5);
    }

    #[test]
    fn test_zeroed_like() {
        let mut table = sample_table();
        *table.cell_mut(1, 1) = 7.0;

        let fresh = table.zeroed_like();
        assert_eq!(fresh, sample_table());
        assert_eq!(table.get("S2", "Y").unwrap(), 7.0);
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let mut table = QTable::new(&["B", "A"], &["Y", "X"]).unwrap();
        *table.cell_mut(1, 0) = 1.25;

        let snapshot = table.snapshot();
        assert_eq!(snapshot.actions, vec!["Y", "X"]);
        assert_eq!(snapshot.rows[0].state, "B");
        assert_eq!(snapshot.rows[1].state, "A");
        assert_eq!(snapshot.rows[1].values, vec![1.25, 0.0]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["rows"][1]["values"][0], 1.25);
    }
}
