//! Shared label types

/// Opaque label identifying a row of the Q-table
pub type StateId = String;

/// Opaque label identifying a column of the Q-table (a job category)
pub type ActionId = String;

/// Reward signal supplied for one update
pub type Reward = f64;

/// Job categories offered by default
pub const DEFAULT_ACTIONS: &str =
    "Warehouse Associate, Food Service Worker, Delivery Driver, Cashier, Mechanic";

/// Generate `count` state labels: "State 1" through "State {count}"
pub fn state_labels(count: usize) -> Vec<StateId> {
    (1..=count).map(|i| format!("State {i}")).collect()
}

/// Split a comma-separated action list, trimming surrounding whitespace.
///
/// Empty segments (e.g. from a trailing comma) are dropped.
pub fn parse_actions(text: &str) -> Vec<ActionId> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_labels() {
        assert_eq!(state_labels(2), vec!["State 1", "State 2"]);
        assert!(state_labels(0).is_empty());
    }

    #[test]
    fn test_parse_actions_trims() {
        let actions = parse_actions(" Cashier ,Mechanic,  Delivery Driver");
        assert_eq!(actions, vec!["Cashier", "Mechanic", "Delivery Driver"]);
    }

    #[test]
    fn test_parse_actions_drops_empty_segments() {
        assert_eq!(parse_actions("Cashier,, ,Mechanic,"), vec!["Cashier", "Mechanic"]);
        assert!(parse_actions("").is_empty());
    }

    #[test]
    fn test_default_actions() {
        let actions = parse_actions(DEFAULT_ACTIONS);
        assert_eq!(actions.len(), 5);
        assert_eq!(actions[0], "Warehouse Associate");
        assert_eq!(actions[4], "Mechanic");
    }
}
