//! Error types for jobmatch

use thiserror::Error;

/// Main error type for jobmatch
#[derive(Error, Debug)]
pub enum JobMatchError {
    /// Empty state or action list passed to table construction
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Lookup or update referencing a label absent from the table
    #[error("Unknown {kind}: {key:?}")]
    KeyNotFound { kind: LabelKind, key: String },

    /// Learning parameter or reward outside its domain
    #[error("Invalid parameter {name}: {value} (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which level of the table a missing key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    State,
    Action,
}

impl std::fmt::Display for LabelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelKind::State => write!(f, "state"),
            LabelKind::Action => write!(f, "action"),
        }
    }
}

impl JobMatchError {
    pub fn state_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound {
            kind: LabelKind::State,
            key: key.into(),
        }
    }

    pub fn action_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound {
            kind: LabelKind::Action,
            key: key.into(),
        }
    }

    /// Check that `value` lies in the closed unit interval.
    ///
    /// NaN is rejected along with out-of-range values.
    pub fn check_unit_interval(name: &'static str, value: f64) -> Result<f64> {
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(Self::InvalidParameter {
                name,
                value,
                expected: "a value in [0, 1]",
            })
        }
    }

    /// Check that `value` is a finite number
    pub fn check_finite(name: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::InvalidParameter {
                name,
                value,
                expected: "a finite number",
            })
        }
    }
}

/// Result type alias for jobmatch operations
pub type Result<T> = std::result::Result<T, JobMatchError>;
