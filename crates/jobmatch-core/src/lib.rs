//! jobmatch Core - Error taxonomy and shared label types
//!
//! This crate provides the foundational types used by the Q-learning
//! engine and the command line front end.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{JobMatchError, LabelKind, Result};
pub use types::*;
