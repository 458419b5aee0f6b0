//! jobmatch CLI library - configuration, rendering and the interactive session
//!
//! The binary in `main.rs` wires these into clap subcommands.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

pub mod config;
pub mod render;
pub mod repl;

pub use config::Config;
pub use render::OutputFormat;
