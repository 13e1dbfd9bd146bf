// src/cli/mod.rs
//! Command-line interface definitions
//!
//! Declares the clap command tree for the solver binary: solving a
//! configured work round, benchmarking the scan loops, and generating
//! configuration templates.

/// Command and option definitions
pub mod commands;

// Re-export for easier access
pub use commands::{Action, BenchmarkOptions, Commands, ConfigOptions, SolveOptions};
