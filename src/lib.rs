//! SoliditySHA3 Miner - CPU keccak256 proof-of-work solver in Rust
//!
//! This crate implements the computational kernel of an ERC-918 style token
//! miner: scanning disjoint 64-bit nonce ranges over a fixed 84-byte message
//! (challenge || address || solution), testing each keccak256 digest against
//! a 256-bit difficulty target, and collecting qualifying nonces into a
//! bounded shared buffer. It provides:
//! - Two scanning strategies (full-message rehash and sponge midstate reuse)
//! - A worker scheduler with disjoint range partitioning and optional
//!   thread-to-core pinning
//! - Hashrate and hardware statistics reporting

#![warn(missing_docs)]
#![deny(unsafe_code)]

/// Solver core: message layout, hashing, comparison, scanning, scheduling
pub mod solver;

/// CPU identification and thread affinity services
pub mod cpu;

/// Statistics collection and reporting functionality
pub mod stats;

/// Utility functions and error handling
pub mod utils;

/// Command-line interface definitions
pub mod cli;

/// Configuration management
pub mod config;

/// Shared type definitions
pub mod types;

// Core exports
pub use cli::Commands;
pub use config::Config;
pub use solver::{
    FullHashScan, MessageTemplate, MidState, MidStateScan, ScanStrategy, Scheduler, Solution,
    SolutionBuffer, SolutionTemplate, WorkAssignment, WorkDescriptor, keccak256, less_than,
};
pub use stats::{HardwareStats, SolverStats, StatsReporter};
pub use types::ScanMode;
pub use utils::{SolverError, init_logging};
