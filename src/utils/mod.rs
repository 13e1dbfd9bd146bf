// src/utils/mod.rs
//! Utilities module for common functionality
//!
//! This module contains shared utilities used throughout the solver
//! application, including error handling and logging infrastructure.

/// Error types and handling utilities
///
/// Contains the [`SolverError`] enum which defines all possible error
/// conditions for the solver application, along with conversion
/// implementations.
pub mod error;

/// Logging configuration and utilities
///
/// Provides logging initialization and configuration for the application,
/// including formatting and output destinations.
pub mod logging;

// Re-export for easier access
pub use error::SolverError;
pub use logging::init_logging;
