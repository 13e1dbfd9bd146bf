// src/config/mod.rs
//! Configuration management for the solver
//!
//! This module handles all configuration-related functionality including:
//! - Loading and parsing configuration files
//! - Generating configuration templates
//! - Turning the hex-encoded work section into a work descriptor
//!
//! The configuration uses TOML format.

/// Core configuration implementation
///
/// Contains the [`Config`] struct and related types that define
/// the solver's configuration structure and behavior.
pub mod config;

// Re-export key items for easy access
pub use config::{Config, WorkConfig};

use crate::utils::error::SolverError;
use std::path::PathBuf;

/// Loads solver configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the configuration file (anything convertible to PathBuf)
///
/// # Returns
/// * `Ok(Config)` - Successfully loaded configuration
/// * `Err(SolverError)` - If the file couldn't be read or parsed
pub fn load(path: impl Into<PathBuf>) -> Result<Config, SolverError> {
    Config::load(path)
}

/// Generates a commented configuration template
pub fn generate_template() -> String {
    Config::generate_template()
}
