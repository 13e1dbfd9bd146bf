// src/utils/error.rs
use crate::solver::scheduler;
use std::io;
use thiserror::Error;

/// Main error type for the solver application
///
/// These errors only ever occur in host-side setup and plumbing. The scan
/// loops themselves have no recoverable error paths: the hash primitive is
/// total over its fixed-size domain, and a full solution buffer is a silent
/// drop rather than a fault.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Configuration file or parameter errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or parameter errors (bad hex, wrong lengths)
    #[error("Invalid input: {0}")]
    Input(String),

    /// Thread-to-core affinity binding failures; non-fatal by contract
    #[error("Affinity error: {0}")]
    Affinity(String),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Thread communication channel errors
    #[error("Thread communication error: {0}")]
    Channel(String),
}

/// Converts crossbeam channel send errors for Solutions into SolverError
///
/// Used when failing to forward a recorded solution through inter-thread
/// channels. Wraps the original error in a `Channel` variant with context.
impl From<crossbeam_channel::SendError<scheduler::Solution>> for SolverError {
    fn from(e: crossbeam_channel::SendError<scheduler::Solution>) -> Self {
        SolverError::Channel(format!("Solution send failed: {}", e))
    }
}

/// Converts hex decoding errors into SolverError
///
/// Used when invalid hex data is encountered during configuration parsing
/// of the challenge, address, solution template, or target.
impl From<hex::FromHexError> for SolverError {
    fn from(e: hex::FromHexError) -> Self {
        SolverError::Input(format!("Hex conversion failed: {}", e))
    }
}
