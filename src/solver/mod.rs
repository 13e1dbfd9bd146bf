// src/solver/mod.rs
//! Core proof-of-work solving functionality
//!
//! This module contains all components of the CPU nonce search:
//! - Message/solution layout and serialization
//! - Keccak-256 digest and sponge midstate reuse
//! - The big-endian 256-bit comparator
//! - Shared per-round work state and the bounded solution buffer
//! - The two scan strategies and the worker scheduler

/// Big-endian unsigned 256-bit comparison
pub mod compare;

/// Shared per-round work state and worker assignments
pub mod instance;

/// Hash input layout and serialization
pub mod message;

/// Keccak-256 digest and midstate primitives
pub mod sha3;

/// Per-worker scan loops
pub mod scanner;

/// Work partitioning and worker coordination
pub mod scheduler;

// Re-export main components for cleaner imports
pub use self::compare::less_than;
pub use self::instance::{SolutionBuffer, WorkAssignment, WorkDescriptor};
pub use self::message::{MessageTemplate, SolutionTemplate};
pub use self::scanner::{FullHashScan, MidStateScan, ScanStrategy};
pub use self::scheduler::{Scheduler, Solution};
pub use self::sha3::{MidState, keccak256};
