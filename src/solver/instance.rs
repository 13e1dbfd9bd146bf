// src/solver/instance.rs
//! Shared per-round work state
//!
//! A [`WorkDescriptor`] is built once per work round by the host and shared
//! read-mostly across all workers; the bounded [`SolutionBuffer`] inside it
//! is the only mutable shared state. Each worker additionally owns one
//! immutable [`WorkAssignment`] describing its slice of the nonce space.

use crate::solver::message::{MessageTemplate, UINT256_LENGTH};
use crate::solver::sha3::{MidState, digest_high64};
use std::ops::Range;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// One worker's slice of the nonce space, `[work_position, work_position + work_size)`
///
/// Assignments for a round are handed out by the scheduler so that they are
/// pairwise disjoint; the scanner itself never coordinates ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkAssignment {
    /// First nonce in the assigned sub-range
    pub work_position: u64,
    /// Number of nonces to scan
    pub work_size: u64,
}

impl WorkAssignment {
    /// Creates an assignment covering `[work_position, work_position + work_size)`
    pub fn new(work_position: u64, work_size: u64) -> Self {
        Self {
            work_position,
            work_size,
        }
    }

    /// Iterates the assigned nonce range
    pub fn nonces(&self) -> Range<u64> {
        self.work_position..self.work_position.saturating_add(self.work_size)
    }
}

/// Fixed-capacity, append-only buffer of qualifying nonces
///
/// Slots are claimed with a bounded compare-and-swap on the count, so the
/// capacity is never exceeded and no write lands beyond the last slot even
/// when several workers hit simultaneously. A push against a full buffer is
/// a silent drop, not an error: an incomplete result set is a normal outcome
/// of a probabilistic search.
pub struct SolutionBuffer {
    slots: Box<[AtomicU64]>,
    count: AtomicUsize,
    reported: AtomicUsize,
}

impl SolutionBuffer {
    /// Creates an empty buffer with room for `capacity` nonces
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| AtomicU64::new(0)).collect(),
            count: AtomicUsize::new(0),
            reported: AtomicUsize::new(0),
        }
    }

    /// Maximum number of nonces the buffer can hold
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of recorded nonces, `0..=capacity`
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Returns true if no nonce has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a qualifying nonce unless the buffer is full
    ///
    /// Returns false when the nonce was dropped for lack of capacity.
    pub fn push(&self, nonce: u64) -> bool {
        let mut current = self.count.load(Ordering::Relaxed);
        loop {
            if current >= self.slots.len() {
                return false;
            }
            match self.count.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    self.slots[current].store(nonce, Ordering::Release);
                    return true;
                }
                Err(actual) => current = actual,
            }
        }
    }

    /// Claims the next not-yet-reported nonce, if any
    ///
    /// Used by the scheduler to forward discoveries exactly once. A claim
    /// that races the slot store of a concurrent push can observe the slot
    /// before the value lands; the window is a few instructions against
    /// solutions that typically arrive seconds apart.
    pub fn take_unreported(&self) -> Option<u64> {
        let mut cursor = self.reported.load(Ordering::Relaxed);
        loop {
            if cursor >= self.len() {
                return None;
            }
            match self.reported.compare_exchange_weak(
                cursor,
                cursor + 1,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Some(self.slots[cursor].load(Ordering::Acquire)),
                Err(actual) => cursor = actual,
            }
        }
    }

    /// Copies the recorded nonces out in insertion order
    pub fn snapshot(&self) -> Vec<u64> {
        let len = self.len();
        self.slots[..len]
            .iter()
            .map(|slot| slot.load(Ordering::Acquire))
            .collect()
    }
}

/// Device-wide work state shared by all workers for one round
///
/// The message template, target, and midstate are read-only for the round;
/// the solution buffer is the only shared mutable state.
pub struct WorkDescriptor {
    message: MessageTemplate,
    target: [u8; UINT256_LENGTH],
    high64_target: u64,
    midstate: Option<MidState>,
    solutions: SolutionBuffer,
}

impl WorkDescriptor {
    /// Builds the descriptor for a round, precomputing the sponge midstate
    ///
    /// # Arguments
    /// * `message` - Message template for the round
    /// * `target` - Difficulty threshold, 32 bytes big-endian
    /// * `max_solution_count` - Capacity of the solution buffer
    pub fn new(
        message: MessageTemplate,
        target: [u8; UINT256_LENGTH],
        max_solution_count: usize,
    ) -> Self {
        Self {
            message,
            high64_target: digest_high64(&target),
            midstate: Some(MidState::init(&message)),
            target,
            solutions: SolutionBuffer::new(max_solution_count),
        }
    }

    /// Builds a descriptor without a midstate, forcing full-message rehash
    pub fn without_midstate(
        message: MessageTemplate,
        target: [u8; UINT256_LENGTH],
        max_solution_count: usize,
    ) -> Self {
        Self {
            midstate: None,
            ..Self::new(message, target, max_solution_count)
        }
    }

    /// Message template for the round
    pub fn message(&self) -> &MessageTemplate {
        &self.message
    }

    /// Full 256-bit target, big-endian
    pub fn target(&self) -> &[u8; UINT256_LENGTH] {
        &self.target
    }

    /// High 64 bits of the target, used for fast rejection in midstate mode
    pub fn high64_target(&self) -> u64 {
        self.high64_target
    }

    /// Precomputed sponge midstate, if one was built for this round
    pub fn midstate(&self) -> Option<&MidState> {
        self.midstate.as_ref()
    }

    /// Shared solution buffer for the round
    pub fn solutions(&self) -> &SolutionBuffer {
        &self.solutions
    }
}
