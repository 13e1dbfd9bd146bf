// src/solver/scanner.rs
//! Per-worker scan loops
//!
//! A scanner executes one worker's [`WorkAssignment`] against the shared
//! [`WorkDescriptor`], in one of two modes:
//! - [`FullHashScan`] rehashes the complete 84-byte message per candidate
//! - [`MidStateScan`] resumes the precomputed sponge midstate per candidate
//!
//! Both modes record exactly the same qualifying nonces; midstate mode only
//! trades the host's one-time prefix absorption against per-nonce savings.
//! The loops are pure CPU computation with no blocking, no I/O, and no
//! recoverable errors; a full solution buffer drops candidates silently.

use crate::solver::compare::less_than;
use crate::solver::instance::{WorkAssignment, WorkDescriptor};
use crate::solver::sha3::{digest_high64, keccak256};
use crate::types::ScanMode;

/// Common interface for the two scanning strategies
///
/// Strategies are stateless; all per-round state lives in the descriptor and
/// all per-worker state in the assignment, so one strategy instance can be
/// shared by every worker thread.
pub trait ScanStrategy: Send + Sync {
    /// Scans the assigned nonce range, recording qualifying nonces
    ///
    /// Tests every nonce in `[work_position, work_position + work_size)`
    /// and no others; non-qualifying nonces leave no side effect.
    fn scan(&self, work: &WorkDescriptor, assignment: &WorkAssignment);

    /// The mode this strategy implements
    fn scan_mode(&self) -> ScanMode;
}

/// Full-message rehash scanning
///
/// Used whenever no midstate is available for the round. Works from private
/// copies of the shared templates; the descriptor is never mutated.
pub struct FullHashScan;

impl ScanStrategy for FullHashScan {
    fn scan(&self, work: &WorkDescriptor, assignment: &WorkAssignment) {
        // Worker-local copies; the shared templates stay untouched.
        let message = *work.message();
        let target = *work.target();
        let solutions = work.solutions();

        for nonce in assignment.nonces() {
            let digest = keccak256(&message.to_bytes(nonce));
            if less_than(&digest, &target) {
                solutions.push(nonce);
            }
        }
    }

    fn scan_mode(&self) -> ScanMode {
        ScanMode::FullHash
    }
}

/// Midstate-reuse scanning
///
/// Resumes a private copy of the round's sponge midstate per candidate and
/// prunes with the truncated high-64-bit target before the full compare.
/// The pruning test uses `<=`, which `digest < target` always implies, so
/// it can never skip a true solution; recording is still gated by the full
/// 256-bit compare. Falls back to full-message rehash when the descriptor
/// carries no midstate.
pub struct MidStateScan;

impl ScanStrategy for MidStateScan {
    fn scan(&self, work: &WorkDescriptor, assignment: &WorkAssignment) {
        let Some(midstate) = work.midstate().copied() else {
            log::debug!("no midstate for this round, falling back to full-message rehash");
            FullHashScan.scan(work, assignment);
            return;
        };

        let high64_target = work.high64_target();
        let target = *work.target();
        let solutions = work.solutions();

        for nonce in assignment.nonces() {
            let digest = midstate.digest(nonce);
            if digest_high64(&digest) <= high64_target && less_than(&digest, &target) {
                solutions.push(nonce);
            }
        }
    }

    fn scan_mode(&self) -> ScanMode {
        ScanMode::MidState
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::message::{MessageTemplate, SolutionTemplate};
    use hex_literal::hex;

    fn test_descriptor(target: [u8; 32], max_solutions: usize) -> WorkDescriptor {
        let solution = SolutionTemplate::new(hex!(
            "c1912fee45d61c87cc5ea59dae31190fffff232d000000000000000000000000"
        ));
        let message = MessageTemplate::new(
            hex!("a7b3d1e86f90cb2e15d84c3a6f2e9b05317ac84d9e6b1f20c3d5a7e8f9012b4c"),
            hex!("c1912fee45d61c87cc5ea59dae31190fffff232d"),
            solution,
        );
        WorkDescriptor::new(message, target, max_solutions)
    }

    /// Permissive target: digests with a leading byte below 0x20 qualify,
    /// roughly one candidate in eight.
    fn permissive_target() -> [u8; 32] {
        let mut target = [0xFF; 32];
        target[0] = 0x20;
        target
    }

    #[test]
    fn test_max_target_accepts_every_nonce_in_order() {
        let work = test_descriptor([0xFF; 32], 16);
        FullHashScan.scan(&work, &WorkAssignment::new(7, 5));

        assert_eq!(work.solutions().snapshot(), vec![7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_zero_target_accepts_nothing() {
        let work = test_descriptor([0u8; 32], 16);
        FullHashScan.scan(&work, &WorkAssignment::new(0, 64));
        MidStateScan.scan(&work, &WorkAssignment::new(0, 64));

        assert!(work.solutions().is_empty());
    }

    #[test]
    fn test_empty_assignment_records_nothing() {
        let work = test_descriptor([0xFF; 32], 16);
        FullHashScan.scan(&work, &WorkAssignment::new(1000, 0));
        MidStateScan.scan(&work, &WorkAssignment::new(1000, 0));

        assert!(work.solutions().is_empty());
    }

    #[test]
    fn test_capacity_bound_holds_and_keeps_insertion_order() {
        let work = test_descriptor([0xFF; 32], 4);
        FullHashScan.scan(&work, &WorkAssignment::new(100, 10));

        assert_eq!(work.solutions().len(), 4);
        assert_eq!(work.solutions().snapshot(), vec![100, 101, 102, 103]);
    }

    #[test]
    fn test_modes_record_identical_solution_sets() {
        let full = test_descriptor(permissive_target(), 512);
        let mid = test_descriptor(permissive_target(), 512);

        FullHashScan.scan(&full, &WorkAssignment::new(0, 2000));
        MidStateScan.scan(&mid, &WorkAssignment::new(0, 2000));

        let found = full.solutions().snapshot();
        assert!(!found.is_empty(), "test target should yield solutions");
        assert_eq!(found, mid.solutions().snapshot());
    }

    #[test]
    fn test_midstate_falls_back_without_midstate() {
        let solution = SolutionTemplate::new([1u8; 32]);
        let message = MessageTemplate::new([2u8; 32], [3u8; 20], solution);
        let work = WorkDescriptor::without_midstate(message, permissive_target(), 512);
        let reference = WorkDescriptor::new(message, permissive_target(), 512);

        MidStateScan.scan(&work, &WorkAssignment::new(0, 1000));
        FullHashScan.scan(&reference, &WorkAssignment::new(0, 1000));

        assert_eq!(work.solutions().snapshot(), reference.solutions().snapshot());
    }

    #[test]
    fn test_single_qualifying_nonce_scenario() {
        // Derive a target that sits strictly between the smallest and
        // second-smallest digest of the range, so exactly one nonce wins.
        let probe = test_descriptor([0xFF; 32], 16);
        let mut digests: Vec<(u64, [u8; 32])> = (0..10)
            .map(|nonce| (nonce, keccak256(&probe.message().to_bytes(nonce))))
            .collect();
        digests.sort_by(|a, b| a.1.cmp(&b.1));
        let winner = digests[0].0;
        let target = digests[1].1;

        let work = test_descriptor(target, 4);
        FullHashScan.scan(&work, &WorkAssignment::new(0, 10));
        assert_eq!(work.solutions().snapshot(), vec![winner]);

        let mid = test_descriptor(target, 4);
        MidStateScan.scan(&mid, &WorkAssignment::new(0, 10));
        assert_eq!(mid.solutions().snapshot(), vec![winner]);
    }

    #[test]
    fn test_scan_modes_report_themselves() {
        assert_eq!(FullHashScan.scan_mode(), ScanMode::FullHash);
        assert_eq!(MidStateScan.scan_mode(), ScanMode::MidState);
    }
}
