// src/solver/scheduler.rs
//! Work partitioning and worker coordination
//!
//! The scheduler is the external partitioner the scan loops rely on: it
//! hands each worker thread pairwise-disjoint work assignments claimed from
//! a shared atomic nonce cursor, holds the current round's work descriptor
//! in an atomically swappable slot, and forwards recorded solutions to the
//! host over a channel.

use crate::cpu;
use crate::solver::instance::{WorkAssignment, WorkDescriptor};
use crate::solver::scanner::ScanStrategy;
use crate::solver::sha3::keccak256;
use arc_swap::ArcSwap;
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// A qualifying nonce found by a worker, with its digest recomputed for
/// host-side verification and submission
#[derive(Debug, Clone)]
pub struct Solution {
    /// Nonce that produced the qualifying digest
    pub nonce: u64,
    /// Digest of the full message for this nonce
    pub digest: [u8; 32],
}

/// Coordinates scan workers over the current work round
pub struct Scheduler {
    /// Current round's descriptor (atomically swappable)
    current_work: Arc<ArcSwap<Option<Arc<WorkDescriptor>>>>,
    /// Atomic cursor carving disjoint assignments out of the nonce space
    next_position: Arc<AtomicU64>,
    /// Channel for forwarding recorded solutions to the host
    solution_sender: Sender<Solution>,
    /// Optional channel for reporting per-assignment hash counts
    hash_sender: Option<Sender<u64>>,
    /// Flag to control worker threads
    active: Arc<AtomicBool>,
    /// Number of nonces in each claimed assignment
    work_size: u64,
    /// Whether workers pin themselves to a logical core
    pin_threads: bool,
}

impl Scheduler {
    /// Creates a new Scheduler
    ///
    /// # Arguments
    /// * `solution_sender` - Channel receiving every recorded solution
    /// * `work_size` - Nonces per claimed assignment; also the cancellation
    ///   granularity, since a scan is not interruptible mid-assignment
    pub fn new(solution_sender: Sender<Solution>, work_size: u64) -> Self {
        Scheduler {
            current_work: Arc::new(ArcSwap::from_pointee(None)),
            next_position: Arc::new(AtomicU64::new(0)),
            solution_sender,
            hash_sender: None,
            active: Arc::new(AtomicBool::new(true)),
            work_size,
            pin_threads: false,
        }
    }

    /// Attaches a hash-count channel, typically from the stats reporter
    pub fn with_hash_sender(mut self, hash_sender: Sender<u64>) -> Self {
        self.hash_sender = Some(hash_sender);
        self
    }

    /// Enables best-effort pinning of each worker to a logical core
    pub fn with_pinned_threads(mut self, pin_threads: bool) -> Self {
        self.pin_threads = pin_threads;
        self
    }

    /// Installs a new work round, restarting the nonce cursor
    ///
    /// Workers pick the new descriptor up at their next assignment claim;
    /// in-flight assignments against the previous round finish first.
    pub fn submit_work(&self, work: WorkDescriptor) {
        self.current_work.store(Arc::new(Some(Arc::new(work))));
        self.next_position.store(0, Ordering::SeqCst);
    }

    /// Spawns the worker threads
    ///
    /// # Arguments
    /// * `strategy` - Scanning strategy shared by all workers
    /// * `workers` - Number of worker threads to spawn
    pub fn start(&self, strategy: Arc<dyn ScanStrategy>, workers: usize) {
        let cores = num_cpus::get();

        for worker_id in 0..workers {
            let work_slot = self.current_work.clone();
            let next_position = self.next_position.clone();
            let solution_sender = self.solution_sender.clone();
            let hash_sender = self.hash_sender.clone();
            let active = self.active.clone();
            let work_size = self.work_size;
            let pin_threads = self.pin_threads;
            let strategy = strategy.clone();

            std::thread::spawn(move || {
                if pin_threads {
                    if let Err(e) = cpu::set_thread_affinity(worker_id % cores) {
                        log::warn!("worker {}: {}", worker_id, e);
                    }
                }

                while active.load(Ordering::Relaxed) {
                    let current = work_slot.load();
                    if let Some(work) = &**current {
                        let position = next_position.fetch_add(work_size, Ordering::SeqCst);
                        let assignment = WorkAssignment::new(position, work_size);
                        strategy.scan(work, &assignment);

                        if let Some(sender) = &hash_sender {
                            let _ = sender.send(assignment.work_size);
                        }
                        while let Some(nonce) = work.solutions().take_unreported() {
                            let digest = keccak256(&work.message().to_bytes(nonce));
                            let _ = solution_sender.send(Solution { nonce, digest });
                        }
                    } else {
                        std::thread::sleep(std::time::Duration::from_millis(100));
                    }
                }
            });
        }
    }

    /// Stops all workers after their current assignment
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::message::{MessageTemplate, SolutionTemplate};
    use crate::solver::scanner::MidStateScan;
    use std::time::Duration;

    #[test]
    fn test_scheduler_forwards_solutions_with_digests() {
        let message = MessageTemplate::new(
            [0x5A; 32],
            [0x1B; 20],
            SolutionTemplate::new([0x1B; 32]),
        );
        // Max target: every scanned nonce qualifies, so solutions arrive fast.
        let work = WorkDescriptor::new(message, [0xFF; 32], 8);

        let (solution_sender, solution_receiver) = crossbeam_channel::unbounded();
        let scheduler = Scheduler::new(solution_sender, 16);
        scheduler.submit_work(work);
        scheduler.start(Arc::new(MidStateScan), 2);

        let solution = solution_receiver
            .recv_timeout(Duration::from_secs(10))
            .expect("workers should find a solution against the max target");
        scheduler.stop();

        assert_eq!(
            solution.digest,
            keccak256(&message.to_bytes(solution.nonce)),
            "forwarded digest must match the recomputed message digest"
        );
    }
}
