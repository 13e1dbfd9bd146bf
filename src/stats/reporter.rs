// src/stats/reporter.rs
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use sysinfo::{Components, System};

/// Statistics related to solving performance
#[derive(Debug, Clone, Default)]
pub struct SolverStats {
    /// Total number of hashes computed
    pub hashes_total: u64,
    /// Number of qualifying solutions found
    pub solutions_found: u64,
    /// Average hashrate since start (hashes per second)
    pub avg_hashrate: f64,
}

/// Statistics related to hardware state
#[derive(Debug, Clone)]
pub struct HardwareStats {
    /// Current CPU usage percentage (0-100)
    pub cpu_usage: f32,
    /// Memory currently used (in bytes)
    pub memory_used: u64,
    /// Current CPU temperature in Celsius
    pub temperature: f32,
}

/// Collects and reports solving and hardware statistics
pub struct StatsReporter {
    /// Atomic counters for solving statistics
    stats: Arc<SolverStatsAtomic>,
    /// System information collector
    system: System,
    /// Hardware component information collector
    components: Components,
    /// Interval at which stats are reported
    report_interval: Duration,
}

/// Atomic version of SolverStats for thread-safe updates
struct SolverStatsAtomic {
    hashes: AtomicU64,
    solutions: AtomicU64,
    start_time: Instant,
}

impl StatsReporter {
    /// Creates a new StatsReporter with the specified reporting interval
    ///
    /// # Arguments
    /// * `report_interval` - How often to log statistics
    pub fn new(report_interval: Duration) -> Self {
        StatsReporter {
            stats: Arc::new(SolverStatsAtomic {
                hashes: AtomicU64::new(0),
                solutions: AtomicU64::new(0),
                start_time: Instant::now(),
            }),
            system: System::new_all(),
            components: Components::new_with_refreshed_list(),
            report_interval,
        }
    }

    /// Creates and returns a channel sender for hash counts
    ///
    /// Workers send the size of each completed assignment; the reporter
    /// accumulates them on a background thread.
    pub fn hash_sender(&self) -> Sender<u64> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.start_hashrate_listener(rx);
        tx
    }

    /// Records one found solution
    pub fn record_solution(&self) {
        self.stats.solutions.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets the current solving statistics
    ///
    /// # Returns
    /// A snapshot of the current solving statistics
    pub fn get_stats(&self) -> SolverStats {
        let elapsed = self.stats.start_time.elapsed().as_secs_f64();
        let hashes = self.stats.hashes.load(Ordering::Relaxed);

        SolverStats {
            hashes_total: hashes,
            solutions_found: self.stats.solutions.load(Ordering::Relaxed),
            avg_hashrate: hashes as f64 / elapsed.max(1.0),
        }
    }

    /// Gets the current hardware statistics
    ///
    /// This refreshes system information before returning the stats.
    pub fn get_hardware_stats(&mut self) -> HardwareStats {
        self.system.refresh_cpu_all();
        self.system.refresh_memory();
        self.components.refresh(true);

        let cpus = self.system.cpus();
        let cpu_usage = if cpus.is_empty() {
            0.0
        } else {
            cpus.iter().map(|c| c.cpu_usage()).sum::<f32>() / cpus.len() as f32
        };

        let temperature = self
            .components
            .iter()
            .find(|c| c.label().contains("CPU"))
            .and_then(|c| c.temperature())
            .unwrap_or(0.0);

        HardwareStats {
            cpu_usage,
            memory_used: self.system.used_memory(),
            temperature,
        }
    }

    /// Starts the periodic reporting of statistics
    ///
    /// This spawns a background thread that logs stats at the configured
    /// interval.
    pub fn start_reporting(&self) {
        let stats = self.stats.clone();
        let interval = self.report_interval;

        std::thread::spawn(move || {
            let mut reporter = StatsReporter {
                stats,
                system: System::new_all(),
                components: Components::new_with_refreshed_list(),
                report_interval: interval,
            };

            loop {
                std::thread::sleep(interval);
                let solver_stats = reporter.get_stats();
                let hw_stats = reporter.get_hardware_stats();

                log::info!(
                    "Hashrate: {:.2} MH/s | Solutions: {} | CPU: {:.1}% | Temp: {:.1}°C",
                    solver_stats.avg_hashrate / 1_000_000.0,
                    solver_stats.solutions_found,
                    hw_stats.cpu_usage,
                    hw_stats.temperature
                );
            }
        });
    }

    /// Starts a listener for hash counts on a background thread
    fn start_hashrate_listener(&self, receiver: Receiver<u64>) {
        let stats = self.stats.clone();

        std::thread::spawn(move || {
            for count in receiver {
                stats.hashes.fetch_add(count, Ordering::Relaxed);
            }
        });
    }
}

impl Clone for StatsReporter {
    fn clone(&self) -> Self {
        StatsReporter {
            stats: self.stats.clone(),
            system: System::new_all(),
            components: Components::new_with_refreshed_list(),
            report_interval: self.report_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_counts_accumulate() {
        let reporter = StatsReporter::new(Duration::from_secs(60));
        let sender = reporter.hash_sender();

        sender.send(1000).expect("listener alive");
        sender.send(24).expect("listener alive");

        // The listener runs on a background thread; give it a moment.
        let deadline = Instant::now() + Duration::from_secs(5);
        while reporter.get_stats().hashes_total != 1024 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(reporter.get_stats().hashes_total, 1024);
    }

    #[test]
    fn test_solutions_count_up() {
        let reporter = StatsReporter::new(Duration::from_secs(60));
        reporter.record_solution();
        reporter.record_solution();
        assert_eq!(reporter.get_stats().solutions_found, 2);
    }
}
