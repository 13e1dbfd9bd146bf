// src/main.rs
use clap::Parser;
use crossbeam_channel::unbounded;
use soliditysha3_miner_rs::{self, *};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Main entry point for the SoliditySHA3 CPU solver
///
/// # Returns
/// - `Ok(())` on successful execution
/// - `Err(SolverError)` if any operation fails
///
/// # Flow
/// 1. Parses command line arguments
/// 2. Delegates to appropriate subcommand handler
/// 3. Propagates any errors upward
fn main() -> Result<(), SolverError> {
    let cli = cli::Commands::parse();

    match cli.action {
        cli::Action::Solve(opts) => start_solving(opts),
        cli::Action::Benchmark(opts) => run_benchmark(opts),
        cli::Action::Config(opts) => generate_config(opts),
    }
}

/// Starts a solving run with the given configuration options
///
/// # Arguments
/// * `opts` - Command line options for the solving run
///
/// # Operations
/// 1. Initializes logging
/// 2. Loads configuration and applies CLI overrides
/// 3. Builds the work descriptor for the round
/// 4. Starts statistics reporting and the worker scheduler
/// 5. Forwards found solutions to the log until interrupted
fn start_solving(opts: cli::SolveOptions) -> Result<(), SolverError> {
    utils::init_logging();

    let mut config = config::load(&opts.config)?;
    // Apply CLI overrides
    if let Some(workers) = opts.workers {
        config.worker_threads = workers;
    }
    if let Some(mode) = opts.mode {
        config.scan_mode = mode.to_string();
    }

    log::info!("CPU: {}", cpu::cpu_name());

    // Statistics reporting
    let reporter = stats::StatsReporter::new(Duration::from_secs(60));
    reporter.start_reporting();

    // Scheduler and workers
    let (solution_sender, solution_receiver) = unbounded();
    let scheduler = Scheduler::new(solution_sender, config.work_size)
        .with_hash_sender(reporter.hash_sender())
        .with_pinned_threads(config.pin_threads);

    let work = config.work.build_descriptor(config.max_solution_count)?;
    let strategy = create_strategy(&config)?;
    let workers = config.effective_worker_threads();
    log::info!(
        "Starting {} workers in {} mode, {} nonces per assignment",
        workers,
        strategy.scan_mode(),
        config.work_size
    );
    scheduler.submit_work(work);
    scheduler.start(strategy, workers);

    for solution in solution_receiver {
        reporter.record_solution();
        log::info!(
            "Solution found: nonce 0x{:016x} digest 0x{}",
            solution.nonce,
            hex::encode(solution.digest)
        );
    }
    Ok(())
}

/// Runs scan-loop benchmarks
///
/// # Arguments
/// * `opts` - Benchmark configuration options
///
/// # Operations
/// 1. Initializes benchmark-specific logging
/// 2. Builds a throwaway work round with an all-zero target, so no
///    candidate ever qualifies and the loop is pure scanning
/// 3. Spawns worker threads claiming disjoint assignments
/// 4. Collects and reports performance statistics
fn run_benchmark(opts: cli::BenchmarkOptions) -> Result<(), SolverError> {
    utils::logging::init_bench_logging();

    let strategy = scan_strategy(opts.mode);
    let reporter = stats::StatsReporter::new(Duration::from_secs(5));
    let hash_sender = reporter.hash_sender();

    log::info!(
        "Starting {} scan benchmark for {} seconds on {} threads",
        opts.mode,
        opts.duration,
        opts.threads
    );

    let message = MessageTemplate::new(
        [0x55; 32],
        [0xAA; 20],
        SolutionTemplate::new([0xAA; 32]),
    );
    let work = Arc::new(WorkDescriptor::new(message, [0u8; 32], 1));
    let next_position = Arc::new(AtomicU64::new(0));
    const BENCH_WORK_SIZE: u64 = 65_536;

    let duration = opts.duration;
    let start_time = Instant::now();
    let handles: Vec<_> = (0..opts.threads)
        .map(|_| {
            let work = work.clone();
            let strategy = strategy.clone();
            let sender = hash_sender.clone();
            let next_position = next_position.clone();

            std::thread::spawn(move || {
                while start_time.elapsed().as_secs() < duration {
                    let position = next_position.fetch_add(BENCH_WORK_SIZE, Ordering::SeqCst);
                    strategy.scan(&work, &WorkAssignment::new(position, BENCH_WORK_SIZE));
                    let _ = sender.send(BENCH_WORK_SIZE);
                }
            })
        })
        .collect();

    // Wait for all threads to complete
    for handle in handles {
        handle
            .join()
            .map_err(|_| SolverError::Channel("benchmark worker panicked".into()))?;
    }

    // Report final results
    let stats = reporter.get_stats();
    log::info!("Benchmark results:");
    log::info!("Total hashes: {}", stats.hashes_total);
    log::info!("Average hashrate: {:.2} MH/s", stats.avg_hashrate / 1_000_000.0);
    log::logger().flush(); // Ensure final results appear

    Ok(())
}

/// Generates a configuration template file
///
/// # Arguments
/// * `opts` - Configuration generation options
fn generate_config(opts: cli::ConfigOptions) -> Result<(), SolverError> {
    std::fs::write(&opts.output, config::generate_template())?;
    println!("Wrote configuration template to {}", opts.output.display());
    Ok(())
}

/// Creates the scan strategy named by the configuration
///
/// # Returns
/// - `Ok(Arc<dyn ScanStrategy>)` on success
/// - `Err(SolverError)` if the configured mode is invalid
fn create_strategy(config: &config::Config) -> Result<Arc<dyn ScanStrategy>, SolverError> {
    let mode: ScanMode = config
        .scan_mode
        .parse()
        .map_err(|_| SolverError::Config(format!("Invalid scan mode: {}", config.scan_mode)))?;
    Ok(scan_strategy(mode))
}

/// Maps a scan mode to its strategy instance
fn scan_strategy(mode: ScanMode) -> Arc<dyn ScanStrategy> {
    match mode {
        ScanMode::FullHash => Arc::new(FullHashScan),
        ScanMode::MidState => Arc::new(MidStateScan),
    }
}
