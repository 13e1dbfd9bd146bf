// src/cli/commands.rs
use crate::types::ScanMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SoliditySHA3 CPU solver - keccak256 proof-of-work nonce search
#[derive(Parser, Debug)]
#[command(name = "soliditysha3-miner-rs")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// The action to perform (solve, run benchmarks, or generate config)
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands for the solver application
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Start solving the work round described by the configuration file
    Solve(SolveOptions),

    /// Run scan-loop performance benchmarks
    Benchmark(BenchmarkOptions),

    /// Generate a configuration file template
    Config(ConfigOptions),
}

/// Options for starting a solving run
#[derive(Parser, Debug)]
pub struct SolveOptions {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Number of worker threads to use (overrides config)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Scanning strategy to use (overrides config)
    #[arg(short, long)]
    pub mode: Option<ScanMode>,
}

/// Options for running scan benchmarks
#[derive(Parser, Debug)]
pub struct BenchmarkOptions {
    /// Scanning strategy to benchmark
    #[arg(short, long, default_value_t = ScanMode::MidState)]
    pub mode: ScanMode,

    /// Duration of benchmark in seconds
    #[arg(short, long, default_value_t = 60)]
    pub duration: u64,

    /// Number of threads to use
    #[arg(short, long, default_value_t = num_cpus::get())]
    pub threads: usize,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "config.toml")]
    pub output: PathBuf,
}
