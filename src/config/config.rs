// src/config/config.rs
use crate::solver::message::{
    ADDRESS_LENGTH, MessageTemplate, SolutionTemplate, UINT256_LENGTH,
};
use crate::solver::instance::WorkDescriptor;
use crate::utils::error::SolverError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the solver application
///
/// Contains all settings needed to configure a solving run, including the
/// scan strategy, worker configuration, and the work round parameters.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Scanning strategy to use ("midstate" or "full-hash")
    #[serde(default = "default_scan_mode")]
    pub scan_mode: String,

    /// Number of worker threads to use for scanning
    /// (0 = one per logical core)
    #[serde(default)]
    pub worker_threads: usize,

    /// Number of nonces in each assignment a worker claims at once
    /// (default: 262144)
    #[serde(default = "default_work_size")]
    pub work_size: u64,

    /// Capacity of the per-round solution buffer; qualifying nonces found
    /// beyond this count are silently dropped (default: 32)
    #[serde(default = "default_max_solution_count")]
    pub max_solution_count: usize,

    /// Pin each worker thread to a logical core, best-effort
    #[serde(default)]
    pub pin_threads: bool,

    /// Work round parameters
    pub work: WorkConfig,
}

/// Hex-encoded parameters of one work round
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkConfig {
    /// Current challenge number, 32 bytes of hex
    pub challenge: String,

    /// Minting address, 20 bytes of hex
    pub address: String,

    /// Full 32-byte solution template; when omitted, the address padded
    /// with zeroes is used
    #[serde(default)]
    pub solution_template: Option<String>,

    /// Difficulty target, 32 bytes of hex, big-endian
    pub target: String,
}

fn default_scan_mode() -> String {
    "midstate".into()
}

fn default_work_size() -> u64 {
    262_144
}

fn default_max_solution_count() -> usize {
    32
}

/// Decodes a fixed-length hex field, accepting an optional `0x` prefix
fn decode_fixed<const N: usize>(field: &str, value: &str) -> Result<[u8; N], SolverError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(stripped)?;
    bytes.as_slice().try_into().map_err(|_| {
        SolverError::Input(format!(
            "{} must be {} bytes of hex, got {}",
            field,
            N,
            bytes.len()
        ))
    })
}

impl WorkConfig {
    /// Parses the hex fields into a message template
    pub fn message_template(&self) -> Result<MessageTemplate, SolverError> {
        let challenge: [u8; UINT256_LENGTH] = decode_fixed("challenge", &self.challenge)?;
        let address: [u8; ADDRESS_LENGTH] = decode_fixed("address", &self.address)?;

        let solution = match &self.solution_template {
            Some(template) => {
                SolutionTemplate::new(decode_fixed("solution_template", template)?)
            }
            None => {
                let mut template = [0u8; UINT256_LENGTH];
                template[..ADDRESS_LENGTH].copy_from_slice(&address);
                SolutionTemplate::new(template)
            }
        };

        Ok(MessageTemplate::new(challenge, address, solution))
    }

    /// Builds the shared work descriptor for one round
    pub fn build_descriptor(
        &self,
        max_solution_count: usize,
    ) -> Result<WorkDescriptor, SolverError> {
        let message = self.message_template()?;
        let target: [u8; UINT256_LENGTH] = decode_fixed("target", &self.target)?;
        Ok(WorkDescriptor::new(message, target, max_solution_count))
    }
}

impl Config {
    /// Loads configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(SolverError)` - If file couldn't be read or parsed
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SolverError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            SolverError::Config(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&config_str)
            .map_err(|e| SolverError::Config(format!("Invalid config format: {}", e)))
    }

    /// Number of worker threads, resolving 0 to one per logical core
    pub fn effective_worker_threads(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        }
    }

    /// Generates a commented configuration template string
    pub fn generate_template() -> String {
        let mut template = String::new();
        template.push_str("# SoliditySHA3 CPU solver configuration\n\n");
        template.push_str("# Scanning strategy: midstate or full-hash\n");
        template.push_str("scan_mode = \"midstate\"\n");
        template.push_str("# Number of worker threads (0 = one per logical core)\n");
        template.push_str("worker_threads = 0\n");
        template.push_str("# Nonces per claimed work assignment\n");
        template.push_str("work_size = 262144\n");
        template.push_str("# Solution buffer capacity per round\n");
        template.push_str("max_solution_count = 32\n");
        template.push_str("# Pin worker threads to logical cores\n");
        template.push_str("pin_threads = false\n\n");
        template.push_str("[work]\n");
        template.push_str(
            "challenge = \"0x3b0ec88154c8aecbc7876f50d8915ef7cd6112a604cad4f86f549d5b9eed369a\"\n",
        );
        template.push_str("address = \"0xc1912fee45d61c87cc5ea59dae31190fffff232d\"\n");
        template.push_str("# Optional; defaults to the address padded with zeroes\n");
        template.push_str(
            "# solution_template = \"0xc1912fee45d61c87cc5ea59dae31190fffff232d000000000000000000000000\"\n",
        );
        template.push_str(
            "target = \"0x0000000000040816000000000000000000000000000000000000000000000000\"\n",
        );
        template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_back_into_config() {
        let config: Config =
            toml::from_str(&Config::generate_template()).expect("template must parse");

        assert_eq!(config.scan_mode, "midstate");
        assert_eq!(config.worker_threads, 0);
        assert_eq!(config.work_size, 262_144);
        assert_eq!(config.max_solution_count, 32);
        assert!(!config.pin_threads);
        assert!(config.effective_worker_threads() >= 1);

        let work = config
            .work
            .build_descriptor(config.max_solution_count)
            .expect("template work section must build a descriptor");
        assert_eq!(work.high64_target(), 0x0000_0000_0004_0816);
        assert_eq!(work.solutions().capacity(), 32);
    }

    #[test]
    fn test_solution_template_defaults_to_padded_address() {
        let work = WorkConfig {
            challenge: format!("0x{}", "11".repeat(32)),
            address: format!("0x{}", "22".repeat(20)),
            solution_template: None,
            target: format!("0x{}", "ff".repeat(32)),
        };
        let message = work.message_template().expect("valid hex");

        let bytes = message.to_bytes(0);
        assert_eq!(&bytes[52..72], &[0x22; 20]);
        assert_eq!(&bytes[72..84], &[0u8; 12]);
    }

    #[test]
    fn test_bad_hex_lengths_are_input_errors() {
        let work = WorkConfig {
            challenge: "0xabcd".into(),
            address: format!("0x{}", "22".repeat(20)),
            solution_template: None,
            target: format!("0x{}", "ff".repeat(32)),
        };

        match work.message_template() {
            Err(SolverError::Input(message)) => {
                assert!(message.contains("challenge"), "got: {}", message)
            }
            other => panic!("expected input error, got {:?}", other.map(|_| ())),
        }
    }
}
