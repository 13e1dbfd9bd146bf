// src/types.rs
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported scanning strategies for the nonce search
///
/// Both modes test identical candidates and record identical solutions;
/// they differ only in how each candidate digest is produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ScanMode {
    /// Full-message rehash per candidate
    ///
    /// Rehashes all 84 message bytes for every nonce. Always available;
    /// the fallback whenever no midstate exists for a round.
    #[clap(name = "full-hash")]
    FullHash,

    /// Sponge midstate reuse per candidate
    ///
    /// Absorbs the fixed message bytes once per round, then produces each
    /// candidate digest with a single permutation. Faster, and bit-identical
    /// in output to full-message rehash.
    #[clap(name = "midstate")]
    MidState,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::FullHash => write!(f, "full-hash"),
            ScanMode::MidState => write!(f, "midstate"),
        }
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "full-hash" => Ok(ScanMode::FullHash),
            "mid" | "midstate" => Ok(ScanMode::MidState),
            _ => Err(format!("Unknown scan mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_mode_round_trips_through_display() {
        for mode in [ScanMode::FullHash, ScanMode::MidState] {
            assert_eq!(mode.to_string().parse::<ScanMode>(), Ok(mode));
        }
        assert!("sha256d".parse::<ScanMode>().is_err());
    }
}
