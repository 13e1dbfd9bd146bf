// src/cpu/mod.rs
//! CPU identification and thread affinity
//!
//! Best-effort host services used around the scan loops. Neither operation
//! is required for correctness: an affinity failure is logged and mining
//! continues on whatever core the OS picks, and an unidentifiable CPU is
//! reported with a placeholder name.

use crate::utils::error::SolverError;
use sysinfo::System;

/// Returns the CPU brand string, or a placeholder when unavailable
pub fn cpu_name() -> String {
    let mut system = System::new();
    system.refresh_cpu_all();

    system
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or_else(|| "unknown CPU".to_string())
}

/// Binds the calling thread to one logical core, best-effort
///
/// # Arguments
/// * `core` - Logical core index to bind to
///
/// # Returns
/// * `Ok(())` - Affinity applied
/// * `Err(SolverError::Affinity)` - Descriptive message; callers log it and
///   continue, affinity is never fatal
#[cfg(target_os = "linux")]
#[allow(unsafe_code)]
pub fn set_thread_affinity(core: usize) -> Result<(), SolverError> {
    unsafe {
        let mut mask_set: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_ZERO(&mut mask_set);
        libc::CPU_SET(core, &mut mask_set);

        if libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mask_set) != 0 {
            return Err(SolverError::Affinity(format!(
                "failed to set processor affinity ({})",
                core
            )));
        }
    }
    Ok(())
}

/// Binds the calling thread to one logical core, best-effort
///
/// Unsupported on this platform; always returns an affinity error that
/// callers are expected to log and ignore.
#[cfg(not(target_os = "linux"))]
pub fn set_thread_affinity(core: usize) -> Result<(), SolverError> {
    Err(SolverError::Affinity(format!(
        "thread affinity not supported on this platform ({})",
        core
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_name_is_never_empty() {
        assert!(!cpu_name().is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_affinity_rejects_impossible_core_index() {
        // CPU_SETSIZE is 1024; anything at or past it cannot be set.
        let result = set_thread_affinity(1 << 20);
        assert!(result.is_err());
    }
}
