//! Constants for QVT
//!
//! Gantree: L0_Foundation → Constants
//!
//! Quantum volume thresholds, estimator defaults, and solver tolerances.

// ============================================================================
// Quantum Volume Constants
// Gantree: qv // QV 상수
// ============================================================================

pub mod qv {
    //! Quantum volume test parameters

    /// Heavy-output frequency a device must exceed to pass
    /// Gantree: PASSING_THRESHOLD: f64 = 2/3
    pub const PASSING_THRESHOLD: f64 = 2.0 / 3.0;

    /// Ideal heavy-output probability of a Haar-random circuit, (1 + ln 2) / 2
    pub const IDEAL_HEAVY_PROBABILITY: f64 = 0.846_573_590_279_972_6;

    /// Circuit name prefix shared by every QV trial
    pub const CIRCUIT_PREFIX: &str = "qv_depth_";

    /// Format the canonical circuit name for a trial
    /// Gantree: circuit_name(n,i) -> String // 회로 이름
    pub fn circuit_name(nqubits: usize, trial: usize) -> String {
        format!("{CIRCUIT_PREFIX}{nqubits}_trial_{trial}")
    }

    /// Parse a canonical circuit name back into `(nqubits, trial)`
    pub fn parse_circuit_name(name: &str) -> Option<(usize, usize)> {
        let rest = name.strip_prefix(CIRCUIT_PREFIX)?;
        let (nqubits, trial) = rest.split_once("_trial_")?;
        Some((nqubits.parse().ok()?, trial.parse().ok()?))
    }

    /// Quantum volume achieved by passing at `nqubits`, saturating at `u64::MAX`
    #[inline]
    pub fn volume(nqubits: usize) -> u64 {
        u32::try_from(nqubits)
            .ok()
            .and_then(|shift| 1u64.checked_shl(shift))
            .unwrap_or(u64::MAX)
    }
}

// ============================================================================
// Statistics Constants
// Gantree: stats // 통계 상수
// ============================================================================

pub mod stats {
    //! Estimator defaults

    /// Number of sigmas in the analytic (Wald) interval
    /// Gantree: WALD_SIGMAS: f64 = 2.0
    pub const WALD_SIGMAS: f64 = 2.0;

    /// Default bootstrap resample count
    /// Gantree: DEFAULT_REPS: usize = 1000
    pub const DEFAULT_REPS: usize = 1000;

    /// Resample count used when building per-prefix bound series
    pub const DEFAULT_SERIES_REPS: usize = 10_000;
}

// ============================================================================
// Fidelity Constants
// Gantree: fidelity // 충실도 상수
// ============================================================================

pub mod fidelity {
    //! Hilbert space dimensions for gate fidelity conversion

    /// Single-qubit gate dimension
    pub const SQ_DIM: u32 = 2;

    /// Two-qubit gate dimension
    pub const TQ_DIM: u32 = 4;
}

// ============================================================================
// Solver Constants
// Gantree: solver // 근 찾기 상수
// ============================================================================

pub mod solver {
    //! Secant solver defaults used by the passing-threshold estimate

    /// First secant seed
    pub const SECANT_X0: f64 = 1e-4;

    /// Second secant seed
    pub const SECANT_X1: f64 = 1e-3;

    /// Absolute step tolerance
    pub const SECANT_XTOL: f64 = 1.48e-8;

    /// Maximum secant iterations
    pub const SECANT_MAXITER: usize = 50;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_name() {
        assert_eq!(qv::circuit_name(5, 12), "qv_depth_5_trial_12");
    }

    #[test]
    fn test_parse_circuit_name() {
        assert_eq!(qv::parse_circuit_name("qv_depth_7_trial_3"), Some((7, 3)));
        assert_eq!(qv::parse_circuit_name("qv_depth_7"), None);
        assert_eq!(qv::parse_circuit_name("depth_7_trial_3"), None);
        assert_eq!(qv::parse_circuit_name("qv_depth_x_trial_3"), None);
    }

    #[test]
    fn test_volume() {
        assert_eq!(qv::volume(5), 32);
        assert_eq!(qv::volume(10), 1024);
        assert_eq!(qv::volume(63), 1u64 << 63);
        assert_eq!(qv::volume(64), u64::MAX);
        assert_eq!(qv::volume(usize::MAX), u64::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_volume_saturates_past_u32() {
        // would wrap to a shift of 5 if truncated
        assert_eq!(qv::volume((1usize << 32) + 5), u64::MAX);
    }

    #[test]
    fn test_threshold_below_ideal() {
        assert!(qv::PASSING_THRESHOLD < qv::IDEAL_HEAVY_PROBABILITY);
        assert!((qv::IDEAL_HEAVY_PROBABILITY - (1.0 + 2f64.ln()) / 2.0).abs() < 1e-15);
    }
}
