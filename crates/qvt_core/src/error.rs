//! Error types for QVT
//!
//! Gantree: L0_Foundation → Errors
//!
//! Every failure in the statistical core is a local computation error.
//! Nothing here is retried; callers halt report generation on any error.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QVT
/// Gantree: QvtError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QvtError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Probability value out of range [0, 1]
    /// Gantree: InvalidProbability(f64) // 확률 범위
    #[error("Invalid probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// Trial recorded with zero shots
    #[error("Trial {trial} has zero shots")]
    ZeroShots { trial: usize },

    /// Heavy-output count larger than the shot count
    /// Gantree: HeavyExceedsShots{{trial,heavy,shots}} // 헤비 초과
    #[error("Trial {trial} has {heavy} heavy outputs but only {shots} shots")]
    HeavyExceedsShots {
        trial: usize,
        heavy: u64,
        shots: u64,
    },

    /// Requested more trials than are available
    /// Gantree: TrialsOutOfRange{{req,avail}} // 시행 범위
    #[error("Requested {requested} trials but only {available} are available")]
    TrialsOutOfRange { requested: usize, available: usize },

    /// No trials to work with
    #[error("Trial set is empty")]
    EmptyTrials,

    /// Hilbert space dimension too small for a fidelity conversion
    #[error("Invalid Hilbert space dimension {0}: must be >= 2")]
    InvalidDimension(u32),

    /// Invalid bitstring format
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    /// Malformed estimate table for the threshold solver
    #[error("Invalid estimate table: {0}")]
    InvalidTable(String),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Conversion Errors
    // ========================================================================
    /// No closed-form equation for the requested fidelity conversion
    /// Gantree: InvalidConversion{{start,end,dim}} // 변환 불가
    #[error("No equation for start = {start} and end = {end} (d = {dim})")]
    InvalidConversion {
        start: String,
        end: String,
        dim: u32,
    },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// Unknown error-budget preset name
    /// Gantree: UnknownPreset(String) // 프리셋 없음
    #[error("Unknown error preset '{0}'")]
    UnknownPreset(String),

    /// Unknown error channel name
    #[error("Unknown error channel '{0}'")]
    UnknownChannel(String),

    // ========================================================================
    // Computation Errors
    // ========================================================================
    /// Division by zero in a statistic
    /// Gantree: DivisionByZero(String) // 0 나눗셈
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// Arithmetic produced NaN or infinity
    #[error("Non-finite result: {0}")]
    NonFiniteResult(String),

    /// Sampling distribution could not be constructed
    #[error("Distribution error: {0}")]
    DistributionError(String),

    // ========================================================================
    // Convergence Errors
    // ========================================================================
    /// Root finder did not converge
    /// Gantree: ConvergenceFailed{{iters}} // 수렴 실패
    #[error("Convergence failed after {iterations} iterations")]
    ConvergenceFailed { iterations: usize },

    /// Root found outside the sampled error range
    #[error("Root {root:.6e} lies outside the sampled range [{min:.6e}, {max:.6e}]")]
    NoRootInRange { root: f64, min: f64, max: f64 },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for QVT operations
/// Gantree: QvtResult<T> // type alias
pub type QvtResult<T> = Result<T, QvtError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QvtError {
    fn from(err: serde_json::Error) -> Self {
        QvtError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QvtError {
    fn from(err: std::io::Error) -> Self {
        QvtError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QvtError {
    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QvtError::InvalidProbability(_)
                | QvtError::ZeroShots { .. }
                | QvtError::HeavyExceedsShots { .. }
                | QvtError::TrialsOutOfRange { .. }
                | QvtError::EmptyTrials
                | QvtError::InvalidDimension(_)
                | QvtError::InvalidBitstring(_)
                | QvtError::InvalidTable(_)
                | QvtError::InvalidConfig(_)
        )
    }

    /// Check if error is a numeric computation failure
    pub fn is_computation_error(&self) -> bool {
        matches!(
            self,
            QvtError::DivisionByZero(_)
                | QvtError::NonFiniteResult(_)
                | QvtError::DistributionError(_)
        )
    }

    /// Check if error comes from the root finder
    pub fn is_convergence_error(&self) -> bool {
        matches!(
            self,
            QvtError::ConvergenceFailed { .. } | QvtError::NoRootInRange { .. }
        )
    }

    /// Check if error is a name lookup failure
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            QvtError::UnknownPreset(_) | QvtError::UnknownChannel(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QvtError::InvalidProbability(1.5);
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_invalid_conversion_display() {
        let err = QvtError::InvalidConversion {
            start: "avg".into(),
            end: "foo".into(),
            dim: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("avg"));
        assert!(msg.contains("foo"));
    }

    #[test]
    fn test_trials_out_of_range() {
        let err = QvtError::TrialsOutOfRange {
            requested: 120,
            available: 100,
        };
        assert!(err.to_string().contains("120"));
        assert!(err.to_string().contains("100"));
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_classification() {
        assert!(QvtError::DivisionByZero("n = 0".into()).is_computation_error());
        assert!(QvtError::ConvergenceFailed { iterations: 50 }.is_convergence_error());
        assert!(QvtError::UnknownPreset("Nope".into()).is_lookup_error());
        assert!(!QvtError::EmptyTrials.is_computation_error());
    }

    #[test]
    fn test_from_json_error() {
        let err: QvtError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, QvtError::JsonError(_)));
    }
}
