//! # QVT Core
//!
//! Foundation types, constants, and errors for the Quantum Volume Toolkit.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qvt_core // L0: Foundation (완료)
//!     Errors // 에러 분류 (완료)
//!         validation, conversion, lookup, computation, convergence
//!     Constants // QV/통계/충실도/솔버 상수 (완료)
//!         PASSING_THRESHOLD, DEFAULT_REPS, SQ_DIM, TQ_DIM
//!         circuit_name(), parse_circuit_name(), volume()
//!     CoreTypes // 핵심 타입 (완료)
//!         TrialRecord, TrialStatistics, ConfidenceBound
//!         binstr(), parse_bitstring()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qvt_core::prelude::*;
//!
//! let trials = TrialStatistics::from_pairs([(100, 74), (100, 71), (100, 69)]).unwrap();
//! let mean = trials.mean_success(trials.len()).unwrap();
//!
//! assert!(mean > qv::PASSING_THRESHOLD);
//! assert_eq!(qv::circuit_name(5, 0), "qv_depth_5_trial_0");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{fidelity, qv, solver, stats};
pub use error::{QvtError, QvtResult};
pub use types::{binstr, parse_bitstring, ConfidenceBound, Counts, TrialRecord, TrialStatistics};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qvt_core::prelude::*;
    //! ```

    pub use crate::constants::{fidelity, qv, solver, stats};
    pub use crate::error::{QvtError, QvtResult};
    pub use crate::types::{
        binstr, parse_bitstring, ConfidenceBound, Counts, TrialRecord, TrialStatistics,
    };
}

// ============================================================================
// Integration Tests
// ============================================================================
