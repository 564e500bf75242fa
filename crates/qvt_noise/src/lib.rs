//! # QVT Noise
//!
//! Gate fidelity conversions and error-channel budgets for QV error modeling.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qvt_noise // L1: Error Budget (완료)
//!     Fidelity // 충실도 변환 (완료)
//!         FidelityKind: avg, dep, proc
//!         convert(), convert_str()
//!     ErrorBudget // 에러 예산 (완료)
//!         ErrorChannel // 9개 채널
//!         ErrorPreset // 9개 프리셋, 고정 계수표
//!         ErrorChannelBudget
//!             from_preset(), slice_fidelity()
//!         build_error_channel_budget(), aggregate_slice_fidelity()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qvt_noise::prelude::*;
//!
//! // Two-qubit average fidelity to depolarizing parameter
//! let dep = convert(0.99, 4, FidelityKind::Avg, FidelityKind::Dep).unwrap();
//! assert!((dep - 0.986_666).abs() < 1e-5);
//!
//! // Expand an error magnitude and fold it into one slice fidelity
//! let budget = build_error_channel_budget(0.005, ErrorPreset::RealisticAll).unwrap();
//! let slice = aggregate_slice_fidelity(&budget).unwrap();
//! assert!(slice > 0.9 && slice < 1.0);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Fidelity conversions (Gantree: L1_Noise → Fidelity)
pub mod fidelity;

/// Error-channel budgets (Gantree: L1_Noise → ErrorBudget)
pub mod budget;

// ============================================================================
// Re-exports
// ============================================================================

pub use budget::{
    aggregate_slice_fidelity, build_error_channel_budget, build_error_channel_budget_by_name,
    Coefficient, ErrorChannel, ErrorChannelBudget, ErrorPreset,
};
pub use fidelity::{convert, convert_str, FidelityKind};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qvt_noise::prelude::*;
    //! ```

    pub use crate::budget::{
        aggregate_slice_fidelity, build_error_channel_budget, build_error_channel_budget_by_name,
        ErrorChannel, ErrorChannelBudget, ErrorPreset,
    };
    pub use crate::fidelity::{convert, convert_str, FidelityKind};
}

// ============================================================================
// Integration Tests
// ============================================================================
