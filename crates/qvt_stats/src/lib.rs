//! # QVT Stats
//!
//! Confidence intervals for heavy-output success and the passing-threshold
//! solver.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qvt_stats // L2: Statistics (완료)
//!     Quantile // 선형 보간 분위수 (완료)
//!     AnalyticBound // 2σ Wald 구간 (완료)
//!         original_bounds()
//!     Bootstrap // 준모수 부트스트랩 (완료)
//!         Bootstrapper
//!             resample(), bounds()
//!         bootstrap(), bootstrap_bounds()
//!     Estimator // 추정기 trait (완료)
//!         AnalyticEstimator, BootstrapEstimator, EstimatorKind
//!     BootstrapConfig // 설정 (완료)
//!     CubicSpline // not-a-knot 스플라인 (완료)
//!     SecantSolver // 할선법 (완료)
//!     PassingThresholdSolver // 통과 임계 오차 (완료)
//!         QvEstimateTable
//!         passing_error_estimate()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qvt_stats::prelude::*;
//!
//! let trials = TrialStatistics::from_pairs(vec![(200, 150); 20]).unwrap();
//!
//! let analytic = original_bounds(trials.mean_success(20).unwrap(), 20).unwrap();
//! assert!(analytic.contains(0.75));
//!
//! let boot = bootstrap_bounds(&trials, 200, None, Some(42)).unwrap();
//! assert!(boot.lower < boot.upper);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Sample quantiles (Gantree: L2_Stats → Quantile)
pub mod quantile;

/// Analytic bound (Gantree: L2_Stats → AnalyticBound)
pub mod analytic;

/// Bootstrap bound (Gantree: L2_Stats → Bootstrap)
pub mod bootstrap;

/// Estimator trait (Gantree: L2_Stats → Estimator)
pub mod estimator;

/// Bootstrap configuration (Gantree: L2_Stats → BootstrapConfig)
pub mod config;

/// Cubic spline (Gantree: L2_Stats → CubicSpline)
pub mod spline;

/// Secant root finder (Gantree: L2_Stats → SecantSolver)
pub mod secant;

/// Passing threshold solver (Gantree: L2_Stats → PassingThresholdSolver)
pub mod threshold;

// ============================================================================
// Re-exports
// ============================================================================

pub use analytic::original_bounds;
pub use bootstrap::{bootstrap, bootstrap_bounds, quantile_levels, Bootstrapper};
pub use config::BootstrapConfig;
pub use estimator::{AnalyticEstimator, BootstrapEstimator, ConfidenceEstimator, EstimatorKind};
pub use quantile::{mean, quantile, quantile_sorted};
pub use secant::{SecantRoot, SecantSolver};
pub use spline::CubicSpline;
pub use threshold::{passing_error_estimate, LevelSamples, PassingThresholdSolver, QvEstimateTable};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qvt_stats::prelude::*;
    //! ```

    pub use crate::analytic::original_bounds;
    pub use crate::bootstrap::{bootstrap, bootstrap_bounds, Bootstrapper};
    pub use crate::config::BootstrapConfig;
    pub use crate::estimator::{
        AnalyticEstimator, BootstrapEstimator, ConfidenceEstimator, EstimatorKind,
    };
    pub use crate::threshold::{passing_error_estimate, PassingThresholdSolver, QvEstimateTable};
    pub use qvt_core::prelude::*;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;
    use qvt_noise::{aggregate_slice_fidelity, build_error_channel_budget, ErrorPreset};

    /// Heavy-output success of an `n`-qubit QV circuit under a depolarized slice model
    fn modeled_success(error: f64, nqubits: usize) -> f64 {
        let budget = build_error_channel_budget(error, ErrorPreset::TqDep).unwrap();
        let slice = aggregate_slice_fidelity(&budget).unwrap();
        0.5 + (qv::IDEAL_HEAVY_PROBABILITY - 0.5) * slice.powi(nqubits as i32)
    }

    #[test]
    fn test_threshold_from_error_budget_model() {
        let nqubits = 5;
        let mut table = QvEstimateTable::new();
        for k in 1..=30 {
            let level = k as f64 * 0.01;
            table.insert(nqubits, level, vec![modeled_success(level, nqubits)]);
        }

        let root = passing_error_estimate(&table, nqubits, qv::PASSING_THRESHOLD).unwrap();
        assert!(root > 0.01 && root < 0.3);
        assert_abs_diff_eq!(
            modeled_success(root, nqubits),
            qv::PASSING_THRESHOLD,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_estimators_agree_on_large_sample() {
        let trials = TrialStatistics::from_pairs(
            (0..100).map(|i| (500, 350 + (i % 7) as u64 * 5)),
        )
        .unwrap();
        let n = trials.len();

        let mut analytic = AnalyticEstimator;
        let mut boot = BootstrapEstimator::new(BootstrapConfig::new(1000).with_seed(3)).unwrap();
        let a = analytic.bound(&trials, n).unwrap();
        let b = boot.bound(&trials, n).unwrap();

        let mean = trials.mean_success(n).unwrap();
        assert!(a.contains(mean) && b.contains(mean));
        // the Wald interval is dominated by binomial spread; the bootstrap
        // tracks the much smaller spread of the observed means
        assert!(b.width() < a.width());
    }

    #[test]
    fn test_passing_decision_inputs() {
        let trials = TrialStatistics::from_pairs(vec![(1000, 760); 50]).unwrap();
        let bound = bootstrap_bounds(&trials, 500, None, Some(1)).unwrap();
        assert!(bound.clears(qv::PASSING_THRESHOLD));
    }
}
