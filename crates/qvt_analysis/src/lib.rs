//! # QVT Analysis
//!
//! Result adaptation, success series, pass decisions, and reports for
//! Quantum Volume experiments.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qvt_analysis // L3: Analysis (완료)
//!     HeavyOutputs // 헤비 출력 (완료)
//!         from_probabilities(), score_shots()
//!     ResultAdapter // 결과 어댑터 (완료)
//!         ShotResultAdapter, KeyedCountsAdapter
//!     SuccessSeries // 성공률 시리즈 (완료)
//!         build(), from_config(), first_sustained_pass()
//!     QvSummary // 통과 판정 (완료)
//!         compute(), achieved_volume()
//!     AnalysisConfig // JSON 설정 (완료)
//!     Reporter // 리포트 (완료)
//!         Markdown, JSON, CSV, Text
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qvt_analysis::prelude::*;
//! use std::collections::HashMap;
//!
//! let mut adapter = KeyedCountsAdapter::new(3, HashMap::new());
//! for i in 0..30 {
//!     adapter.insert(i, 500, 390);
//! }
//!
//! let config = AnalysisConfig::quick(3).with_seed(7);
//! let summary = QvSummary::from_adapter(&adapter, &config).unwrap();
//! assert_eq!(summary.achieved_volume(), Some(8));
//!
//! let report = Reporter::report(&[summary], ReportFormat::Markdown);
//! assert!(report.contains("Quantum Volume"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Heavy outputs (Gantree: L3_Analysis → HeavyOutputs)
pub mod heavy;

/// Result adapters (Gantree: L3_Analysis → ResultAdapter)
pub mod adapter;

/// Success series (Gantree: L3_Analysis → SuccessSeries)
pub mod series;

/// Summary and pass decision (Gantree: L3_Analysis → QvSummary)
pub mod summary;

/// Analysis configuration (Gantree: L3_Analysis → AnalysisConfig)
pub mod config;

/// Reporting (Gantree: L3_Analysis → Reporter)
pub mod reporter;

// ============================================================================
// Re-exports
// ============================================================================

pub use adapter::{KeyedCountsAdapter, RawResults, ResultAdapter, ShotResultAdapter};
pub use config::AnalysisConfig;
pub use heavy::HeavyOutputs;
pub use reporter::{ReportFormat, ReportStatistics, Reporter};
pub use series::{SeriesOptions, SuccessSeries};
pub use summary::{achieved_quantum_volume, QvSummary};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qvt_analysis::prelude::*;
    //! ```

    pub use crate::adapter::{KeyedCountsAdapter, ResultAdapter, ShotResultAdapter};
    pub use crate::config::AnalysisConfig;
    pub use crate::heavy::HeavyOutputs;
    pub use crate::reporter::{ReportFormat, Reporter};
    pub use crate::series::{SeriesOptions, SuccessSeries};
    pub use crate::summary::{achieved_quantum_volume, QvSummary};
    pub use qvt_stats::prelude::*;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Random ideal distribution and shots drawn so that a `bias` fraction
    /// of shots land on heavy outputs
    fn synthetic_trial(
        rng: &mut ChaCha8Rng,
        nqubits: usize,
        shots: usize,
        bias: f64,
    ) -> (Vec<f64>, Vec<String>) {
        let size = 1usize << nqubits;
        let weights: Vec<f64> = (0..size).map(|_| rng.gen::<f64>() + 1e-3).collect();
        let total: f64 = weights.iter().sum();
        let probs: Vec<f64> = weights.iter().map(|w| w / total).collect();

        let heavy = HeavyOutputs::from_probabilities(&probs).unwrap();
        let (hot, cold): (Vec<u64>, Vec<u64>) = (0..size as u64).partition(|&i| heavy.is_heavy(i));

        let measured = (0..shots)
            .map(|_| {
                let pool = if rng.gen_bool(bias) { &hot } else { &cold };
                binstr(pool[rng.gen_range(0..pool.len())], nqubits)
            })
            .collect();
        (probs, measured)
    }

    fn run(nqubits: usize, bias: f64, seed: u64) -> (ShotResultAdapter, AnalysisConfig) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (ideal, shots): (Vec<_>, Vec<_>) = (0..40)
            .map(|_| synthetic_trial(&mut rng, nqubits, 200, bias))
            .unzip();
        let adapter = ShotResultAdapter::new(shots, &ideal).unwrap();
        (adapter, AnalysisConfig::quick(nqubits).with_seed(seed))
    }

    #[test]
    fn test_shots_to_passing_summary() {
        let (adapter, config) = run(3, 0.8, 11);
        let summary = QvSummary::from_adapter(&adapter, &config).unwrap();
        assert!(summary.passed, "{summary}");
        assert_eq!(summary.ntrials, 40);
        assert_eq!(summary.total_shots, 8000);
        assert!(summary.analytic.contains(summary.mean_success));
    }

    #[test]
    fn test_shots_to_failing_summary() {
        let (adapter, config) = run(4, 0.55, 12);
        let summary = QvSummary::from_adapter(&adapter, &config).unwrap();
        assert!(!summary.passed, "{summary}");
    }

    #[test]
    fn test_keyed_counts_match_shot_adapter() {
        let (adapter, config) = run(3, 0.75, 13);
        let keyed = adapter.keyed_counts().unwrap();
        let a = QvSummary::from_adapter(&adapter, &config).unwrap();
        let b = QvSummary::from_adapter(&keyed, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_series_and_reports() {
        let (adapter, config) = run(3, 0.8, 14);
        let trials = adapter.trial_statistics().unwrap();

        let series = SuccessSeries::from_config(&trials, &config).unwrap();
        assert_eq!(series.cumulative.len(), 39);
        assert!(series.first_sustained_pass().is_some());

        let summary = QvSummary::compute(&trials, &config).unwrap();
        for format in [
            ReportFormat::Markdown,
            ReportFormat::Json,
            ReportFormat::Csv,
            ReportFormat::Text,
        ] {
            assert!(!Reporter::report(std::slice::from_ref(&summary), format).is_empty());
        }
        assert_eq!(Reporter::series_csv(&series).lines().count(), 41);
    }

    #[test]
    fn test_estimator_kinds_on_adapter_output() {
        let (adapter, config) = run(3, 0.85, 15);
        let trials = adapter.trial_statistics().unwrap();
        for kind in [EstimatorKind::Analytic, EstimatorKind::Bootstrap] {
            let mut est = kind.build(&config.bootstrap).unwrap();
            let bound = est.bound(&trials, trials.len()).unwrap();
            assert!(bound.clears(config.threshold), "{}: {bound}", est.name());
        }
    }
}
