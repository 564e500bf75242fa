//! QV summary and pass decision
//!
//! Gantree: L3_Analysis → QvSummary
//!
//! A width passes when the mean heavy-output frequency exceeds the threshold
//! and the bootstrap lower bound does too.

use crate::adapter::ResultAdapter;
use crate::config::AnalysisConfig;
use qvt_core::error::{QvtError, QvtResult};
use qvt_core::{qv, ConfidenceBound, TrialStatistics};
use qvt_stats::{original_bounds, Bootstrapper};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of analyzing one circuit width
/// Gantree: QvSummary // QV 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QvSummary {
    /// Circuit width
    pub nqubits: usize,
    /// Trials included
    pub ntrials: usize,
    /// Shots across included trials
    pub total_shots: u64,
    /// Unweighted mean heavy-output frequency
    pub mean_success: f64,
    /// Two-sigma analytic bound
    pub analytic: ConfidenceBound,
    /// Bootstrap bound
    pub bootstrap: ConfidenceBound,
    /// Threshold the decision was made against
    pub threshold: f64,
    /// Pass decision
    pub passed: bool,
}

impl QvSummary {
    /// Analyze trial statistics under `config`
    /// Gantree: compute(trials,config) -> Result<Self> // 요약 계산
    pub fn compute(trials: &TrialStatistics, config: &AnalysisConfig) -> QvtResult<Self> {
        config.validate()?;
        let ntrials = trials.resolve_ntrials(config.bootstrap.ntrials)?;
        let records = trials.prefix(ntrials)?;

        let mean_success = trials.mean_success(ntrials)?;
        let analytic = original_bounds(mean_success, ntrials)?;
        let bootstrap = Bootstrapper::new(config.bootstrap.clone())?.bounds(trials)?;

        let passed = mean_success > config.threshold && bootstrap.clears(config.threshold);
        log::info!(
            "{}Q: mean {:.4}, bootstrap {}, {}",
            config.nqubits,
            mean_success,
            bootstrap,
            if passed { "PASS" } else { "FAIL" }
        );

        Ok(Self {
            nqubits: config.nqubits,
            ntrials,
            total_shots: records.iter().map(|r| r.shots).sum(),
            mean_success,
            analytic,
            bootstrap,
            threshold: config.threshold,
            passed,
        })
    }

    /// Analyze the trials produced by a result adapter
    pub fn from_adapter<A: ResultAdapter + ?Sized>(
        adapter: &A,
        config: &AnalysisConfig,
    ) -> QvtResult<Self> {
        if adapter.nqubits() != config.nqubits {
            return Err(QvtError::InvalidConfig(format!(
                "adapter has {} qubits, config expects {}",
                adapter.nqubits(),
                config.nqubits
            )));
        }
        Self::compute(&adapter.trial_statistics()?, config)
    }

    /// Quantum volume `2^nqubits` if passed
    /// Gantree: achieved_volume() -> Option<u64> // 달성 QV
    pub fn achieved_volume(&self) -> Option<u64> {
        self.passed.then(|| qv::volume(self.nqubits))
    }

    /// Distance of the bootstrap lower bound above the threshold
    pub fn margin(&self) -> f64 {
        self.bootstrap.lower - self.threshold
    }
}

impl fmt::Display for QvSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QV {}Q: {} trials, mean={:.4}, analytic={}, bootstrap={} [{}]",
            self.nqubits,
            self.ntrials,
            self.mean_success,
            self.analytic,
            self.bootstrap,
            if self.passed { "PASS" } else { "FAIL" }
        )
    }
}

/// Largest volume among passing summaries
/// Gantree: achieved_quantum_volume(summaries) -> Option<u64> // 최대 QV
pub fn achieved_quantum_volume(summaries: &[QvSummary]) -> Option<u64> {
    summaries.iter().filter_map(QvSummary::achieved_volume).max()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::KeyedCountsAdapter;
    use std::collections::HashMap;

    fn strong(n: usize) -> TrialStatistics {
        TrialStatistics::from_pairs((0..n).map(|i| (1000, 740 + (i % 5) as u64 * 10))).unwrap()
    }

    fn weak(n: usize) -> TrialStatistics {
        TrialStatistics::from_pairs((0..n).map(|i| (1000, 640 + (i % 5) as u64 * 10))).unwrap()
    }

    #[test]
    fn test_passing_width() {
        let config = AnalysisConfig::quick(5).with_seed(1);
        let summary = QvSummary::compute(&strong(50), &config).unwrap();
        assert!(summary.passed);
        assert_eq!(summary.achieved_volume(), Some(32));
        assert_eq!(summary.ntrials, 50);
        assert_eq!(summary.total_shots, 50_000);
        assert!(summary.margin() > 0.0);
        assert!(summary.to_string().ends_with("[PASS]"));
    }

    #[test]
    fn test_failing_width() {
        // mean 0.66 is below 2/3
        let config = AnalysisConfig::quick(6).with_seed(1);
        let summary = QvSummary::compute(&weak(50), &config).unwrap();
        assert!(!summary.passed);
        assert_eq!(summary.achieved_volume(), None);
    }

    #[test]
    fn test_mean_above_but_bound_below() {
        // few noisy trials: mean clears the threshold, the bound does not
        let trials = TrialStatistics::from_pairs([(100, 90), (100, 50), (100, 70)]).unwrap();
        let config = AnalysisConfig::quick(3).with_seed(2);
        let summary = QvSummary::compute(&trials, &config).unwrap();
        assert!(summary.mean_success > 2.0 / 3.0);
        assert!(!summary.passed);
    }

    #[test]
    fn test_ntrials_window() {
        let mut config = AnalysisConfig::quick(5).with_seed(1);
        config.bootstrap.ntrials = Some(10);
        let summary = QvSummary::compute(&strong(50), &config).unwrap();
        assert_eq!(summary.ntrials, 10);
        assert_eq!(summary.total_shots, 10_000);

        config.bootstrap.ntrials = Some(60);
        assert!(QvSummary::compute(&strong(50), &config).is_err());
    }

    #[test]
    fn test_from_adapter_checks_width() {
        let mut adapter = KeyedCountsAdapter::new(4, HashMap::new());
        for i in 0..20 {
            adapter.insert(i, 1000, 780);
        }
        let ok = QvSummary::from_adapter(&adapter, &AnalysisConfig::quick(4).with_seed(3)).unwrap();
        assert!(ok.passed);
        assert!(QvSummary::from_adapter(&adapter, &AnalysisConfig::quick(5)).is_err());
    }

    #[test]
    fn test_achieved_quantum_volume() {
        let config = AnalysisConfig::quick(4).with_seed(1);
        let pass4 = QvSummary::compute(&strong(30), &config).unwrap();
        let pass5 = QvSummary::compute(&strong(30), &config.clone().with_qubits(5)).unwrap();
        let fail6 = QvSummary::compute(&weak(30), &config.with_qubits(6)).unwrap();
        assert_eq!(achieved_quantum_volume(&[pass4, pass5, fail6]), Some(32));
        assert_eq!(achieved_quantum_volume(&[]), None);
    }
}
