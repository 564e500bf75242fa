//! Confidence estimators
//!
//! Gantree: L2_Stats → Estimator
//!
//! Common interface over the analytic and bootstrap bounds so callers can
//! pick a method by configuration.

use crate::analytic::original_bounds;
use crate::bootstrap::Bootstrapper;
use crate::config::BootstrapConfig;
use qvt_core::error::{QvtError, QvtResult};
use qvt_core::{ConfidenceBound, TrialStatistics};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Confidence bound over a leading window of trials
/// Gantree: ConfidenceEstimator // 신뢰구간 추정기 trait
pub trait ConfidenceEstimator {
    /// Short method name
    fn name(&self) -> &'static str;

    /// Bound over the first `ntrials` trials
    fn bound(&mut self, trials: &TrialStatistics, ntrials: usize) -> QvtResult<ConfidenceBound>;
}

// ============================================================================
// Estimators
// ============================================================================

/// Two-sigma Wald bound on the mean success
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEstimator;

impl ConfidenceEstimator for AnalyticEstimator {
    fn name(&self) -> &'static str {
        "analytic"
    }

    fn bound(&mut self, trials: &TrialStatistics, ntrials: usize) -> QvtResult<ConfidenceBound> {
        let success = trials.mean_success(ntrials)?;
        original_bounds(success, ntrials)
    }
}

/// Semi-parametric bootstrap bound
#[derive(Debug, Clone)]
pub struct BootstrapEstimator {
    inner: Bootstrapper,
}

impl BootstrapEstimator {
    /// Create from configuration; the configured `ntrials` is ignored
    pub fn new(config: BootstrapConfig) -> QvtResult<Self> {
        Ok(Self {
            inner: Bootstrapper::new(config)?,
        })
    }
}

impl ConfidenceEstimator for BootstrapEstimator {
    fn name(&self) -> &'static str {
        "bootstrap"
    }

    fn bound(&mut self, trials: &TrialStatistics, ntrials: usize) -> QvtResult<ConfidenceBound> {
        let reps = self.inner.config().reps;
        self.inner.bounds_n(trials, ntrials, reps)
    }
}

// ============================================================================
// EstimatorKind
// ============================================================================

/// Estimation method selector
/// Gantree: EstimatorKind // Analytic | Bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    /// Gaussian approximation
    Analytic,
    /// Semi-parametric bootstrap
    Bootstrap,
}

impl EstimatorKind {
    /// Method name
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimatorKind::Analytic => "analytic",
            EstimatorKind::Bootstrap => "bootstrap",
        }
    }

    /// Build an estimator of this kind
    pub fn build(&self, config: &BootstrapConfig) -> QvtResult<Box<dyn ConfidenceEstimator>> {
        Ok(match self {
            EstimatorKind::Analytic => Box::new(AnalyticEstimator),
            EstimatorKind::Bootstrap => Box::new(BootstrapEstimator::new(config.clone())?),
        })
    }
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EstimatorKind {
    type Err = QvtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "analytic" | "original" => Ok(EstimatorKind::Analytic),
            "bootstrap" => Ok(EstimatorKind::Bootstrap),
            other => Err(QvtError::InvalidConfig(format!(
                "unknown estimator '{other}'"
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
