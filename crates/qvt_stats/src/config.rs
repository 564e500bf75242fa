//! Bootstrap configuration
//!
//! Gantree: L2_Stats → BootstrapConfig
//!
//! Resample count, trial window, and seed for the bootstrap estimator.

use qvt_core::error::{QvtError, QvtResult};
use qvt_core::stats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bootstrap configuration
/// Gantree: BootstrapConfig // 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of resamples
    /// Gantree: reps: usize // 재표본 수 (1000)
    pub reps: usize,

    /// Number of leading trials to use (`None` = all)
    /// Gantree: ntrials: Option<usize> // 시행 수
    pub ntrials: Option<usize>,

    /// Random seed
    /// Gantree: seed: Option<u64> // 시드
    pub seed: Option<u64>,
}

impl BootstrapConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create configuration with `reps` resamples over all trials
    pub fn new(reps: usize) -> Self {
        Self {
            reps,
            ntrials: None,
            seed: None,
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set number of resamples
    pub fn with_reps(mut self, reps: usize) -> Self {
        self.reps = reps;
        self
    }

    /// Restrict to the first `ntrials` trials
    pub fn with_ntrials(mut self, ntrials: usize) -> Self {
        self.ntrials = Some(ntrials);
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 검증
    ///
    /// The trial window is checked against the data when it is used.
    pub fn validate(&self) -> QvtResult<()> {
        if self.reps == 0 {
            return Err(QvtError::InvalidConfig("reps must be > 0".to_string()));
        }
        Ok(())
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::new(stats::DEFAULT_REPS)
    }
}

impl fmt::Display for BootstrapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BootstrapConfig(reps={}", self.reps)?;
        match self.ntrials {
            Some(n) => write!(f, ", ntrials={n}")?,
            None => write!(f, ", ntrials=all")?,
        }
        if let Some(seed) = self.seed {
            write!(f, ", seed={seed}")?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = BootstrapConfig::default();
        assert_eq!(config.reps, 1000);
        assert_eq!(config.ntrials, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = BootstrapConfig::default()
            .with_reps(500)
            .with_ntrials(40)
            .with_seed(7);
        assert_eq!(config.reps, 500);
        assert_eq!(config.ntrials, Some(40));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.to_string(), "BootstrapConfig(reps=500, ntrials=40, seed=7)");
    }

    #[test]
    fn test_validation() {
        assert!(BootstrapConfig::new(0).validate().is_err());
        assert!(BootstrapConfig::default().with_ntrials(0).validate().is_ok());
    }

    #[test]
    fn test_serde_defaults() {
        let config: BootstrapConfig = serde_json::from_str(r#"{"seed": 3}"#).unwrap();
        assert_eq!(config.reps, 1000);
        assert_eq!(config.seed, Some(3));
    }
}
