//! Analysis configuration
//!
//! Gantree: L3_Analysis → AnalysisConfig
//!
//! Settings for one QV analysis run, loadable from and savable to JSON.

use qvt_core::error::{QvtError, QvtResult};
use qvt_core::{qv, stats};
use qvt_stats::BootstrapConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Analysis configuration
/// Gantree: AnalysisConfig // 분석 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Circuit width under test
    /// Gantree: nqubits: usize // 큐비트 수
    pub nqubits: usize,

    /// Bootstrap settings for the summary bound
    /// Gantree: bootstrap: BootstrapConfig // 부트스트랩 설정
    pub bootstrap: BootstrapConfig,

    /// Resamples per prefix when building bound series
    /// Gantree: series_reps: usize // 시리즈 재표본 수 (10000)
    pub series_reps: usize,

    /// Passing threshold
    /// Gantree: threshold: f64 // 통과 기준 (2/3)
    pub threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            nqubits: 2,
            bootstrap: BootstrapConfig::default(),
            series_reps: stats::DEFAULT_SERIES_REPS,
            threshold: qv::PASSING_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Default configuration for `nqubits`
    pub fn new(nqubits: usize) -> Self {
        Self {
            nqubits,
            ..Self::default()
        }
    }

    /// Small resample counts for fast checks
    pub fn quick(nqubits: usize) -> Self {
        Self {
            nqubits,
            bootstrap: BootstrapConfig::new(200),
            series_reps: 200,
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set circuit width
    pub fn with_qubits(mut self, nqubits: usize) -> Self {
        self.nqubits = nqubits;
        self
    }

    /// Set bootstrap resamples
    pub fn with_reps(mut self, reps: usize) -> Self {
        self.bootstrap.reps = reps;
        self
    }

    /// Set bootstrap seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.bootstrap.seed = Some(seed);
        self
    }

    /// Set series resamples
    pub fn with_series_reps(mut self, reps: usize) -> Self {
        self.series_reps = reps;
        self
    }

    /// Set passing threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> QvtResult<()> {
        if self.nqubits == 0 {
            return Err(QvtError::InvalidConfig("nqubits must be > 0".to_string()));
        }
        if self.series_reps == 0 {
            return Err(QvtError::InvalidConfig(
                "series_reps must be > 0".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(QvtError::InvalidConfig(format!(
                "threshold must be in [0, 1), got {}",
                self.threshold
            )));
        }
        self.bootstrap.validate()
    }

    // ========================================================================
    // JSON I/O
    // ========================================================================

    /// Parse and validate from a JSON string
    pub fn from_json_str(json: &str) -> QvtResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate from a JSON file
    /// Gantree: from_json_file(path) -> Result<Self> // 파일 로드
    pub fn from_json_file(path: impl AsRef<Path>) -> QvtResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| QvtError::FileError(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&content)?;
        log::info!("loaded analysis config from {}: {}", path.display(), config);
        Ok(config)
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> QvtResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to a JSON file
    /// Gantree: save(path) -> Result // 파일 저장
    pub fn save(&self, path: impl AsRef<Path>) -> QvtResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .map_err(|e| QvtError::FileError(format!("{}: {}", path.display(), e)))
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnalysisConfig({}Q, threshold={:.4}, series_reps={}, {})",
            self.nqubits, self.threshold, self.series_reps, self.bootstrap
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
    fn test_default() {
        let config = AnalysisConfig::new(5);
        assert_eq!(config.nqubits, 5);
        assert_eq!(config.bootstrap.reps, 1000);
        assert_eq!(config.series_reps, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_and_display() {
        let config = AnalysisConfig::quick(4).with_seed(9).with_threshold(0.7);
        assert_eq!(config.bootstrap.seed, Some(9));
        assert_eq!(
            config.to_string(),
            "AnalysisConfig(4Q, threshold=0.7000, series_reps=200, BootstrapConfig(reps=200, ntrials=all, seed=9))"
        );
    }

    #[test]
    fn test_validation() {
        assert!(AnalysisConfig::new(0).validate().is_err());
        assert!(AnalysisConfig::new(3).with_reps(0).validate().is_err());
        assert!(AnalysisConfig::new(3).with_series_reps(0).validate().is_err());
        assert!(AnalysisConfig::new(3).with_threshold(1.2).validate().is_err());
    }

    #[test]
    fn test_json_partial() {
        let config =
            AnalysisConfig::from_json_str(r#"{"nqubits": 6, "bootstrap": {"seed": 1}}"#).unwrap();
        assert_eq!(config.nqubits, 6);
        assert_eq!(config.bootstrap.reps, 1000);
        assert_eq!(config.bootstrap.seed, Some(1));

        assert!(matches!(
            AnalysisConfig::from_json_str("{nqubits"),
            Err(QvtError::JsonError(_))
        ));
        assert!(AnalysisConfig::from_json_str(r#"{"nqubits": 0}"#).is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");

        let config = AnalysisConfig::new(7).with_seed(3).with_series_reps(500);
        config.save(&path).unwrap();
        assert_eq!(AnalysisConfig::from_json_file(&path).unwrap(), config);

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            AnalysisConfig::from_json_file(&missing),
            Err(QvtError::FileError(_))
        ));
    }
}
