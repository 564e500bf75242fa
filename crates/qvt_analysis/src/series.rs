//! Success series
//!
//! Gantree: L3_Analysis → SuccessSeries
//!
//! Per-trial success, running average, and per-prefix confidence bounds as a
//! function of the number of trials included. This is the data behind a
//! success-versus-trial chart; rendering is left to the caller.

use crate::config::AnalysisConfig;
use qvt_core::error::QvtResult;
use qvt_core::{qv, stats, ConfidenceBound, TrialStatistics};
use qvt_stats::{original_bounds, BootstrapConfig, Bootstrapper};
use serde::{Deserialize, Serialize};

/// Which bound series to compute
/// Gantree: SeriesOptions // 시리즈 옵션
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    /// Compute analytic bounds per prefix
    pub analytic: bool,

    /// Compute bootstrap bounds per prefix
    pub bootstrap: bool,

    /// Resamples per bootstrap bound
    pub reps: usize,

    /// Bootstrap seed
    pub seed: Option<u64>,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            analytic: true,
            bootstrap: false,
            reps: stats::DEFAULT_SERIES_REPS,
            seed: None,
        }
    }
}

impl SeriesOptions {
    /// Enable bootstrap bounds with `reps` resamples
    pub fn with_bootstrap(mut self, reps: usize) -> Self {
        self.bootstrap = true;
        self.reps = reps;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Disable analytic bounds
    pub fn without_analytic(mut self) -> Self {
        self.analytic = false;
        self
    }
}

impl From<&AnalysisConfig> for SeriesOptions {
    /// Both bound series, `series_reps` resamples, seeded like the summary
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            analytic: true,
            bootstrap: true,
            reps: config.series_reps,
            seed: config.bootstrap.seed,
        }
    }
}

/// Success-versus-trial data for one circuit width
/// Gantree: SuccessSeries // 성공률 시리즈
///
/// With `T` trials, `successes` has `T` entries and every prefix series has
/// `T - 1` entries for prefix lengths `1..T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessSeries {
    /// Per-trial heavy-output frequency
    pub successes: Vec<f64>,

    /// Mean of the first `i` successes for `i` in `1..T`
    pub cumulative: Vec<f64>,

    /// Analytic bound over the first `i` trials
    pub analytic: Option<Vec<ConfidenceBound>>,

    /// Bootstrap bound over the first `i` trials
    pub bootstrap: Option<Vec<ConfidenceBound>>,

    /// Passing threshold reference line
    pub threshold: f64,
}

impl SuccessSeries {
    /// Build series from trial statistics
    /// Gantree: build(trials,options) -> Result<Self> // 시리즈 생성
    pub fn build(trials: &TrialStatistics, options: &SeriesOptions) -> QvtResult<Self> {
        let successes = trials.successes();
        let cumulative = trials.cumulative_average();

        let analytic = if options.analytic {
            Some(
                cumulative
                    .iter()
                    .enumerate()
                    .map(|(k, &mean)| original_bounds(mean, k + 1))
                    .collect::<QvtResult<Vec<_>>>()?,
            )
        } else {
            None
        };

        let bootstrap = if options.bootstrap {
            let mut config = BootstrapConfig::new(options.reps);
            config.seed = options.seed;
            let mut boot = Bootstrapper::new(config)?;
            log::debug!(
                "series: bootstrap over {} prefixes, {} reps each",
                cumulative.len(),
                options.reps
            );
            Some(
                (1..trials.len())
                    .map(|i| boot.bounds_n(trials, i, options.reps))
                    .collect::<QvtResult<Vec<_>>>()?,
            )
        } else {
            None
        };

        Ok(Self {
            successes,
            cumulative,
            analytic,
            bootstrap,
            threshold: qv::PASSING_THRESHOLD,
        })
    }

    /// Build both bound series under an analysis configuration
    /// Gantree: from_config(trials,config) -> Result<Self> // 설정 기반 생성
    ///
    /// The reference line follows `config.threshold`.
    pub fn from_config(trials: &TrialStatistics, config: &AnalysisConfig) -> QvtResult<Self> {
        config.validate()?;
        let mut series = Self::build(trials, &SeriesOptions::from(config))?;
        series.threshold = config.threshold;
        Ok(series)
    }

    /// Number of trials
    pub fn len(&self) -> usize {
        self.successes.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.successes.is_empty()
    }

    /// Prefix lengths the running series are indexed by (`1..T`)
    pub fn prefix_lengths(&self) -> Vec<usize> {
        (1..=self.cumulative.len()).collect()
    }

    /// First prefix length whose bootstrap lower bound clears the threshold
    /// and stays above it for every longer prefix
    pub fn first_sustained_pass(&self) -> Option<usize> {
        let bounds = self.bootstrap.as_ref()?;
        let mut first = None;
        for (k, bound) in bounds.iter().enumerate() {
            match (bound.clears(self.threshold), first) {
                (true, None) => first = Some(k + 1),
                (false, Some(_)) => first = None,
                _ => {}
            }
        }
        first
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn trials() -> TrialStatistics {
        TrialStatistics::from_pairs([(100, 80), (100, 60), (200, 140), (50, 40)]).unwrap()
    }

    #[test]
    fn test_lengths() {
        let series = SuccessSeries::build(&trials(), &SeriesOptions::default()).unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series.cumulative.len(), 3);
        assert_eq!(series.analytic.as_ref().unwrap().len(), 3);
        assert!(series.bootstrap.is_none());
        assert_eq!(series.prefix_lengths(), vec![1, 2, 3]);
        assert_abs_diff_eq!(series.threshold, 2.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_analytic_prefixes() {
        let t = trials();
        let series = SuccessSeries::build(&t, &SeriesOptions::default()).unwrap();
        let analytic = series.analytic.unwrap();
        for (k, bound) in analytic.iter().enumerate() {
            let mean = t.mean_success(k + 1).unwrap();
            let expected = original_bounds(mean, k + 1).unwrap();
            assert_abs_diff_eq!(bound.lower, expected.lower, epsilon = 1e-12);
            assert_abs_diff_eq!(bound.upper, expected.upper, epsilon = 1e-12);
        }
        // prefix of 2: mean 0.7, n 2
        assert_abs_diff_eq!(
            analytic[1].width(),
            4.0 * (0.7f64 * 0.3 / 2.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_bootstrap_prefixes() {
        let options = SeriesOptions::default().with_bootstrap(200).with_seed(5);
        let a = SuccessSeries::build(&trials(), &options).unwrap();
        let b = SuccessSeries::build(&trials(), &options).unwrap();
        assert_eq!(a.bootstrap.as_ref().unwrap().len(), 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_trial_has_empty_prefix_series() {
        let t = TrialStatistics::from_pairs([(100, 70)]).unwrap();
        let options = SeriesOptions::default().with_bootstrap(10).with_seed(1);
        let series = SuccessSeries::build(&t, &options).unwrap();
        assert_eq!(series.successes, vec![0.7]);
        assert!(series.cumulative.is_empty());
        assert!(series.bootstrap.unwrap().is_empty());
    }

    #[test]
    fn test_options_from_config() {
        let config = AnalysisConfig::quick(3).with_series_reps(150).with_seed(4);
        let options = SeriesOptions::from(&config);
        assert!(options.analytic && options.bootstrap);
        assert_eq!(options.reps, 150);
        assert_eq!(options.seed, Some(4));
    }

    #[test]
    fn test_from_config() {
        let config = AnalysisConfig::quick(3)
            .with_series_reps(100)
            .with_seed(6)
            .with_threshold(0.6);
        let series = SuccessSeries::from_config(&trials(), &config).unwrap();
        assert_eq!(series.bootstrap.as_ref().unwrap().len(), 3);
        assert_abs_diff_eq!(series.threshold, 0.6, epsilon = 1e-15);

        let direct = SuccessSeries::build(&trials(), &SeriesOptions::from(&config)).unwrap();
        assert_eq!(series.bootstrap, direct.bootstrap);

        assert!(SuccessSeries::from_config(&trials(), &config.with_series_reps(0)).is_err());
    }

    #[test]
    fn test_first_sustained_pass() {
        let mut series = SuccessSeries::build(&trials(), &SeriesOptions::default()).unwrap();
        assert_eq!(series.first_sustained_pass(), None);

        series.bootstrap = Some(vec![
            ConfidenceBound::new(0.70, 0.9),
            ConfidenceBound::new(0.60, 0.9),
            ConfidenceBound::new(0.68, 0.9),
            ConfidenceBound::new(0.69, 0.9),
        ]);
        assert_eq!(series.first_sustained_pass(), Some(3));
    }
}
