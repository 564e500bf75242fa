//! Semi-parametric bootstrap
//!
//! Gantree: L2_Stats → Bootstrap
//!
//! Resamples which trials contribute (uniformly, with replacement) and then
//! redraws each drawn trial's heavy count from a binomial with that trial's
//! own shot count and observed success. Each resample reports the pooled,
//! shots-weighted success. The bound reflects the resampled quantiles
//! around twice the observed mean.

use crate::config::BootstrapConfig;
use crate::quantile::quantile_sorted;
use qvt_core::error::{QvtError, QvtResult};
use qvt_core::{ConfidenceBound, TrialRecord, TrialStatistics};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Binomial, Distribution};
use statrs::function::erf::erf;

/// Probability levels `(low, high)` of the bootstrap quantiles
/// Gantree: quantile_levels() -> (f64,f64) // 분위 수준
///
/// `1/2 ∓ erf(√2)/2`, the two-sigma two-sided levels (≈ 0.02275, 0.97725).
pub fn quantile_levels() -> (f64, f64) {
    let half_width = erf(std::f64::consts::SQRT_2) / 2.0;
    (0.5 - half_width, 0.5 + half_width)
}

// ============================================================================
// Bootstrapper
// ============================================================================

/// Seeded bootstrap resampler
/// Gantree: Bootstrapper // 부트스트랩
///
/// With a seed, repeated runs over the same trials are bit-identical.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    /// Resample configuration
    config: BootstrapConfig,

    /// Random number generator
    rng: ChaCha8Rng,
}

impl Bootstrapper {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a bootstrapper from configuration
    /// Gantree: new(config) -> Result<Self> // 생성+검증
    pub fn new(config: BootstrapConfig) -> QvtResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Create with a fixed seed and default resample count
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: BootstrapConfig::default().with_seed(seed),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    // ========================================================================
    // Resampling
    // ========================================================================

    /// Resampled success distribution using the configured window
    /// Gantree: resample(&mut,trials) -> Result<Vec<f64>> // 재표본
    pub fn resample(&mut self, trials: &TrialStatistics) -> QvtResult<Vec<f64>> {
        let ntrials = trials.resolve_ntrials(self.config.ntrials)?;
        self.resample_n(trials, ntrials, self.config.reps)
    }

    /// Resampled success distribution over the first `ntrials` trials
    ///
    /// Fails with `TrialsOutOfRange` if `ntrials` exceeds the available
    /// trials, and `EmptyTrials` if it is zero.
    pub fn resample_n(
        &mut self,
        trials: &TrialStatistics,
        ntrials: usize,
        reps: usize,
    ) -> QvtResult<Vec<f64>> {
        if reps == 0 {
            return Err(QvtError::InvalidConfig("reps must be > 0".to_string()));
        }
        let records = trials.prefix(ntrials)?;
        // draws cost O(1) in the shot count
        let binomials = records
            .iter()
            .map(|r| {
                Binomial::new(r.shots, r.success())
                    .map_err(|e| QvtError::DistributionError(e.to_string()))
            })
            .collect::<QvtResult<Vec<_>>>()?;

        log::debug!("bootstrap: {reps} resamples over {ntrials} trials");

        let mut out = Vec::with_capacity(reps);
        for _ in 0..reps {
            out.push(self.draw_once(records, &binomials)?);
        }
        Ok(out)
    }

    /// One resample: pooled heavy fraction over `records.len()` drawn trials
    fn draw_once(&mut self, records: &[TrialRecord], binomials: &[Binomial]) -> QvtResult<f64> {
        let n = records.len();
        let mut heavy = 0u64;
        let mut shots = 0u64;
        for _ in 0..n {
            let idx = self.rng.gen_range(0..n);
            heavy += binomials[idx].sample(&mut self.rng);
            shots += records[idx].shots;
        }
        if shots == 0 {
            return Err(QvtError::DivisionByZero(
                "bootstrap resample with zero total shots".to_string(),
            ));
        }
        Ok(heavy as f64 / shots as f64)
    }

    // ========================================================================
    // Bounds
    // ========================================================================

    /// Bootstrap bound using the configured window
    /// Gantree: bounds(&mut,trials) -> Result<Bound> // 부트스트랩 구간
    pub fn bounds(&mut self, trials: &TrialStatistics) -> QvtResult<ConfidenceBound> {
        let ntrials = trials.resolve_ntrials(self.config.ntrials)?;
        self.bounds_n(trials, ntrials, self.config.reps)
    }

    /// Bootstrap bound over the first `ntrials` trials
    ///
    /// `(2·mean − q_high, 2·mean − q_low)` where `mean` is the unweighted mean
    /// of the observed per-trial successes, not of the resampled values.
    pub fn bounds_n(
        &mut self,
        trials: &TrialStatistics,
        ntrials: usize,
        reps: usize,
    ) -> QvtResult<ConfidenceBound> {
        let mut success = self.resample_n(trials, ntrials, reps)?;
        success.sort_by(f64::total_cmp);

        let qv_mean = trials.mean_success(ntrials)?;
        let (low, high) = quantile_levels();
        let lower = 2.0 * qv_mean - quantile_sorted(&success, high);
        let upper = 2.0 * qv_mean - quantile_sorted(&success, low);

        if !lower.is_finite() || !upper.is_finite() {
            return Err(QvtError::NonFiniteResult(format!(
                "bootstrap bound ({lower}, {upper})"
            )));
        }
        Ok(ConfidenceBound::new(lower, upper))
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Resampled success distribution
/// Gantree: bootstrap(trials,reps,ntrials,seed) -> Result<Vec<f64>> // 재표본 분포
pub fn bootstrap(
    trials: &TrialStatistics,
    reps: usize,
    ntrials: Option<usize>,
    seed: Option<u64>,
) -> QvtResult<Vec<f64>> {
    Bootstrapper::new(config_for(reps, ntrials, seed))?.resample(trials)
}

/// Bound from the bootstrap CI method
/// Gantree: bootstrap_bounds(trials,reps,ntrials,seed) -> Result<Bound> // 부트스트랩 구간
pub fn bootstrap_bounds(
    trials: &TrialStatistics,
    reps: usize,
    ntrials: Option<usize>,
    seed: Option<u64>,
) -> QvtResult<ConfidenceBound> {
    Bootstrapper::new(config_for(reps, ntrials, seed))?.bounds(trials)
}

fn config_for(reps: usize, ntrials: Option<usize>, seed: Option<u64>) -> BootstrapConfig {
    BootstrapConfig {
        reps,
        ntrials,
        seed,
    }
}

// ============================================================================
// Tests
// ============================================================================
