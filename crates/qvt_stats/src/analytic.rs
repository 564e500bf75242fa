//! Analytic confidence bound
//!
//! Gantree: L2_Stats → AnalyticBound
//!
//! Two-sigma Wald interval `p ± 2·sqrt(p(1-p)/n)` with no continuity
//! correction and no clipping.

use qvt_core::error::{QvtError, QvtResult};
use qvt_core::stats::WALD_SIGMAS;
use qvt_core::ConfidenceBound;

/// Bound from the original (Gaussian) CI method
/// Gantree: original_bounds(success,trials) -> Result<Bound> // 해석적 구간
///
/// `success` is the mean heavy-output frequency over `trials` circuits.
/// The result may leave [0, 1]; callers decide how to present that.
pub fn original_bounds(success: f64, trials: usize) -> QvtResult<ConfidenceBound> {
    if trials == 0 {
        return Err(QvtError::DivisionByZero(
            "analytic bound with zero trials".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&success) {
        return Err(QvtError::InvalidProbability(success));
    }

    let sigma = (success * (1.0 - success) / trials as f64).sqrt();
    let bound = ConfidenceBound::new(success - WALD_SIGMAS * sigma, success + WALD_SIGMAS * sigma);

    if !bound.is_within_unit() {
        log::warn!("analytic bound {bound} for p={success:.4}, n={trials} leaves [0, 1]");
    }
    Ok(bound)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_example_scenario() {
        let bound = original_bounds(0.75, 100).unwrap();
        assert_abs_diff_eq!(bound.lower, 0.663_397_459_621_556_1, epsilon = 1e-12);
        assert_abs_diff_eq!(bound.upper, 0.836_602_540_378_443_9, epsilon = 1e-12);
    }

    #[test]
    fn test_brackets_and_width() {
        for &p in &[0.01, 0.3, 0.5, 2.0 / 3.0, 0.9, 0.99] {
            for &n in &[1usize, 10, 100, 5000] {
                let bound = original_bounds(p, n).unwrap();
                assert!(bound.lower < p && p < bound.upper);
                let expected = 4.0 * (p * (1.0 - p) / n as f64).sqrt();
                assert_abs_diff_eq!(bound.width(), expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_not_clipped() {
        let bound = original_bounds(0.99, 2).unwrap();
        assert!(bound.upper > 1.0);
    }

    #[test]
    fn test_degenerate_success() {
        let bound = original_bounds(1.0, 10).unwrap();
        assert_eq!(bound.lower, 1.0);
        assert_eq!(bound.upper, 1.0);
    }

    #[test]
    fn test_zero_trials_is_fatal() {
        let err = original_bounds(0.7, 0).unwrap_err();
        assert!(err.is_computation_error());
    }

    #[test]
    fn test_invalid_success() {
        assert!(matches!(
            original_bounds(1.2, 10),
            Err(QvtError::InvalidProbability(_))
        ));
        assert!(original_bounds(f64::NAN, 10).is_err());
    }
}
