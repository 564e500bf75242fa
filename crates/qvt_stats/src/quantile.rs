//! Sample quantiles
//!
//! Gantree: L2_Stats → Quantile
//!
//! Linear interpolation between order statistics (position `q * (n - 1)`),
//! the default rule of most array libraries.

/// Quantile of already sorted data
///
/// - `q=0` returns min
/// - `q=1` returns max
/// - empty input returns `NaN`
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let i = pos.floor() as usize;
    let j = pos.ceil() as usize;
    if i == j {
        return sorted[i];
    }
    let t = pos - i as f64;
    sorted[i] + t * (sorted[j] - sorted[i])
}

/// Sort a copy of `data` and take its quantile
pub fn quantile(data: &[f64], q: f64) -> f64 {
    let mut v = data.to_vec();
    v.sort_by(f64::total_cmp);
    quantile_sorted(&v, q)
}

/// Arithmetic mean (`NaN` for empty input)
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_endpoints() {
        let data = [3.0, 1.0, 2.0, 5.0, 4.0];
        assert_eq!(quantile(&data, 0.0), 1.0);
        assert_eq!(quantile(&data, 1.0), 5.0);
        assert_eq!(quantile(&data, 0.5), 3.0);
    }

    #[test]
    fn test_interpolates() {
        // pos = 0.3 * 3 = 0.9 -> 1 + 0.9 * (2 - 1)
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(quantile(&data, 0.3), 1.9, epsilon = 1e-12);
        assert_abs_diff_eq!(quantile(&data, 0.75), 3.25, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate() {
        assert!(quantile(&[], 0.5).is_nan());
        assert_eq!(quantile(&[7.0], 0.9), 7.0);
        assert!(mean(&[]).is_nan());
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }
}
