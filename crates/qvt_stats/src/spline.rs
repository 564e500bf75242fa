//! Cubic spline interpolation
//!
//! Gantree: L2_Stats → CubicSpline
//!
//! Not-a-knot cubic spline through `(x, y)` knots. The end polynomials are
//! extended for evaluation outside the knot range.
//!
//! - 2 knots: straight line
//! - 3 knots: single parabola
//! - 4+ knots: third derivative continuous at the second and second-to-last knots

use qvt_core::error::{QvtError, QvtResult};

/// Interpolating cubic spline
/// Gantree: CubicSpline // 3차 스플라인
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivatives at the knots
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline through the knots
    /// Gantree: new(x,y) -> Result<Self> // 생성+검증
    ///
    /// `x` must be strictly increasing; all values must be finite.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> QvtResult<Self> {
        if x.len() != y.len() {
            return Err(QvtError::InvalidTable(format!(
                "spline: x has {} knots, y has {}",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(QvtError::InvalidTable(
                "spline: need at least 2 knots".to_string(),
            ));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(QvtError::InvalidTable(
                "spline: knots must be finite".to_string(),
            ));
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(QvtError::InvalidTable(
                "spline: x must be strictly increasing".to_string(),
            ));
        }

        let m = second_derivatives(&x, &y)?;
        Ok(Self { x, y, m })
    }

    /// Number of knots
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false; a spline has at least 2 knots
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Knot range `(min, max)`
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Evaluate at `t`
    /// Gantree: eval(t) -> f64 // 평가
    pub fn eval(&self, t: f64) -> f64 {
        let i = self.segment(t);
        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);
        let (m0, m1) = (self.m[i], self.m[i + 1]);
        let h = x1 - x0;

        let a = x1 - t;
        let b = t - x0;
        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }

    /// Segment index used for `t`, clamped to the end segments
    fn segment(&self, t: f64) -> usize {
        let last = self.x.len() - 2;
        match self.x.partition_point(|&xi| xi <= t) {
            0 => 0,
            k => (k - 1).min(last),
        }
    }
}

/// Second derivatives at the knots under not-a-knot end conditions
fn second_derivatives(x: &[f64], y: &[f64]) -> QvtResult<Vec<f64>> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

    match n {
        2 => Ok(vec![0.0; 2]),
        3 => {
            // not-a-knot on 3 points is the interpolating parabola
            let a = ((y[2] - y[1]) / h[1] - (y[1] - y[0]) / h[0]) / (h[0] + h[1]);
            Ok(vec![2.0 * a; 3])
        }
        _ => {
            let mut mat = vec![vec![0.0; n]; n];
            let mut rhs = vec![0.0; n];

            mat[0][0] = -h[1];
            mat[0][1] = h[0] + h[1];
            mat[0][2] = -h[0];

            for i in 1..n - 1 {
                mat[i][i - 1] = h[i - 1];
                mat[i][i] = 2.0 * (h[i - 1] + h[i]);
                mat[i][i + 1] = h[i];
                rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
            }

            let (a, b) = (h[n - 3], h[n - 2]);
            mat[n - 1][n - 3] = -b;
            mat[n - 1][n - 2] = a + b;
            mat[n - 1][n - 1] = -a;

            solve_dense(mat, rhs)
        }
    }
}

/// Gaussian elimination with partial pivoting
fn solve_dense(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> QvtResult<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-300 {
            return Err(QvtError::NonFiniteResult(
                "spline: singular system".to_string(),
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut out = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * out[k]).sum();
        out[row] = (b[row] - tail) / a[row][row];
    }
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
