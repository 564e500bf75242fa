//! Secant root finder
//!
//! Gantree: L2_Stats → SecantSolver
//!
//! Derivative-free root finding from two starting points. The iterate with
//! the smaller residual is kept as the most recent point before each step.

use qvt_core::error::{QvtError, QvtResult};
use qvt_core::solver;

/// Secant method settings
/// Gantree: SecantSolver // 할선법
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantSolver {
    /// First starting point
    pub x0: f64,
    /// Second starting point
    pub x1: f64,
    /// Absolute step tolerance
    pub xtol: f64,
    /// Iteration limit
    pub maxiter: usize,
}

impl Default for SecantSolver {
    fn default() -> Self {
        Self {
            x0: solver::SECANT_X0,
            x1: solver::SECANT_X1,
            xtol: solver::SECANT_XTOL,
            maxiter: solver::SECANT_MAXITER,
        }
    }
}

/// Root and iteration count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantRoot {
    /// Root location
    pub root: f64,
    /// Iterations used
    pub iterations: usize,
}

impl SecantSolver {
    /// Override starting points
    pub fn with_start(mut self, x0: f64, x1: f64) -> Self {
        self.x0 = x0;
        self.x1 = x1;
        self
    }

    /// Find a root of `f`
    /// Gantree: solve(f) -> Result<SecantRoot> // 근 찾기
    ///
    /// Fails with `ConvergenceFailed` when the residuals of the two current
    /// points coincide or the iteration limit is reached.
    pub fn solve<F>(&self, mut f: F) -> QvtResult<SecantRoot>
    where
        F: FnMut(f64) -> f64,
    {
        let (mut p0, mut p1) = (self.x0, self.x1);
        let (mut q0, mut q1) = (f(p0), f(p1));
        if q1.abs() < q0.abs() {
            std::mem::swap(&mut p0, &mut p1);
            std::mem::swap(&mut q0, &mut q1);
        }

        for iteration in 1..=self.maxiter {
            if q1 == q0 {
                if p1 != p0 {
                    log::warn!("secant: equal residuals at {p0} and {p1}");
                }
                return Err(QvtError::ConvergenceFailed { iterations: iteration });
            }

            let p = if q1.abs() > q0.abs() {
                (-q0 / q1 * p1 + p0) / (1.0 - q0 / q1)
            } else {
                (-q1 / q0 * p0 + p1) / (1.0 - q1 / q0)
            };

            if !p.is_finite() {
                return Err(QvtError::NonFiniteResult(format!("secant step {p}")));
            }
            if (p - p1).abs() <= self.xtol {
                log::debug!("secant: root {p} after {iteration} iterations");
                return Ok(SecantRoot {
                    root: p,
                    iterations: iteration,
                });
            }

            p0 = p1;
            q0 = q1;
            p1 = p;
            q1 = f(p1);
        }

        Err(QvtError::ConvergenceFailed {
            iterations: self.maxiter,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
