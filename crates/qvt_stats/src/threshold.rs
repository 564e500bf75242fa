//! Passing threshold solver
//!
//! Gantree: L2_Stats → PassingThresholdSolver
//!
//! Estimates the error magnitude at which the mean heavy-output success of
//! simulated QV runs crosses the passing threshold: mean success per error
//! level, spline through `(level, mean - threshold)`, secant root.

use crate::quantile::mean;
use crate::secant::SecantSolver;
use crate::spline::CubicSpline;
use qvt_core::error::{QvtError, QvtResult};
use qvt_core::qv;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// QvEstimateTable
// ============================================================================

/// Per-trial successes observed at one error level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSamples {
    /// Error magnitude
    pub level: f64,
    /// Per-trial success fractions
    pub successes: Vec<f64>,
}

/// Simulated success observations keyed by qubit count and error level
/// Gantree: QvEstimateTable // QV 추정표
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QvEstimateTable {
    entries: BTreeMap<usize, Vec<LevelSamples>>,
}

impl QvEstimateTable {
    /// Create empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add observations for `(nqubits, level)`
    /// Gantree: insert(nqubits,level,successes) // 추가
    ///
    /// Observations at an existing level are appended to it.
    pub fn insert(&mut self, nqubits: usize, level: f64, successes: Vec<f64>) {
        let levels = self.entries.entry(nqubits).or_default();
        match levels.iter_mut().find(|s| s.level == level) {
            Some(existing) => existing.successes.extend(successes),
            None => levels.push(LevelSamples { level, successes }),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, nqubits: usize, level: f64, successes: Vec<f64>) -> Self {
        self.insert(nqubits, level, successes);
        self
    }

    /// Qubit counts present in the table
    pub fn qubit_counts(&self) -> Vec<usize> {
        self.entries.keys().copied().collect()
    }

    /// Error levels for `nqubits` in ascending order
    pub fn levels(&self, nqubits: usize) -> Vec<f64> {
        let mut out: Vec<f64> = self
            .entries
            .get(&nqubits)
            .map(|v| v.iter().map(|s| s.level).collect())
            .unwrap_or_default();
        out.sort_by(f64::total_cmp);
        out
    }

    /// Mean success per error level, sorted by level
    /// Gantree: mean_curve(nqubits) -> Result<(Vec<f64>,Vec<f64>)> // 평균 곡선
    pub fn mean_curve(&self, nqubits: usize) -> QvtResult<(Vec<f64>, Vec<f64>)> {
        let samples = self.entries.get(&nqubits).ok_or_else(|| {
            QvtError::InvalidTable(format!("no entries for {nqubits} qubits"))
        })?;

        let mut points = Vec::with_capacity(samples.len());
        for s in samples {
            if !s.level.is_finite() {
                return Err(QvtError::InvalidTable(format!(
                    "non-finite error level {}",
                    s.level
                )));
            }
            if s.successes.is_empty() {
                return Err(QvtError::InvalidTable(format!(
                    "no observations at level {}",
                    s.level
                )));
            }
            points.push((s.level, mean(&s.successes)));
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        if points.len() < 2 {
            return Err(QvtError::InvalidTable(format!(
                "need at least 2 error levels for {nqubits} qubits, got {}",
                points.len()
            )));
        }
        Ok(points.into_iter().unzip())
    }
}

// ============================================================================
// PassingThresholdSolver
// ============================================================================

/// Threshold crossing solver
/// Gantree: PassingThresholdSolver // 통과 임계 오차
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassingThresholdSolver {
    /// Success threshold to cross
    pub threshold: f64,
    /// Root finder settings
    pub solver: SecantSolver,
}

impl Default for PassingThresholdSolver {
    fn default() -> Self {
        Self::new(qv::PASSING_THRESHOLD)
    }
}

impl PassingThresholdSolver {
    /// Create with a custom threshold
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            solver: SecantSolver::default(),
        }
    }

    /// Override root finder settings
    pub fn with_solver(mut self, solver: SecantSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Error magnitude where mean success for `nqubits` crosses the threshold
    /// Gantree: solve(table,nqubits) -> Result<f64> // 임계 오차
    pub fn solve(&self, table: &QvEstimateTable, nqubits: usize) -> QvtResult<f64> {
        let (levels, means) = table.mean_curve(nqubits)?;
        let min = levels[0];
        let max = levels[levels.len() - 1];

        let residuals = means.iter().map(|m| m - self.threshold).collect();
        let spline = CubicSpline::new(levels, residuals)?;
        log::debug!(
            "threshold: spline over {} levels in [{min}, {max}] for {nqubits} qubits",
            spline.len()
        );

        let found = self.solver.solve(|x| spline.eval(x))?;
        if !(min..=max).contains(&found.root) {
            return Err(QvtError::NoRootInRange {
                root: found.root,
                min,
                max,
            });
        }

        log::info!(
            "threshold: {nqubits} qubits cross {:.4} at error {:.6}",
            self.threshold,
            found.root
        );
        Ok(found.root)
    }
}

/// Estimated passing error magnitude of `table` for `nqubits`
/// Gantree: passing_error_estimate(table,nqubits,threshold) -> Result<f64> // 통과 오차 추정
pub fn passing_error_estimate(
    table: &QvEstimateTable,
    nqubits: usize,
    threshold: f64,
) -> QvtResult<f64> {
    PassingThresholdSolver::new(threshold).solve(table, nqubits)
}

// ============================================================================
// Tests
// ============================================================================
