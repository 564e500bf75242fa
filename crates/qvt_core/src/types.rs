//! Core types for QVT
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Plain-data trial statistics consumed by every estimator, and the
//! confidence bound they produce.

use crate::error::{QvtError, QvtResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Measurement counts: bitstring -> count
/// Gantree: Counts // pub type Counts = HashMap<String, u64>
pub type Counts = HashMap<String, u64>;

// ============================================================================
// TrialRecord
// ============================================================================

/// Shot and heavy-output counts of a single QV circuit
/// Gantree: TrialRecord // 시행 기록
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Number of shots executed
    /// Gantree: shots: u64 // 샷 수
    pub shots: u64,

    /// Number of shots that landed on a heavy output
    /// Gantree: heavy: u64 // 헤비 출력 수
    pub heavy: u64,
}

impl TrialRecord {
    /// Create a new record without validation
    pub fn new(shots: u64, heavy: u64) -> Self {
        Self { shots, heavy }
    }

    /// Heavy-output frequency of this trial
    #[inline]
    pub fn success(&self) -> f64 {
        self.heavy as f64 / self.shots as f64
    }

    fn validate(&self, trial: usize) -> QvtResult<()> {
        if self.shots == 0 {
            return Err(QvtError::ZeroShots { trial });
        }
        if self.heavy > self.shots {
            return Err(QvtError::HeavyExceedsShots {
                trial,
                heavy: self.heavy,
                shots: self.shots,
            });
        }
        Ok(())
    }
}

// ============================================================================
// TrialStatistics
// ============================================================================

/// Ordered per-trial shot and heavy-output counts for one circuit width
/// Gantree: TrialStatistics // 시행 통계
///
/// Every stored record has `shots > 0` and `heavy <= shots`, so per-trial
/// success fractions are always defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TrialRecord>", into = "Vec<TrialRecord>")]
pub struct TrialStatistics {
    records: Vec<TrialRecord>,
}

impl TrialStatistics {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from records with validation
    /// Gantree: new(records) -> Result<Self> // 생성+검증
    pub fn new(records: Vec<TrialRecord>) -> QvtResult<Self> {
        for (trial, record) in records.iter().enumerate() {
            record.validate(trial)?;
        }
        Ok(Self { records })
    }

    /// Create from `(shots, heavy)` pairs
    pub fn from_pairs<I>(pairs: I) -> QvtResult<Self>
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(shots, heavy)| TrialRecord::new(shots, heavy))
                .collect(),
        )
    }

    /// Append one trial
    /// Gantree: push(&mut,record) -> Result // 추가
    pub fn push(&mut self, record: TrialRecord) -> QvtResult<()> {
        record.validate(self.records.len())?;
        self.records.push(record);
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of trials
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in trial order
    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    /// Record of trial `index`
    pub fn record(&self, index: usize) -> Option<&TrialRecord> {
        self.records.get(index)
    }

    /// Success fraction of trial `index`
    pub fn success(&self, index: usize) -> Option<f64> {
        self.records.get(index).map(TrialRecord::success)
    }

    /// Success fractions of all trials
    /// Gantree: successes() -> Vec<f64> // 성공률 목록
    pub fn successes(&self) -> Vec<f64> {
        self.records.iter().map(TrialRecord::success).collect()
    }

    /// Total shots across all trials
    pub fn total_shots(&self) -> u64 {
        self.records.iter().map(|r| r.shots).sum()
    }

    /// Total heavy outputs across all trials
    pub fn total_heavy(&self) -> u64 {
        self.records.iter().map(|r| r.heavy).sum()
    }

    // ========================================================================
    // Prefix Views
    // ========================================================================

    /// First `ntrials` records
    /// Gantree: prefix(ntrials) -> Result<&[TrialRecord]> // 앞부분
    pub fn prefix(&self, ntrials: usize) -> QvtResult<&[TrialRecord]> {
        if ntrials == 0 {
            return Err(QvtError::EmptyTrials);
        }
        if ntrials > self.records.len() {
            return Err(QvtError::TrialsOutOfRange {
                requested: ntrials,
                available: self.records.len(),
            });
        }
        Ok(&self.records[..ntrials])
    }

    /// Resolve an optional trial count to a concrete one (defaults to all)
    pub fn resolve_ntrials(&self, ntrials: Option<usize>) -> QvtResult<usize> {
        let n = ntrials.unwrap_or(self.records.len());
        self.prefix(n).map(<[TrialRecord]>::len)
    }

    /// Unweighted mean success of the first `ntrials` trials
    /// Gantree: mean_success(ntrials) -> Result<f64> // 평균 성공률
    pub fn mean_success(&self, ntrials: usize) -> QvtResult<f64> {
        let prefix = self.prefix(ntrials)?;
        let sum: f64 = prefix.iter().map(TrialRecord::success).sum();
        Ok(sum / prefix.len() as f64)
    }

    /// Running means over prefixes of length `1..len`
    ///
    /// The full-length prefix is not included; a series of `T` trials yields
    /// `T - 1` averages.
    pub fn cumulative_average(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.records.len().saturating_sub(1));
        let mut sum = 0.0;
        for (i, record) in self
            .records
            .iter()
            .take(self.records.len().saturating_sub(1))
            .enumerate()
        {
            sum += record.success();
            out.push(sum / (i + 1) as f64);
        }
        out
    }
}

impl TryFrom<Vec<TrialRecord>> for TrialStatistics {
    type Error = QvtError;

    fn try_from(records: Vec<TrialRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<TrialStatistics> for Vec<TrialRecord> {
    fn from(stats: TrialStatistics) -> Self {
        stats.records
    }
}

impl fmt::Display for TrialStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrialStatistics({} trials, {} shots, {} heavy)",
            self.len(),
            self.total_shots(),
            self.total_heavy()
        )
    }
}

// ============================================================================
// ConfidenceBound
// ============================================================================

/// Lower/upper confidence bound on the heavy-output frequency
/// Gantree: ConfidenceBound // 신뢰 구간
///
/// Values are not clipped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBound {
    /// Lower bound
    pub lower: f64,

    /// Upper bound
    pub upper: f64,
}

impl ConfidenceBound {
    /// Create a new bound
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if `value` lies strictly inside the interval
    pub fn contains(&self, value: f64) -> bool {
        self.lower < value && value < self.upper
    }

    /// Check if both ends lie within [0, 1]
    pub fn is_within_unit(&self) -> bool {
        (0.0..=1.0).contains(&self.lower) && (0.0..=1.0).contains(&self.upper)
    }

    /// Check if the whole interval sits above `threshold`
    pub fn clears(&self, threshold: f64) -> bool {
        self.lower > threshold
    }
}

impl From<(f64, f64)> for ConfidenceBound {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::new(lower, upper)
    }
}

impl fmt::Display for ConfidenceBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.lower, self.upper)
    }
}

// ============================================================================
// Bitstrings
// ============================================================================

/// Zero-padded binary string of `n` with `width` digits
/// Gantree: binstr(n,width) -> String // 이진 문자열
pub fn binstr(n: u64, width: usize) -> String {
    format!("{n:0width$b}")
}

/// Parse a big-endian bitstring into its integer value
pub fn parse_bitstring(s: &str) -> QvtResult<u64> {
    if s.is_empty() || s.len() > 64 || !s.chars().all(|c| c == '0' || c == '1') {
        return Err(QvtError::InvalidBitstring(s.to_string()));
    }
    u64::from_str_radix(s, 2).map_err(|_| QvtError::InvalidBitstring(s.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
