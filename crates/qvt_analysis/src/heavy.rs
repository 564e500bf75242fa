//! Heavy outputs
//!
//! Gantree: L3_Analysis → HeavyOutputs
//!
//! The heavy outputs of a circuit are the basis states whose ideal
//! probability is strictly above the median of the ideal distribution.

use qvt_core::error::{QvtError, QvtResult};
use qvt_core::{parse_bitstring, Counts, TrialRecord};
use std::collections::BTreeSet;

/// Heavy basis-state set of one ideal distribution
/// Gantree: HeavyOutputs // 헤비 출력 집합
#[derive(Debug, Clone, PartialEq)]
pub struct HeavyOutputs {
    /// Number of basis states in the ideal distribution
    size: usize,
    /// Median ideal probability
    median: f64,
    indices: BTreeSet<u64>,
}

impl HeavyOutputs {
    /// Heavy set from an ideal probability vector
    /// Gantree: from_probabilities(probs) -> Result<Self> // 생성
    ///
    /// The vector is indexed by the integer value of the big-endian
    /// measured bitstring, so its length must be a power of two.
    pub fn from_probabilities(probs: &[f64]) -> QvtResult<Self> {
        if probs.len() < 2 || !probs.len().is_power_of_two() {
            return Err(QvtError::InvalidConfig(format!(
                "ideal distribution length {} is not a power of two",
                probs.len()
            )));
        }
        if let Some(&bad) = probs.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(QvtError::InvalidProbability(bad));
        }

        let median = median(probs);
        let indices = probs
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > median)
            .map(|(i, _)| i as u64)
            .collect();

        Ok(Self {
            size: probs.len(),
            median,
            indices,
        })
    }

    /// Width of the measured register
    pub fn nqubits(&self) -> usize {
        self.size.trailing_zeros() as usize
    }

    /// Median ideal probability
    pub fn median(&self) -> f64 {
        self.median
    }

    /// Number of heavy basis states
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if no state is heavy (uniform distribution)
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check if basis state `index` is heavy
    #[inline]
    pub fn is_heavy(&self, index: u64) -> bool {
        self.indices.contains(&index)
    }

    /// Check if a measured bitstring is heavy
    pub fn is_heavy_bitstring(&self, bits: &str) -> QvtResult<bool> {
        if bits.len() != self.nqubits() {
            return Err(QvtError::InvalidBitstring(bits.to_string()));
        }
        Ok(self.is_heavy(parse_bitstring(bits)?))
    }

    /// Count heavy shots among measured bitstrings
    /// Gantree: score_shots(shots) -> Result<TrialRecord> // 샷 채점
    pub fn score_shots<S: AsRef<str>>(&self, shots: &[S]) -> QvtResult<TrialRecord> {
        let mut heavy = 0;
        for bits in shots {
            if self.is_heavy_bitstring(bits.as_ref())? {
                heavy += 1;
            }
        }
        Ok(TrialRecord::new(shots.len() as u64, heavy))
    }

    /// Count heavy shots in a bitstring histogram
    pub fn score_counts(&self, counts: &Counts) -> QvtResult<TrialRecord> {
        let mut shots = 0;
        let mut heavy = 0;
        for (bits, &n) in counts {
            shots += n;
            if self.is_heavy_bitstring(bits)? {
                heavy += n;
            }
        }
        Ok(TrialRecord::new(shots, heavy))
    }

    /// Ideal heavy-output probability: total ideal mass on heavy states
    pub fn ideal_heavy_probability(&self, probs: &[f64]) -> f64 {
        self.indices
            .iter()
            .filter_map(|&i| probs.get(i as usize))
            .sum()
    }
}

/// Median with midpoint averaging for even lengths
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

// ============================================================================
// Tests
// ============================================================================
