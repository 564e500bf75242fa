//! Result adapters
//!
//! Gantree: L3_Analysis → ResultAdapter
//!
//! Converts raw experiment output into the `TrialStatistics` consumed by the
//! estimators. Two sources are supported:
//!
//! - per-shot measured bitstrings plus per-trial ideal probabilities
//! - circuit-keyed `(shots, heavy)` counts (`qv_depth_{n}_trial_{i}`)

use crate::heavy::HeavyOutputs;
use qvt_core::error::{QvtError, QvtResult};
use qvt_core::{qv, TrialRecord, TrialStatistics};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Source of per-trial shot and heavy-output counts
/// Gantree: ResultAdapter // 결과 어댑터 trait
pub trait ResultAdapter {
    /// Circuit width of the trials
    fn nqubits(&self) -> usize;

    /// Trial statistics in trial order
    fn trial_statistics(&self) -> QvtResult<TrialStatistics>;
}

// ============================================================================
// ShotResultAdapter
// ============================================================================

/// Raw experiment file layout: one list of measured bitstrings per trial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResults {
    /// Measured bitstrings, outer index = trial
    pub raw_results: Vec<Vec<String>>,
}

/// Adapter over per-shot bitstrings scored against ideal distributions
/// Gantree: ShotResultAdapter // 샷 결과 어댑터
#[derive(Debug, Clone)]
pub struct ShotResultAdapter {
    nqubits: usize,
    shots: Vec<Vec<String>>,
    heavy: Vec<HeavyOutputs>,
}

impl ShotResultAdapter {
    /// Create from per-trial shots and per-trial ideal probability vectors
    /// Gantree: new(shots,ideal) -> Result<Self> // 생성+검증
    pub fn new(shots: Vec<Vec<String>>, ideal: &[Vec<f64>]) -> QvtResult<Self> {
        if shots.is_empty() {
            return Err(QvtError::EmptyTrials);
        }
        if shots.len() != ideal.len() {
            return Err(QvtError::InvalidConfig(format!(
                "{} shot lists but {} ideal distributions",
                shots.len(),
                ideal.len()
            )));
        }

        let heavy = ideal
            .iter()
            .map(|p| HeavyOutputs::from_probabilities(p))
            .collect::<QvtResult<Vec<_>>>()?;

        let nqubits = heavy[0].nqubits();
        if let Some(h) = heavy.iter().find(|h| h.nqubits() != nqubits) {
            return Err(QvtError::InvalidConfig(format!(
                "mixed circuit widths {} and {}",
                nqubits,
                h.nqubits()
            )));
        }

        Ok(Self {
            nqubits,
            shots,
            heavy,
        })
    }

    /// Create from a raw results JSON document (`{"raw_results": [[...], ...]}`)
    pub fn from_raw_json(json: &str, ideal: &[Vec<f64>]) -> QvtResult<Self> {
        let raw: RawResults = serde_json::from_str(json)?;
        Self::new(raw.raw_results, ideal)
    }

    /// Number of trials
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Heavy set of trial `index`
    pub fn heavy_outputs(&self, index: usize) -> Option<&HeavyOutputs> {
        self.heavy.get(index)
    }

    /// Counts keyed by canonical circuit name
    pub fn keyed_counts(&self) -> QvtResult<KeyedCountsAdapter> {
        let stats = self.trial_statistics()?;
        let counts = stats
            .records()
            .iter()
            .enumerate()
            .map(|(i, r)| (qv::circuit_name(self.nqubits, i), (r.shots, r.heavy)))
            .collect();
        Ok(KeyedCountsAdapter::new(self.nqubits, counts))
    }
}

impl ResultAdapter for ShotResultAdapter {
    fn nqubits(&self) -> usize {
        self.nqubits
    }

    fn trial_statistics(&self) -> QvtResult<TrialStatistics> {
        let mut stats = TrialStatistics::default();
        for (shots, heavy) in self.shots.iter().zip(&self.heavy) {
            stats.push(heavy.score_shots(shots)?)?;
        }
        log::debug!(
            "scored {} trials of {} qubits: {} heavy of {} shots",
            stats.len(),
            self.nqubits,
            stats.total_heavy(),
            stats.total_shots()
        );
        Ok(stats)
    }
}

// ============================================================================
// KeyedCountsAdapter
// ============================================================================

/// Adapter over circuit-keyed `(shots, heavy)` counts
/// Gantree: KeyedCountsAdapter // 키 기반 카운트 어댑터
///
/// Keys other than `qv_depth_{nqubits}_trial_{i}` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedCountsAdapter {
    nqubits: usize,
    counts: HashMap<String, (u64, u64)>,
}

impl KeyedCountsAdapter {
    /// Create from a circuit-name to `(shots, heavy)` mapping
    pub fn new(nqubits: usize, counts: HashMap<String, (u64, u64)>) -> Self {
        Self { nqubits, counts }
    }

    /// Create from separate shot and heavy-count mappings
    ///
    /// Every key of `heavy` must have a shot count.
    pub fn from_maps(
        nqubits: usize,
        shots: &HashMap<String, u64>,
        heavy: &HashMap<String, u64>,
    ) -> QvtResult<Self> {
        let counts = heavy
            .iter()
            .map(|(name, &h)| match shots.get(name) {
                Some(&s) => Ok((name.clone(), (s, h))),
                None => Err(QvtError::InvalidConfig(format!(
                    "no shot count for circuit '{name}'"
                ))),
            })
            .collect::<QvtResult<HashMap<_, _>>>()?;
        Ok(Self::new(nqubits, counts))
    }

    /// Insert counts for trial `index`
    pub fn insert(&mut self, index: usize, shots: u64, heavy: u64) {
        self.counts
            .insert(qv::circuit_name(self.nqubits, index), (shots, heavy));
    }

    /// Trial index → counts for this circuit width, ordered by index
    ///
    /// Two names resolving to the same index (`trial_1`, `trial_01`) are
    /// rejected.
    fn ordered(&self) -> QvtResult<BTreeMap<usize, (u64, u64)>> {
        let mut ordered = BTreeMap::new();
        for (name, &counts) in &self.counts {
            match qv::parse_circuit_name(name) {
                Some((n, index)) if n == self.nqubits => {
                    if ordered.insert(index, counts).is_some() {
                        return Err(QvtError::InvalidConfig(format!(
                            "duplicate circuit for trial {index} ('{name}')"
                        )));
                    }
                }
                _ => {}
            }
        }
        Ok(ordered)
    }
}

impl ResultAdapter for KeyedCountsAdapter {
    fn nqubits(&self) -> usize {
        self.nqubits
    }

    fn trial_statistics(&self) -> QvtResult<TrialStatistics> {
        let ordered = self.ordered()?;
        if ordered.is_empty() {
            return Err(QvtError::EmptyTrials);
        }

        let mut records = Vec::with_capacity(ordered.len());
        for (expected, (index, (shots, heavy))) in ordered.into_iter().enumerate() {
            if index != expected {
                return Err(QvtError::InvalidConfig(format!(
                    "missing circuit '{}'",
                    qv::circuit_name(self.nqubits, expected)
                )));
            }
            records.push(TrialRecord::new(shots, heavy));
        }
        TrialStatistics::new(records)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal() -> Vec<Vec<f64>> {
        // heavy: {01, 11} and {00, 10}
        vec![vec![0.1, 0.4, 0.2, 0.3], vec![0.35, 0.05, 0.5, 0.1]]
    }

    fn shots(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shot_adapter() {
        let adapter = ShotResultAdapter::new(
            vec![shots(&["01", "11", "00", "01"]), shots(&["00", "01", "10"])],
            &ideal(),
        )
        .unwrap();
        assert_eq!(adapter.nqubits(), 2);
        assert_eq!(adapter.len(), 2);

        let stats = adapter.trial_statistics().unwrap();
        assert_eq!(stats.records(), &[TrialRecord::new(4, 3), TrialRecord::new(3, 2)]);
    }

    #[test]
    fn test_raw_json() {
        let json = r#"{"raw_results": [["01", "11"], ["10", "10", "01"]]}"#;
        let adapter = ShotResultAdapter::from_raw_json(json, &ideal()).unwrap();
        let stats = adapter.trial_statistics().unwrap();
        assert_eq!(stats.total_shots(), 5);
        assert_eq!(stats.total_heavy(), 4);

        assert!(ShotResultAdapter::from_raw_json("{", &ideal()).is_err());
    }

    #[test]
    fn test_shot_adapter_validation() {
        assert!(ShotResultAdapter::new(vec![], &[]).is_err());
        assert!(ShotResultAdapter::new(vec![shots(&["01"])], &ideal()).is_err());

        let mixed = vec![vec![0.5, 0.5], vec![0.1, 0.4, 0.2, 0.3]];
        assert!(ShotResultAdapter::new(vec![shots(&["0"]), shots(&["01"])], &mixed).is_err());

        // wrong bitstring width surfaces at scoring time
        let adapter = ShotResultAdapter::new(vec![shots(&["011"])], &ideal()[..1]).unwrap();
        assert!(adapter.trial_statistics().is_err());

        // empty trial has zero shots
        let adapter = ShotResultAdapter::new(vec![vec![]], &ideal()[..1]).unwrap();
        assert!(matches!(
            adapter.trial_statistics(),
            Err(QvtError::ZeroShots { trial: 0 })
        ));
    }

    #[test]
    fn test_keyed_counts_ordered_by_index() {
        let mut adapter = KeyedCountsAdapter::new(3, HashMap::new());
        adapter.insert(2, 100, 50);
        adapter.insert(0, 100, 70);
        adapter.insert(1, 200, 150);
        let stats = adapter.trial_statistics().unwrap();
        assert_eq!(stats.successes(), vec![0.7, 0.75, 0.5]);
    }

    #[test]
    fn test_keyed_counts_gap_fails() {
        let mut adapter = KeyedCountsAdapter::new(3, HashMap::new());
        adapter.insert(0, 100, 70);
        adapter.insert(2, 100, 70);
        assert!(matches!(
            adapter.trial_statistics(),
            Err(QvtError::InvalidConfig(_))
        ));
        assert!(KeyedCountsAdapter::new(3, HashMap::new())
            .trial_statistics()
            .is_err());
    }

    #[test]
    fn test_keyed_counts_duplicate_index_fails() {
        let counts: HashMap<String, (u64, u64)> = [
            ("qv_depth_3_trial_0".to_string(), (100, 70)),
            ("qv_depth_3_trial_1".to_string(), (100, 80)),
            ("qv_depth_3_trial_01".to_string(), (100, 20)),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            KeyedCountsAdapter::new(3, counts).trial_statistics(),
            Err(QvtError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_keyed_counts_ignores_other_widths() {
        let counts: HashMap<String, (u64, u64)> = [
            ("qv_depth_4_trial_0".to_string(), (100, 70)),
            ("qv_depth_5_trial_0".to_string(), (100, 10)),
            ("calibration".to_string(), (100, 100)),
        ]
        .into_iter()
        .collect();
        let stats = KeyedCountsAdapter::new(4, counts).trial_statistics().unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.total_heavy(), 70);
    }

    #[test]
    fn test_from_maps_and_roundtrip() {
        let adapter =
            ShotResultAdapter::new(vec![shots(&["01", "00"]), shots(&["10"])], &ideal()).unwrap();
        let keyed = adapter.keyed_counts().unwrap();
        assert_eq!(
            keyed.trial_statistics().unwrap(),
            adapter.trial_statistics().unwrap()
        );

        let shots_map: HashMap<String, u64> = [("qv_depth_2_trial_0".to_string(), 10)]
            .into_iter()
            .collect();
        let heavy_map: HashMap<String, u64> = [("qv_depth_2_trial_0".to_string(), 8)]
            .into_iter()
            .collect();
        let keyed = KeyedCountsAdapter::from_maps(2, &shots_map, &heavy_map).unwrap();
        assert_eq!(keyed.trial_statistics().unwrap().total_heavy(), 8);

        let orphan: HashMap<String, u64> = [("qv_depth_2_trial_1".to_string(), 8)]
            .into_iter()
            .collect();
        assert!(KeyedCountsAdapter::from_maps(2, &shots_map, &orphan).is_err());
    }
}
