//! Error-channel budgets
//!
//! Gantree: L1_Noise → ErrorBudget
//!
//! Expands a scalar error magnitude into per-channel contributions using a
//! fixed table of named presets, and folds a budget into the average
//! fidelity of one QV slice.

use crate::fidelity::{convert, FidelityKind};
use qvt_core::error::{QvtError, QvtResult};
use qvt_core::fidelity::{SQ_DIM, TQ_DIM};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ErrorChannel
// ============================================================================

/// Named error channel
/// Gantree: ErrorChannel // 에러 채널
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorChannel {
    /// Single-qubit depolarizing
    SqDep,
    /// Single-qubit coherent
    SqCoh,
    /// Single-qubit dephasing
    SqDph,
    /// Two-qubit depolarizing
    TqDep,
    /// Two-qubit coherent
    TqCoh,
    /// Two-qubit dephasing
    TqDph,
    /// Two-qubit crosstalk
    TqCross,
    /// Measurement
    Meas,
    /// State preparation
    Prep,
}

impl ErrorChannel {
    /// All channels in canonical order
    pub const ALL: [ErrorChannel; 9] = [
        ErrorChannel::SqDep,
        ErrorChannel::SqCoh,
        ErrorChannel::SqDph,
        ErrorChannel::TqDep,
        ErrorChannel::TqCoh,
        ErrorChannel::TqDph,
        ErrorChannel::TqCross,
        ErrorChannel::Meas,
        ErrorChannel::Prep,
    ];

    /// Key used in serialized budgets
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorChannel::SqDep => "sq_dep",
            ErrorChannel::SqCoh => "sq_coh",
            ErrorChannel::SqDph => "sq_dph",
            ErrorChannel::TqDep => "tq_dep",
            ErrorChannel::TqCoh => "tq_coh",
            ErrorChannel::TqDph => "tq_dph",
            ErrorChannel::TqCross => "tq_cross",
            ErrorChannel::Meas => "meas",
            ErrorChannel::Prep => "prep",
        }
    }
}

impl fmt::Display for ErrorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorChannel {
    type Err = QvtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorChannel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| QvtError::UnknownChannel(s.to_string()))
    }
}

// ============================================================================
// Coefficient
// ============================================================================

/// How a preset derives one channel's magnitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coefficient {
    /// `num * magnitude / den`
    Scaled {
        /// Multiplier applied to the magnitude
        num: f64,
        /// Divisor applied after the multiplier
        den: f64,
    },
    /// Constant independent of the magnitude
    Fixed(f64),
}

impl Coefficient {
    /// Evaluate for a scalar magnitude
    #[inline]
    pub fn apply(&self, magnitude: f64) -> f64 {
        match *self {
            Coefficient::Scaled { num, den } => num * magnitude / den,
            Coefficient::Fixed(value) => value,
        }
    }
}

const fn scaled(num: f64, den: f64) -> Coefficient {
    Coefficient::Scaled { num, den }
}

// Shared denominators of the preset table
const D10: f64 = 12.0 / 5.0 + 10.0;
const D11: f64 = 12.0 / 5.0 + 11.0;

// ============================================================================
// ErrorPreset
// ============================================================================

/// Named recipe for splitting an error magnitude across channels
/// Gantree: ErrorPreset // 에러 프리셋
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorPreset {
    /// Two-qubit depolarizing dominated
    #[serde(rename = "TQ Dep")]
    TqDep,
    /// Single-qubit depolarizing dominated
    #[serde(rename = "SQ Dep")]
    SqDep,
    /// Two-qubit coherent dominated
    #[serde(rename = "TQ Coh")]
    TqCoh,
    /// Measurement dominated
    #[serde(rename = "Measure")]
    Measure,
    /// Realistic mix with crosstalk
    #[serde(rename = "Realistic cross")]
    RealisticCross,
    /// Realistic mix with dephasing
    #[serde(rename = "Realistic dph")]
    RealisticDph,
    /// Realistic mix with fixed crosstalk floor
    #[serde(rename = "Uncontrolled")]
    Uncontrolled,
    /// Realistic mix with coherent two-qubit error
    #[serde(rename = "Realistic coh")]
    RealisticCoh,
    /// All realistic contributions together
    #[serde(rename = "Realistic all")]
    RealisticAll,
}

impl ErrorPreset {
    /// All presets
    pub const ALL: [ErrorPreset; 9] = [
        ErrorPreset::TqDep,
        ErrorPreset::SqDep,
        ErrorPreset::TqCoh,
        ErrorPreset::Measure,
        ErrorPreset::RealisticCross,
        ErrorPreset::RealisticDph,
        ErrorPreset::Uncontrolled,
        ErrorPreset::RealisticCoh,
        ErrorPreset::RealisticAll,
    ];

    /// Display name of the preset
    pub fn name(&self) -> &'static str {
        match self {
            ErrorPreset::TqDep => "TQ Dep",
            ErrorPreset::SqDep => "SQ Dep",
            ErrorPreset::TqCoh => "TQ Coh",
            ErrorPreset::Measure => "Measure",
            ErrorPreset::RealisticCross => "Realistic cross",
            ErrorPreset::RealisticDph => "Realistic dph",
            ErrorPreset::Uncontrolled => "Uncontrolled",
            ErrorPreset::RealisticCoh => "Realistic coh",
            ErrorPreset::RealisticAll => "Realistic all",
        }
    }

    /// Channel coefficients; unlisted channels are zero
    /// Gantree: terms() -> &[(ErrorChannel,Coefficient)] // 계수표
    pub fn terms(&self) -> &'static [(ErrorChannel, Coefficient)] {
        match self {
            ErrorPreset::TqDep => table::TQ_DEP,
            ErrorPreset::SqDep => table::SQ_DEP,
            ErrorPreset::TqCoh => table::TQ_COH,
            ErrorPreset::Measure => table::MEASURE,
            ErrorPreset::RealisticCross => table::REALISTIC_CROSS,
            ErrorPreset::RealisticDph => table::REALISTIC_DPH,
            ErrorPreset::Uncontrolled => table::UNCONTROLLED,
            ErrorPreset::RealisticCoh => table::REALISTIC_COH,
            ErrorPreset::RealisticAll => table::REALISTIC_ALL,
        }
    }
}

mod table {
    use super::ErrorChannel::*;
    use super::{scaled, Coefficient, ErrorChannel, D10, D11};

    type Terms = &'static [(ErrorChannel, Coefficient)];

    pub(super) const TQ_DEP: Terms = &[
        (TqDep, scaled(10.0, D10)),
        (SqDep, scaled(1.0, D10)),
        (Meas, scaled(1.0, 1.0)),
    ];

    pub(super) const SQ_DEP: Terms = &[
        (SqDep, scaled(10.0, 25.0)),
        (TqDep, scaled(1.0, 25.0)),
        (Meas, scaled(1.0, 1.0)),
    ];

    pub(super) const TQ_COH: Terms = &[
        (TqCoh, scaled(10.0, D10)),
        (SqDep, scaled(1.0, D10)),
        (Meas, scaled(1.0, 1.0)),
    ];

    pub(super) const MEASURE: Terms = &[
        (Meas, scaled(10.0, 1.0)),
        (TqDep, scaled(10.0, D10)),
        (SqDep, scaled(1.0, D10)),
    ];

    pub(super) const REALISTIC_CROSS: Terms = &[
        (TqCross, scaled(1.0, 1.0)),
        (TqDep, scaled(10.0, D10)),
        (SqDep, scaled(1.0, D10)),
        (Meas, scaled(1.0, 1.0)),
    ];

    pub(super) const REALISTIC_DPH: Terms = &[
        (TqDph, scaled(1.0, 1.0)),
        (TqDep, scaled(10.0, D10)),
        (SqDep, scaled(1.0, D10)),
        (Meas, scaled(1.0, 1.0)),
    ];

    pub(super) const UNCONTROLLED: Terms = &[
        (TqCross, Coefficient::Fixed(1e-3)),
        (TqDph, scaled(1.0, 2.0)),
        (TqCoh, scaled(1.0, D11)),
        (TqDep, scaled(10.0, D11)),
        (SqDep, scaled(1.0, D11)),
        (Meas, scaled(1.0, 1.0)),
    ];

    pub(super) const REALISTIC_COH: Terms = &[
        (TqCoh, scaled(5.0, D10)),
        (TqDep, scaled(5.0, D10)),
        (SqDep, scaled(1.0, D10)),
        (Meas, scaled(1.0, 1.0)),
    ];

    pub(super) const REALISTIC_ALL: Terms = &[
        (TqCross, scaled(1.0, 2.0)),
        (TqDph, scaled(1.0, 2.0)),
        (TqCoh, scaled(1.0, D11)),
        (TqDep, scaled(10.0, D11)),
        (SqDep, scaled(1.0, D11)),
        (Meas, scaled(1.0, 1.0)),
    ];
}

impl fmt::Display for ErrorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorPreset {
    type Err = QvtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorPreset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| QvtError::UnknownPreset(s.to_string()))
    }
}

// ============================================================================
// ErrorChannelBudget
// ============================================================================

/// Per-channel error magnitudes
/// Gantree: ErrorChannelBudget // 에러 예산
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorChannelBudget {
    /// Single-qubit depolarizing error
    pub sq_dep: f64,
    /// Single-qubit coherent error
    pub sq_coh: f64,
    /// Single-qubit dephasing error
    pub sq_dph: f64,
    /// Two-qubit depolarizing error
    pub tq_dep: f64,
    /// Two-qubit coherent error
    pub tq_coh: f64,
    /// Two-qubit dephasing error
    pub tq_dph: f64,
    /// Two-qubit crosstalk error
    pub tq_cross: f64,
    /// Measurement error
    pub meas: f64,
    /// State preparation error
    pub prep: f64,
}

impl ErrorChannelBudget {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Budget with every channel at zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Expand `magnitude` with a preset
    /// Gantree: from_preset(magnitude,preset) -> Result<Self> // 프리셋 전개
    pub fn from_preset(magnitude: f64, preset: ErrorPreset) -> QvtResult<Self> {
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(QvtError::InvalidConfig(format!(
                "error magnitude must be finite and non-negative, got {magnitude}"
            )));
        }
        let mut budget = Self::zero();
        for (channel, coefficient) in preset.terms() {
            budget.set(*channel, coefficient.apply(magnitude));
        }
        Ok(budget)
    }

    /// Set one channel
    pub fn with(mut self, channel: ErrorChannel, value: f64) -> Self {
        self.set(channel, value);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Magnitude of one channel
    pub fn get(&self, channel: ErrorChannel) -> f64 {
        match channel {
            ErrorChannel::SqDep => self.sq_dep,
            ErrorChannel::SqCoh => self.sq_coh,
            ErrorChannel::SqDph => self.sq_dph,
            ErrorChannel::TqDep => self.tq_dep,
            ErrorChannel::TqCoh => self.tq_coh,
            ErrorChannel::TqDph => self.tq_dph,
            ErrorChannel::TqCross => self.tq_cross,
            ErrorChannel::Meas => self.meas,
            ErrorChannel::Prep => self.prep,
        }
    }

    /// Overwrite one channel
    pub fn set(&mut self, channel: ErrorChannel, value: f64) {
        let slot = match channel {
            ErrorChannel::SqDep => &mut self.sq_dep,
            ErrorChannel::SqCoh => &mut self.sq_coh,
            ErrorChannel::SqDph => &mut self.sq_dph,
            ErrorChannel::TqDep => &mut self.tq_dep,
            ErrorChannel::TqCoh => &mut self.tq_coh,
            ErrorChannel::TqDph => &mut self.tq_dph,
            ErrorChannel::TqCross => &mut self.tq_cross,
            ErrorChannel::Meas => &mut self.meas,
            ErrorChannel::Prep => &mut self.prep,
        };
        *slot = value;
    }

    /// `(channel, magnitude)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ErrorChannel, f64)> + '_ {
        ErrorChannel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Keyed view with all nine channel names
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter().map(|(c, v)| (c.as_str(), v)).collect()
    }

    // ========================================================================
    // Aggregation
    // ========================================================================

    /// Average fidelity of one QV slice under this budget
    /// Gantree: slice_fidelity(&self) -> Result<f64> // 슬라이스 충실도
    ///
    /// Each channel is converted to a depolarizing factor before the factors
    /// are multiplied. The single-qubit factor is squared in process-fidelity
    /// space (two single-qubit layers per slice) and lifted to the two-qubit
    /// space before combining. `tq_cross`, `meas` and `prep` do not enter.
    pub fn slice_fidelity(&self) -> QvtResult<f64> {
        let dep = |error: f64, d: u32| convert(1.0 - error, d, FidelityKind::Avg, FidelityKind::Dep);

        let mut tq_dep = 1.0;
        tq_dep *= dep(self.tq_dep, TQ_DIM)?;
        tq_dep *= dep(self.tq_coh, TQ_DIM)?;

        let mut sq_dep = 1.0;
        sq_dep *= dep(self.sq_dep, SQ_DIM)?;
        sq_dep *= dep(self.sq_coh, SQ_DIM)?;
        sq_dep *= dep(self.sq_dph, SQ_DIM)?;

        // Dephasing on the pair is budgeted per qubit
        tq_dep *= dep(self.tq_dph, SQ_DIM)?;

        let sq_proc = convert(sq_dep, SQ_DIM, FidelityKind::Dep, FidelityKind::Proc)?;
        let sq_dep = convert(sq_proc.powi(2), TQ_DIM, FidelityKind::Proc, FidelityKind::Dep)?;

        let slice = convert(sq_dep * tq_dep, TQ_DIM, FidelityKind::Dep, FidelityKind::Avg)?;
        log::debug!("slice fidelity {slice:.6} from sq_dep={sq_dep:.6}, tq_dep={tq_dep:.6}");
        Ok(slice)
    }
}

impl fmt::Display for ErrorChannelBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorChannelBudget(")?;
        for (i, (channel, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{channel}={value:.2e}")?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Expand `magnitude` into a full budget using `preset`
/// Gantree: build_error_channel_budget(magnitude,preset) -> Result<Budget> // 예산 생성
pub fn build_error_channel_budget(
    magnitude: f64,
    preset: ErrorPreset,
) -> QvtResult<ErrorChannelBudget> {
    ErrorChannelBudget::from_preset(magnitude, preset)
}

/// Expand `magnitude` using a preset looked up by display name
pub fn build_error_channel_budget_by_name(
    magnitude: f64,
    preset_name: &str,
) -> QvtResult<ErrorChannelBudget> {
    let preset: ErrorPreset = preset_name.parse()?;
    ErrorChannelBudget::from_preset(magnitude, preset)
}

/// Combine a budget into one per-slice average fidelity
/// Gantree: aggregate_slice_fidelity(budget) -> Result<f64> // 슬라이스 집계
pub fn aggregate_slice_fidelity(budget: &ErrorChannelBudget) -> QvtResult<f64> {
    budget.slice_fidelity()
}

// ============================================================================
// Tests
// ============================================================================
