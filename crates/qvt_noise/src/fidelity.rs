//! Gate fidelity conversions
//!
//! Gantree: L1_Noise → Fidelity
//!
//! Closed-form bijections between average gate fidelity, the depolarizing
//! parameter, and process fidelity over a `d`-dimensional Hilbert space.

use qvt_core::error::{QvtError, QvtResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Representation of a fidelity figure
/// Gantree: FidelityKind // 충실도 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FidelityKind {
    /// Average gate fidelity
    /// Gantree: Avg // 평균
    Avg,

    /// Depolarizing-channel parameter
    /// Gantree: Dep // 탈분극
    Dep,

    /// Process (entanglement) fidelity
    /// Gantree: Proc // 프로세스
    Proc,
}

impl FidelityKind {
    /// All kinds
    pub const ALL: [FidelityKind; 3] = [FidelityKind::Avg, FidelityKind::Dep, FidelityKind::Proc];

    /// Short name used in configuration and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            FidelityKind::Avg => "avg",
            FidelityKind::Dep => "dep",
            FidelityKind::Proc => "proc",
        }
    }
}

impl fmt::Display for FidelityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FidelityKind {
    type Err = QvtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avg" => Ok(FidelityKind::Avg),
            "dep" => Ok(FidelityKind::Dep),
            "proc" => Ok(FidelityKind::Proc),
            other => Err(QvtError::InvalidConversion {
                start: other.to_string(),
                end: String::new(),
                dim: 0,
            }),
        }
    }
}

/// Convert `value` of kind `start` into kind `end` for dimension `d`
/// Gantree: convert(v,d,start,end) -> Result<f64> // 충실도 변환
///
/// `d` is 2 for single-qubit gates and 4 for two-qubit gates.
pub fn convert(value: f64, d: u32, start: FidelityKind, end: FidelityKind) -> QvtResult<f64> {
    use FidelityKind::*;

    if d < 2 {
        return Err(QvtError::InvalidDimension(d));
    }
    let d = f64::from(d);
    let d2 = d * d;

    let out = match (start, end) {
        (Avg, Avg) | (Dep, Dep) | (Proc, Proc) => value,
        (Avg, Dep) => (d * value - 1.0) / (d - 1.0),
        (Avg, Proc) => ((d + 1.0) * value - 1.0) / d,
        (Dep, Avg) => ((d - 1.0) * value + 1.0) / d,
        (Dep, Proc) => ((d2 - 1.0) * value + 1.0) / d2,
        (Proc, Avg) => (d * value + 1.0) / (d + 1.0),
        (Proc, Dep) => (d2 * value - 1.0) / (d2 - 1.0),
    };
    Ok(out)
}

/// Convert using kind names (`"avg"`, `"dep"`, `"proc"`)
///
/// Unknown names yield [`QvtError::InvalidConversion`] naming both ends.
pub fn convert_str(value: f64, d: u32, start: &str, end: &str) -> QvtResult<f64> {
    let invalid = || QvtError::InvalidConversion {
        start: start.to_string(),
        end: end.to_string(),
        dim: d,
    };
    let start_kind = start.parse::<FidelityKind>().map_err(|_| invalid())?;
    let end_kind = end.parse::<FidelityKind>().map_err(|_| invalid())?;
    convert(value, d, start_kind, end_kind)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_avg_to_dep_two_qubit() {
        let dep = convert(0.99, 4, FidelityKind::Avg, FidelityKind::Dep).unwrap();
        assert_abs_diff_eq!(dep, (4.0 * 0.99 - 1.0) / 3.0, epsilon = 1e-15);
        assert_abs_diff_eq!(dep, 0.98667, epsilon = 1e-5);
    }

    #[test]
    fn test_identity() {
        for kind in FidelityKind::ALL {
            for d in [2, 4, 8] {
                assert_eq!(convert(0.973, d, kind, kind).unwrap(), 0.973);
            }
        }
    }

    #[test]
    fn test_round_trip_all_pairs() {
        for a in FidelityKind::ALL {
            for b in FidelityKind::ALL {
                for d in [2, 4] {
                    for v in [0.5, 0.9, 0.99, 0.999, 1.0] {
                        let there = convert(v, d, a, b).unwrap();
                        let back = convert(there, d, b, a).unwrap();
                        assert_abs_diff_eq!(back, v, epsilon = 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn test_perfect_fidelity_is_fixed_point() {
        for a in FidelityKind::ALL {
            for b in FidelityKind::ALL {
                assert_abs_diff_eq!(convert(1.0, 4, a, b).unwrap(), 1.0, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_dep_proc_chain_matches_direct() {
        let via_avg = convert(
            convert(0.95, 2, FidelityKind::Dep, FidelityKind::Avg).unwrap(),
            2,
            FidelityKind::Avg,
            FidelityKind::Proc,
        )
        .unwrap();
        let direct = convert(0.95, 2, FidelityKind::Dep, FidelityKind::Proc).unwrap();
        assert_abs_diff_eq!(via_avg, direct, epsilon = 1e-15);
    }

    #[test]
    fn test_convert_str() {
        let v = convert_str(0.99, 4, "avg", "dep").unwrap();
        assert_abs_diff_eq!(v, 0.986_666_666_666_666_7, epsilon = 1e-12);

        let err = convert_str(0.99, 4, "avg", "fidelity").unwrap_err();
        assert_eq!(
            err,
            QvtError::InvalidConversion {
                start: "avg".into(),
                end: "fidelity".into(),
                dim: 4
            }
        );
    }

    #[test]
    fn test_invalid_dimension() {
        let err = convert(0.9, 1, FidelityKind::Avg, FidelityKind::Dep).unwrap_err();
        assert_eq!(err, QvtError::InvalidDimension(1));
    }

    #[test]
    fn test_kind_parse_and_display() {
        for kind in FidelityKind::ALL {
            assert_eq!(kind.to_string().parse::<FidelityKind>().unwrap(), kind);
        }
        assert!("AVG".parse::<FidelityKind>().is_err());
    }
}
