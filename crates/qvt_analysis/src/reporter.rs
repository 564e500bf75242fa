//! QV reporting
//!
//! Gantree: L3_Analysis → Reporter
//!
//! Renders QV summaries and success series in several output formats.

use crate::series::SuccessSeries;
use crate::summary::{achieved_quantum_volume, QvSummary};
use qvt_core::error::QvtError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Markdown table
    Markdown,
    /// JSON
    Json,
    /// CSV
    Csv,
    /// Plain text summary
    Text,
}

impl FromStr for ReportFormat {
    type Err = QvtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "text" | "txt" => Ok(ReportFormat::Text),
            other => Err(QvtError::InvalidConfig(format!(
                "unknown report format '{other}'"
            ))),
        }
    }
}

/// Aggregate figures over a set of summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStatistics {
    /// Widths analyzed
    pub widths: usize,
    /// Widths that passed
    pub passed: usize,
    /// Largest passing quantum volume
    pub quantum_volume: Option<u64>,
    /// Trials across all widths
    pub total_trials: usize,
    /// Shots across all widths
    pub total_shots: u64,
}

impl ReportStatistics {
    /// Compute statistics from summaries
    pub fn from_summaries(summaries: &[QvSummary]) -> Self {
        Self {
            widths: summaries.len(),
            passed: summaries.iter().filter(|s| s.passed).count(),
            quantum_volume: achieved_quantum_volume(summaries),
            total_trials: summaries.iter().map(|s| s.ntrials).sum(),
            total_shots: summaries.iter().map(|s| s.total_shots).sum(),
        }
    }
}

/// QV reporter
/// Gantree: Reporter // 결과 리포팅
pub struct Reporter;

impl Reporter {
    // ========================================================================
    // Format Converters
    // ========================================================================

    /// Generate report in specified format
    pub fn report(summaries: &[QvSummary], format: ReportFormat) -> String {
        match format {
            ReportFormat::Markdown => Self::to_markdown(summaries),
            ReportFormat::Json => Self::to_json(summaries),
            ReportFormat::Csv => Self::to_csv(summaries),
            ReportFormat::Text => Self::to_text(summaries),
        }
    }

    /// Convert summaries to Markdown table
    pub fn to_markdown(summaries: &[QvSummary]) -> String {
        render(|out| {
            let stats = ReportStatistics::from_summaries(summaries);
            writeln!(out, "# Quantum Volume Results\n")?;

            writeln!(out, "## Summary\n")?;
            writeln!(out, "- **Widths**: {}", stats.widths)?;
            writeln!(out, "- **Passed**: {}", stats.passed)?;
            writeln!(out, "- **Quantum Volume**: {}", volume_label(stats.quantum_volume))?;
            writeln!(out, "- **Total Shots**: {}\n", stats.total_shots)?;

            writeln!(out, "## Detailed Results\n")?;
            writeln!(
                out,
                "| Qubits | Trials | Shots | Mean | Analytic CI | Bootstrap CI | Result |"
            )?;
            writeln!(
                out,
                "|--------|--------|-------|------|-------------|--------------|--------|"
            )?;
            for s in summaries {
                writeln!(
                    out,
                    "| {} | {} | {} | {:.4} | {} | {} | {} |",
                    s.nqubits,
                    s.ntrials,
                    s.total_shots,
                    s.mean_success,
                    s.analytic,
                    s.bootstrap,
                    if s.passed { "✓" } else { "-" }
                )?;
            }
            Ok(())
        })
    }

    /// Convert summaries to JSON
    pub fn to_json(summaries: &[QvSummary]) -> String {
        let stats = ReportStatistics::from_summaries(summaries);

        let report = serde_json::json!({
            "statistics": stats,
            "results": summaries,
        });

        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Convert summaries to CSV
    pub fn to_csv(summaries: &[QvSummary]) -> String {
        render(|out| {
            writeln!(out, "nqubits,ntrials,total_shots,mean_success,analytic_lower,analytic_upper,bootstrap_lower,bootstrap_upper,threshold,passed")?;
            for s in summaries {
                writeln!(
                    out,
                    "{},{},{},{},{},{},{},{},{},{}",
                    s.nqubits,
                    s.ntrials,
                    s.total_shots,
                    s.mean_success,
                    s.analytic.lower,
                    s.analytic.upper,
                    s.bootstrap.lower,
                    s.bootstrap.upper,
                    s.threshold,
                    s.passed
                )?;
            }
            Ok(())
        })
    }

    /// Convert summaries to plain text summary
    pub fn to_text(summaries: &[QvSummary]) -> String {
        render(|out| {
            let stats = ReportStatistics::from_summaries(summaries);
            writeln!(out, "Quantum Volume Results")?;
            writeln!(out, "======================\n")?;

            writeln!(out, "Summary:")?;
            writeln!(out, "  Widths analyzed: {}", stats.widths)?;
            writeln!(out, "  Widths passed: {}", stats.passed)?;
            writeln!(out, "  Quantum volume: {}", volume_label(stats.quantum_volume))?;
            writeln!(out, "  Total trials: {}\n", stats.total_trials)?;

            writeln!(out, "Individual Results:")?;
            for s in summaries {
                writeln!(
                    out,
                    "  {}Q ({} trials): mean {:.4}, bootstrap {}, margin {:+.4}{}",
                    s.nqubits,
                    s.ntrials,
                    s.mean_success,
                    s.bootstrap,
                    s.margin(),
                    if s.passed { " [pass]" } else { "" }
                )?;
            }
            Ok(())
        })
    }

    // ========================================================================
    // Specialized Reports
    // ========================================================================

    /// Success series as CSV, one row per trial
    ///
    /// Running columns are empty on the last row, which has no prefix entry.
    pub fn series_csv(series: &SuccessSeries) -> String {
        render(|out| {
            writeln!(out, "trial,success,cumulative,analytic_lower,analytic_upper,bootstrap_lower,bootstrap_upper,threshold")?;
            for (i, success) in series.successes.iter().enumerate() {
                let cumulative = series.cumulative.get(i);
                let analytic = series.analytic.as_ref().and_then(|v| v.get(i));
                let bootstrap = series.bootstrap.as_ref().and_then(|v| v.get(i));
                writeln!(
                    out,
                    "{},{},{},{},{},{},{},{}",
                    i,
                    success,
                    cell(cumulative.copied()),
                    cell(analytic.map(|b| b.lower)),
                    cell(analytic.map(|b| b.upper)),
                    cell(bootstrap.map(|b| b.lower)),
                    cell(bootstrap.map(|b| b.upper)),
                    series.threshold
                )?;
            }
            Ok(())
        })
    }
}

fn render<F>(body: F) -> String
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut output = String::new();
    // writing into a String cannot fail
    let _ = body(&mut output);
    output
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn volume_label(volume: Option<u64>) -> String {
    volume.map_or_else(|| "none".to_string(), |v| v.to_string())
}

// ============================================================================
// Tests
// ============================================================================
