//! Sensitivity sweeps: one estimate per value of a single parameter.
//!
//! Non-estimate outcomes chart as 0 gold. The stored outcome is never
//! rewritten, so callers can still tell an empty bar from a finished unit.

use crate::estimator::{estimate, EstimationResult, EstimatorConfig, EstimatorError};
use serde::Serialize;

/// Width of the longest bar in the text chart.
const CHART_WIDTH: usize = 40;

/// Parameter varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    OwnedCopies,
    ClaimedTargetCopies,
    ClaimedOtherSameCost,
}

impl SweepParameter {
    pub const ALL: [SweepParameter; 3] = [
        SweepParameter::OwnedCopies,
        SweepParameter::ClaimedTargetCopies,
        SweepParameter::ClaimedOtherSameCost,
    ];

    /// Display name for reports
    pub fn label(&self) -> &'static str {
        match self {
            SweepParameter::OwnedCopies => "Copies owned",
            SweepParameter::ClaimedTargetCopies => "Copies held by others",
            SweepParameter::ClaimedOtherSameCost => "Other same-cost units held by others",
        }
    }

    /// Short name accepted on the command line
    pub fn cli_name(&self) -> &'static str {
        match self {
            SweepParameter::OwnedCopies => "owned",
            SweepParameter::ClaimedTargetCopies => "claimed",
            SweepParameter::ClaimedOtherSameCost => "claimed-other",
        }
    }

    pub fn from_cli_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.cli_name() == name)
    }

    /// The ranges charted by the stock analysis.
    pub fn default_values(&self) -> Vec<u32> {
        match self {
            SweepParameter::OwnedCopies => (0..=8).collect(),
            SweepParameter::ClaimedTargetCopies => (0..=5).collect(),
            SweepParameter::ClaimedOtherSameCost => (0..=90).step_by(10).collect(),
        }
    }

    /// Copy of `base` with this parameter set to `value`.
    pub fn apply(&self, base: &EstimatorConfig, value: u32) -> EstimatorConfig {
        let mut config = base.clone();
        match self {
            SweepParameter::OwnedCopies => config.owned_copies = value,
            SweepParameter::ClaimedTargetCopies => config.claimed_target_copies = value,
            SweepParameter::ClaimedOtherSameCost => config.claimed_other_same_cost = value,
        }
        config
    }
}

/// One swept value and its estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub value: u32,
    pub outcome: EstimationResult,
}

impl SweepPoint {
    /// Gold to plot, with 0 standing in for non-estimate outcomes.
    pub fn chart_value(&self) -> f64 {
        match &self.outcome {
            EstimationResult::Estimate(estimate) => estimate.total_gold.as_f64(),
            EstimationResult::AlreadySatisfied { .. } | EstimationResult::Infeasible { .. } => 0.0,
        }
    }

    fn note(&self) -> &'static str {
        match self.outcome {
            EstimationResult::Estimate(_) => "",
            EstimationResult::AlreadySatisfied { .. } => "done",
            EstimationResult::Infeasible { .. } => "infeasible",
        }
    }
}

/// Estimates across every value of one parameter.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub parameter: SweepParameter,
    pub base: EstimatorConfig,
    pub points: Vec<SweepPoint>,
}

/// Call the estimator once per value, holding everything else at `base`.
pub fn run_sweep(
    base: &EstimatorConfig,
    parameter: SweepParameter,
    values: &[u32],
) -> Result<SweepReport, EstimatorError> {
    let points = values
        .iter()
        .map(|&value| {
            let outcome = estimate(&parameter.apply(base, value))?;
            Ok(SweepPoint { value, outcome })
        })
        .collect::<Result<Vec<_>, EstimatorError>>()?;

    Ok(SweepReport {
        parameter,
        base: base.clone(),
        points,
    })
}

impl SweepReport {
    /// (value, charted gold) pairs.
    pub fn series(&self) -> Vec<(u32, f64)> {
        self.points
            .iter()
            .map(|p| (p.value, p.chart_value()))
            .collect()
    }

    /// Table of gold per value with a horizontal bar chart.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "── GOLD vs {} ",
            self.parameter.label().to_uppercase()
        ));
        report.push_str(&"─".repeat(20));
        report.push('\n');
        report.push_str("  Value      Gold\n");
        report.push_str("  ─────   ────────\n");

        let peak = self
            .points
            .iter()
            .map(SweepPoint::chart_value)
            .fold(0.0_f64, f64::max);

        for point in &self.points {
            let gold = point.chart_value();
            let bar_len = if peak > 0.0 {
                ((gold / peak) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            report.push_str(&format!(
                "  {:5}   {:8.2} {} {}\n",
                point.value,
                gold,
                "█".repeat(bar_len),
                point.note()
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
