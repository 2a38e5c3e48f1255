//! Simulation report generation.

use crate::estimator::GoldEstimate;

/// Outcome of one simulated reroll session.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub attempts: u64,
    pub copies_bought: u32,
    pub gold: u64,
    pub timed_out: bool,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    // Attempt distribution
    pub mean_attempts: f64,
    pub std_dev_attempts: f64,
    pub min_attempts: u64,
    pub median_attempts: u64,
    pub p90_attempts: u64,
    pub max_attempts: u64,

    pub mean_gold: f64,

    // Analytic numbers for the same config
    pub expected_attempts: f64,
    pub expected_gold: f64,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Aggregate finished runs, comparing against the analytic estimate if any.
    pub fn from_runs(runs: Vec<RunStats>, expected: Option<&GoldEstimate>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;
        let runs_completed = num_runs - runs_timed_out;
        let divisor = num_runs.max(1) as f64;

        let mean_attempts = runs.iter().map(|r| r.attempts as f64).sum::<f64>() / divisor;
        let variance = runs
            .iter()
            .map(|r| (r.attempts as f64 - mean_attempts).powi(2))
            .sum::<f64>()
            / divisor;
        let mean_gold = runs.iter().map(|r| r.gold as f64).sum::<f64>() / divisor;

        let mut sorted: Vec<u64> = runs.iter().map(|r| r.attempts).collect();
        sorted.sort_unstable();

        Self {
            num_runs,
            runs_completed,
            runs_timed_out,
            mean_attempts,
            std_dev_attempts: variance.sqrt(),
            min_attempts: sorted.first().copied().unwrap_or(0),
            median_attempts: percentile(&sorted, 0.5),
            p90_attempts: percentile(&sorted, 0.9),
            max_attempts: sorted.last().copied().unwrap_or(0),
            mean_gold,
            expected_attempts: expected.map_or(0.0, |e| e.expected_attempts),
            expected_gold: expected.map_or(0.0, |e| e.total_gold.as_f64()),
            run_stats: runs,
        }
    }

    /// Relative gap between simulated and analytic mean attempts.
    pub fn relative_error(&self) -> f64 {
        if self.expected_attempts == 0.0 {
            0.0
        } else {
            (self.mean_attempts - self.expected_attempts).abs() / self.expected_attempts
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} completed, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_timed_out
        ));

        report.push_str("── REROLLS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Mean:      {:.2}\n", self.mean_attempts));
        report.push_str(&format!("  Std Dev:   {:.2}\n", self.std_dev_attempts));
        report.push_str(&format!("  Min:       {}\n", self.min_attempts));
        report.push_str(&format!("  Median:    {}\n", self.median_attempts));
        report.push_str(&format!("  90th pct:  {}\n", self.p90_attempts));
        report.push_str(&format!("  Max:       {}\n\n", self.max_attempts));

        report.push_str("── SIMULATED vs EXPECTED ────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Rerolls:   {:>8.2}  vs {:>8.2}\n",
            self.mean_attempts, self.expected_attempts
        ));
        report.push_str(&format!(
            "  Gold:      {:>8.2}  vs {:>8.2}\n",
            self.mean_gold, self.expected_gold
        ));
        report.push_str(&format!(
            "  Gap:       {:>7.2}%\n",
            self.relative_error() * 100.0
        ));

        if self.runs_timed_out > 0 {
            report.push_str("  ⚠️  Some runs hit the reroll cap - mean is biased low\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Nearest-rank percentile of an ascending slice: the smallest value with at
/// least `q` of the samples at or below it.
fn percentile(sorted: &[u64], q: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = (q * sorted.len() as f64).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

// Implement Serialize for JSON output
impl serde::Serialize for SimReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SimReport", 13)?;
        state.serialize_field("num_runs", &self.num_runs)?;
        state.serialize_field("runs_completed", &self.runs_completed)?;
        state.serialize_field("runs_timed_out", &self.runs_timed_out)?;
        state.serialize_field("mean_attempts", &self.mean_attempts)?;
        state.serialize_field("std_dev_attempts", &self.std_dev_attempts)?;
        state.serialize_field("min_attempts", &self.min_attempts)?;
        state.serialize_field("median_attempts", &self.median_attempts)?;
        state.serialize_field("p90_attempts", &self.p90_attempts)?;
        state.serialize_field("max_attempts", &self.max_attempts)?;
        state.serialize_field("mean_gold", &self.mean_gold)?;
        state.serialize_field("expected_attempts", &self.expected_attempts)?;
        state.serialize_field("expected_gold", &self.expected_gold)?;
        state.serialize_field("relative_error", &self.relative_error())?;
        state.end()
    }
}
