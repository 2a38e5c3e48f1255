//! Simulation configuration.

/// Configuration for a Monte Carlo run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated reroll sessions
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Rerolls per session before giving up on it
    pub max_attempts_per_run: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 10_000,
            seed: None,
            max_attempts_per_run: 100_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded run for sanity checks
    pub fn quick_check() -> Self {
        Self {
            num_runs: 1000,
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Default config with a custom run count
    pub fn with_runs(num_runs: u32) -> Self {
        Self {
            num_runs,
            ..Default::default()
        }
    }
}
