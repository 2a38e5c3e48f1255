//! Monte Carlo cross-check for the gold estimator.
//!
//! Replays thousands of reroll sessions against the same pool model to confirm
//! the analytic expectation and to show the spread around it:
//! - Mean, median and 90th percentile rerolls
//! - Mean gold spent
//! - Gap between simulated and expected rerolls

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
