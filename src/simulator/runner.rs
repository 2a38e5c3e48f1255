//! Monte Carlo replay of the reroll model.
//!
//! Each run rolls every slot of every reroll against the same depleting pool
//! the estimator uses, so the average cost should land on the analytic value.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::estimator::{estimate, EstimationResult, EstimatorConfig, EstimatorError, PoolState};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Run the full simulation and return a report.
pub fn run_simulation(
    config: &EstimatorConfig,
    sim: &SimConfig,
) -> Result<SimReport, EstimatorError> {
    let expected = match estimate(config)? {
        EstimationResult::Infeasible { available, needed } => {
            return Err(EstimatorError::Infeasible { available, needed });
        }
        EstimationResult::AlreadySatisfied { .. } => None,
        EstimationResult::Estimate(estimate) => Some(estimate),
    };
    let needed = expected.as_ref().map_or(0, |e| e.needed);

    let mut all_runs = Vec::with_capacity(sim.num_runs as usize);

    for run_idx in 0..sim.num_runs {
        let mut rng = match sim.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, needed, sim.max_attempts_per_run, &mut rng)?;

        if sim.verbosity >= 2 {
            debug!(
                run = run_idx + 1,
                of = sim.num_runs,
                attempts = run.attempts,
                copies = run.copies_bought,
                gold = run.gold,
                timed_out = run.timed_out,
                "run finished"
            );
        }
        all_runs.push(run);
    }

    let report = SimReport::from_runs(all_runs, expected.as_ref());

    if sim.verbosity >= 1 {
        info!(
            runs = report.num_runs,
            mean_attempts = report.mean_attempts,
            expected_attempts = report.expected_attempts,
            mean_gold = report.mean_gold,
            "simulation complete"
        );
    }

    Ok(report)
}

/// Reroll until `needed` copies are bought or the attempt cap is hit.
pub fn simulate_single_run(
    config: &EstimatorConfig,
    needed: u32,
    max_attempts: u64,
    rng: &mut impl Rng,
) -> Result<RunStats, EstimatorError> {
    let mut pool = PoolState::from_config(config);
    let mut attempts: u64 = 0;
    let mut copies_bought: u32 = 0;
    let mut timed_out = false;

    while copies_bought < needed {
        if attempts >= max_attempts {
            timed_out = true;
            break;
        }

        let p_slot = pool.slot_probability(config.cost_tier_probability)?;
        attempts += 1;

        // One purchase per reroll, even if several slots show the target
        let hit = (0..config.slots_per_attempt).any(|_| rng.gen::<f64>() < p_slot);
        if hit {
            pool.remove_copy();
            copies_bought += 1;
        }
    }

    let gold =
        attempts * config.reroll_cost as u64 + copies_bought as u64 * config.unit_cost as u64;

    Ok(RunStats {
        attempts,
        copies_bought,
        gold,
        timed_out,
    })
}
