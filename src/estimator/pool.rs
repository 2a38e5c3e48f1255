//! Shared-pool depletion counters.

use super::types::{EstimatorConfig, EstimatorError};

/// Target and tier copies still in the shared pool.
///
/// Every copy bought leaves both counters, so they shrink in lockstep.
/// Reroll-returned copies never come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    pub remaining_target_copies: i64,
    pub remaining_tier_pool: i64,
    /// Copies removed so far
    pub step: u32,
}

impl PoolState {
    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self {
            remaining_target_copies: config.remaining_target_copies(),
            remaining_tier_pool: config.remaining_tier_pool(),
            step: 0,
        }
    }

    /// Chance that one slot rolls the target from the current pool.
    ///
    /// Fails when the tier pool is empty or holds fewer copies than the
    /// target alone, which only happens when claims exceed the pool.
    pub fn slot_probability(&self, tier_probability: f64) -> Result<f64, EstimatorError> {
        if self.remaining_tier_pool <= 0
            || self.remaining_target_copies < 0
            || self.remaining_target_copies > self.remaining_tier_pool
        {
            return Err(EstimatorError::PoolInvariant {
                step: self.step,
                remaining_target: self.remaining_target_copies,
                remaining_tier: self.remaining_tier_pool,
            });
        }

        Ok(tier_probability
            * (self.remaining_target_copies as f64 / self.remaining_tier_pool as f64))
    }

    /// Buy one copy of the target.
    pub fn remove_copy(&mut self) {
        self.remaining_target_copies -= 1;
        self.remaining_tier_pool -= 1;
        self.step += 1;
    }
}

/// Chance that at least one of `slots` independent slots hits.
///
/// Summed as `p * (1 + q + q^2 + ... + q^(n-1))` with `q = 1 - p`, which equals
/// `1 - q^n` but keeps precision for small `p` and is exactly `p` for one slot.
pub fn attempt_probability(slot_probability: f64, slots: u32) -> f64 {
    let miss = 1.0 - slot_probability;
    let mut term = 1.0;
    let mut series = 0.0;
    for _ in 0..slots {
        series += term;
        term *= miss;
    }
    (slot_probability * series).min(1.0)
}
