//! Expected gold to finish a unit.

use super::pool::{attempt_probability, PoolState};
use super::types::{
    EstimationResult, EstimatorConfig, EstimatorError, Gold, GoldEstimate, Probability,
};
use tracing::debug;

/// Round a reported total to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Expected gold and rerolls to collect the copies still missing for max rank.
///
/// Copies are bought one at a time. Each copy costs `1 / p_attempt` rerolls in
/// expectation (geometric waiting time), with `p_attempt` taken from the pool
/// as it stands after the previous purchases.
pub fn estimate(config: &EstimatorConfig) -> Result<EstimationResult, EstimatorError> {
    let needed = config.needed_copies();
    if needed <= 0 {
        debug!(owned = config.owned_copies, "already at max rank");
        return Ok(EstimationResult::AlreadySatisfied {
            owned: config.owned_copies,
        });
    }
    let needed = needed as u32;

    config.validate()?;

    let available = config.remaining_target_copies();
    if available < needed as i64 {
        debug!(available, needed, "pool cannot supply enough copies");
        return Ok(EstimationResult::Infeasible { available, needed });
    }

    let mut pool = PoolState::from_config(config);
    let tier_probability = config.cost_tier_probability;
    let slots = config.slots_per_attempt;

    let probability_per_slot = pool.slot_probability(tier_probability)?;
    let probability_per_attempt = attempt_probability(probability_per_slot, slots);

    let mut total_attempts = 0.0;
    for _ in 0..needed {
        let p_slot = pool.slot_probability(tier_probability)?;
        let p_attempt = attempt_probability(p_slot, slots);
        let attempts = 1.0 / p_attempt;
        total_attempts += attempts;

        debug!(
            step = pool.step,
            remaining_target = pool.remaining_target_copies,
            remaining_tier = pool.remaining_tier_pool,
            p_slot,
            p_attempt,
            attempts,
            "acquisition step"
        );

        pool.remove_copy();
    }

    let attempts_gold = Gold::round_from(total_attempts * config.reroll_cost as f64);
    let purchase_gold = Gold::from_whole(needed as u64 * config.unit_cost as u64);

    Ok(EstimationResult::Estimate(GoldEstimate {
        total_gold: attempts_gold + purchase_gold,
        attempts_gold,
        purchase_gold,
        expected_attempts: round2(total_attempts),
        owned: config.owned_copies,
        needed,
        probability_per_slot: Probability(probability_per_slot),
        probability_per_attempt: Probability(probability_per_attempt),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single-type tier with a coin-flip slot, small enough to work by hand.
    fn coin_flip_config() -> EstimatorConfig {
        EstimatorConfig {
            cost_tier_probability: 0.5,
            distinct_units_in_tier: 1,
            copies_per_unit_type: 2,
            slots_per_attempt: 1,
            copies_for_max_rank: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(40.0), 40.0);
    }

    #[test]
    fn test_hand_computed_estimate() {
        // Both steps see target == tier, so p_slot = 0.5 and 2 rerolls each.
        let result = estimate(&coin_flip_config()).unwrap();
        let e = result.as_estimate().unwrap();
        assert_eq!(e.needed, 2);
        assert_eq!(e.expected_attempts, 4.0);
        assert_eq!(e.attempts_gold, Gold::from_whole(8));
        assert_eq!(e.purchase_gold, Gold::from_whole(6));
        assert_eq!(e.total_gold, Gold::from_whole(14));
        assert_eq!(e.probability_per_slot, Probability(0.5));
        assert_eq!(e.probability_per_attempt, Probability(0.5));
    }

    #[test]
    fn test_two_slots_raise_attempt_odds() {
        let config = EstimatorConfig {
            slots_per_attempt: 2,
            copies_for_max_rank: 1,
            ..coin_flip_config()
        };
        let result = estimate(&config).unwrap();
        let e = result.as_estimate().unwrap();
        assert!((e.probability_per_attempt.fraction() - 0.75).abs() < 1e-12);
        assert_eq!(e.expected_attempts, 1.33);
    }

    #[test]
    fn test_pool_depletes_between_steps() {
        // 2 of the target in a tier of 4: first copy at 2/4, second at 1/3.
        let config = EstimatorConfig {
            cost_tier_probability: 1.0,
            distinct_units_in_tier: 2,
            copies_per_unit_type: 2,
            slots_per_attempt: 1,
            copies_for_max_rank: 2,
            reroll_cost: 1,
            ..Default::default()
        };
        let e = estimate(&config).unwrap().as_estimate().cloned().unwrap();
        assert_eq!(e.expected_attempts, 5.0);
        assert_eq!(e.probability_per_slot, Probability(0.5));
    }

    #[test]
    fn test_already_satisfied_skips_validation() {
        let config = EstimatorConfig {
            owned_copies: 9,
            slots_per_attempt: 0,
            ..Default::default()
        };
        assert_eq!(
            estimate(&config),
            Ok(EstimationResult::AlreadySatisfied { owned: 9 })
        );
    }

    #[test]
    fn test_invalid_config_is_error() {
        let config = EstimatorConfig {
            reroll_cost: 0,
            ..Default::default()
        };
        assert!(matches!(
            estimate(&config),
            Err(EstimatorError::InvalidConfig {
                field: "reroll_cost",
                ..
            })
        ));
    }

    #[test]
    fn test_over_claimed_tier_is_invariant_violation() {
        // 12 other types hold 216 copies; claiming 230 of them is impossible.
        let config = EstimatorConfig {
            claimed_other_same_cost: 230,
            ..Default::default()
        };
        assert!(matches!(
            estimate(&config),
            Err(EstimatorError::PoolInvariant { step: 0, .. })
        ));
    }
}
