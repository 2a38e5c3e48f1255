//! Reference-scenario constants for a three-cost unit.
//!
//! These are the commonly cited shop numbers. They seed
//! `EstimatorConfig::default()` and can be overridden per call.

// =============================================================================
// SHOP ODDS
// =============================================================================

/// Chance that a single shop slot rolls a unit of the target's cost tier.
pub const DEFAULT_TIER_PROBABILITY: f64 = 0.40;

/// Units revealed by one reroll.
pub const DEFAULT_SLOTS_PER_ATTEMPT: u32 = 5;

// =============================================================================
// SHARED POOL
// =============================================================================

/// Distinct unit types sharing the cost tier.
pub const DEFAULT_DISTINCT_UNITS_IN_TIER: u32 = 13;

/// Copies of each unit type printed into the shared pool.
pub const DEFAULT_COPIES_PER_UNIT_TYPE: u32 = 18;

/// Copies needed for a three-star unit.
pub const DEFAULT_COPIES_FOR_MAX_RANK: u32 = 9;

// =============================================================================
// GOLD
// =============================================================================

/// Gold spent per reroll.
pub const DEFAULT_REROLL_COST: u32 = 2;

/// Gold to buy one copy of the target once it shows up.
pub const DEFAULT_UNIT_COST: u32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_pool_size() {
        assert_eq!(DEFAULT_DISTINCT_UNITS_IN_TIER * DEFAULT_COPIES_PER_UNIT_TYPE, 234);
    }

    #[test]
    fn test_max_rank_fits_in_print_run() {
        assert!(DEFAULT_COPIES_FOR_MAX_RANK <= DEFAULT_COPIES_PER_UNIT_TYPE);
    }
}
