//! Estimator inputs, outcomes, and errors.

use crate::constants::{
    DEFAULT_COPIES_FOR_MAX_RANK, DEFAULT_COPIES_PER_UNIT_TYPE, DEFAULT_DISTINCT_UNITS_IN_TIER,
    DEFAULT_REROLL_COST, DEFAULT_SLOTS_PER_ATTEMPT, DEFAULT_TIER_PROBABILITY, DEFAULT_UNIT_COST,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Pool, odds, and ownership numbers for one estimate.
///
/// Override a subset with struct update syntax:
///
/// ```
/// use goldcalc::estimator::EstimatorConfig;
///
/// let config = EstimatorConfig {
///     owned_copies: 4,
///     claimed_other_same_cost: 50,
///     ..Default::default()
/// };
/// assert_eq!(config.copies_for_max_rank, 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Copies of the target already on your board or bench
    pub owned_copies: u32,
    /// Copies of the target held by other players
    pub claimed_target_copies: u32,
    /// Copies of other same-cost units held by other players
    pub claimed_other_same_cost: u32,
    pub reroll_cost: u32,
    pub unit_cost: u32,
    /// Chance a single slot rolls the target's cost tier
    pub cost_tier_probability: f64,
    pub distinct_units_in_tier: u32,
    pub copies_per_unit_type: u32,
    pub slots_per_attempt: u32,
    pub copies_for_max_rank: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            owned_copies: 0,
            claimed_target_copies: 0,
            claimed_other_same_cost: 0,
            reroll_cost: DEFAULT_REROLL_COST,
            unit_cost: DEFAULT_UNIT_COST,
            cost_tier_probability: DEFAULT_TIER_PROBABILITY,
            distinct_units_in_tier: DEFAULT_DISTINCT_UNITS_IN_TIER,
            copies_per_unit_type: DEFAULT_COPIES_PER_UNIT_TYPE,
            slots_per_attempt: DEFAULT_SLOTS_PER_ATTEMPT,
            copies_for_max_rank: DEFAULT_COPIES_FOR_MAX_RANK,
        }
    }
}

impl EstimatorConfig {
    /// Copies still missing for max rank. Zero or negative means done.
    pub fn needed_copies(&self) -> i64 {
        self.copies_for_max_rank as i64 - self.owned_copies as i64
    }

    /// Copies of the target left in the shared pool. Negative when the
    /// claims exceed the print run.
    pub fn remaining_target_copies(&self) -> i64 {
        self.copies_per_unit_type as i64
            - self.owned_copies as i64
            - self.claimed_target_copies as i64
    }

    /// Size of the whole tier before anyone buys anything.
    pub fn total_tier_pool(&self) -> i64 {
        self.distinct_units_in_tier as i64 * self.copies_per_unit_type as i64
    }

    /// Tier copies still in the shared pool.
    pub fn remaining_tier_pool(&self) -> i64 {
        self.total_tier_pool()
            - self.owned_copies as i64
            - self.claimed_target_copies as i64
            - self.claimed_other_same_cost as i64
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), EstimatorError> {
        let p = self.cost_tier_probability;
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            return Err(EstimatorError::InvalidConfig {
                field: "cost_tier_probability",
                reason: format!("must be in (0, 1], got {}", p),
            });
        }

        let positive = [
            ("reroll_cost", self.reroll_cost),
            ("unit_cost", self.unit_cost),
            ("distinct_units_in_tier", self.distinct_units_in_tier),
            ("copies_per_unit_type", self.copies_per_unit_type),
            ("slots_per_attempt", self.slots_per_attempt),
            ("copies_for_max_rank", self.copies_for_max_rank),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(EstimatorError::InvalidConfig {
                    field,
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// A probability shown as a fraction and a percentage, e.g. `0.0311 (3.11%)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Probability(pub f64);

impl Probability {
    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} ({:.2}%)", self.fraction(), self.percent())
    }
}

impl Serialize for Probability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Probability", 2)?;
        state.serialize_field("fraction", &self.fraction())?;
        state.serialize_field("label", &self.to_string())?;
        state.end()
    }
}

/// An amount of gold kept in whole cents, so totals never pick up float noise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gold {
    cents: u64,
}

impl Gold {
    pub const ZERO: Gold = Gold { cents: 0 };

    pub fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub fn from_whole(gold: u64) -> Self {
        Self { cents: gold * 100 }
    }

    /// Nearest cent of a non-negative amount.
    pub fn round_from(value: f64) -> Self {
        Self {
            cents: (value * 100.0).round() as u64,
        }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn as_f64(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl Add for Gold {
    type Output = Gold;

    fn add(self, rhs: Gold) -> Gold {
        Gold {
            cents: self.cents + rhs.cents,
        }
    }
}

impl fmt::Display for Gold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Gold {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Expected cost of finishing a unit, with its breakdown.
///
/// Gold is held to the cent and the attempt total is rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldEstimate {
    pub total_gold: Gold,
    pub attempts_gold: Gold,
    pub purchase_gold: Gold,
    pub expected_attempts: f64,
    pub owned: u32,
    pub needed: u32,
    /// Chance one slot shows the target, from the pool before any purchase
    pub probability_per_slot: Probability,
    /// Chance one reroll shows at least one target, same pool
    pub probability_per_attempt: Probability,
}

/// Outcome of [`estimate`](super::estimate).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EstimationResult {
    /// Enough copies are already owned; nothing left to buy.
    AlreadySatisfied { owned: u32 },
    /// The pool cannot hold enough copies to finish the unit.
    Infeasible { available: i64, needed: u32 },
    Estimate(GoldEstimate),
}

impl EstimationResult {
    /// Expected gold, zero when nothing is left to buy. `None` if infeasible.
    pub fn total_gold(&self) -> Option<f64> {
        match self {
            EstimationResult::AlreadySatisfied { .. } => Some(0.0),
            EstimationResult::Infeasible { .. } => None,
            EstimationResult::Estimate(estimate) => Some(estimate.total_gold.as_f64()),
        }
    }

    pub fn as_estimate(&self) -> Option<&GoldEstimate> {
        match self {
            EstimationResult::Estimate(estimate) => Some(estimate),
            _ => None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        !matches!(self, EstimationResult::Infeasible { .. })
    }
}

impl fmt::Display for EstimationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimationResult::AlreadySatisfied { owned } => {
                write!(f, "Already at max rank with {} copies owned", owned)
            }
            EstimationResult::Infeasible { available, needed } => write!(
                f,
                "Not enough copies left in the pool: {} available, {} needed",
                available, needed
            ),
            EstimationResult::Estimate(e) => {
                writeln!(f, "Expected total gold:   {}", e.total_gold)?;
                writeln!(f, "  Gold on rerolls:     {}", e.attempts_gold)?;
                writeln!(f, "  Gold on purchases:   {}", e.purchase_gold)?;
                writeln!(f, "Expected rerolls:      {:.2}", e.expected_attempts)?;
                writeln!(f, "Copies owned:          {}", e.owned)?;
                writeln!(f, "Copies needed:         {}", e.needed)?;
                writeln!(f, "Chance per slot:       {}", e.probability_per_slot)?;
                write!(f, "Chance per reroll:     {}", e.probability_per_attempt)
            }
        }
    }
}

/// Failures that stop an estimate outright.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimatorError {
    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Claims add up to more tier copies than the pool can hold.
    #[error(
        "pool invariant violated at step {step}: {remaining_target} target copies \
         in a tier pool of {remaining_tier}"
    )]
    PoolInvariant {
        step: u32,
        remaining_target: i64,
        remaining_tier: i64,
    },

    #[error("pool cannot supply {needed} copies, only {available} left")]
    Infeasible { available: i64, needed: u32 },
}
