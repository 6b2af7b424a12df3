//! Crew spending estimation applied when a parking is approved

use rand::Rng;

/// Produces the per-ship crew cost used on approval.
pub trait CrewCostEstimator: Send + Sync {
    fn per_ship_cost(&self) -> i64;

    /// Total spending for `ship_count` ships.
    fn total(&self, ship_count: i64) -> i64 {
        ship_count.saturating_mul(self.per_ship_cost())
    }
}

/// Uniform draw from `[min, max)` on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomCrewCost {
    min: i64,
    max: i64,
}

impl RandomCrewCost {
    pub const DEFAULT_MIN: i64 = 10_000;
    pub const DEFAULT_MAX: i64 = 20_000;

    /// Bounds are swapped if given in reverse; an empty range yields `min`.
    pub fn new(min: i64, max: i64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

impl Default for RandomCrewCost {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }
}

impl CrewCostEstimator for RandomCrewCost {
    fn per_ship_cost(&self) -> i64 {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }
}

/// Always returns the same cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCrewCost(pub i64);

impl CrewCostEstimator for FixedCrewCost {
    fn per_ship_cost(&self) -> i64 {
        self.0
    }
}
