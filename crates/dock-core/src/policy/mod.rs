//! Policies - access control and pluggable business rules

mod access;
mod crew_cost;
mod detach;

pub use access::{authorize, require_principal, Capability, Principal};
pub use crew_cost::{CrewCostEstimator, FixedCrewCost, RandomCrewCost};
pub use detach::DetachPolicy;
