//! # dock-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! access and cost policies applied to parking reservations.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AttachedShip, DraftSummary, NewShip, NewUser, Parking, ParkingPatch, ParkingShip, Ship, User,
};
pub use error::DomainError;
pub use policy::{
    authorize, require_principal, Capability, CrewCostEstimator, DetachPolicy, FixedCrewCost,
    Principal, RandomCrewCost,
};
pub use traits::{
    CountedTransition, ParkingQuery, ParkingRepository, ParkingShipRepository, RepoResult,
    ShipQuery, ShipRepository, UserRepository,
};
pub use value_objects::{
    IdParseError, ParkingId, ParkingStatus, ShipId, ShipStatus, StatusParseError, UserId,
};
