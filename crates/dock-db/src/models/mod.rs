//! Database models - SQLx-compatible structs for PostgreSQL tables

mod parking;
mod ship;
mod user;

pub use parking::{DraftSummaryModel, ParkingModel, ParkingShipModel};
pub use ship::{AttachedShipModel, ShipModel};
pub use user::UserModel;
