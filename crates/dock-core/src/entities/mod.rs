//! Domain entities - core business objects

mod parking;
mod parking_ship;
mod ship;
mod user;

pub use parking::{Parking, ParkingPatch};
pub use parking_ship::{AttachedShip, DraftSummary, ParkingShip};
pub use ship::{NewShip, Ship};
pub use user::{NewUser, User};
