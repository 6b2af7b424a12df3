//! Value objects - immutable types that represent domain concepts

mod ids;
mod status;

pub use ids::{IdParseError, ParkingId, ShipId, UserId};
pub use status::{ParkingStatus, ShipStatus, StatusParseError};
