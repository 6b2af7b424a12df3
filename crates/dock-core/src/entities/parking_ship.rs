//! Link between a parking and a ship

use crate::entities::Ship;
use crate::value_objects::{ParkingId, ShipId};

/// One (parking, ship) pair with the captain assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingShip {
    pub parking_id: ParkingId,
    pub ship_id: ShipId,
    pub captain: Option<String>,
}

/// A ship as seen through a parking, annotated with its captain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedShip {
    pub ship: Ship,
    pub captain: Option<String>,
}

/// The caller's current draft, summarized for ship listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftSummary {
    pub parking_id: ParkingId,
    pub count: i64,
}
