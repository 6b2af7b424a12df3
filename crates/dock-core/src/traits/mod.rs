mod repositories;

pub use repositories::{
    CountedTransition, ParkingQuery, ParkingRepository, ParkingShipRepository, RepoResult,
    ShipQuery, ShipRepository, UserRepository,
};
