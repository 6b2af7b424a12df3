//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in dock-core.

mod error;
mod parking;
mod parking_ship;
mod ship;
mod user;

pub use parking::PgParkingRepository;
pub use parking_ship::PgParkingShipRepository;
pub use ship::PgShipRepository;
pub use user::PgUserRepository;
