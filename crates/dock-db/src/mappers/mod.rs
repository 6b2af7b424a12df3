//! Entity to model mappers
//!
//! - `From`/`TryFrom<Model> for Entity`: convert database rows to domain objects
//! - `*Update` structs: prepare entity data for binding

mod parking;
mod ship;
mod user;

pub use parking::ParkingUpdate;
