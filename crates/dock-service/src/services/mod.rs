//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`], checks the caller
//! against the access gate, and orchestrates repositories and stores.

pub mod auth;
pub mod context;
pub mod error;
pub mod parking;
pub mod parking_ship;
pub mod ship;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use parking::ParkingService;
pub use parking_ship::ParkingShipService;
pub use ship::ShipService;
pub use user::UserService;
