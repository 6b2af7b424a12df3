//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and typed path ids.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use path::{ParkingIdPath, ShipIdPath};
pub use query::QueryParams;
pub use validated::{OptionalJson, ValidatedJson};
