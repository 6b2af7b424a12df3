//! Error handling utilities for repositories

use dock_core::error::DomainError;
use dock_core::value_objects::{ParkingId, ShipId, UserId};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}

pub fn ship_not_found(id: ShipId) -> DomainError {
    DomainError::ShipNotFound(id)
}

pub fn parking_not_found(id: ParkingId) -> DomainError {
    DomainError::ParkingNotFound(id)
}

/// Escape `LIKE` wildcards in user input (backslash is the default escape)
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
