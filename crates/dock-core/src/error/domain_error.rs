//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ParkingId, ParkingStatus, ShipId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Ship not found: {0}")]
    ShipNotFound(ShipId),

    #[error("Parking not found: {0}")]
    ParkingNotFound(ParkingId),

    #[error("Ship {ship_id} is not attached to parking {parking_id}")]
    ParkingShipNotFound {
        parking_id: ParkingId,
        ship_id: ShipId,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Cannot {action} parking in status '{status}'")]
    InvalidTransition {
        status: ParkingStatus,
        action: &'static str,
    },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Only the owner of this parking may do this")]
    NotOwner,

    #[error("Staff permission required")]
    StaffOnly,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Ship {ship_id} is already attached to parking {parking_id}")]
    ShipAlreadyAttached {
        parking_id: ParkingId,
        ship_id: ShipId,
    },

    #[error("User already has a draft parking")]
    DraftAlreadyExists,

    #[error("Parking {0} was modified concurrently")]
    ParkingChanged(ParkingId),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ShipNotFound(_) => "UNKNOWN_SHIP",
            Self::ParkingNotFound(_) => "UNKNOWN_PARKING",
            Self::ParkingShipNotFound { .. } => "UNKNOWN_PARKING_SHIP",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",

            // Authorization
            Self::Unauthenticated => "UNAUTHORIZED",
            Self::NotOwner => "NOT_PARKING_OWNER",
            Self::StaffOnly => "STAFF_ONLY",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::ShipAlreadyAttached { .. } => "SHIP_ALREADY_ATTACHED",
            Self::DraftAlreadyExists => "DRAFT_ALREADY_EXISTS",
            Self::ParkingChanged(_) => "PARKING_CHANGED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ShipNotFound(_)
                | Self::ParkingNotFound(_)
                | Self::ParkingShipNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidTransition { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotOwner | Self::StaffOnly)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists
                | Self::ShipAlreadyAttached { .. }
                | Self::DraftAlreadyExists
                | Self::ParkingChanged(_)
        )
    }
}

impl From<crate::value_objects::StatusParseError> for DomainError {
    fn from(err: crate::value_objects::StatusParseError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
