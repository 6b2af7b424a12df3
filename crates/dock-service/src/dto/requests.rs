//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`, and those carrying user input
//! implement `Validate` for input validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Profile update; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,
}

// ============================================================================
// Ship Requests
// ============================================================================

/// Ship listing filters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ShipListQuery {
    /// Case-insensitive substring of the class name
    pub class_name: Option<String>,

    #[serde(default)]
    pub active_only: bool,
}

/// Create ship request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShipRequest {
    #[validate(length(min = 1, max = 60, message = "Ship name must be 1-60 characters"))]
    pub ship_name: String,

    #[validate(length(max = 60, message = "Class name must be at most 60 characters"))]
    #[serde(default)]
    pub class_name: String,

    #[validate(length(max = 600, message = "Description must be at most 600 characters"))]
    #[serde(default)]
    pub description: String,

    /// `active` (default) or `deleted`
    pub status: Option<String>,

    #[validate(length(max = 255, message = "Image URL must be at most 255 characters"))]
    pub img_url: Option<String>,
}

/// Partial ship update
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateShipRequest {
    #[validate(length(min = 1, max = 60, message = "Ship name must be 1-60 characters"))]
    pub ship_name: Option<String>,

    #[validate(length(max = 60, message = "Class name must be at most 60 characters"))]
    pub class_name: Option<String>,

    #[validate(length(max = 600, message = "Description must be at most 600 characters"))]
    pub description: Option<String>,

    pub status: Option<String>,

    #[validate(length(max = 255, message = "Image URL must be at most 255 characters"))]
    pub img_url: Option<String>,
}

/// Set the image URL of a ship
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetShipImageRequest {
    #[validate(range(min = 1, message = "id_ship must be positive"))]
    pub id_ship: i64,

    #[validate(length(min = 1, max = 255, message = "Image URL must be 1-255 characters"))]
    pub img_url: String,
}

// ============================================================================
// Parking Requests
// ============================================================================

/// Attach a ship to the caller's draft, or to an explicit draft they own
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttachShipRequest {
    #[validate(range(min = 1, message = "id_ship must be positive"))]
    pub id_ship: i64,

    #[validate(length(max = 50, message = "Captain must be at most 50 characters"))]
    pub captain: Option<String>,

    /// Target parking; the caller's draft when absent
    #[validate(range(min = 1, message = "id_parking must be positive"))]
    pub id_parking: Option<i64>,
}

/// Reservation listing filters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ParkingListQuery {
    /// Only reservations formed on or after this date
    #[serde(alias = "formed_since")]
    pub date: Option<NaiveDate>,

    pub status: Option<String>,
}

/// Partial reservation update
///
/// `date_of_parking` and `port` are request fields; the rest are
/// administrative and reserved to staff.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct PatchParkingRequest {
    pub date_of_parking: Option<NaiveDate>,

    #[validate(length(max = 30, message = "Port must be at most 30 characters"))]
    pub port: Option<String>,

    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub formed_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,

    #[serde(alias = "moderator_id")]
    #[validate(range(min = 1, message = "moderator must be a user id"))]
    pub moderator: Option<i64>,

    #[validate(range(min = 0, message = "spendings_of_crew must not be negative"))]
    pub spendings_of_crew: Option<i64>,
}

/// Moderator decision on a formed reservation
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ModerateParkingRequest {
    pub accept: bool,
}

/// Ship to detach, read from the body or the query string
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct DetachShipRequest {
    pub id_ship: Option<i64>,
}

/// Assign a captain to an attached ship
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetCaptainRequest {
    #[validate(range(min = 1, message = "id_ship must be positive"))]
    pub id_ship: i64,

    #[validate(
        required(message = "captain is required"),
        length(min = 1, max = 50, message = "Captain must be 1-50 characters")
    )]
    pub captain: Option<String>,
}
