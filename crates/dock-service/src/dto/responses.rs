//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names follow
//! the public API (`id_ship`, `id_parking`, `moderator`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: UserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Result of a successful login: tokens for API clients and a cookie session
/// id for browsers
#[derive(Debug)]
pub struct LoginOutcome {
    pub auth: AuthResponse,
    pub session_id: String,
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

// ============================================================================
// Ship Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ShipResponse {
    pub id_ship: i64,
    pub ship_name: String,
    pub class_name: String,
    pub description: String,
    pub status: String,
    pub img_url: String,
}

/// The caller's current draft as shown next to the catalog
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DraftSummaryResponse {
    pub parking_id: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipListResponse {
    pub ships: Vec<ShipResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<DraftSummaryResponse>,
}

/// Image update acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct ShipImageResponse {
    pub id_ship: i64,
    pub img_url: String,
}

// ============================================================================
// Parking Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ParkingResponse {
    pub id_parking: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub formed_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub date_of_parking: Option<NaiveDate>,
    pub port: Option<String>,
    pub user_id: i64,
    pub moderator: Option<i64>,
    pub spendings_of_crew: Option<i64>,
}

/// A ship inside a reservation, with its captain
#[derive(Debug, Clone, Serialize)]
pub struct ParkingShipResponse {
    pub id_ship: i64,
    pub ship_name: String,
    pub class_name: String,
    pub status: String,
    pub captain: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParkingDetailResponse {
    #[serde(flatten)]
    pub parking: ParkingResponse,
    pub ships: Vec<ParkingShipResponse>,
}

/// Result of attaching a ship
#[derive(Debug, Clone, Serialize)]
pub struct AttachShipResponse {
    pub parking_id: i64,
    pub id_ship: i64,
    pub captain: Option<String>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let status = |healthy: bool| if healthy { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if database_healthy && redis_healthy {
                "ready"
            } else {
                "not_ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: status(database_healthy),
                redis: status(redis_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
