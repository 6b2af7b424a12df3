//! Test fixtures and data generators
//!
//! Request bodies and the response shapes the tests read back.

use serde::{Deserialize, Serialize};

/// Unique suffix for usernames and ship names; the database outlives test runs
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("captain{suffix}"),
            email: format!("captain{suffix}@example.com"),
            password: "HarborPass42".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

/// Create ship request
#[derive(Debug, Serialize)]
pub struct CreateShipRequest {
    pub ship_name: String,
    pub class_name: String,
    pub description: String,
}

impl CreateShipRequest {
    pub fn unique() -> Self {
        Self {
            ship_name: format!("Vessel {}", unique_suffix()),
            class_name: "frigate".to_string(),
            description: "A test vessel".to_string(),
        }
    }
}

/// Ship response
#[derive(Debug, Deserialize)]
pub struct ShipResponse {
    pub id_ship: i64,
    pub ship_name: String,
    pub class_name: String,
    pub description: String,
    pub status: String,
    pub img_url: String,
}

/// Draft summary attached to the ship listing
#[derive(Debug, Deserialize)]
pub struct DraftSummary {
    pub parking_id: i64,
    pub count: i64,
}

/// Ship listing response
#[derive(Debug, Deserialize)]
pub struct ShipListResponse {
    pub ships: Vec<ShipResponse>,
    pub draft: Option<DraftSummary>,
}

/// Attach ship request
#[derive(Debug, Serialize)]
pub struct AttachShipRequest {
    pub id_ship: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_parking: Option<i64>,
}

impl AttachShipRequest {
    pub fn to_draft(id_ship: i64) -> Self {
        Self {
            id_ship,
            captain: None,
            id_parking: None,
        }
    }
}

/// Attach ship response
#[derive(Debug, Deserialize)]
pub struct AttachShipResponse {
    pub parking_id: i64,
    pub id_ship: i64,
    pub captain: Option<String>,
}

/// Parking reservation response
#[derive(Debug, Deserialize)]
pub struct ParkingResponse {
    pub id_parking: i64,
    pub status: String,
    pub formed_at: Option<String>,
    pub ended_at: Option<String>,
    pub port: Option<String>,
    pub user_id: i64,
    pub moderator: Option<i64>,
    pub spendings_of_crew: Option<i64>,
}

/// Ship inside a reservation
#[derive(Debug, Deserialize)]
pub struct ParkingShipResponse {
    pub id_ship: i64,
    pub captain: Option<String>,
}

/// Reservation with its ships
#[derive(Debug, Deserialize)]
pub struct ParkingDetailResponse {
    #[serde(flatten)]
    pub parking: ParkingResponse,
    pub ships: Vec<ParkingShipResponse>,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub details: Option<serde_json::Value>,
}
