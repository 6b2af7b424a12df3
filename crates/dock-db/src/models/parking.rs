//! Parking database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for parkings table
#[derive(Debug, Clone, FromRow)]
pub struct ParkingModel {
    pub id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub formed_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub date_of_parking: Option<NaiveDate>,
    pub port: Option<String>,
    pub user_id: i64,
    pub moderator_id: Option<i64>,
    pub spendings_of_crew: Option<i64>,
}

/// Draft id with its ship count
#[derive(Debug, Clone, Copy, FromRow)]
pub struct DraftSummaryModel {
    pub id: i64,
    pub count: i64,
}

/// Database model for parking_ships table
#[derive(Debug, Clone, FromRow)]
pub struct ParkingShipModel {
    pub parking_id: i64,
    pub ship_id: i64,
    pub captain: Option<String>,
}
