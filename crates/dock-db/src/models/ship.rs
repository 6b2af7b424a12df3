//! Ship database models

use sqlx::FromRow;

/// Database model for ships table
#[derive(Debug, Clone, FromRow)]
pub struct ShipModel {
    pub id: i64,
    pub ship_name: String,
    pub class_name: String,
    pub description: String,
    pub status: String,
    pub img_url: String,
}

/// A ship joined with its captain on one parking
#[derive(Debug, Clone, FromRow)]
pub struct AttachedShipModel {
    pub id: i64,
    pub ship_name: String,
    pub class_name: String,
    pub description: String,
    pub status: String,
    pub img_url: String,
    pub captain: Option<String>,
}
