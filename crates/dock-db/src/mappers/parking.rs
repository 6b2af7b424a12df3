//! Parking entity <-> model mapper

use dock_core::entities::{DraftSummary, Parking, ParkingShip};
use dock_core::error::DomainError;
use dock_core::value_objects::{ParkingId, ParkingStatus, ShipId, UserId};

use crate::models::{DraftSummaryModel, ParkingModel, ParkingShipModel};

impl TryFrom<ParkingModel> for Parking {
    type Error = DomainError;

    fn try_from(model: ParkingModel) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse::<ParkingStatus>()
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(Parking {
            id: ParkingId::new(model.id),
            status,
            created_at: model.created_at,
            formed_at: model.formed_at,
            ended_at: model.ended_at,
            date_of_parking: model.date_of_parking,
            port: model.port,
            user_id: UserId::new(model.user_id),
            moderator_id: model.moderator_id.map(UserId::new),
            spendings_of_crew: model.spendings_of_crew,
        })
    }
}

impl From<DraftSummaryModel> for DraftSummary {
    fn from(model: DraftSummaryModel) -> Self {
        DraftSummary {
            parking_id: ParkingId::new(model.id),
            count: model.count,
        }
    }
}

impl From<ParkingShipModel> for ParkingShip {
    fn from(model: ParkingShipModel) -> Self {
        ParkingShip {
            parking_id: ParkingId::new(model.parking_id),
            ship_id: ShipId::new(model.ship_id),
            captain: model.captain,
        }
    }
}

/// Bind values for a full parking update
pub struct ParkingUpdate<'a> {
    pub id: i64,
    pub status: &'static str,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub formed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
    pub date_of_parking: Option<chrono::NaiveDate>,
    pub port: Option<&'a str>,
    pub moderator_id: Option<i64>,
    pub spendings_of_crew: Option<i64>,
}

impl<'a> ParkingUpdate<'a> {
    pub fn new(parking: &'a Parking) -> Self {
        Self {
            id: parking.id.into_inner(),
            status: parking.status.as_str(),
            created_at: parking.created_at,
            formed_at: parking.formed_at,
            ended_at: parking.ended_at,
            date_of_parking: parking.date_of_parking,
            port: parking.port.as_deref(),
            moderator_id: parking.moderator_id.map(UserId::into_inner),
            spendings_of_crew: parking.spendings_of_crew,
        }
    }
}
