//! Entity to DTO mappers
//!
//! `From` conversions from domain entities to response DTOs, and fallible
//! conversions from request DTOs into domain inputs.

use dock_core::entities::{
    AttachedShip, DraftSummary, NewShip, Parking, ParkingPatch, ParkingShip, Ship, User,
};
use dock_core::{DomainError, ParkingStatus, ShipStatus, UserId};

use super::requests::{CreateShipRequest, PatchParkingRequest, UpdateShipRequest};
use super::responses::{
    AttachShipResponse, DraftSummaryResponse, ParkingResponse, ParkingShipResponse,
    ShipResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_staff: user.is_staff,
            date_joined: user.created_at,
        }
    }
}

// ============================================================================
// Ship Mappers
// ============================================================================

impl From<&Ship> for ShipResponse {
    fn from(ship: &Ship) -> Self {
        Self {
            id_ship: ship.id.into_inner(),
            ship_name: ship.ship_name.clone(),
            class_name: ship.class_name.clone(),
            description: ship.description.clone(),
            status: ship.status.as_str().to_string(),
            img_url: ship.img_url.clone(),
        }
    }
}

impl From<DraftSummary> for DraftSummaryResponse {
    fn from(summary: DraftSummary) -> Self {
        Self {
            parking_id: summary.parking_id.into_inner(),
            count: summary.count,
        }
    }
}

impl TryFrom<CreateShipRequest> for NewShip {
    type Error = DomainError;

    fn try_from(request: CreateShipRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .as_deref()
            .map(str::parse::<ShipStatus>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            ship_name: request.ship_name,
            class_name: request.class_name,
            description: request.description,
            status,
            img_url: request.img_url.unwrap_or_default(),
        })
    }
}

impl UpdateShipRequest {
    /// Copy the present fields onto `ship`
    pub fn apply_to(self, ship: &mut Ship) -> Result<(), DomainError> {
        if let Some(status) = self.status.as_deref() {
            ship.status = status.parse()?;
        }
        if let Some(ship_name) = self.ship_name {
            ship.ship_name = ship_name;
        }
        if let Some(class_name) = self.class_name {
            ship.class_name = class_name;
        }
        if let Some(description) = self.description {
            ship.description = description;
        }
        if let Some(img_url) = self.img_url {
            ship.set_image(img_url);
        }
        Ok(())
    }
}

// ============================================================================
// Parking Mappers
// ============================================================================

impl From<&Parking> for ParkingResponse {
    fn from(parking: &Parking) -> Self {
        Self {
            id_parking: parking.id.into_inner(),
            status: parking.status.as_str().to_string(),
            created_at: parking.created_at,
            formed_at: parking.formed_at,
            ended_at: parking.ended_at,
            date_of_parking: parking.date_of_parking,
            port: parking.port.clone(),
            user_id: parking.user_id.into_inner(),
            moderator: parking.moderator_id.map(UserId::into_inner),
            spendings_of_crew: parking.spendings_of_crew,
        }
    }
}

impl From<&AttachedShip> for ParkingShipResponse {
    fn from(attached: &AttachedShip) -> Self {
        Self {
            id_ship: attached.ship.id.into_inner(),
            ship_name: attached.ship.ship_name.clone(),
            class_name: attached.ship.class_name.clone(),
            status: attached.ship.status.as_str().to_string(),
            captain: attached.captain.clone(),
        }
    }
}

impl From<&ParkingShip> for AttachShipResponse {
    fn from(link: &ParkingShip) -> Self {
        Self {
            parking_id: link.parking_id.into_inner(),
            id_ship: link.ship_id.into_inner(),
            captain: link.captain.clone(),
        }
    }
}

impl TryFrom<PatchParkingRequest> for ParkingPatch {
    type Error = DomainError;

    fn try_from(request: PatchParkingRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .as_deref()
            .map(str::parse::<ParkingStatus>)
            .transpose()?;
        let moderator_id = match request.moderator {
            Some(id) if id <= 0 => {
                return Err(DomainError::ValidationError(format!("invalid moderator id: {id}")))
            }
            other => other.map(UserId::new),
        };

        Ok(Self {
            date_of_parking: request.date_of_parking,
            port: request.port,
            status,
            created_at: request.created_at,
            formed_at: request.formed_at,
            ended_at: request.ended_at,
            moderator_id,
            spendings_of_crew: request.spendings_of_crew,
        })
    }
}
