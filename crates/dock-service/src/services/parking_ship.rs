//! Ship attachment service
//!
//! Manages the ships inside a reservation and their captains.

use dock_core::{
    authorize, require_principal, Capability, DomainError, ParkingId, Principal, ShipId,
};
use tracing::{info, instrument};

use crate::dto::{AttachShipRequest, AttachShipResponse, SetCaptainRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct ParkingShipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ParkingShipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Attach a ship to a reservation.
    ///
    /// Without an explicit `id_parking` the caller's draft is used, and
    /// created when they have none.
    #[instrument(skip(self, principal, request), fields(ship_id = request.id_ship))]
    pub async fn attach_ship(
        &self,
        principal: Option<&Principal>,
        request: AttachShipRequest,
    ) -> ServiceResult<AttachShipResponse> {
        let principal = require_principal(principal)?;
        let ship_id = ShipId::new(request.id_ship);
        let captain = request.captain.as_deref();

        let link = match request.id_parking.map(ParkingId::new) {
            Some(parking_id) => {
                let parking = self
                    .ctx
                    .parking_repo()
                    .find_by_id(parking_id)
                    .await?
                    .ok_or(DomainError::ParkingNotFound(parking_id))?;
                authorize(Some(principal), Capability::Owner, Some(parking.user_id))?;
                if !parking.is_draft() {
                    return Err(DomainError::InvalidTransition {
                        status: parking.status,
                        action: "attach ships to",
                    }
                    .into());
                }

                self.ctx
                    .parking_ship_repo()
                    .attach(parking_id, ship_id, captain)
                    .await?
            }
            None => {
                let (_, link) = self
                    .ctx
                    .parking_ship_repo()
                    .attach_to_draft(principal.user_id, ship_id, captain)
                    .await?;
                link
            }
        };

        info!(
            parking_id = %link.parking_id,
            ship_id = %ship_id,
            user_id = %principal.user_id,
            "Ship attached"
        );
        Ok(AttachShipResponse::from(&link))
    }

    /// Remove a ship from a reservation (owner or staff)
    #[instrument(skip(self, principal))]
    pub async fn detach_ship(
        &self,
        principal: Option<&Principal>,
        parking_id: ParkingId,
        ship_id: ShipId,
    ) -> ServiceResult<()> {
        let principal = require_principal(principal)?;
        let parking = self
            .ctx
            .parking_repo()
            .find_by_id(parking_id)
            .await?
            .ok_or(DomainError::ParkingNotFound(parking_id))?;
        authorize(
            Some(principal),
            Capability::OwnerOrStaff,
            Some(parking.user_id),
        )?;

        if !self.ctx.detach_policy().allows(parking.status) {
            return Err(DomainError::InvalidTransition {
                status: parking.status,
                action: "detach ships from",
            }
            .into());
        }

        if !self
            .ctx
            .parking_ship_repo()
            .detach(parking_id, ship_id)
            .await?
        {
            return Err(DomainError::ParkingShipNotFound {
                parking_id,
                ship_id,
            }
            .into());
        }

        info!(parking_id = %parking_id, ship_id = %ship_id, "Ship detached");
        Ok(())
    }

    /// Assign the captain of an attached ship (staff only)
    #[instrument(skip(self, principal, request), fields(ship_id = request.id_ship))]
    pub async fn set_captain(
        &self,
        principal: Option<&Principal>,
        parking_id: ParkingId,
        request: SetCaptainRequest,
    ) -> ServiceResult<AttachShipResponse> {
        authorize(principal, Capability::Staff, None)?;

        let ship_id = ShipId::new(request.id_ship);
        let captain = request
            .captain
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ServiceError::validation("captain is required"))?;

        if !self
            .ctx
            .parking_ship_repo()
            .set_captain(parking_id, ship_id, &captain)
            .await?
        {
            return Err(DomainError::ParkingShipNotFound {
                parking_id,
                ship_id,
            }
            .into());
        }

        info!(parking_id = %parking_id, ship_id = %ship_id, "Captain assigned");
        Ok(AttachShipResponse {
            parking_id: parking_id.into_inner(),
            id_ship: ship_id.into_inner(),
            captain: Some(captain),
        })
    }
}
