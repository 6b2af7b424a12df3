//! Ship catalog service
//!
//! Public browsing of the catalog plus staff-only maintenance.

use dock_core::entities::{NewShip, Ship};
use dock_core::traits::ShipQuery;
use dock_core::{authorize, Capability, DomainError, Principal, ShipId};
use tracing::{info, instrument};

use crate::dto::{
    CreateShipRequest, ShipImageResponse, ShipListQuery, ShipListResponse, ShipResponse,
    SetShipImageRequest, UpdateShipRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Ship catalog service
pub struct ShipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ShipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List ships, with the caller's draft summary when they have one
    #[instrument(skip(self, principal))]
    pub async fn list_ships(
        &self,
        principal: Option<&Principal>,
        query: ShipListQuery,
    ) -> ServiceResult<ShipListResponse> {
        authorize(principal, Capability::Public, None)?;

        let query = ShipQuery {
            class_name: query.class_name.filter(|name| !name.is_empty()),
            active_only: query.active_only,
        };
        let ships = self.ctx.ship_repo().list(&query).await?;

        let draft = match principal {
            Some(principal) => self
                .ctx
                .parking_repo()
                .draft_summary(principal.user_id)
                .await?
                .map(Into::into),
            None => None,
        };

        Ok(ShipListResponse {
            ships: ships.iter().map(ShipResponse::from).collect(),
            draft,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_ship(&self, ship_id: ShipId) -> ServiceResult<ShipResponse> {
        let ship = self.find(ship_id).await?;
        Ok(ShipResponse::from(&ship))
    }

    /// Add a ship to the catalog (staff only)
    #[instrument(skip(self, principal, request), fields(ship_name = %request.ship_name))]
    pub async fn create_ship(
        &self,
        principal: Option<&Principal>,
        request: CreateShipRequest,
    ) -> ServiceResult<ShipResponse> {
        authorize(principal, Capability::Staff, None)?;

        let new_ship = NewShip::try_from(request)?;
        let ship = self.ctx.ship_repo().create(&new_ship).await?;

        info!(ship_id = %ship.id, "Ship created");
        Ok(ShipResponse::from(&ship))
    }

    /// Partial update (staff only)
    #[instrument(skip(self, principal, request))]
    pub async fn update_ship(
        &self,
        principal: Option<&Principal>,
        ship_id: ShipId,
        request: UpdateShipRequest,
    ) -> ServiceResult<ShipResponse> {
        authorize(principal, Capability::Staff, None)?;

        let mut ship = self.find(ship_id).await?;
        request.apply_to(&mut ship)?;
        self.ctx.ship_repo().update(&ship).await?;

        info!(ship_id = %ship_id, "Ship updated");
        Ok(ShipResponse::from(&ship))
    }

    /// Soft delete: the ship stays in the catalog with status `deleted`
    #[instrument(skip(self, principal))]
    pub async fn delete_ship(
        &self,
        principal: Option<&Principal>,
        ship_id: ShipId,
    ) -> ServiceResult<()> {
        authorize(principal, Capability::Staff, None)?;

        let mut ship = self.find(ship_id).await?;
        ship.soft_delete();
        self.ctx.ship_repo().update(&ship).await?;

        info!(ship_id = %ship_id, "Ship deleted");
        Ok(())
    }

    #[instrument(skip(self, principal, request), fields(ship_id = request.id_ship))]
    pub async fn set_image(
        &self,
        principal: Option<&Principal>,
        request: SetShipImageRequest,
    ) -> ServiceResult<ShipImageResponse> {
        authorize(principal, Capability::Staff, None)?;

        let mut ship = self.find(ShipId::new(request.id_ship)).await?;
        ship.set_image(request.img_url);
        self.ctx.ship_repo().update(&ship).await?;

        Ok(ShipImageResponse {
            id_ship: ship.id.into_inner(),
            img_url: ship.img_url,
        })
    }

    async fn find(&self, ship_id: ShipId) -> ServiceResult<Ship> {
        Ok(self
            .ctx
            .ship_repo()
            .find_by_id(ship_id)
            .await?
            .ok_or(DomainError::ShipNotFound(ship_id))?)
    }
}
