//! Parking reservation service
//!
//! Listing, inspection, partial updates, and the lifecycle transitions of
//! reservations. Patches and transitions are applied on the entity first and
//! then persisted with a compare-and-set on the status they started from.
//! Moderation instead runs under a row lock so the ship count it prices
//! cannot change underneath it.

use chrono::Utc;
use dock_core::entities::{Parking, ParkingPatch};
use dock_core::traits::ParkingQuery;
use dock_core::{
    authorize, require_principal, Capability, DomainError, ParkingId, ParkingStatus, Principal,
};
use tracing::{info, instrument, warn};

use crate::dto::{
    ModerateParkingRequest, ParkingDetailResponse, ParkingListQuery, ParkingResponse,
    ParkingShipResponse, PatchParkingRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Parking reservation service
pub struct ParkingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ParkingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Formed reservations visible to the caller
    ///
    /// Staff see every reservation, everyone else only their own.
    #[instrument(skip(self, principal))]
    pub async fn list_parkings(
        &self,
        principal: Option<&Principal>,
        query: ParkingListQuery,
    ) -> ServiceResult<Vec<ParkingResponse>> {
        let principal = require_principal(principal)?;

        let status = query
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<ParkingStatus>)
            .transpose()
            .map_err(DomainError::from)?;

        let query = ParkingQuery {
            user_id: (!principal.is_staff).then_some(principal.user_id),
            formed_since: query.date,
            status,
        };
        let parkings = self.ctx.parking_repo().list(&query).await?;

        Ok(parkings.iter().map(ParkingResponse::from).collect())
    }

    /// A reservation with its ships, ordered by ship id
    #[instrument(skip(self, principal))]
    pub async fn get_parking(
        &self,
        principal: Option<&Principal>,
        parking_id: ParkingId,
    ) -> ServiceResult<ParkingDetailResponse> {
        let principal = require_principal(principal)?;
        let parking = self.find(parking_id).await?;
        authorize(
            Some(principal),
            Capability::OwnerOrStaff,
            Some(parking.user_id),
        )?;

        let ships = self.ctx.parking_ship_repo().list_ships(parking_id).await?;

        Ok(ParkingDetailResponse {
            parking: ParkingResponse::from(&parking),
            ships: ships.iter().map(ParkingShipResponse::from).collect(),
        })
    }

    /// Partial update by the owner or staff
    #[instrument(skip(self, principal, request))]
    pub async fn patch_parking(
        &self,
        principal: Option<&Principal>,
        parking_id: ParkingId,
        request: PatchParkingRequest,
    ) -> ServiceResult<ParkingResponse> {
        let principal = require_principal(principal)?;
        let patch = ParkingPatch::try_from(request)?;

        let mut parking = self.find(parking_id).await?;
        let expected = parking.status;

        parking.apply_patch(principal, patch)?;
        self.persist_patch(&parking, expected).await?;

        info!(parking_id = %parking_id, actor = %principal.user_id, "Parking updated");
        Ok(ParkingResponse::from(&parking))
    }

    /// Owner submits their draft
    #[instrument(skip(self, principal))]
    pub async fn form_parking(
        &self,
        principal: Option<&Principal>,
        parking_id: ParkingId,
    ) -> ServiceResult<ParkingResponse> {
        let principal = require_principal(principal)?;
        let mut parking = self.find(parking_id).await?;
        let expected = parking.status;

        parking.form(principal, Utc::now())?;
        self.persist_transition(&parking, expected, "form").await?;

        info!(parking_id = %parking_id, "Parking formed");
        Ok(ParkingResponse::from(&parking))
    }

    /// Staff approval or rejection of a formed reservation
    #[instrument(skip(self, principal))]
    pub async fn moderate_parking(
        &self,
        principal: Option<&Principal>,
        parking_id: ParkingId,
        request: ModerateParkingRequest,
    ) -> ServiceResult<ParkingResponse> {
        authorize(principal, Capability::Staff, None)?;
        let principal = require_principal(principal)?;

        let accept = request.accept;
        let crew_cost = self.ctx.crew_cost();
        let now = Utc::now();

        // Spending is priced on the ship count read under the row lock
        let parking = self
            .ctx
            .parking_repo()
            .transition_with_ship_count(parking_id, &|parking: &mut Parking, ship_count: i64| {
                parking.moderate(principal, accept, ship_count, crew_cost, now)
            })
            .await?;

        info!(
            parking_id = %parking_id,
            moderator = %principal.user_id,
            status = %parking.status,
            spendings_of_crew = ?parking.spendings_of_crew,
            "Parking moderated"
        );
        Ok(ParkingResponse::from(&parking))
    }

    /// Staff removal from any non-deleted status
    #[instrument(skip(self, principal))]
    pub async fn delete_parking(
        &self,
        principal: Option<&Principal>,
        parking_id: ParkingId,
    ) -> ServiceResult<ParkingResponse> {
        authorize(principal, Capability::Staff, None)?;
        let principal = require_principal(principal)?;

        let mut parking = self.find(parking_id).await?;
        let expected = parking.status;

        parking.mark_deleted(principal, Utc::now())?;
        self.persist_transition(&parking, expected, "delete").await?;

        info!(parking_id = %parking_id, "Parking deleted");
        Ok(ParkingResponse::from(&parking))
    }

    async fn find(&self, parking_id: ParkingId) -> ServiceResult<Parking> {
        Ok(self
            .ctx
            .parking_repo()
            .find_by_id(parking_id)
            .await?
            .ok_or(DomainError::ParkingNotFound(parking_id))?)
    }

    /// Write a transition unless another request moved the parking first.
    ///
    /// The loser sees the transition rejected against the status it lost to.
    async fn persist_transition(
        &self,
        parking: &Parking,
        expected: ParkingStatus,
        action: &'static str,
    ) -> ServiceResult<()> {
        if self
            .ctx
            .parking_repo()
            .update_transition(parking, expected)
            .await?
        {
            return Ok(());
        }
        self.lost_race(parking.id, expected, action).await
    }

    /// Write a patched parking unless its status changed since it was read.
    async fn persist_patch(&self, parking: &Parking, expected: ParkingStatus) -> ServiceResult<()> {
        if self.ctx.parking_repo().update(parking, expected).await? {
            return Ok(());
        }
        self.lost_race(parking.id, expected, "edit").await
    }

    async fn lost_race(
        &self,
        parking_id: ParkingId,
        expected: ParkingStatus,
        action: &'static str,
    ) -> ServiceResult<()> {
        let current = self.find(parking_id).await?;
        warn!(
            parking_id = %parking_id,
            expected = %expected,
            current = %current.status,
            action,
            "Concurrent parking write lost"
        );
        Err(DomainError::InvalidTransition {
            status: current.status,
            action,
        }
        .into())
    }
}
