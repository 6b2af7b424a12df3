//! PostgreSQL implementation of ParkingShipRepository
//!
//! Attach runs in a transaction together with the draft lookup so that the
//! one-draft-per-user index and the (parking, ship) key are checked atomically.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use dock_core::entities::{AttachedShip, Parking, ParkingShip};
use dock_core::error::DomainError;
use dock_core::traits::{ParkingShipRepository, RepoResult};
use dock_core::value_objects::{ParkingId, ShipId, UserId};

use crate::models::{AttachedShipModel, ParkingModel, ParkingShipModel};

use super::error::{map_db_error, map_unique_violation, parking_not_found, ship_not_found};

/// PostgreSQL implementation of ParkingShipRepository
#[derive(Clone)]
pub struct PgParkingShipRepository {
    pool: PgPool,
}

impl PgParkingShipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn ensure_ship_exists(tx: &mut Transaction<'_, Postgres>, ship_id: ShipId) -> RepoResult<()> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM ships WHERE id = $1)")
        .bind(ship_id.into_inner())
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

    if exists {
        Ok(())
    } else {
        Err(ship_not_found(ship_id))
    }
}

async fn insert_link(
    tx: &mut Transaction<'_, Postgres>,
    parking_id: ParkingId,
    ship_id: ShipId,
    captain: Option<&str>,
) -> RepoResult<ParkingShip> {
    let model = sqlx::query_as::<_, ParkingShipModel>(
        r"
        INSERT INTO parking_ships (parking_id, ship_id, captain)
        VALUES ($1, $2, $3)
        RETURNING parking_id, ship_id, captain
        ",
    )
    .bind(parking_id.into_inner())
    .bind(ship_id.into_inner())
    .bind(captain)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        map_unique_violation(e, || DomainError::ShipAlreadyAttached {
            parking_id,
            ship_id,
        })
    })?;

    Ok(ParkingShip::from(model))
}

#[async_trait]
impl ParkingShipRepository for PgParkingShipRepository {
    #[instrument(skip(self))]
    async fn attach_to_draft(
        &self,
        user_id: UserId,
        ship_id: ShipId,
        captain: Option<&str>,
    ) -> RepoResult<(Parking, ParkingShip)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        ensure_ship_exists(&mut tx, ship_id).await?;

        // Waits on a concurrent uncommitted draft insert for the same user
        let now = Utc::now();
        let created = sqlx::query(
            r"
            INSERT INTO parkings (user_id, status, created_at, date_of_parking)
            VALUES ($1, 'draft', $2, $3)
            ON CONFLICT (user_id) WHERE status = 'draft' DO NOTHING
            ",
        )
        .bind(user_id.into_inner())
        .bind(now)
        .bind(Parking::default_date_of_parking(now))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        let draft = sqlx::query_as::<_, ParkingModel>(
            r"
            SELECT id, status, created_at, formed_at, ended_at, date_of_parking, port,
                   user_id, moderator_id, spendings_of_crew
            FROM parkings
            WHERE user_id = $1 AND status = 'draft'
            FOR UPDATE
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;
        let draft = Parking::try_from(draft)?;

        let link = insert_link(&mut tx, draft.id, ship_id, captain).await?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(parking_id = %draft.id, created = created > 0, "Ship attached to draft");
        Ok((draft, link))
    }

    #[instrument(skip(self))]
    async fn attach(
        &self,
        parking_id: ParkingId,
        ship_id: ShipId,
        captain: Option<&str>,
    ) -> RepoResult<ParkingShip> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        ensure_ship_exists(&mut tx, ship_id).await?;

        // Row lock keeps the parking in draft until the link is committed
        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM parkings WHERE id = $1 FOR UPDATE",
        )
        .bind(parking_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| parking_not_found(parking_id))?;

        if status != "draft" {
            return Err(DomainError::ParkingChanged(parking_id));
        }

        let link = insert_link(&mut tx, parking_id, ship_id, captain).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(link)
    }

    #[instrument(skip(self))]
    async fn detach(&self, parking_id: ParkingId, ship_id: ShipId) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Shared lock: waits for a moderation that is pricing this parking
        sqlx::query("SELECT 1 FROM parkings WHERE id = $1 FOR SHARE")
            .bind(parking_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM parking_ships WHERE parking_id = $1 AND ship_id = $2")
            .bind(parking_id.into_inner())
            .bind(ship_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn set_captain(
        &self,
        parking_id: ParkingId,
        ship_id: ShipId,
        captain: &str,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE parking_ships
            SET captain = $3
            WHERE parking_id = $1 AND ship_id = $2
            ",
        )
        .bind(parking_id.into_inner())
        .bind(ship_id.into_inner())
        .bind(captain)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_ships(&self, parking_id: ParkingId) -> RepoResult<Vec<AttachedShip>> {
        let results = sqlx::query_as::<_, AttachedShipModel>(
            r"
            SELECT s.id, s.ship_name, s.class_name, s.description, s.status, s.img_url,
                   ps.captain
            FROM parking_ships ps
            JOIN ships s ON s.id = ps.ship_id
            WHERE ps.parking_id = $1
            ORDER BY s.id
            ",
        )
        .bind(parking_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(AttachedShip::try_from).collect()
    }
}
