//! PostgreSQL implementation of ParkingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use dock_core::entities::{DraftSummary, Parking};
use dock_core::error::DomainError;
use dock_core::traits::{CountedTransition, ParkingQuery, ParkingRepository, RepoResult};
use dock_core::value_objects::{ParkingId, ParkingStatus, UserId};

use crate::mappers::ParkingUpdate;
use crate::models::{DraftSummaryModel, ParkingModel};

use super::error::{map_db_error, map_unique_violation, parking_not_found};

/// PostgreSQL implementation of ParkingRepository
#[derive(Clone)]
pub struct PgParkingRepository {
    pool: PgPool,
}

impl PgParkingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParkingRepository for PgParkingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ParkingId) -> RepoResult<Option<Parking>> {
        let result = sqlx::query_as::<_, ParkingModel>(
            r"
            SELECT id, status, created_at, formed_at, ended_at, date_of_parking, port,
                   user_id, moderator_id, spendings_of_crew
            FROM parkings
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Parking::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn draft_summary(&self, user_id: UserId) -> RepoResult<Option<DraftSummary>> {
        let result = sqlx::query_as::<_, DraftSummaryModel>(
            r"
            SELECT p.id, COUNT(ps.ship_id) AS count
            FROM parkings p
            LEFT JOIN parking_ships ps ON ps.parking_id = p.id
            WHERE p.user_id = $1 AND p.status = 'draft'
            GROUP BY p.id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(DraftSummary::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ParkingQuery) -> RepoResult<Vec<Parking>> {
        let results = sqlx::query_as::<_, ParkingModel>(
            r"
            SELECT id, status, created_at, formed_at, ended_at, date_of_parking, port,
                   user_id, moderator_id, spendings_of_crew
            FROM parkings
            WHERE formed_at IS NOT NULL
              AND ($1::BIGINT IS NULL OR user_id = $1)
              AND ($2::DATE IS NULL OR formed_at >= $2::DATE)
              AND ($3::TEXT IS NULL OR status = $3)
            ORDER BY id
            ",
        )
        .bind(query.user_id.map(UserId::into_inner))
        .bind(query.formed_since)
        .bind(query.status.map(ParkingStatus::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Parking::try_from).collect()
    }

    #[instrument(skip(self, parking), fields(parking_id = %parking.id))]
    async fn update(&self, parking: &Parking, expected: ParkingStatus) -> RepoResult<bool> {
        let row = ParkingUpdate::new(parking);
        let result = sqlx::query(
            r"
            UPDATE parkings
            SET status = $2, created_at = $3, formed_at = $4, ended_at = $5,
                date_of_parking = $6, port = $7, moderator_id = $8, spendings_of_crew = $9
            WHERE id = $1 AND status = $10
            ",
        )
        .bind(row.id)
        .bind(row.status)
        .bind(row.created_at)
        .bind(row.formed_at)
        .bind(row.ended_at)
        .bind(row.date_of_parking)
        .bind(row.port)
        .bind(row.moderator_id)
        .bind(row.spendings_of_crew)
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DraftAlreadyExists))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, parking), fields(parking_id = %parking.id, to = %parking.status))]
    async fn update_transition(
        &self,
        parking: &Parking,
        expected: ParkingStatus,
    ) -> RepoResult<bool> {
        let row = ParkingUpdate::new(parking);
        let result = sqlx::query(
            r"
            UPDATE parkings
            SET status = $2, formed_at = $3, ended_at = $4, moderator_id = $5,
                spendings_of_crew = $6
            WHERE id = $1 AND status = $7
            ",
        )
        .bind(row.id)
        .bind(row.status)
        .bind(row.formed_at)
        .bind(row.ended_at)
        .bind(row.moderator_id)
        .bind(row.spendings_of_crew)
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, transition))]
    async fn transition_with_ship_count(
        &self,
        id: ParkingId,
        transition: &CountedTransition<'_>,
    ) -> RepoResult<Parking> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ParkingModel>(
            r"
            SELECT id, status, created_at, formed_at, ended_at, date_of_parking, port,
                   user_id, moderator_id, spendings_of_crew
            FROM parkings
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| parking_not_found(id))?;
        let mut parking = Parking::try_from(model)?;

        let ship_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM parking_ships WHERE parking_id = $1",
        )
        .bind(id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Dropping the transaction on error releases the lock untouched
        transition(&mut parking, ship_count)?;

        let row = ParkingUpdate::new(&parking);
        sqlx::query(
            r"
            UPDATE parkings
            SET status = $2, formed_at = $3, ended_at = $4, moderator_id = $5,
                spendings_of_crew = $6
            WHERE id = $1
            ",
        )
        .bind(row.id)
        .bind(row.status)
        .bind(row.formed_at)
        .bind(row.ended_at)
        .bind(row.moderator_id)
        .bind(row.spendings_of_crew)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(
            parking_id = %id,
            ship_count,
            status = %parking.status,
            "Counted transition applied"
        );
        Ok(parking)
    }
}
