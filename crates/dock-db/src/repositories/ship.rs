//! PostgreSQL implementation of ShipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use dock_core::entities::{NewShip, Ship};
use dock_core::traits::{RepoResult, ShipQuery, ShipRepository};
use dock_core::value_objects::ShipId;

use crate::models::ShipModel;

use super::error::{escape_like, map_db_error, ship_not_found};

/// PostgreSQL implementation of ShipRepository
#[derive(Clone)]
pub struct PgShipRepository {
    pool: PgPool,
}

impl PgShipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShipRepository for PgShipRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ShipId) -> RepoResult<Option<Ship>> {
        let result = sqlx::query_as::<_, ShipModel>(
            r"
            SELECT id, ship_name, class_name, description, status, img_url
            FROM ships
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Ship::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ShipQuery) -> RepoResult<Vec<Ship>> {
        let pattern = query
            .class_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));

        let results = sqlx::query_as::<_, ShipModel>(
            r"
            SELECT id, ship_name, class_name, description, status, img_url
            FROM ships
            WHERE ($1::TEXT IS NULL OR class_name ILIKE $1)
              AND (NOT $2 OR status = 'active')
            ORDER BY id
            ",
        )
        .bind(pattern)
        .bind(query.active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Ship::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn create(&self, ship: &NewShip) -> RepoResult<Ship> {
        let model = sqlx::query_as::<_, ShipModel>(
            r"
            INSERT INTO ships (ship_name, class_name, description, status, img_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, ship_name, class_name, description, status, img_url
            ",
        )
        .bind(&ship.ship_name)
        .bind(&ship.class_name)
        .bind(&ship.description)
        .bind(ship.status.as_str())
        .bind(&ship.img_url)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ship::try_from(model)
    }

    #[instrument(skip(self))]
    async fn update(&self, ship: &Ship) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE ships
            SET ship_name = $2, class_name = $3, description = $4, status = $5, img_url = $6
            WHERE id = $1
            ",
        )
        .bind(ship.id.into_inner())
        .bind(&ship.ship_name)
        .bind(&ship.class_name)
        .bind(&ship.description)
        .bind(ship.status.as_str())
        .bind(&ship.img_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(ship_not_found(ship.id));
        }

        Ok(())
    }
}
