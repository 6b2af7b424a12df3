//! Path parameter extractors
//!
//! Typed extraction of ship and parking ids from `/:id/` segments.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use dock_core::{ParkingId, ShipId};

use crate::response::ApiError;

async fn raw_id<S>(parts: &mut Parts, state: &S) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|e| ApiError::invalid_path(e.body_text()))?;
    Ok(raw)
}

/// Ship id taken from the path
#[derive(Debug, Clone, Copy)]
pub struct ShipIdPath(pub ShipId);

#[async_trait]
impl<S> FromRequestParts<S> for ShipIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_id(parts, state).await?;
        ShipId::parse(&raw)
            .map(Self)
            .map_err(|_| ApiError::invalid_path("Invalid ship id format"))
    }
}

/// Parking id taken from the path
#[derive(Debug, Clone, Copy)]
pub struct ParkingIdPath(pub ParkingId);

#[async_trait]
impl<S> FromRequestParts<S> for ParkingIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_id(parts, state).await?;
        ParkingId::parse(&raw)
            .map(Self)
            .map_err(|_| ApiError::invalid_path("Invalid parking id format"))
    }
}
