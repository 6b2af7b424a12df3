//! Ship catalog handlers
//!
//! Reads are public; mutations are staff only, except attaching a ship to
//! the caller's reservation.

use axum::{extract::State, Json};
use dock_service::dto::{
    AttachShipRequest, AttachShipResponse, CreateShipRequest, SetShipImageRequest,
    ShipImageResponse, ShipListQuery, ShipListResponse, ShipResponse, UpdateShipRequest,
};
use dock_service::{ParkingShipService, ShipService};

use crate::extractors::{AuthUser, OptionalAuthUser, QueryParams, ShipIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List ships with the caller's draft summary
///
/// GET /ships/
pub async fn list_ships(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    QueryParams(query): QueryParams<ShipListQuery>,
) -> ApiResult<Json<ShipListResponse>> {
    let service = ShipService::new(state.service_context());
    let response = service.list_ships(auth.principal(), query).await?;
    Ok(Json(response))
}

/// POST /ships/
pub async fn create_ship(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateShipRequest>,
) -> ApiResult<Created<ShipResponse>> {
    let service = ShipService::new(state.service_context());
    let response = service.create_ship(auth.principal(), request).await?;
    Ok(Created(response))
}

/// GET /ships/{id}/
pub async fn get_ship(
    State(state): State<AppState>,
    ShipIdPath(ship_id): ShipIdPath,
) -> ApiResult<Json<ShipResponse>> {
    let service = ShipService::new(state.service_context());
    let response = service.get_ship(ship_id).await?;
    Ok(Json(response))
}

/// PUT /ships/{id}/
pub async fn update_ship(
    State(state): State<AppState>,
    auth: AuthUser,
    ShipIdPath(ship_id): ShipIdPath,
    ValidatedJson(request): ValidatedJson<UpdateShipRequest>,
) -> ApiResult<Json<ShipResponse>> {
    let service = ShipService::new(state.service_context());
    let response = service
        .update_ship(auth.principal(), ship_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /ships/{id}/
pub async fn delete_ship(
    State(state): State<AppState>,
    auth: AuthUser,
    ShipIdPath(ship_id): ShipIdPath,
) -> ApiResult<NoContent> {
    let service = ShipService::new(state.service_context());
    service.delete_ship(auth.principal(), ship_id).await?;
    Ok(NoContent)
}

/// Attach a ship to the caller's draft, creating it when needed
///
/// POST /ships/add/
pub async fn attach_ship(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AttachShipRequest>,
) -> ApiResult<Created<AttachShipResponse>> {
    let service = ParkingShipService::new(state.service_context());
    let response = service.attach_ship(auth.principal(), request).await?;
    Ok(Created(response))
}

/// POST /ships/image/
pub async fn set_ship_image(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SetShipImageRequest>,
) -> ApiResult<Json<ShipImageResponse>> {
    let service = ShipService::new(state.service_context());
    let response = service.set_image(auth.principal(), request).await?;
    Ok(Json(response))
}
