//! Parking reservation handlers
//!
//! Listing, lifecycle transitions, and the ship links of a reservation.

use axum::{extract::State, Json};
use dock_core::ShipId;
use dock_service::dto::{
    AttachShipResponse, DetachShipRequest, ModerateParkingRequest, ParkingDetailResponse,
    ParkingListQuery, ParkingResponse, PatchParkingRequest, SetCaptainRequest,
};
use dock_service::{ParkingService, ParkingShipService};

use crate::extractors::{AuthUser, OptionalJson, ParkingIdPath, QueryParams, ValidatedJson};
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::AppState;

/// GET /list-parkings/
pub async fn list_parkings(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<ParkingListQuery>,
) -> ApiResult<Json<Vec<ParkingResponse>>> {
    let service = ParkingService::new(state.service_context());
    let response = service.list_parkings(auth.principal(), query).await?;
    Ok(Json(response))
}

/// GET /parking/{id}/
pub async fn get_parking(
    State(state): State<AppState>,
    auth: AuthUser,
    ParkingIdPath(parking_id): ParkingIdPath,
) -> ApiResult<Json<ParkingDetailResponse>> {
    let service = ParkingService::new(state.service_context());
    let response = service.get_parking(auth.principal(), parking_id).await?;
    Ok(Json(response))
}

/// PUT /parking/{id}/
pub async fn patch_parking(
    State(state): State<AppState>,
    auth: AuthUser,
    ParkingIdPath(parking_id): ParkingIdPath,
    ValidatedJson(request): ValidatedJson<PatchParkingRequest>,
) -> ApiResult<Json<ParkingResponse>> {
    let service = ParkingService::new(state.service_context());
    let response = service
        .patch_parking(auth.principal(), parking_id, request)
        .await?;
    Ok(Json(response))
}

/// Submit a draft
///
/// PUT /form-parking/{id}/
pub async fn form_parking(
    State(state): State<AppState>,
    auth: AuthUser,
    ParkingIdPath(parking_id): ParkingIdPath,
) -> ApiResult<Json<ParkingResponse>> {
    let service = ParkingService::new(state.service_context());
    let response = service.form_parking(auth.principal(), parking_id).await?;
    Ok(Json(response))
}

/// Approve (`accept: true`) or reject a formed reservation
///
/// PUT /moderate-parking/{id}/
pub async fn moderate_parking(
    State(state): State<AppState>,
    auth: AuthUser,
    ParkingIdPath(parking_id): ParkingIdPath,
    ValidatedJson(request): ValidatedJson<ModerateParkingRequest>,
) -> ApiResult<Json<ParkingResponse>> {
    let service = ParkingService::new(state.service_context());
    let response = service
        .moderate_parking(auth.principal(), parking_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /moderate-parking/{id}/
pub async fn delete_parking(
    State(state): State<AppState>,
    auth: AuthUser,
    ParkingIdPath(parking_id): ParkingIdPath,
) -> ApiResult<Json<ParkingResponse>> {
    let service = ParkingService::new(state.service_context());
    let response = service.delete_parking(auth.principal(), parking_id).await?;
    Ok(Json(response))
}

/// Remove a ship from a reservation
///
/// DELETE /delete-from-parking/{id}/ with `id_ship` in the body or the query
pub async fn detach_ship(
    State(state): State<AppState>,
    auth: AuthUser,
    ParkingIdPath(parking_id): ParkingIdPath,
    QueryParams(query): QueryParams<DetachShipRequest>,
    OptionalJson(body): OptionalJson<DetachShipRequest>,
) -> ApiResult<NoContent> {
    let ship_id = body
        .id_ship
        .or(query.id_ship)
        .filter(|id| *id > 0)
        .map(ShipId::new)
        .ok_or_else(|| ApiError::invalid_body("id_ship is required"))?;

    let service = ParkingShipService::new(state.service_context());
    service
        .detach_ship(auth.principal(), parking_id, ship_id)
        .await?;
    Ok(NoContent)
}

/// PUT /add-captain/{id}/
pub async fn set_captain(
    State(state): State<AppState>,
    auth: AuthUser,
    ParkingIdPath(parking_id): ParkingIdPath,
    ValidatedJson(request): ValidatedJson<SetCaptainRequest>,
) -> ApiResult<Json<AttachShipResponse>> {
    let service = ParkingShipService::new(state.service_context());
    let response = service
        .set_captain(auth.principal(), parking_id, request)
        .await?;
    Ok(Json(response))
}
