//! Profile handlers

use axum::{extract::State, Json};
use dock_service::dto::{UpdateProfileRequest, UserResponse};
use dock_service::UserService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /profile/
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_profile(auth.principal()).await?;
    Ok(Json(response))
}

/// PUT /profile/
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.principal(), request).await?;
    Ok(Json(response))
}
