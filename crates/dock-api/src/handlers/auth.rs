//! Authentication handlers
//!
//! Endpoints for user registration, login, logout, and token refresh.
//! Login also opens a web session carried in an HttpOnly cookie.

use axum::{extract::State, Json};
use axum_extra::{
    extract::cookie::{Cookie, CookieJar, SameSite},
    headers::UserAgent,
    TypedHeader,
};
use dock_service::dto::{
    AuthResponse, LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest, UserResponse,
};
use dock_service::AuthService;

use crate::extractors::{AuthUser, OptionalJson, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /register/
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<UserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(response))
}

/// Login with username and password
///
/// POST /login/
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let service = AuthService::new(state.service_context());
    let user_agent = user_agent.map(|TypedHeader(agent)| agent.as_str().to_string());
    let outcome = service.login(request, user_agent).await?;

    let cookie = Cookie::build((state.session_cookie_name().to_string(), outcome.session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config().app.env.is_production());

    Ok((jar.add(cookie), Json(outcome.auth)))
}

/// Refresh access token
///
/// POST /refresh/
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Json(response))
}

/// Logout user
///
/// POST /logout/
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
    OptionalJson(body): OptionalJson<LogoutRequest>,
) -> ApiResult<(CookieJar, NoContent)> {
    let service = AuthService::new(state.service_context());

    // A bearer-authenticated logout still ends a session cookie sent alongside
    let session_id = auth
        .session_id
        .or_else(|| jar.get(state.session_cookie_name()).map(|c| c.value().to_string()));

    service
        .logout(auth.principal.user_id, session_id.as_deref(), body.refresh_token)
        .await?;

    let jar = jar.remove(Cookie::build(state.session_cookie_name().to_string()).path("/"));
    Ok((jar, NoContent))
}
