//! Authentication extractor
//!
//! Resolves the caller from a bearer access token or, failing that, from the
//! web session cookie. Both schemes end in the same [`Principal`].

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use dock_core::Principal;
use dock_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub principal: Principal,
    /// Web session id when the caller authenticated with the cookie
    pub session_id: Option<String>,
}

impl AuthUser {
    /// Principal in the form the services take
    pub fn principal(&self) -> Option<&Principal> {
        Some(&self.principal)
    }
}

enum Credentials {
    Bearer(String),
    Session(String),
}

async fn bearer_token<S>(parts: &mut Parts, state: &S) -> Option<Credentials>
where
    S: Send + Sync,
{
    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| Credentials::Bearer(bearer.token().to_string()))
}

fn session_cookie(parts: &Parts, app_state: &AppState) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(app_state.session_cookie_name())
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

async fn resolve(app_state: &AppState, credentials: Credentials) -> Result<AuthUser, ApiError> {
    let service = AuthService::new(app_state.service_context());
    match credentials {
        Credentials::Bearer(token) => {
            let principal = service.authenticate_token(&token).await.map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::from(e)
            })?;
            Ok(AuthUser {
                principal,
                session_id: None,
            })
        }
        Credentials::Session(session_id) => {
            let principal = service.authenticate_session(&session_id).await.map_err(|e| {
                tracing::warn!(error = %e, "Invalid web session");
                ApiError::from(e)
            })?;
            Ok(AuthUser {
                principal,
                session_id: Some(session_id),
            })
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let credentials = match bearer_token(parts, state).await {
            Some(credentials) => credentials,
            None => session_cookie(parts, &app_state)
                .map(Credentials::Session)
                .ok_or(ApiError::MissingAuth)?,
        };

        resolve(&app_state, credentials).await
    }
}

/// Optional authenticated caller
///
/// Anonymous requests and stale session cookies yield `None`; a bearer token
/// that fails validation is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref().map(|user| &user.principal)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        if let Some(credentials) = bearer_token(parts, state).await {
            return resolve(&app_state, credentials).await.map(|user| Self(Some(user)));
        }

        match session_cookie(parts, &app_state) {
            Some(session_id) => Ok(Self(
                resolve(&app_state, Credentials::Session(session_id)).await.ok(),
            )),
            None => Ok(Self(None)),
        }
    }
}
