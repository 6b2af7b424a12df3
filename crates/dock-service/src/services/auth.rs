//! Authentication service
//!
//! Handles registration, login, token refresh, logout, and resolving the
//! caller of a request into a [`Principal`].

use dock_cache::RefreshTokenData;
use dock_common::auth::{hash_password, validate_password_strength, verify_password};
use dock_common::AppError;
use dock_core::entities::{NewUser, User};
use dock_core::{DomainError, Principal, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, LoginOutcome, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserResponse> {
        validate_password_strength(&request.password)?;

        if self
            .ctx
            .user_repo()
            .username_exists(&request.username)
            .await?
        {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;
        let new_user = NewUser {
            username: request.username,
            email: request.email,
            first_name: String::new(),
            last_name: String::new(),
        };
        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(UserResponse::from(&user))
    }

    /// Login with username and password
    ///
    /// Issues a token pair and opens a cookie session.
    #[instrument(skip(self, request, user_agent), fields(username = %request.username))]
    pub async fn login(
        &self,
        request: LoginRequest,
        user_agent: Option<String>,
    ) -> ServiceResult<LoginOutcome> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!(username = %request.username, "Login failed: user not found");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        let auth = self.issue_tokens(&user, user_agent).await?;
        let session_id = self.ctx.session_store().create(user.id).await?;

        info!(user_id = %user.id, "User logged in successfully");
        Ok(LoginOutcome { auth, session_id })
    }

    /// Exchange a refresh token for a new pair
    ///
    /// The presented token is revoked; presenting it again fails.
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;

        let stored = self.ctx.refresh_token_store().get(&claims.jti).await?;
        if !self.ctx.refresh_token_store().revoke(&claims.jti).await? {
            warn!(jti = %claims.jti, "Refresh with revoked or unknown token");
            return Err(AppError::InvalidToken.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let auth = self
            .issue_tokens(&user, stored.and_then(|data| data.user_agent))
            .await?;

        info!(user_id = %user.id, "Tokens refreshed successfully");
        Ok(auth)
    }

    /// End the caller's session
    ///
    /// Drops the current cookie session and revokes the given refresh token.
    /// Without a refresh token the user is signed out everywhere: every
    /// refresh token and cookie session they hold is revoked.
    #[instrument(skip(self, session_id, refresh_token))]
    pub async fn logout(
        &self,
        user_id: UserId,
        session_id: Option<&str>,
        refresh_token: Option<String>,
    ) -> ServiceResult<()> {
        if let Some(session_id) = session_id {
            self.ctx.session_store().delete(session_id).await?;
        }

        match refresh_token {
            Some(token) => {
                let claims = self.ctx.jwt_service().validate_refresh_token(&token)?;
                if claims.user_id()? != user_id {
                    return Err(AppError::InvalidToken.into());
                }
                self.ctx.refresh_token_store().revoke(&claims.jti).await?;
            }
            None => {
                self.ctx
                    .refresh_token_store()
                    .revoke_all_for_user(user_id)
                    .await?;
                self.ctx
                    .session_store()
                    .delete_all_for_user(user_id)
                    .await?;
            }
        }

        info!(user_id = %user_id, "User logged out successfully");
        Ok(())
    }

    /// Resolve a bearer access token into the acting principal
    #[instrument(skip(self, token))]
    pub async fn authenticate_token(&self, token: &str) -> ServiceResult<Principal> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        let user = self
            .ctx
            .user_repo()
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Ok(user.principal())
    }

    /// Resolve a cookie session id into the acting principal
    #[instrument(skip(self, session_id))]
    pub async fn authenticate_session(&self, session_id: &str) -> ServiceResult<Principal> {
        let session = self
            .ctx
            .session_store()
            .get(session_id)
            .await?
            .ok_or(AppError::InvalidSession)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(session.user_id)
            .await?
            .ok_or(AppError::InvalidSession)?;

        Ok(user.principal())
    }

    async fn issue_tokens(
        &self,
        user: &User,
        user_agent: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        let pair = self.ctx.jwt_service().generate_token_pair(user.id)?;
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&pair.refresh_token)?;

        let mut data = RefreshTokenData::new(user.id);
        if let Some(user_agent) = user_agent {
            data = data.with_user_agent(user_agent);
        }
        self.ctx
            .refresh_token_store()
            .store(&claims.jti, &data)
            .await
            .map_err(ServiceError::from)?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            UserResponse::from(user),
        ))
    }
}
