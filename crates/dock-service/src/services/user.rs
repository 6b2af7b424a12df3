//! User service
//!
//! Handles profile operations of the signed-in user.

use dock_core::entities::User;
use dock_core::{require_principal, DomainError, Principal, UserId};
use tracing::{info, instrument};

use crate::dto::{UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, principal))]
    pub async fn get_profile(&self, principal: Option<&Principal>) -> ServiceResult<UserResponse> {
        let principal = require_principal(principal)?;
        let user = self.find(principal.user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Update the caller's own profile; absent fields are kept
    #[instrument(skip(self, principal, request))]
    pub async fn update_profile(
        &self,
        principal: Option<&Principal>,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let principal = require_principal(principal)?;
        let mut user = self.find(principal.user_id).await?;

        if let Some(username) = request.username {
            if username != user.username {
                if self.ctx.user_repo().username_exists(&username).await? {
                    return Err(DomainError::UsernameAlreadyExists.into());
                }
                user.set_username(username);
            }
        }
        if let Some(email) = request.email {
            user.set_email(email);
        }
        if request.first_name.is_some() || request.last_name.is_some() {
            user.set_names(request.first_name, request.last_name);
        }

        self.ctx.user_repo().update(&user).await?;
        info!(user_id = %user.id, "User profile updated");

        Ok(UserResponse::from(&user))
    }

    async fn find(&self, user_id: UserId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }
}
