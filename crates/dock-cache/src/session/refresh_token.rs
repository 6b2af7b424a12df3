//! Refresh token storage in Redis.
//!
//! Each issued refresh token is recorded under its `jti`. A token is only
//! honoured while its record exists, so rotation and logout revoke it by
//! deleting the key.

use crate::pool::{RedisPool, RedisResult};
use dock_core::UserId;
use serde::{Deserialize, Serialize};

/// Key prefix for refresh tokens
const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";

/// Key prefix for the per-user set of live token ids
const USER_TOKENS_PREFIX: &str = "user_tokens:";

/// Default TTL for refresh tokens (7 days)
const DEFAULT_REFRESH_TOKEN_TTL: u64 = 7 * 24 * 60 * 60;

/// Stored refresh token data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenData {
    pub user_id: UserId,
    /// Issue timestamp (Unix epoch seconds)
    pub created_at: i64,
    pub user_agent: Option<String>,
}

impl RefreshTokenData {
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
            user_agent: None,
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Refresh token store
#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RefreshTokenStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }

    /// Create with a TTL matching the refresh token lifetime
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(token_id: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}{token_id}")
    }

    fn user_key(user_id: UserId) -> String {
        format!("{USER_TOKENS_PREFIX}{user_id}")
    }

    /// Record a freshly issued refresh token
    pub async fn store(&self, token_id: &str, data: &RefreshTokenData) -> RedisResult<()> {
        self.pool
            .put_indexed(
                &Self::key(token_id),
                data,
                &Self::user_key(data.user_id),
                token_id,
                self.ttl_seconds,
            )
            .await?;

        tracing::debug!(token_id = %token_id, user_id = %data.user_id, "Stored refresh token");
        Ok(())
    }

    pub async fn get(&self, token_id: &str) -> RedisResult<Option<RefreshTokenData>> {
        self.pool.get_json(&Self::key(token_id)).await
    }

    /// Revoke a refresh token.
    ///
    /// Returns `false` when the token was already gone. Of two concurrent
    /// revocations of the same token exactly one observes `true`.
    pub async fn revoke(&self, token_id: &str) -> RedisResult<bool> {
        let Some(data) = self.get(token_id).await? else {
            return Ok(false);
        };
        let deleted = self
            .pool
            .remove_indexed(&Self::key(token_id), &Self::user_key(data.user_id), token_id)
            .await?;

        if deleted {
            tracing::debug!(token_id = %token_id, "Revoked refresh token");
        }
        Ok(deleted)
    }

    /// Revoke every refresh token of a user
    pub async fn revoke_all_for_user(&self, user_id: UserId) -> RedisResult<usize> {
        let count = self
            .pool
            .drain_index(&Self::user_key(user_id), Self::key)
            .await?;

        tracing::info!(user_id = %user_id, count, "Revoked all refresh tokens for user");
        Ok(count)
    }
}
