//! Cookie-backed web sessions.
//!
//! Browser clients log in once and then authenticate with an opaque session
//! id carried in a cookie. The id maps to a small record in Redis that expires
//! on its own.

use crate::pool::{RedisPool, RedisResult};
use dock_core::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const WEB_SESSION_PREFIX: &str = "web_session:";
const USER_WEB_SESSIONS_PREFIX: &str = "user_web_sessions:";

/// Default session lifetime (2 weeks)
const DEFAULT_SESSION_TTL: u64 = 14 * 24 * 60 * 60;

/// Stored session record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSessionData {
    pub user_id: UserId,
    /// Creation timestamp (Unix epoch seconds)
    pub created_at: i64,
}

/// Redis store for cookie sessions
#[derive(Clone)]
pub struct WebSessionStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl WebSessionStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_SESSION_TTL,
        }
    }

    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(session_id: &str) -> String {
        format!("{WEB_SESSION_PREFIX}{session_id}")
    }

    fn user_key(user_id: UserId) -> String {
        format!("{USER_WEB_SESSIONS_PREFIX}{user_id}")
    }

    /// Open a new session and return its id
    pub async fn create(&self, user_id: UserId) -> RedisResult<String> {
        let session_id = Uuid::new_v4().simple().to_string();
        let data = WebSessionData {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        };
        self.pool
            .put_indexed(
                &Self::key(&session_id),
                &data,
                &Self::user_key(user_id),
                &session_id,
                self.ttl_seconds,
            )
            .await?;

        tracing::debug!(user_id = %user_id, "Created web session");
        Ok(session_id)
    }

    /// Look up a live session
    pub async fn get(&self, session_id: &str) -> RedisResult<Option<WebSessionData>> {
        // Ids are uuid hex; anything else cannot name a session.
        if session_id.is_empty() || session_id.len() > 64 {
            return Ok(None);
        }
        self.pool.get_json(&Self::key(session_id)).await
    }

    /// End a single session
    pub async fn delete(&self, session_id: &str) -> RedisResult<bool> {
        let Some(data) = self.get(session_id).await? else {
            return Ok(false);
        };
        self.pool
            .remove_indexed(&Self::key(session_id), &Self::user_key(data.user_id), session_id)
            .await
    }

    /// End every session of a user
    pub async fn delete_all_for_user(&self, user_id: UserId) -> RedisResult<usize> {
        let count = self
            .pool
            .drain_index(&Self::user_key(user_id), Self::key)
            .await?;

        tracing::info!(user_id = %user_id, count, "Deleted all web sessions for user");
        Ok(count)
    }
}
