//! Redis pool shared by the authentication stores.
//!
//! Web sessions and refresh tokens are stored the same way: a JSON record
//! under its own key that expires on its own, plus a per-user index set of
//! record ids so that logout can drop all of a user's records at once.

use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

/// Redis pool configuration
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// Redis connection URL (e.g., `redis://localhost:6379`)
    pub url: String,
    pub max_connections: usize,
}

impl From<&dock_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &dock_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
        }
    }
}

/// Failures of the session and refresh-token storage
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Invalid Redis pool settings: {0}")]
    Build(String),

    #[error("No Redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("Stored auth record is not valid JSON: {0}")]
    Codec(#[from] serde_json::Error),
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Connection pool plus the indexed-record operations the auth stores share
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl RedisPool {
    /// Build the pool; no connection is opened until the first checkout.
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| RedisPoolError::Build(e.to_string()))?
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::Build(e.to_string()))?;

        // Only the host part is logged
        let host = config.url.rsplit('@').next().unwrap_or(&config.url);
        tracing::info!(
            url = %host,
            max_connections = config.max_connections,
            "Session store pool ready"
        );

        Ok(Self { pool })
    }

    /// Pool for sessions and refresh tokens, sized by `REDIS_MAX_CONNECTIONS`
    pub fn from_config(config: &dock_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    pub async fn connection(&self) -> RedisResult<Connection> {
        Ok(self.pool.get().await?)
    }

    /// Round trip used by `GET /health/ready`
    pub async fn ping(&self) -> RedisResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Write `record` under `key` and list `member` in `index`.
    ///
    /// Both keys expire after `ttl_seconds`; the index is refreshed on every
    /// write so it outlives the newest record it lists.
    pub async fn put_indexed<V: Serialize>(
        &self,
        key: &str,
        record: &V,
        index: &str,
        member: &str,
        ttl_seconds: u64,
    ) -> RedisResult<()> {
        let encoded = serde_json::to_string(record)?;
        let index_ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);

        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, encoded, ttl_seconds).await?;
        conn.sadd::<_, _, ()>(index, member).await?;
        conn.expire::<_, ()>(index, index_ttl).await?;
        Ok(())
    }

    /// Decode the record under `key`, if it is still live
    pub async fn get_json<V: DeserializeOwned>(&self, key: &str) -> RedisResult<Option<V>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(key).await?;
        raw.map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(RedisPoolError::from)
    }

    /// Delete one record and unlist it from `index`.
    ///
    /// The `DEL` decides the result: of two concurrent removals of the same
    /// key exactly one returns `true`.
    pub async fn remove_indexed(&self, key: &str, index: &str, member: &str) -> RedisResult<bool> {
        let mut conn = self.connection().await?;
        let deleted: i64 = conn.del(key).await?;
        conn.srem::<_, _, ()>(index, member).await?;
        Ok(deleted > 0)
    }

    /// Delete every record listed in `index`, then the index itself.
    ///
    /// `record_key` maps an index member back to its record key. Returns the
    /// number of members the index held.
    pub async fn drain_index(
        &self,
        index: &str,
        record_key: impl Fn(&str) -> String,
    ) -> RedisResult<usize> {
        let mut conn = self.connection().await?;
        let members: Vec<String> = conn.smembers(index).await?;

        if !members.is_empty() {
            let keys: Vec<String> = members.iter().map(|m| record_key(m)).collect();
            conn.del::<_, ()>(keys).await?;
        }
        conn.del::<_, ()>(index).await?;

        Ok(members.len())
    }
}
