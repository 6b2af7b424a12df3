//! # dock-cache
//!
//! Redis storage for authentication state.
//!
//! ## Features
//!
//! - **Connection Pool**: deadpool-managed connections plus the indexed
//!   record operations both stores are built on
//! - **Refresh Tokens**: One record per issued token, deleted on rotation or logout
//! - **Web Sessions**: Opaque cookie session ids mapped to users
//!
//! ## Example
//!
//! ```ignore
//! use dock_cache::{RedisPool, WebSessionStore};
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let sessions = WebSessionStore::new(pool.clone());
//!
//! let session_id = sessions.create(user_id).await?;
//! let session = sessions.get(&session_id).await?;
//! ```

pub mod pool;
pub mod session;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use session::{RefreshTokenData, RefreshTokenStore, WebSessionData, WebSessionStore};
