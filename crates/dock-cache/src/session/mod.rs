//! Session storage module.
//!
//! Provides Redis-backed storage for:
//! - Refresh tokens (bearer authentication)
//! - Web sessions (cookie authentication)

mod refresh_token;
mod web_session;

pub use refresh_token::{RefreshTokenData, RefreshTokenStore};
pub use web_session::{WebSessionData, WebSessionStore};
