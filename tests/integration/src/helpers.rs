//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and preparing users and ships.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use dock_api::{create_app, create_app_state};
use dock_common::config::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, JwtConfig, ParkingConfig,
    RateLimitConfig, RedisConfig, ServerConfig, SessionConfig,
};
use dock_core::{UserId, UserRepository};
use dock_db::{create_pool, PgPool, PgUserRepository};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{
    AuthResponse, CreateShipRequest, LoginRequest, RegisterRequest, ShipResponse,
};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    db: PgPool,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let db = create_pool(&dock_db::DatabaseConfig::from(&config.database)).await?;

        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            db,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// A client that keeps cookies between requests
    pub fn cookie_client(&self) -> Result<Client> {
        Ok(Client::builder()
            .timeout(Duration::from_secs(10))
            .cookie_store(true)
            .build()?)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// PUT without a body, used by the lifecycle endpoints
    pub async fn put_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn delete_auth_json<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Register a fresh user and log in
    pub async fn register_and_login(&self) -> Result<(RegisterRequest, AuthResponse)> {
        let register = RegisterRequest::unique();
        let response = self.post("/register/", &register).await?;
        assert_status(response, StatusCode::CREATED).await?;

        let response = self
            .post("/login/", &LoginRequest::from_register(&register))
            .await?;
        let auth = assert_json(response, StatusCode::OK).await?;
        Ok((register, auth))
    }

    /// Register a fresh user and grant them staff rights
    ///
    /// Staff status is read from the database on every request, so the
    /// token issued before the promotion already carries it.
    pub async fn staff_user(&self) -> Result<AuthResponse> {
        let (_, auth) = self.register_and_login().await?;
        PgUserRepository::new(self.db.clone())
            .set_staff(UserId::new(auth.user.id), true)
            .await?;
        Ok(auth)
    }

    /// Create a catalog ship as staff
    pub async fn create_ship(&self, staff_token: &str) -> Result<ShipResponse> {
        let response = self
            .post_auth("/ships/", staff_token, &CreateShipRequest::unique())
            .await?;
        assert_json(response, StatusCode::CREATED).await
    }
}

/// Create a test configuration
///
/// Only `DATABASE_URL` and `REDIS_URL` are required; everything else has a
/// test default.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")?;
    let redis_url = std::env::var("REDIS_URL")?;
    let jwt_secret =
        std::env::var("JWT_SECRET").unwrap_or_else(|_| "integration-test-secret".to_string());

    Ok(AppConfig {
        app: AppSettings {
            name: "dock-integration".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
            run_migrations: true,
        },
        redis: RedisConfig {
            url: redis_url,
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: jwt_secret,
            access_token_expiry: 900,
            refresh_token_expiry: 604_800,
        },
        session: SessionConfig {
            cookie_name: "sessionid".to_string(),
            ttl: 3600,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        parking: ParkingConfig::default(),
    })
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
