//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use dock_cache::RedisPool;
use dock_common::{AppConfig, AppError, JwtService};
use dock_db::{
    create_pool, run_migrations, PgParkingRepository, PgParkingShipRepository, PgShipRepository,
    PgUserRepository,
};
use dock_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    // Health probes stay outside the rate limit
    let api = apply_rate_limit(create_router(), &config.rate_limit);
    let router = api.merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());

    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = dock_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    info!("Connecting to Redis...");
    let redis_pool = RedisPool::from_config(&config.redis)
        .map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool created");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let ship_repo = Arc::new(PgShipRepository::new(pool.clone()));
    let parking_repo = Arc::new(PgParkingRepository::new(pool.clone()));
    let parking_ship_repo = Arc::new(PgParkingShipRepository::new(pool.clone()));

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(redis_pool)
        .user_repo(user_repo)
        .ship_repo(ship_repo)
        .parking_repo(parking_repo)
        .parking_ship_repo(parking_ship_repo)
        .jwt_service(jwt_service)
        .crew_cost(Arc::new(config.parking.crew_cost()))
        .detach_policy(config.parking.detach_policy)
        .session_ttl(config.session.ttl)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    info!(
        detach_policy = ?config.parking.detach_policy,
        crew_cost_min = config.parking.crew_cost_min,
        crew_cost_max = config.parking.crew_cost_max,
        "Service context ready"
    );

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);
    run_server(app, &addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
