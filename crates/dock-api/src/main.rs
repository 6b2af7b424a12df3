//! Dock API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p dock-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use dock_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Pick up RUST_LOG and APP_ENV from .env before the subscriber is built
    let _ = dotenvy::dotenv();

    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|raw| match raw.to_lowercase().as_str() {
            "production" => Some(Environment::Production),
            "staging" => Some(Environment::Staging),
            _ => None,
        })
        .unwrap_or_default();

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Dock API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        "Configuration loaded"
    );

    dock_api::run(config).await?;

    Ok(())
}
