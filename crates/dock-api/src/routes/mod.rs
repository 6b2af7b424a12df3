//! Route definitions
//!
//! Paths keep their trailing slash; `/:id/` segments are typed by the path
//! extractors.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, health, parkings, profile, ships};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(ship_routes())
        .merge(parking_routes())
        .merge(account_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Ship catalog routes
fn ship_routes() -> Router<AppState> {
    Router::new()
        .route("/ships/", get(ships::list_ships).post(ships::create_ship))
        .route("/ships/add/", post(ships::attach_ship))
        .route("/ships/image/", post(ships::set_ship_image))
        .route(
            "/ships/:id/",
            get(ships::get_ship)
                .put(ships::update_ship)
                .delete(ships::delete_ship),
        )
}

/// Parking reservation routes
fn parking_routes() -> Router<AppState> {
    Router::new()
        .route("/list-parkings/", get(parkings::list_parkings))
        .route(
            "/parking/:id/",
            get(parkings::get_parking).put(parkings::patch_parking),
        )
        .route("/form-parking/:id/", put(parkings::form_parking))
        .route(
            "/moderate-parking/:id/",
            put(parkings::moderate_parking).delete(parkings::delete_parking),
        )
        .route(
            "/delete-from-parking/:id/",
            delete(parkings::detach_ship),
        )
        .route("/add-captain/:id/", put(parkings::set_captain))
}

/// Registration, login, and profile routes
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register/", post(auth::register))
        .route("/login/", post(auth::login))
        .route("/refresh/", post(auth::refresh_token))
        .route("/logout/", post(auth::logout))
        .route("/profile/", get(profile::get_profile).put(profile::update_profile))
}
