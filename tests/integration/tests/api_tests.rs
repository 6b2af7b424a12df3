//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/register/", &request).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(user.username, request.username);
    assert_eq!(user.email, request.email);
    assert!(!user.is_staff);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/register/", &request).await.unwrap();

    let response = server.post("/register/", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.code, "USERNAME_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, _) = server.register_and_login().await.unwrap();

    let response = server
        .post(
            "/login/",
            &LoginRequest {
                username: register.username,
                password: "WrongPass99".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register = RegisterRequest::unique();
    server.post("/register/", &register).await.unwrap();

    let client = server.cookie_client().unwrap();
    let response = client
        .post(server.url("/login/"))
        .json(&LoginRequest::from_register(&register))
        .send()
        .await
        .unwrap();
    let set_cookie = response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(set_cookie.starts_with("sessionid="));
    assert!(set_cookie.contains("HttpOnly"));
    assert_status(response, StatusCode::OK).await.unwrap();

    // The cookie alone authenticates
    let response = client
        .put(server.url("/profile/"))
        .json(&json!({ "first_name": "Ada" }))
        .send()
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.first_name, "Ada");

    let response = client.get(server.url("/profile/")).send().await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.username, register.username);
    assert_eq!(user.first_name, "Ada");
    assert!(!user.is_staff);

    // Logout ends the session
    let response = client.post(server.url("/logout/")).send().await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = client.get(server.url("/profile/")).send().await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_rotation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = server.register_and_login().await.unwrap();

    let body = json!({ "refresh_token": auth.refresh_token });
    let response = server.post("/refresh/", &body).await.unwrap();
    let rotated: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(rotated.refresh_token, auth.refresh_token);

    // The old token was revoked by the rotation
    let response = server.post("/refresh/", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // The new one still works
    let response = server
        .post("/refresh/", &json!({ "refresh_token": rotated.refresh_token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_refresh_tokens() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = server.register_and_login().await.unwrap();

    let response = server
        .post_auth("/logout/", &auth.access_token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post("/refresh/", &json!({ "refresh_token": auth.refresh_token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_profile_username_conflict() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (first, _) = server.register_and_login().await.unwrap();
    let (_, second) = server.register_and_login().await.unwrap();

    let response = server
        .put_auth(
            "/profile/",
            &second.access_token,
            &json!({ "username": first.username }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

// ============================================================================
// Ship Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_non_staff_cannot_mutate_ships() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = server.register_and_login().await.unwrap();

    let response = server
        .post_auth("/ships/", &auth.access_token, &CreateShipRequest::unique())
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.code, "STAFF_ONLY");

    let staff = server.staff_user().await.unwrap();
    let ship = server.create_ship(&staff.access_token).await.unwrap();

    let response = server
        .delete_auth(&format!("/ships/{}/", ship.id_ship), &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_staff_ship_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server.staff_user().await.unwrap();
    let ship = server.create_ship(&staff.access_token).await.unwrap();
    assert_eq!(ship.status, "active");

    let path = format!("/ships/{}/", ship.id_ship);

    let response = server
        .put_auth(&path, &staff.access_token, &json!({ "description": "Refitted" }))
        .await
        .unwrap();
    let updated: ShipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.description, "Refitted");
    assert_eq!(updated.ship_name, ship.ship_name);

    let response = server
        .post_auth(
            "/ships/image/",
            &staff.access_token,
            &json!({ "id_ship": ship.id_ship, "img_url": "http://img.example.com/1.png" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.delete_auth(&path, &staff.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Soft delete: still readable, marked deleted
    let response = server.get(&path).await.unwrap();
    let deleted: ShipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.status, "deleted");
    assert_eq!(deleted.img_url, "http://img.example.com/1.png");
}

#[tokio::test]
async fn test_get_unknown_ship_is_404() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get(&format!("/ships/{}/", i64::MAX)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reservation Workflow Tests
// ============================================================================

#[tokio::test]
async fn test_attach_creates_draft_and_rejects_duplicates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server.staff_user().await.unwrap();
    let ship = server.create_ship(&staff.access_token).await.unwrap();
    let (_, user) = server.register_and_login().await.unwrap();

    // No draft yet
    let response = server.get_auth("/ships/", &user.access_token).await.unwrap();
    let listing: ShipListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listing.draft.is_none());

    let response = server
        .post_auth(
            "/ships/add/",
            &user.access_token,
            &AttachShipRequest::to_draft(ship.id_ship),
        )
        .await
        .unwrap();
    let attached: AttachShipResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(attached.id_ship, ship.id_ship);

    let response = server.get_auth("/ships/", &user.access_token).await.unwrap();
    let listing: ShipListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let draft = listing.draft.expect("draft summary");
    assert_eq!(draft.parking_id, attached.parking_id);
    assert_eq!(draft.count, 1);

    let response = server
        .post_auth(
            "/ships/add/",
            &user.access_token,
            &AttachShipRequest::to_draft(ship.id_ship),
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.code, "SHIP_ALREADY_ATTACHED");

    let response = server
        .get_auth(
            &format!("/parking/{}/", attached.parking_id),
            &user.access_token,
        )
        .await
        .unwrap();
    let detail: ParkingDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.parking.status, "draft");
    assert_eq!(detail.ships.len(), 1);
}

#[tokio::test]
async fn test_concurrent_attach_shares_one_draft() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server.staff_user().await.unwrap();
    let first = server.create_ship(&staff.access_token).await.unwrap();
    let second = server.create_ship(&staff.access_token).await.unwrap();
    let (_, user) = server.register_and_login().await.unwrap();

    let attach_first = AttachShipRequest::to_draft(first.id_ship);
    let attach_second = AttachShipRequest::to_draft(second.id_ship);
    let (a, b) = futures::join!(
        server.post_auth("/ships/add/", &user.access_token, &attach_first),
        server.post_auth("/ships/add/", &user.access_token, &attach_second),
    );

    let a: AttachShipResponse = assert_json(a.unwrap(), StatusCode::CREATED).await.unwrap();
    let b: AttachShipResponse = assert_json(b.unwrap(), StatusCode::CREATED).await.unwrap();
    assert_eq!(a.parking_id, b.parking_id);
}

#[tokio::test]
async fn test_form_requires_owner_and_happens_once() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server.staff_user().await.unwrap();
    let ship = server.create_ship(&staff.access_token).await.unwrap();
    let (_, owner) = server.register_and_login().await.unwrap();
    let (_, stranger) = server.register_and_login().await.unwrap();

    let response = server
        .post_auth(
            "/ships/add/",
            &owner.access_token,
            &AttachShipRequest::to_draft(ship.id_ship),
        )
        .await
        .unwrap();
    let attached: AttachShipResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/form-parking/{}/", attached.parking_id);

    let response = server
        .put_empty_auth(&path, &stranger.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Staff get no bypass on submitting someone else's draft
    let response = server
        .put_empty_auth(&path, &staff.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.put_empty_auth(&path, &owner.access_token).await.unwrap();
    let formed: ParkingResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(formed.status, "formed");
    assert!(formed.formed_at.is_some());

    let response = server.put_empty_auth(&path, &owner.access_token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.code, "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_moderate_unformed_parking_is_400() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server.staff_user().await.unwrap();
    let ship = server.create_ship(&staff.access_token).await.unwrap();
    let (_, user) = server.register_and_login().await.unwrap();

    let response = server
        .post_auth(
            "/ships/add/",
            &user.access_token,
            &AttachShipRequest::to_draft(ship.id_ship),
        )
        .await
        .unwrap();
    let attached: AttachShipResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put_auth(
            &format!("/moderate-parking/{}/", attached.parking_id),
            &staff.access_token,
            &json!({ "accept": true }),
        )
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_approval_records_moderator_and_spending() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server.staff_user().await.unwrap();
    let (_, user) = server.register_and_login().await.unwrap();

    let mut parking_id = 0;
    for _ in 0..2 {
        let ship = server.create_ship(&staff.access_token).await.unwrap();
        let response = server
            .post_auth(
                "/ships/add/",
                &user.access_token,
                &AttachShipRequest::to_draft(ship.id_ship),
            )
            .await
            .unwrap();
        let attached: AttachShipResponse =
            assert_json(response, StatusCode::CREATED).await.unwrap();
        parking_id = attached.parking_id;
    }

    let response = server
        .put_empty_auth(&format!("/form-parking/{parking_id}/"), &user.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Only staff moderate
    let moderate_path = format!("/moderate-parking/{parking_id}/");
    let response = server
        .put_auth(&moderate_path, &user.access_token, &json!({ "accept": true }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(&moderate_path, &staff.access_token, &json!({ "accept": true }))
        .await
        .unwrap();
    let approved: ParkingResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(approved.status, "completed");
    assert_eq!(approved.moderator, Some(staff.user.id));
    assert!(approved.ended_at.is_some());
    let spending = approved.spendings_of_crew.expect("spending recorded");
    assert!((20_000..40_000).contains(&spending), "spending {spending}");

    // Completed reservations show up for the owner and for staff
    let response = server
        .get_auth("/list-parkings/", &user.access_token)
        .await
        .unwrap();
    let own: Vec<ParkingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(own.iter().all(|p| p.user_id == user.user.id));
    assert!(own.iter().any(|p| p.id_parking == parking_id));

    let response = server
        .get_auth("/list-parkings/?status=completed", &staff.access_token)
        .await
        .unwrap();
    let all: Vec<ParkingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(all.iter().all(|p| p.status == "completed"));
    assert!(all.iter().any(|p| p.id_parking == parking_id));
}

#[tokio::test]
async fn test_detach_ship() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server.staff_user().await.unwrap();
    let ship = server.create_ship(&staff.access_token).await.unwrap();
    let other = server.create_ship(&staff.access_token).await.unwrap();
    let (_, user) = server.register_and_login().await.unwrap();

    let response = server
        .post_auth(
            "/ships/add/",
            &user.access_token,
            &AttachShipRequest::to_draft(ship.id_ship),
        )
        .await
        .unwrap();
    let attached: AttachShipResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/delete-from-parking/{}/", attached.parking_id);

    // Absent link
    let response = server
        .delete_auth_json(&path, &user.access_token, &json!({ "id_ship": other.id_ship }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Ship id in the query string works as well as in the body
    let response = server
        .delete_auth(
            &format!("{path}?id_ship={}", ship.id_ship),
            &user.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(
            &format!("/parking/{}/", attached.parking_id),
            &user.access_token,
        )
        .await
        .unwrap();
    let detail: ParkingDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(detail.ships.is_empty());

    // Missing ship id
    let response = server.delete_auth(&path, &user.access_token).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_set_captain_is_staff_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server.staff_user().await.unwrap();
    let ship = server.create_ship(&staff.access_token).await.unwrap();
    let (_, user) = server.register_and_login().await.unwrap();

    let response = server
        .post_auth(
            "/ships/add/",
            &user.access_token,
            &AttachShipRequest::to_draft(ship.id_ship),
        )
        .await
        .unwrap();
    let attached: AttachShipResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/add-captain/{}/", attached.parking_id);
    let body = json!({ "id_ship": ship.id_ship, "captain": "Nemo" });

    let response = server.put_auth(&path, &user.access_token, &body).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.put_auth(&path, &staff.access_token, &body).await.unwrap();
    let updated: AttachShipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.captain.as_deref(), Some("Nemo"));
}

#[tokio::test]
async fn test_staff_delete_and_owner_isolation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let staff = server.staff_user().await.unwrap();
    let ship = server.create_ship(&staff.access_token).await.unwrap();
    let (_, owner) = server.register_and_login().await.unwrap();
    let (_, stranger) = server.register_and_login().await.unwrap();

    let response = server
        .post_auth(
            "/ships/add/",
            &owner.access_token,
            &AttachShipRequest::to_draft(ship.id_ship),
        )
        .await
        .unwrap();
    let attached: AttachShipResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(
            &format!("/parking/{}/", attached.parking_id),
            &stranger.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let path = format!("/moderate-parking/{}/", attached.parking_id);
    let response = server.delete_auth(&path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &staff.access_token).await.unwrap();
    let deleted: ParkingResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.status, "deleted");
}

#[tokio::test]
async fn test_anonymous_attach_is_401() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/ships/add/", &AttachShipRequest::to_draft(1))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.code, "MISSING_AUTH");
}
