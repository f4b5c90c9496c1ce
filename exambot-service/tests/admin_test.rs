mod common;

use axum::http::StatusCode;
use common::{TestApp, ADMIN_PASSWORD, ADMIN_USERNAME};
use serde_json::json;

#[tokio::test]
async fn correct_credentials_log_in() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/admin/login",
            json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["expiresIn"], 3600);
}

#[tokio::test]
async fn padded_credentials_log_in() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/admin/login",
            json!({"username": format!("  {ADMIN_USERNAME} "), "password": format!("{ADMIN_PASSWORD}\n")}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let app = TestApp::new();
    let cases = [
        json!({"username": ADMIN_USERNAME, "password": "wrong"}),
        json!({"username": "admin", "password": ADMIN_PASSWORD}),
        json!({"username": ADMIN_PASSWORD, "password": ADMIN_USERNAME}),
        json!({"username": "", "password": ""}),
    ];

    for case in cases {
        let (status, body) = app.post("/api/admin/login", case.clone()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{case}");
        assert_eq!(body, json!({"detail": "Invalid credentials"}));
    }
}

#[tokio::test]
async fn missing_field_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/admin/login", json!({"username": ADMIN_USERNAME}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn configured_credentials_replace_defaults() {
    let app = TestApp::with(common::RecordingProvider::replying("x"), |config| {
        config.admin.username = "proctor".to_string();
        config.admin.password = secrecy::Secret::new("chalk".to_string());
    });

    let (status, _) = app
        .post("/api/admin/login", json!({"username": "proctor", "password": "chalk"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/admin/login",
            json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unrepresentable_token_lifetime_fails_cleanly() {
    let app = TestApp::with(common::RecordingProvider::replying("x"), |config| {
        config.admin.token_ttl_minutes = 200_000_000_000_000;
    });

    let (status, body) = app
        .post(
            "/api/admin/login",
            json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Admin token lifetime out of range");
}
