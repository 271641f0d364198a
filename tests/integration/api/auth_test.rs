//! Authentication API integration tests
//!
//! Tests for register, login, profile and logout, plus the user endpoints.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{id_of, TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": "ana@example.com", "password": TEST_PASSWORD, "name": "Ana" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["data"]["user"]["email"], "ana@example.com");
    assert_eq!(body["data"]["user"]["provider"], "email");
    assert!(body["data"]["user"].get("passwordHash").is_none());
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_register_rejections() {
    let app = TestApp::new().await;
    app.register("ana@example.com").await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": "ana@example.com", "password": TEST_PASSWORD }))
        .await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": "weak@example.com", "password": "password" }))
        .await;
    let message = crate::assert_error_response!(response, StatusCode::BAD_REQUEST);
    crate::assert_contains!(message, "password");

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": "not-an-email", "password": TEST_PASSWORD }))
        .await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("ana@example.com").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@example.com", "password": TEST_PASSWORD }))
        .await;
    let data = TestApp::data(&response);
    assert_eq!(id_of(&data["user"]), user_id);

    let token = data["token"].as_str().expect("token");
    let claims = crate::assert_ok!(app.tokens.verify(token));
    assert_eq!(claims.sub, user_id.to_string());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register("ana@example.com").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@example.com", "password": "Wrong12345" }))
        .await;
    let wrong_password = crate::assert_error_response!(response, StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }))
        .await;
    let unknown_email = crate::assert_error_response!(response, StatusCode::UNAUTHORIZED);

    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = TestApp::new().await;
    let (user_id, token) = app.register("ana@example.com").await;

    let response = app.server.get("/api/auth/profile").authorization_bearer(&token).await;
    assert_eq!(id_of(&TestApp::data(&response)), user_id);

    let response = app.server.get("/api/auth/profile").await;
    crate::assert_error_response!(response, StatusCode::UNAUTHORIZED);

    let response = app.server.get("/api/auth/profile").authorization_bearer("garbage").await;
    crate::assert_error_response!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_of_deleted_user() {
    let app = TestApp::new().await;
    let (user_id, token) = app.register("ana@example.com").await;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(app.database.pool())
        .await
        .unwrap();

    let response = app.server.get("/api/auth/profile").authorization_bearer(&token).await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout() {
    let app = TestApp::new().await;
    let response = app.server.post("/api/auth/logout").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Logout successful");
}

#[tokio::test]
async fn test_user_lookup_and_update() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("ana@example.com").await;
    app.register("taken@example.com").await;

    let response = app.server.get(&format!("/api/users/{}", user_id)).await;
    assert_eq!(TestApp::data(&response)["email"], "ana@example.com");

    let response = app.server.get("/api/users/email/ana@example.com").await;
    assert_eq!(id_of(&TestApp::data(&response)), user_id);

    let response = app
        .server
        .put(&format!("/api/users/{}", user_id))
        .json(&json!({ "name": "Ana Maria" }))
        .await;
    assert_eq!(TestApp::data(&response)["name"], "Ana Maria");

    let response = app
        .server
        .put(&format!("/api/users/{}", user_id))
        .json(&json!({ "email": "taken@example.com" }))
        .await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    let response = app.server.get(&format!("/api/users/{}", Uuid::new_v4())).await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}
