//! Website API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{id_of, TestApp};

#[tokio::test]
async fn test_create_website_defaults() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("owner@example.com").await;

    let response = app
        .server
        .post("/api/websites")
        .json(&json!({ "name": "Portfolio", "userId": user_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let website = TestApp::data(&response);
    assert_eq!(website["name"], "Portfolio");
    assert_eq!(website["theme"], "light");
    assert_eq!(website["status"], "draft");
    assert_eq!(website["userId"], user_id.to_string());
}

#[tokio::test]
async fn test_create_website_rejections() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("owner@example.com").await;

    let response = app
        .server
        .post("/api/websites")
        .json(&json!({ "name": "", "userId": user_id }))
        .await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/websites")
        .json(&json!({ "name": "Site", "userId": user_id, "theme": "neon" }))
        .await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/websites")
        .json(&json!({ "name": "Site", "userId": Uuid::new_v4() }))
        .await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);

    let response = app
        .server
        .post("/api/websites")
        .json(&json!({ "name": "Site", "userId": user_id, "templateId": Uuid::new_v4() }))
        .await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_list_websites() {
    let app = TestApp::new().await;
    let (user_id, website_id) = app.website().await;
    let (_, other_website) = app.website().await;

    let response = app
        .server
        .put(&format!("/api/websites/{}", website_id))
        .json(&json!({ "status": "published", "seoScore": 88 }))
        .await;
    let updated = TestApp::data(&response);
    assert_eq!(updated["status"], "published");
    assert_eq!(updated["seoScore"], 88);
    assert_eq!(updated["name"], "My site");

    let response = app
        .server
        .put(&format!("/api/websites/{}", website_id))
        .json(&json!({ "seoScore": null }))
        .await;
    let cleared = TestApp::data(&response);
    assert!(cleared["seoScore"].is_null());
    assert_eq!(cleared["status"], "published");

    let response = app.server.get(&format!("/api/users/{}/websites", user_id)).await;
    let mine = TestApp::data(&response);
    assert_eq!(mine.as_array().map(Vec::len), Some(1));
    assert_eq!(id_of(&mine[0]), website_id);

    let response = app.server.get("/api/websites").await;
    let all: Vec<Uuid> = TestApp::data(&response)
        .as_array()
        .expect("website list")
        .iter()
        .map(id_of)
        .collect();
    assert!(all.contains(&website_id));
    assert!(all.contains(&other_website));

    let response = app
        .server
        .put(&format!("/api/websites/{}", Uuid::new_v4()))
        .json(&json!({ "name": "Ghost" }))
        .await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_website_cascades_to_pages() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;
    let page_id = id_of(&app.create_page(website_id, "home").await);
    let section_id = id_of(&app.create_section(page_id, "Hero").await);

    let response = app.server.delete(&format!("/api/websites/{}", website_id)).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Website deleted");

    let response = app.server.get(&format!("/api/websites/{}", website_id)).await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
    let response = app.server.get(&format!("/api/pages/{}", page_id)).await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
    let response = app.server.get(&format!("/api/sections/{}", section_id)).await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let response = app.server.get("/api/nothing-here").await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}
