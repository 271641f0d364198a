//! Page API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{id_of, TestApp};

async fn page_ids(app: &TestApp, website_id: Uuid) -> Vec<Uuid> {
    let response = app.server.get(&format!("/api/pages/website/{}", website_id)).await;
    let pages = TestApp::data(&response);
    let pages = pages.as_array().expect("page list");
    for (index, page) in pages.iter().enumerate() {
        assert_eq!(page["order"], index as i64);
    }
    pages.iter().map(id_of).collect()
}

async fn home_of(app: &TestApp, website_id: Uuid) -> Value {
    let response = app.server.get(&format!("/api/pages/website/{}/home", website_id)).await;
    TestApp::data(&response)
}

#[tokio::test]
async fn test_pages_append_in_order() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;

    let home = app.create_page(website_id, "home").await;
    let about = app.create_page(website_id, "about").await;
    assert_eq!(home["order"], 0);
    assert_eq!(about["order"], 1);
    assert_eq!(about["isHome"], false);
    assert_eq!(about["sections"], json!([]));

    assert_eq!(page_ids(&app, website_id).await, vec![id_of(&home), id_of(&about)]);
}

#[tokio::test]
async fn test_slug_rules() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;
    app.create_page(website_id, "about").await;

    let response = app
        .server
        .post("/api/pages")
        .json(&json!({ "name": "About again", "slug": "about", "websiteId": website_id }))
        .await;
    let message = crate::assert_error_response!(response, StatusCode::BAD_REQUEST);
    crate::assert_contains!(message, "slug");

    let response = app
        .server
        .post("/api/pages")
        .json(&json!({ "name": "Bad", "slug": "Not A Slug", "websiteId": website_id }))
        .await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    // Slugs are per website
    let (_, other_website) = app.website().await;
    app.create_page(other_website, "about").await;

    let response = app
        .server
        .get(&format!("/api/pages/website/{}/slug/about", website_id))
        .await;
    assert_eq!(TestApp::data(&response)["websiteId"], website_id.to_string());

    let response = app
        .server
        .get(&format!("/api/pages/website/{}/slug/missing", website_id))
        .await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_home_page_is_exclusive() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;

    let response = app
        .server
        .get(&format!("/api/pages/website/{}/home", website_id))
        .await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);

    let response = app
        .server
        .post("/api/pages")
        .json(&json!({ "name": "Home", "slug": "home", "websiteId": website_id, "isHome": true }))
        .await;
    let first = id_of(&TestApp::data(&response));
    assert_eq!(id_of(&home_of(&app, website_id).await), first);

    let response = app
        .server
        .post("/api/pages")
        .json(&json!({ "name": "Landing", "slug": "landing", "websiteId": website_id, "isHome": true }))
        .await;
    let second = id_of(&TestApp::data(&response));
    assert_eq!(id_of(&home_of(&app, website_id).await), second);

    let response = app.server.get(&format!("/api/pages/{}", first)).await;
    assert_eq!(TestApp::data(&response)["isHome"], false);

    let response = app
        .server
        .put(&format!("/api/pages/{}", first))
        .json(&json!({ "isHome": true }))
        .await;
    assert_eq!(TestApp::data(&response)["isHome"], true);
    assert_eq!(id_of(&home_of(&app, website_id).await), first);
}

#[tokio::test]
async fn test_delete_home_page_rules() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;

    let response = app
        .server
        .post("/api/pages")
        .json(&json!({ "name": "Home", "slug": "home", "websiteId": website_id, "isHome": true }))
        .await;
    let home = id_of(&TestApp::data(&response));

    let response = app.server.delete(&format!("/api/pages/{}", home)).await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    let about = id_of(&app.create_page(website_id, "about").await);
    let contact = id_of(&app.create_page(website_id, "contact").await);

    let response = app.server.delete(&format!("/api/pages/{}", home)).await;
    TestApp::data(&response);

    assert_eq!(page_ids(&app, website_id).await, vec![about, contact]);
    assert_eq!(id_of(&home_of(&app, website_id).await), about);
}

#[tokio::test]
async fn test_reorder_and_update_order() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;
    let a = id_of(&app.create_page(website_id, "a").await);
    let b = id_of(&app.create_page(website_id, "b").await);
    let c = id_of(&app.create_page(website_id, "c").await);

    let response = app
        .server
        .patch("/api/pages/reorder")
        .json(&json!({ "id": c, "newOrder": 0 }))
        .await;
    assert_eq!(TestApp::data(&response)["order"], 0);
    assert_eq!(page_ids(&app, website_id).await, vec![c, a, b]);

    let response = app
        .server
        .put(&format!("/api/pages/{}", c))
        .json(&json!({ "order": 2, "name": "Contact", "slug": "contact" }))
        .await;
    let updated = TestApp::data(&response);
    assert_eq!(updated["order"], 2);
    assert_eq!(updated["slug"], "contact");
    assert_eq!(page_ids(&app, website_id).await, vec![a, b, c]);
}

#[tokio::test]
async fn test_page_detail_nests_sections_and_components() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;
    let page_id = id_of(&app.create_page(website_id, "home").await);

    let hero = id_of(&app.create_section(page_id, "Hero").await);
    app.create_section(page_id, "Footer").await;
    app.create_component(hero, "Welcome").await;

    let response = app.server.get(&format!("/api/pages/{}", page_id)).await;
    let page = TestApp::data(&response);
    let sections = page["sections"].as_array().expect("sections");

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["name"], "Hero");
    assert_eq!(sections[1]["name"], "Footer");
    assert_eq!(sections[0]["components"][0]["content"], json!({ "text": "Welcome" }));
    assert_eq!(sections[1]["components"], json!([]));
}

#[tokio::test]
async fn test_create_page_for_missing_website() {
    let app = TestApp::new().await;
    let response = app
        .server
        .post("/api/pages")
        .json(&json!({ "name": "Orphan", "slug": "orphan", "websiteId": Uuid::new_v4() }))
        .await;
    let message = crate::assert_error_response!(response, StatusCode::NOT_FOUND);
    crate::assert_contains!(message, "Website");
}
