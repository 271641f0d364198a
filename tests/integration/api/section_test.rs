//! Section API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{id_of, TestApp};

async fn section_ids(app: &TestApp, path: String) -> Vec<Uuid> {
    let response = app.server.get(&path).await;
    let sections = TestApp::data(&response);
    let sections = sections.as_array().expect("section list");
    for (index, section) in sections.iter().enumerate() {
        assert_eq!(section["order"], index as i64);
    }
    sections.iter().map(id_of).collect()
}

async fn template(app: &TestApp) -> Uuid {
    let response = app
        .server
        .post("/api/templates")
        .json(&json!({ "name": "Landing", "type": "landing" }))
        .await;
    id_of(&TestApp::data(&response))
}

#[tokio::test]
async fn test_sections_under_page_and_template() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;
    let page_id = id_of(&app.create_page(website_id, "home").await);
    let template_id = template(&app).await;

    let hero = app.create_section(page_id, "Hero").await;
    assert_eq!(hero["pageId"], page_id.to_string());
    assert_eq!(hero["templateId"], serde_json::Value::Null);
    assert_eq!(hero["components"], json!([]));

    let response = app
        .server
        .post("/api/sections")
        .json(&json!({ "name": "Banner", "templateId": template_id, "styles": { "padding": "2rem" } }))
        .await;
    let banner = TestApp::data(&response);
    assert_eq!(banner["order"], 0);
    assert_eq!(banner["styles"], json!({ "padding": "2rem" }));

    assert_eq!(section_ids(&app, format!("/api/sections/page/{}", page_id)).await, vec![id_of(&hero)]);
    assert_eq!(
        section_ids(&app, format!("/api/sections/template/{}", template_id)).await,
        vec![id_of(&banner)]
    );
}

#[tokio::test]
async fn test_section_needs_exactly_one_parent() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;
    let page_id = id_of(&app.create_page(website_id, "home").await);
    let template_id = template(&app).await;

    let response = app.server.post("/api/sections").json(&json!({ "name": "Nowhere" })).await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/sections")
        .json(&json!({ "name": "Both", "pageId": page_id, "templateId": template_id }))
        .await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/sections")
        .json(&json!({ "name": "Ghost", "pageId": Uuid::new_v4() }))
        .await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_move_section_from_page_to_template() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;
    let page_id = id_of(&app.create_page(website_id, "home").await);
    let template_id = template(&app).await;

    let a = id_of(&app.create_section(page_id, "A").await);
    let b = id_of(&app.create_section(page_id, "B").await);
    app.create_component(a, "travels with the section").await;

    let response = app
        .server
        .patch("/api/sections/move")
        .json(&json!({ "id": a, "targetTemplateId": template_id }))
        .await;
    let moved = TestApp::data(&response);
    assert_eq!(moved["pageId"], serde_json::Value::Null);
    assert_eq!(moved["templateId"], template_id.to_string());
    assert_eq!(moved["order"], 0);
    assert_eq!(moved["components"].as_array().map(Vec::len), Some(1));

    assert_eq!(section_ids(&app, format!("/api/sections/page/{}", page_id)).await, vec![b]);
    assert_eq!(section_ids(&app, format!("/api/sections/template/{}", template_id)).await, vec![a]);
}

#[tokio::test]
async fn test_reorder_update_delete() {
    let app = TestApp::new().await;
    let (_, website_id) = app.website().await;
    let page_id = id_of(&app.create_page(website_id, "home").await);
    let a = id_of(&app.create_section(page_id, "A").await);
    let b = id_of(&app.create_section(page_id, "B").await);
    let c = id_of(&app.create_section(page_id, "C").await);
    let list = format!("/api/sections/page/{}", page_id);

    let response = app
        .server
        .patch("/api/sections/reorder")
        .json(&json!({ "id": a, "newOrder": 2 }))
        .await;
    assert_eq!(TestApp::data(&response)["order"], 2);
    assert_eq!(section_ids(&app, list.clone()).await, vec![b, c, a]);

    let response = app
        .server
        .put(&format!("/api/sections/{}", a))
        .json(&json!({ "name": "Renamed", "order": 0 }))
        .await;
    let updated = TestApp::data(&response);
    assert_eq!(updated["name"], "Renamed");
    assert_eq!(section_ids(&app, list.clone()).await, vec![a, b, c]);

    let component = id_of(&app.create_component(b, "gone").await);
    let response = app.server.delete(&format!("/api/sections/{}", b)).await;
    TestApp::data(&response);
    assert_eq!(section_ids(&app, list).await, vec![a, c]);

    let response = app.server.get(&format!("/api/components/{}", component)).await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}
