//! Template API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{id_of, TestApp};

async fn create(app: &TestApp, body: Value) -> Value {
    let response = app.server.post("/api/templates").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    TestApp::data(&response)
}

fn ids(data: Value) -> Vec<Uuid> {
    data.as_array().expect("template list").iter().map(id_of).collect()
}

#[tokio::test]
async fn test_create_and_filter_templates() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("designer@example.com").await;

    let public = create(&app, json!({ "name": "Event", "type": "event", "isPublic": true })).await;
    let private = create(&app, json!({ "name": "Shop", "type": "shop", "userId": user_id })).await;
    let predefined =
        create(&app, json!({ "name": "Blank", "type": "event", "isPublic": true, "isPredefined": true })).await;

    assert_eq!(private["isPublic"], false);
    assert_eq!(private["isPredefined"], false);
    assert_eq!(private["type"], "shop");

    let response = app.server.get("/api/templates/public/all").await;
    let found = ids(TestApp::data(&response));
    assert_eq!(found.len(), 2);
    assert!(found.contains(&id_of(&public)));
    assert!(found.contains(&id_of(&predefined)));

    let response = app.server.get("/api/templates/type/event").await;
    assert_eq!(ids(TestApp::data(&response)).len(), 2);

    let response = app.server.get("/api/templates?isPredefined=true").await;
    assert_eq!(ids(TestApp::data(&response)), vec![id_of(&predefined)]);

    let response = app.server.get("/api/templates?isPublic=false&type=shop").await;
    assert_eq!(ids(TestApp::data(&response)), vec![id_of(&private)]);

    let response = app.server.get(&format!("/api/users/{}/templates", user_id)).await;
    assert_eq!(ids(TestApp::data(&response)), vec![id_of(&private)]);
}

#[tokio::test]
async fn test_template_validation_and_missing() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/templates").json(&json!({ "name": "No type", "type": "" })).await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/templates")
        .json(&json!({ "name": "Orphan", "type": "event", "userId": Uuid::new_v4() }))
        .await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);

    let response = app.server.get(&format!("/api/templates/{}", Uuid::new_v4())).await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete_template() {
    let app = TestApp::new().await;
    let template = create(&app, json!({ "name": "Event", "type": "event" })).await;
    let template_id = id_of(&template);

    let response = app
        .server
        .put(&format!("/api/templates/{}", template_id))
        .json(&json!({ "isPublic": true, "thumbnail": "https://cdn.example.com/t.png" }))
        .await;
    let updated = TestApp::data(&response);
    assert_eq!(updated["isPublic"], true);
    assert_eq!(updated["name"], "Event");

    let response = app
        .server
        .post("/api/sections")
        .json(&json!({ "name": "Banner", "templateId": template_id }))
        .await;
    let section_id = id_of(&TestApp::data(&response));

    let response = app.server.delete(&format!("/api/templates/{}", template_id)).await;
    let body: Value = response.json();
    assert_eq!(body["message"], "Template deleted");

    let response = app.server.get(&format!("/api/sections/{}", section_id)).await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}
