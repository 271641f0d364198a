//! Component API integration tests
//!
//! Covers the sibling operations end to end: reorder, delete, duplicate and
//! move between sections, checking that every section stays `0..N`.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{id_of, TestApp};

#[tokio::test]
async fn test_create_appends_and_inserts() {
    let app = TestApp::new().await;
    let (section_id, ids) = app.section_with(&["a", "b"]).await;

    let response = app
        .server
        .post("/api/components")
        .json(&json!({ "type": "BUTTON", "content": { "label": "Go" }, "sectionId": section_id, "order": 0 }))
        .await;
    let inserted = TestApp::data(&response);
    assert_eq!(inserted["order"], 0);
    assert_eq!(inserted["type"], "BUTTON");

    assert_eq!(app.component_ids(section_id).await, vec![id_of(&inserted), ids[0], ids[1]]);
}

#[tokio::test]
async fn test_create_past_the_end_appends() {
    let app = TestApp::new().await;
    let (section_id, _) = app.section_with(&["a"]).await;

    let response = app
        .server
        .post("/api/components")
        .json(&json!({ "type": "TEXT", "sectionId": section_id, "order": 40 }))
        .await;
    assert_eq!(TestApp::data(&response)["order"], 1);
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
    let app = TestApp::new().await;
    let (section_id, _) = app.section_with(&[]).await;

    let response = app
        .server
        .post("/api/components")
        .json(&json!({ "type": "TEXT", "sectionId": section_id, "order": -1 }))
        .await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/components")
        .json(&json!({ "type": "TEXT", "sectionId": Uuid::new_v4() }))
        .await;
    let message = crate::assert_error_response!(response, StatusCode::NOT_FOUND);
    crate::assert_contains!(message, "Section");

    let response = app
        .server
        .post("/api/components")
        .json(&json!({ "type": "MARQUEE", "sectionId": section_id }))
        .await;
    assert!(response.status_code().is_client_error());

    assert!(app.component_ids(section_id).await.is_empty());
}

#[tokio::test]
async fn test_reorder_forward_and_back() {
    let app = TestApp::new().await;
    let (section_id, ids) = app.section_with(&["A", "B", "C", "D"]).await;
    let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

    let response = app
        .server
        .patch("/api/components/reorder")
        .json(&json!({ "id": d, "newOrder": 1 }))
        .await;
    assert_eq!(TestApp::data(&response)["order"], 1);
    assert_eq!(app.component_ids(section_id).await, vec![a, d, b, c]);

    let response = app
        .server
        .patch("/api/components/reorder")
        .json(&json!({ "id": a, "newOrder": 3 }))
        .await;
    assert_eq!(TestApp::data(&response)["order"], 3);
    assert_eq!(app.component_ids(section_id).await, vec![d, b, c, a]);
}

#[tokio::test]
async fn test_reorder_clamps_and_rejects_negative() {
    let app = TestApp::new().await;
    let (section_id, ids) = app.section_with(&["A", "B", "C"]).await;

    let response = app
        .server
        .patch("/api/components/reorder")
        .json(&json!({ "id": ids[0], "newOrder": 99 }))
        .await;
    assert_eq!(TestApp::data(&response)["order"], 2);

    let response = app
        .server
        .patch("/api/components/reorder")
        .json(&json!({ "id": ids[0], "newOrder": -1 }))
        .await;
    crate::assert_error_response!(response, StatusCode::BAD_REQUEST);

    assert_eq!(app.component_ids(section_id).await, vec![ids[1], ids[2], ids[0]]);
}

#[tokio::test]
async fn test_reorder_unknown_component() {
    let app = TestApp::new().await;
    let response = app
        .server
        .patch("/api/components/reorder")
        .json(&json!({ "id": Uuid::new_v4(), "newOrder": 0 }))
        .await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_closes_the_gap() {
    let app = TestApp::new().await;
    let (section_id, ids) = app.section_with(&["A", "B", "C"]).await;

    let response = app.server.delete(&format!("/api/components/{}", ids[1])).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Component deleted");
    assert_eq!(id_of(&body["data"]), ids[1]);

    assert_eq!(app.component_ids(section_id).await, vec![ids[0], ids[2]]);

    let response = app.server.get(&format!("/api/components/{}", ids[1])).await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);

    let response = app.server.delete(&format!("/api/components/{}", ids[1])).await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_lands_right_after_original() {
    let app = TestApp::new().await;
    let (section_id, ids) = app.section_with(&["A", "B"]).await;

    let response = app.server.post(&format!("/api/components/{}/duplicate", ids[0])).await;
    let copy = TestApp::data(&response);
    let copy_id = id_of(&copy);

    assert_ne!(copy_id, ids[0]);
    assert_eq!(copy["order"], 1);
    assert_eq!(copy["content"], json!({ "text": "A" }));
    assert_eq!(copy["type"], "TEXT");

    assert_eq!(app.component_ids(section_id).await, vec![ids[0], copy_id, ids[1]]);
}

#[tokio::test]
async fn test_move_to_another_section() {
    let app = TestApp::new().await;
    let (first, first_ids) = app.section_with(&["A", "B"]).await;
    let (second, second_ids) = app.section_with(&["C"]).await;

    let response = app
        .server
        .patch("/api/components/move")
        .json(&json!({ "id": first_ids[0], "targetSectionId": second }))
        .await;
    let moved = TestApp::data(&response);
    assert_eq!(moved["sectionId"], second.to_string());
    assert_eq!(moved["order"], 1);

    assert_eq!(app.component_ids(first).await, vec![first_ids[1]]);
    assert_eq!(app.component_ids(second).await, vec![second_ids[0], first_ids[0]]);
}

#[tokio::test]
async fn test_move_with_explicit_order_and_within_section() {
    let app = TestApp::new().await;
    let (first, first_ids) = app.section_with(&["A", "B", "C"]).await;
    let (second, second_ids) = app.section_with(&["X", "Y"]).await;

    let response = app
        .server
        .patch("/api/components/move")
        .json(&json!({ "id": first_ids[2], "targetSectionId": second, "newOrder": 0 }))
        .await;
    assert_eq!(TestApp::data(&response)["order"], 0);
    assert_eq!(app.component_ids(second).await, vec![first_ids[2], second_ids[0], second_ids[1]]);

    // Same section: behaves as a reorder, defaulting to the end
    let response = app
        .server
        .patch("/api/components/move")
        .json(&json!({ "id": first_ids[0], "targetSectionId": first }))
        .await;
    assert_eq!(TestApp::data(&response)["order"], 1);
    assert_eq!(app.component_ids(first).await, vec![first_ids[1], first_ids[0]]);

    let response = app
        .server
        .patch("/api/components/move")
        .json(&json!({ "id": first_ids[0], "targetSectionId": Uuid::new_v4() }))
        .await;
    crate::assert_error_response!(response, StatusCode::NOT_FOUND);
    assert_eq!(app.component_ids(first).await, vec![first_ids[1], first_ids[0]]);
}

#[tokio::test]
async fn test_update_content_and_order() {
    let app = TestApp::new().await;
    let (section_id, ids) = app.section_with(&["A", "B", "C"]).await;

    let response = app
        .server
        .put(&format!("/api/components/{}", ids[2]))
        .json(&json!({ "content": { "text": "C2" }, "order": 0 }))
        .await;
    let updated = TestApp::data(&response);
    assert_eq!(updated["content"], json!({ "text": "C2" }));
    assert_eq!(updated["order"], 0);
    assert_eq!(updated["type"], "TEXT");

    assert_eq!(app.component_ids(section_id).await, vec![ids[2], ids[0], ids[1]]);
}

#[tokio::test]
async fn test_update_null_clears_styles_and_absent_keeps_them() {
    let app = TestApp::new().await;
    let (_, ids) = app.section_with(&["A"]).await;
    let path = format!("/api/components/{}", ids[0]);

    let response = app.server.put(&path).json(&json!({ "styles": { "margin": "1rem" } })).await;
    assert_eq!(TestApp::data(&response)["styles"], json!({ "margin": "1rem" }));

    let response = app.server.put(&path).json(&json!({ "content": { "text": "A2" } })).await;
    assert_eq!(TestApp::data(&response)["styles"], json!({ "margin": "1rem" }));

    let response = app.server.put(&path).json(&json!({ "styles": null })).await;
    let cleared = TestApp::data(&response);
    assert_eq!(cleared["styles"], Value::Null);
    assert_eq!(cleared["content"], json!({ "text": "A2" }));
}
