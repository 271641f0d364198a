//! Property-based tests for sibling ordering
//!
//! Random sequences of insert, reorder, delete, duplicate and move are
//! applied to two sections and to a plain `Vec` model. Inserts go through
//! `POST /api/components`; the other operations through `SiblingStore`.
//! After every step each section must read back as exactly the model, with
//! orders `0..N`.

use assert_matches::assert_matches;
use proptest::prelude::*;
use serde_json::json;
use uuid::Uuid;

use sitebuilder::backend::components::{ComponentKind, ComponentScope};
use sitebuilder::backend::error::BackendError;
use sitebuilder::backend::ordering::SiblingStore;

use crate::common::{id_of, TestApp};

#[derive(Debug, Clone)]
enum Op {
    Insert { to: Option<i64> },
    /// Act on the sibling at `pick % len`
    Existing { pick: usize, action: Action },
}

#[derive(Debug, Clone)]
enum Action {
    Reorder { to: i64 },
    Delete,
    Duplicate,
    Move { to: Option<i64> },
}

fn op() -> impl Strategy<Value = Op> {
    let action = prop_oneof![
        (0..8i64).prop_map(|to| Action::Reorder { to }),
        Just(Action::Delete),
        Just(Action::Duplicate),
        proptest::option::of(0..8i64).prop_map(|to| Action::Move { to }),
    ];
    prop_oneof![
        1 => proptest::option::of(0..8i64).prop_map(|to| Op::Insert { to }),
        4 => (any::<usize>(), action).prop_map(|(pick, action)| Op::Existing { pick, action }),
    ]
}

fn clamp(position: i64, max: usize) -> usize {
    (position.max(0) as usize).min(max)
}

async fn assert_matches_model(store: &SiblingStore<ComponentKind>, scope: Uuid, model: &[Uuid]) {
    let siblings = store.siblings(ComponentScope(scope)).await.unwrap();
    let ids: Vec<Uuid> = siblings.iter().map(|(id, _)| *id).collect();
    let orders: Vec<i64> = siblings.iter().map(|(_, order)| *order).collect();

    assert_eq!(ids, model);
    assert_eq!(orders, (0..model.len() as i64).collect::<Vec<_>>());
}

async fn run(ops: Vec<Op>) {
    let app = TestApp::new().await;
    let (first, first_ids) = app.section_with(&["a", "b", "c", "d"]).await;
    let (second, second_ids) = app.section_with(&["x"]).await;

    let store: SiblingStore<ComponentKind> = SiblingStore::new(app.database.clone());
    let mut models = [(first, first_ids), (second, second_ids)];

    for (step, op) in ops.into_iter().enumerate() {
        // Alternate the section each step works on
        let (src, dst) = if step % 2 == 0 { (0, 1) } else { (1, 0) };

        let (pick, action) = match op {
            Op::Insert { to } => {
                let (scope, model) = &mut models[src];
                let mut body = json!({
                    "type": "TEXT",
                    "content": { "text": format!("step-{}", step) },
                    "sectionId": *scope,
                });
                if let Some(to) = to {
                    body["order"] = json!(to);
                }
                let response = app.server.post("/api/components").json(&body).await;
                let created = TestApp::data(&response);

                let at = to.map_or(model.len(), |to| clamp(to, model.len()));
                assert_eq!(created["order"], at as i64);
                model.insert(at, id_of(&created));

                for (scope, model) in &models {
                    assert_matches_model(&store, *scope, model).await;
                }
                continue;
            }
            Op::Existing { pick, action } => (pick, action),
        };

        if models[src].1.is_empty() {
            continue;
        }
        let index = pick % models[src].1.len();
        let id = models[src].1[index];

        match action {
            Action::Reorder { to } => {
                let placed = store.reorder(id, to).await.unwrap();
                let model = &mut models[src].1;
                model.remove(index);
                let at = clamp(to, model.len());
                model.insert(at, id);
                assert_eq!(placed.order, at as i64);
            }
            Action::Delete => {
                store.delete(id).await.unwrap();
                models[src].1.remove(index);
            }
            Action::Duplicate => {
                let copy = store.duplicate(id).await.unwrap();
                assert_eq!(copy.order, index as i64 + 1);
                models[src].1.insert(index + 1, copy.id);
            }
            Action::Move { to } => {
                let target = models[dst].0;
                let placed = store.move_to_scope(id, ComponentScope(target), to).await.unwrap();
                models[src].1.remove(index);
                let model = &mut models[dst].1;
                let at = to.map_or(model.len(), |to| clamp(to, model.len()));
                model.insert(at, id);
                assert_eq!(placed.order, at as i64);
            }
        }

        for (scope, model) in &models {
            assert_matches_model(&store, *scope, model).await;
        }
    }

    // Payloads travel with their ids
    for (_, model) in &models {
        for id in model {
            let response = app.server.get(&format!("/api/components/{}", id)).await;
            assert_eq!(id_of(&TestApp::data(&response)), *id);
        }
    }
}

/// Reorder there and back again restores every position
async fn round_trip(len: usize, pick: usize, to: i64) {
    let app = TestApp::new().await;
    let texts: Vec<String> = (0..len).map(|n| n.to_string()).collect();
    let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
    let (section, ids) = app.section_with(&texts).await;
    let store: SiblingStore<ComponentKind> = SiblingStore::new(app.database.clone());

    let id = ids[pick % len];
    let original = (pick % len) as i64;

    store.reorder(id, to).await.unwrap();
    let back = store.reorder(id, original).await.unwrap();
    assert_eq!(back.order, original);
    assert_matches_model(&store, section, &ids).await;

    // Reordering to the current position is a no-op
    let same = store.reorder(id, original).await.unwrap();
    assert_eq!(same.order, original);
    assert_matches_model(&store, section, &ids).await;

    assert_matches!(store.reorder(Uuid::new_v4(), 0).await, Err(BackendError::NotFound { .. }));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_reorder_round_trip_restores_positions(len in 1..7usize, pick in any::<usize>(), to in 0..10i64) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        runtime.block_on(round_trip(len, pick, to));
    }

    #[test]
    fn test_orders_stay_dense_under_random_operations(ops in prop::collection::vec(op(), 1..16)) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        runtime.block_on(run(ops));
    }
}
