//! Test application
//!
//! Every `TestApp` owns a private SQLite database (in memory, or a file in a
//! test-owned temp directory), so tests never share state and can run in
//! parallel.

use std::path::Path;
use std::time::Duration;

use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};
use uuid::Uuid;

use sitebuilder::backend::auth::{PasswordHasher, TokenIssuer};
use sitebuilder::backend::db::{Database, RetryPolicy};
use sitebuilder::backend::routes::create_router;
use sitebuilder::backend::server::AppState;

pub const TEST_PASSWORD: &str = "Password123";

/// Running app plus direct handles on its state
pub struct TestApp {
    pub server: TestServer,
    pub database: Database,
    pub tokens: TokenIssuer,
}

impl TestApp {
    pub async fn new() -> Self {
        let database = Database::in_memory().await.expect("in-memory database");
        Self::with_database(database)
    }

    /// App backed by a database file in `dir`, with a pool of several connections
    ///
    /// Use this when a test needs real concurrent writers; the in-memory
    /// database has a single connection.
    pub async fn on_disk(dir: &Path) -> Self {
        let url = format!("sqlite://{}?mode=rwc", dir.join("sitebuilder.db").display());
        let retry = RetryPolicy::new(8, Duration::from_millis(5));
        let database = Database::connect(&url, 5, retry).await.expect("file database");
        database.migrate().await.expect("migrations");
        Self::with_database(database)
    }

    fn with_database(database: Database) -> Self {
        let tokens = TokenIssuer::new("test-secret", Duration::from_secs(3600));
        let state = AppState::new(database.clone(), tokens.clone(), PasswordHasher::new(4 /* bcrypt minimum cost */));

        let server = TestServer::new(create_router(state)).expect("test server");
        Self {
            server,
            database,
            tokens,
        }
    }

    /// `data` of a successful response
    pub fn data(response: &TestResponse) -> Value {
        assert!(
            response.status_code().is_success(),
            "expected success, got {}: {}",
            response.status_code(),
            response.text()
        );
        let body: Value = response.json();
        assert_eq!(body["success"], true, "body: {}", body);
        body["data"].clone()
    }

    /// Register a user; returns `(user_id, token)`
    pub async fn register(&self, email: &str) -> (Uuid, String) {
        let response = self
            .server
            .post("/api/auth/register")
            .json(&json!({ "email": email, "password": TEST_PASSWORD, "name": "Test User" }))
            .await;
        let data = Self::data(&response);
        (id_of(&data["user"]), data["token"].as_str().expect("token").to_string())
    }

    pub async fn create_website(&self, user_id: Uuid) -> Uuid {
        let response = self
            .server
            .post("/api/websites")
            .json(&json!({ "name": "My site", "userId": user_id }))
            .await;
        id_of(&Self::data(&response))
    }

    pub async fn create_page(&self, website_id: Uuid, slug: &str) -> Value {
        let response = self
            .server
            .post("/api/pages")
            .json(&json!({ "name": slug, "slug": slug, "websiteId": website_id }))
            .await;
        Self::data(&response)
    }

    pub async fn create_section(&self, page_id: Uuid, name: &str) -> Value {
        let response = self
            .server
            .post("/api/sections")
            .json(&json!({ "name": name, "pageId": page_id }))
            .await;
        Self::data(&response)
    }

    pub async fn create_component(&self, section_id: Uuid, text: &str) -> Value {
        let response = self
            .server
            .post("/api/components")
            .json(&json!({ "type": "TEXT", "content": { "text": text }, "sectionId": section_id }))
            .await;
        Self::data(&response)
    }

    /// A user with one website; returns `(user_id, website_id)`
    pub async fn website(&self) -> (Uuid, Uuid) {
        let (user_id, _) = self.register(&format!("{}@example.com", Uuid::new_v4().simple())).await;
        let website_id = self.create_website(user_id).await;
        (user_id, website_id)
    }

    /// A section holding components with the given texts; returns the section id and component ids
    pub async fn section_with(&self, texts: &[&str]) -> (Uuid, Vec<Uuid>) {
        let (_, website_id) = self.website().await;
        let page_id = id_of(&self.create_page(website_id, "home").await);
        let section_id = id_of(&self.create_section(page_id, "Hero").await);

        let mut ids = Vec::new();
        for text in texts {
            ids.push(id_of(&self.create_component(section_id, text).await));
        }
        (section_id, ids)
    }

    /// Component ids of a section, in order
    pub async fn component_ids(&self, section_id: Uuid) -> Vec<Uuid> {
        let response = self.server.get(&format!("/api/components/section/{}", section_id)).await;
        let components = Self::data(&response);
        let components = components.as_array().expect("component list");

        for (index, component) in components.iter().enumerate() {
            assert_eq!(component["order"], index as i64, "orders must be 0..N: {:?}", components);
        }
        components.iter().map(id_of).collect()
    }
}

/// `id` field of a JSON object
pub fn id_of(value: &Value) -> Uuid {
    value["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(|| panic!("no id in {}", value))
}
