/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The database handle (pool plus transaction retry policy)
 * - The token issuer used to sign and verify bearer tokens
 * - The password hasher
 *
 * Sibling stores for pages, sections and components are derived from the
 * database handle on extraction, so handlers can take
 * `State<SiblingStore<PageKind>>` directly.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use sitebuilder::backend::db::Database;
 *
 * async fn handler(State(database): State<Database>) {
 *     let pool = database.pool();
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;

use crate::backend::auth::{PasswordHasher, TokenIssuer};
use crate::backend::components::ComponentKind;
use crate::backend::db::Database;
use crate::backend::ordering::SiblingStore;
use crate::backend::pages::PageKind;
use crate::backend::sections::SectionKind;

/// Application state container
#[derive(Clone, Debug)]
pub struct AppState {
    pub database: Database,
    pub tokens: TokenIssuer,
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(database: Database, tokens: TokenIssuer, passwords: PasswordHasher) -> Self {
        Self {
            database,
            tokens,
            passwords,
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.database.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for PasswordHasher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.passwords.clone()
    }
}

impl FromRef<AppState> for SiblingStore<PageKind> {
    fn from_ref(app_state: &AppState) -> Self {
        SiblingStore::new(app_state.database.clone())
    }
}

impl FromRef<AppState> for SiblingStore<SectionKind> {
    fn from_ref(app_state: &AppState) -> Self {
        SiblingStore::new(app_state.database.clone())
    }
}

impl FromRef<AppState> for SiblingStore<ComponentKind> {
    fn from_ref(app_state: &AppState) -> Self {
        SiblingStore::new(app_state.database.clone())
    }
}
