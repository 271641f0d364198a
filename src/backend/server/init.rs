/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database connection, migrations, state creation and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Connect to SQLite (creating the file if needed)
 * 2. Apply the embedded migrations
 * 3. Build the token issuer and password hasher from configuration
 * 4. Create the router
 *
 * Any failure aborts startup; the server never runs without its schema.
 */

use axum::Router;
use thiserror::Error;

use crate::backend::auth::{PasswordHasher, TokenIssuer};
use crate::backend::db::Database;
use crate::backend::routes::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Startup failure
#[derive(Debug, Error)]
pub enum InitError {
    #[error("database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migrate(#[source] sqlx::Error),
}

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Loaded server configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing sitebuilder backend server");

    // Step 1: Connect
    let database = Database::connect(&config.database_url, config.max_connections, config.retry)
        .await
        .map_err(InitError::Connect)?;
    tracing::info!("Connected to {}", config.database_url);

    // Step 2: Schema
    database.migrate().await.map_err(InitError::Migrate)?;
    tracing::info!("Database migrations applied");

    // Step 3: State
    let app_state = AppState::new(
        database,
        TokenIssuer::new(&config.jwt_secret, config.jwt_ttl),
        PasswordHasher::new(config.bcrypt_cost),
    );

    // Step 4: Router
    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
