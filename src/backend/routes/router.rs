/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Groups
 *
 * 1. Account routes (auth, users, images)
 * 2. Content routes (websites, pages, sections, components, templates)
 * 3. Fallback handler (JSON 404)
 *
 * Every request is traced through `tower_http::trace::TraceLayer`.
 */

use axum::{http::Uri, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::{configure_auth_routes, configure_image_routes, configure_user_routes};
use crate::backend::routes::content_routes::{
    configure_component_routes, configure_page_routes, configure_section_routes, configure_template_routes,
    configure_website_routes,
};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Database handle, token issuer and password hasher
///
/// # Returns
///
/// Router with its state applied, ready to serve
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_auth_routes(router, &app_state);
    let router = configure_user_routes(router);
    let router = configure_image_routes(router);

    let router = configure_website_routes(router);
    let router = configure_page_routes(router);
    let router = configure_section_routes(router);
    let router = configure_component_routes(router);
    let router = configure_template_routes(router);

    router
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn route_not_found(uri: Uri) -> BackendError {
    BackendError::not_found("Route", uri.path())
}
