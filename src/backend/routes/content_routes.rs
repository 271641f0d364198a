/**
 * Content Routes
 *
 * This module defines routes for the site tree and templates:
 * websites, pages, sections, components and templates.
 *
 * Sibling operations (reorder, move, duplicate) take their target in the
 * JSON body, so they live on fixed paths next to the `{id}` routes.
 */

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::backend::components::handlers::{
    create_component, delete_component, duplicate_component, get_component, get_section_components,
    move_component, reorder_component, update_component,
};
use crate::backend::pages::handlers::{
    create_page, delete_page, get_home_page, get_page, get_page_by_slug, get_website_pages, reorder_page,
    update_page,
};
use crate::backend::sections::handlers::{
    create_section, delete_section, get_page_sections, get_section, get_template_sections, move_section,
    reorder_section, update_section,
};
use crate::backend::server::state::AppState;
use crate::backend::templates::handlers::{
    create_template, delete_template, get_public_templates, get_template, get_templates, get_templates_by_type,
    get_user_templates, update_template,
};
use crate::backend::websites::handlers::{
    create_website, delete_website, get_user_websites, get_website, get_websites, update_website,
};

/// Configure website routes
///
/// - `POST /api/websites`, `GET /api/websites`
/// - `GET|PUT|DELETE /api/websites/{id}`
/// - `GET /api/users/{user_id}/websites`
pub fn configure_website_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/websites", get(get_websites).post(create_website))
        .route(
            "/api/websites/{id}",
            get(get_website).put(update_website).delete(delete_website),
        )
        .route("/api/users/{user_id}/websites", get(get_user_websites))
}

/// Configure page routes
pub fn configure_page_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/pages", post(create_page))
        .route("/api/pages/reorder", patch(reorder_page))
        .route("/api/pages/{id}", get(get_page).put(update_page).delete(delete_page))
        .route("/api/pages/website/{website_id}", get(get_website_pages))
        .route("/api/pages/website/{website_id}/home", get(get_home_page))
        .route("/api/pages/website/{website_id}/slug/{slug}", get(get_page_by_slug))
}

/// Configure section routes
pub fn configure_section_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/sections", post(create_section))
        .route("/api/sections/reorder", patch(reorder_section))
        .route("/api/sections/move", patch(move_section))
        .route(
            "/api/sections/{id}",
            get(get_section).put(update_section).delete(delete_section),
        )
        .route("/api/sections/page/{page_id}", get(get_page_sections))
        .route("/api/sections/template/{template_id}", get(get_template_sections))
}

/// Configure component routes
pub fn configure_component_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/components", post(create_component))
        .route("/api/components/reorder", patch(reorder_component))
        .route("/api/components/move", patch(move_component))
        .route(
            "/api/components/{id}",
            get(get_component).put(update_component).delete(delete_component),
        )
        .route("/api/components/{id}/duplicate", post(duplicate_component))
        .route("/api/components/section/{section_id}", get(get_section_components))
}

/// Configure template routes
///
/// `/api/templates/public/all` and `/api/templates/type/{template_type}` are
/// static prefixes, so they never collide with `/api/templates/{id}`.
pub fn configure_template_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/templates", get(get_templates).post(create_template))
        .route("/api/templates/public/all", get(get_public_templates))
        .route("/api/templates/type/{template_type}", get(get_templates_by_type))
        .route(
            "/api/templates/{id}",
            get(get_template).put(update_template).delete(delete_template),
        )
        .route("/api/users/{user_id}/templates", get(get_user_templates))
}
