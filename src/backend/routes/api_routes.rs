/**
 * Account Routes
 *
 * This module defines routes for accounts and the assets they own:
 * - Authentication endpoints (register, login, profile, logout)
 * - User lookup and update
 * - Image records
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `GET /api/auth/profile` - Current user (bearer token required)
 * - `POST /api/auth/logout` - Acknowledge logout
 *
 * ## Users
 * - `GET /api/users/{user_id}` - User by id
 * - `PUT /api/users/{user_id}` - Update a user
 * - `GET /api/users/email/{email}` - User by email
 *
 * ## Images
 * - `/api/images...` - See `backend::images::handlers`
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{login, logout, profile, register};
use crate::backend::images::handlers::{
    create_image, delete_image, delete_many_images, get_image, get_image_stats, get_images,
    get_images_by_mime_type, get_user_images, search_images, update_image,
};
use crate::backend::middleware::require_auth;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers::{get_user, get_user_by_email_address, update_user_profile};

/// Configure authentication routes
///
/// `/api/auth/profile` runs behind [`require_auth`]; the other auth routes
/// are public.
pub fn configure_auth_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route(
            "/api/auth/profile",
            get(profile).route_layer(middleware::from_fn_with_state(app_state.clone(), require_auth)),
        )
}

/// Configure user routes
pub fn configure_user_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/users/{user_id}", get(get_user).put(update_user_profile))
        .route("/api/users/email/{email}", get(get_user_by_email_address))
}

/// Configure image routes
pub fn configure_image_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/images", get(get_images).post(create_image))
        .route("/api/images/delete-many", post(delete_many_images))
        .route(
            "/api/images/{id}",
            get(get_image).put(update_image).delete(delete_image),
        )
        .route("/api/images/user/{user_id}", get(get_user_images))
        .route("/api/images/user/{user_id}/search", get(search_images))
        .route("/api/images/user/{user_id}/mime", get(get_images_by_mime_type))
        .route("/api/images/user/{user_id}/stats", get(get_image_stats))
}
