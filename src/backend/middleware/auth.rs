/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies the JWT from the
 * Authorization header and hands the user identity to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::error::BackendError;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT from the `Authorization: Bearer <token>` header
/// 2. Verifies signature and expiry
/// 3. Attaches `AuthenticatedUser` to the request extensions
///
/// Returns 401 if the header is missing or malformed or the token is invalid.
/// Whether the user still exists is left to the handler.
pub async fn require_auth(
    State(tokens): State<TokenIssuer>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Missing authorization token")
        })?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized("Invalid authorization header")
    })?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        e
    })?;

    let user = AuthenticatedUser {
        user_id: claims.user_id()?,
        email: claims.email,
    };
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Axum extractor for the user set by [`require_auth`]
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<AuthenticatedUser>().cloned().ok_or_else(|| {
            tracing::warn!("AuthenticatedUser not found in request extensions");
            BackendError::unauthorized("Authentication required")
        })?;

        Ok(AuthUser(user))
    }
}
