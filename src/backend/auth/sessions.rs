/**
 * Session Tokens
 *
 * This module issues and verifies the HS256 JWTs handed out by register and
 * login. Tokens are stateless: logging out does not revoke them, they simply
 * expire.
 */

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::models::user::User;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Sign-in method
    pub provider: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

impl Claims {
    /// The user ID carried in `sub`
    pub fn user_id(&self) -> Result<Uuid, BackendError> {
        Uuid::parse_str(&self.sub).map_err(|_| BackendError::unauthorized("Invalid token subject"))
    }
}

/// Signs and verifies session tokens with one shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// # Arguments
    /// * `secret` - HMAC secret
    /// * `ttl` - Lifetime of issued tokens
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a token for `user`
    pub fn issue(&self, user: &User) -> Result<String, BackendError> {
        let now = Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            provider: user.provider.clone(),
            iat: now,
            exp: now + self.ttl.as_secs(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify signature and expiry, returning the claims
    ///
    /// # Errors
    /// `Token` (401) for a malformed, forged or expired token
    pub fn verify(&self, token: &str) -> Result<Claims, BackendError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}
