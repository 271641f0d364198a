//! Response Envelope
//!
//! Every API response is wrapped in the same JSON envelope:
//!
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": true, "message": "Page deleted", "data": { "id": "...", "deleted": true } }
//! { "success": false, "error": "Page not found: ..." }
//! ```
//!
//! The error form is produced by `BackendError`'s `IntoResponse` impl.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Successful response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for this type
    pub success: bool,
    /// Optional human-readable note (used by deletes and logout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Wrap a payload with a message
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Payload returned by single-item deletes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: Uuid,
    pub deleted: bool,
}

impl Deleted {
    pub fn new(id: Uuid) -> Self {
        Self { id, deleted: true }
    }
}
