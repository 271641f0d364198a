/**
 * Error Conversion
 *
 * Converts backend errors into HTTP responses.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "error": "Page not found: 6f1c..."
 * }
 * ```
 *
 * Server-side failures are logged here with their full detail, so handlers
 * only need `?`.
 */

use axum::response::{IntoResponse, Json, Response};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = serde_json::json!({
            "success": false,
            "error": self.message(),
        });

        (status, Json(body)).into_response()
    }
}
