//! JSON response envelope helpers.
//!
//! Every payload leaves as `{"status": <code>, "message": <data>}` so
//! clients can rely on one shape for success and failure alike.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

pub struct JsonResponse;

impl JsonResponse {
    /// Build an enveloped response with an arbitrary status.
    pub fn status(status: StatusCode, message: Value) -> Response {
        (
            status,
            Json(json!({
                "status": status.as_u16(),
                "message": message,
            })),
        )
            .into_response()
    }

    pub fn ok(message: Value) -> Response {
        Self::status(StatusCode::OK, message)
    }

    pub fn created(message: Value) -> Response {
        Self::status(StatusCode::CREATED, message)
    }

    pub fn bad_request(message: Value) -> Response {
        Self::status(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: Value) -> Response {
        Self::status(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: Value) -> Response {
        Self::status(StatusCode::NOT_FOUND, message)
    }

    pub fn server_error(message: Value) -> Response {
        Self::status(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}
