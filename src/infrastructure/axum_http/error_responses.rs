use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

/// Plain error payload for read endpoints; mutation endpoints return a
/// `FormState` with per-field errors instead.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    let body = Json(ErrorResponse {
        code: status.as_u16(),
        message: message.to_string(),
    });

    (status, body).into_response()
}
