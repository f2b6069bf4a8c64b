pub mod status;
pub mod tokens;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Serialize;

use crate::AppState;
use crate::error::AppError;

/// Build the JSON API router.
///
/// Route layout:
/// ```text
/// /tokens        GET    latest stored token
/// /refresh       POST   refresh an access token (other methods: 405)
/// /api/status    GET    service status
/// ```
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/tokens", get(tokens::get_tokens))
        .route(
            "/refresh",
            post(tokens::refresh_token).fallback(tokens::method_not_allowed),
        )
        .route("/api/status", get(status::api_status))
}

/// Serialize `value` as indented JSON with a 200 status.
pub(crate) fn pretty_json<T: Serialize>(value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => AppError::Internal(e.to_string()).into_response(),
    }
}
