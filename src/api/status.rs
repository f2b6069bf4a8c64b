use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::AppState;

/// Paths advertised by `/api/status`.
pub const ENDPOINTS: [&str; 5] = ["/", "/callback", "/tokens", "/refresh", "/api/status"];

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Client key and secret are both set.
    pub configured: bool,
    /// A token store backend is attached.
    pub kv_enabled: bool,
    pub endpoints: &'static [&'static str],
}

impl StatusResponse {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            status: "operational",
            version: env!("CARGO_PKG_VERSION"),
            configured: state.is_configured(),
            kv_enabled: state.tokens.is_enabled(),
            endpoints: &ENDPOINTS,
        }
    }
}

/// GET /api/status
///
/// Always 200. Pure read of startup state.
pub async fn api_status(State(state): State<AppState>) -> Response {
    super::pretty_json(&StatusResponse::from_state(&state))
}
