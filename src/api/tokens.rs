//! `/tokens` and `/refresh`.
//!
//! Neither endpoint authenticates its caller. Deployments that enable a
//! token store should keep the service off the public internet.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::AppState;
use crate::error::AppError;
use crate::store::TokenLookup;

/// GET /tokens
///
/// The latest stored token record, pretty-printed.
#[instrument(skip_all)]
pub async fn get_tokens(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.tokens.get().await? {
        TokenLookup::Found(record) => Ok(super::pretty_json(&record)),
        TokenLookup::NotFound => Err(AppError::NotFound("No tokens found".to_string())),
        TokenLookup::NotConfigured => Err(AppError::NotImplemented(
            "Token store not configured".to_string(),
        )),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// POST /refresh
///
/// Body: `{"refresh_token": "..."}`. Responds with the provider's JSON as-is,
/// whatever its status.
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let request: RefreshRequest = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("Invalid JSON body".to_string()))?;

    let Some(refresh_token) = request.refresh_token.filter(|t| !t.is_empty()) else {
        return Err(AppError::BadRequest("refresh_token required".to_string()));
    };

    let body = state.oauth.refresh(&refresh_token, state.credentials()).await?;
    debug!("Refresh response relayed");
    Ok(Json(body))
}

/// Any method other than POST on `/refresh`.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
