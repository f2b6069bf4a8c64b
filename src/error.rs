use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::oauth::OAuthError;
use crate::store::StoreError;

/// Unified application error type for the JSON endpoints.
///
/// HTML pages (`/`, `/callback`) render their own error pages and only use
/// this type to classify the failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client key or secret missing.
    #[error("{0}")]
    Config(String),

    /// The provider rejected the request.
    #[error("{0}")]
    Provider(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    NotImplemented(String),

    /// The provider could not be reached or answered garbage.
    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),
}

/// `{"error": "..."}` body used by every JSON failure except [`AppError::Internal`].
#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

/// Generic 500 body.
#[derive(Debug, Serialize)]
pub struct InternalErrorResponse<'a> {
    pub error: &'static str,
    pub message: &'a str,
}

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Provider(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_type(&self) -> &str {
        match self {
            Self::Config(_) => "config_error",
            Self::Provider(_) => "provider_error",
            Self::BadRequest(_) => "invalid_request_error",
            Self::NotFound(_) => "not_found_error",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::NotImplemented(_) => "not_implemented",
            Self::BadGateway(_) => "upstream_error",
            Self::Internal(_) => "server_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(status = status.as_u16(), kind = self.error_type(), "Request failed");

        match &self {
            // Plain text, matching what browsers hitting the endpoint expect.
            Self::MethodNotAllowed => (status, self.to_string()).into_response(),
            Self::Internal(message) => (
                status,
                axum::Json(InternalErrorResponse {
                    error: INTERNAL_SERVER_ERROR,
                    message,
                }),
            )
                .into_response(),
            _ => {
                let message = self.to_string();
                (status, axum::Json(ErrorResponse { error: &message })).into_response()
            }
        }
    }
}

impl From<OAuthError> for AppError {
    fn from(err: OAuthError) -> Self {
        match &err {
            OAuthError::Validation(_) => Self::BadRequest(err.to_string()),
            OAuthError::MissingCredentials => Self::Config(err.to_string()),
            OAuthError::ExchangeFailed(_) => Self::Provider(err.to_string()),
            OAuthError::Timeout | OAuthError::Transport(_) | OAuthError::InvalidResponse(_) => {
                tracing::error!(error = %err, "Token endpoint call failed");
                Self::BadGateway(err.to_string())
            }
            OAuthError::Entropy(_) => {
                tracing::error!(error = %err, "Entropy source failure");
                Self::Internal(err.to_string())
            }
        }
    }
}

/// Client-facing text for store failures. Backend detail stays in the log.
pub const STORE_FAILURE_MESSAGE: &str = "Token store unavailable";

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Token store error");
        Self::Internal(STORE_FAILURE_MESSAGE.to_string())
    }
}
