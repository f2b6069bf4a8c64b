//! TikTok token endpoint client.
//!
//! Two grants go to the same endpoint, both form-encoded:
//!
//! - `authorization_code`: normalized into a [`TokenGrant`]. Any provider
//!   rejection becomes [`OAuthError::ExchangeFailed`] carrying the provider's
//!   own description.
//! - `refresh_token`: the decoded provider body is handed back untouched,
//!   error objects included. Callers of `/refresh` speak the provider's wire
//!   format, so nothing is reshaped here.

use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

use super::constants::ProviderEndpoints;
use super::token::TokenGrant;
use super::{ClientCredentials, OAuthError};

/// Default bound on a single token endpoint call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const GENERIC_EXCHANGE_FAILURE: &str = "Token exchange failed";

/// Error fields TikTok may put in a token endpoint body.
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ProviderErrorBody {
    fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }

    fn into_message(self) -> String {
        self.error_description
            .filter(|s| !s.is_empty())
            .or(self.message.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| GENERIC_EXCHANGE_FAILURE.to_string())
    }
}

/// Client for the provider token endpoint.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    endpoints: ProviderEndpoints,
}

impl TokenClient {
    /// Create a client with an explicit request timeout.
    pub fn new(endpoints: ProviderEndpoints, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .user_agent(concat!("tokgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client with custom config; using defaults");
                reqwest::Client::default()
            });
        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        credentials: Option<&ClientCredentials>,
    ) -> Result<TokenGrant, OAuthError> {
        if code.is_empty() {
            return Err(OAuthError::Validation("authorization code required".to_string()));
        }
        let credentials = credentials.ok_or(OAuthError::MissingCredentials)?;

        debug!("Exchanging authorization code");

        let params = [
            ("client_key", credentials.client_key.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.endpoints.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(&self.endpoints.token_url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .form(&params)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;

        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Token endpoint returned non-JSON body");
                return Err(OAuthError::ExchangeFailed(GENERIC_EXCHANGE_FAILURE.to_string()));
            }
        };

        let error_body: ProviderErrorBody =
            serde_json::from_value(value.clone()).unwrap_or_default();

        if !status.is_success() || error_body.has_error() {
            warn!(
                status = status.as_u16(),
                error = ?error_body.error,
                "Token exchange rejected by provider"
            );
            return Err(OAuthError::ExchangeFailed(error_body.into_message()));
        }

        let grant: TokenGrant = serde_json::from_value(value).map_err(|e| {
            OAuthError::InvalidResponse(format!("Failed to parse token response: {e}"))
        })?;
        if let Err(e) = grant.expiry_from(Utc::now()) {
            warn!(expires_in = grant.expires_in, "Token endpoint returned an unusable lifetime");
            return Err(e);
        }

        debug!(open_id = %grant.open_id, expires_in = grant.expires_in, "Token exchange successful");
        Ok(grant)
    }

    /// Refresh an access token, returning the provider body as-is.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        credentials: Option<&ClientCredentials>,
    ) -> Result<serde_json::Value, OAuthError> {
        if refresh_token.is_empty() {
            return Err(OAuthError::Validation("refresh_token required".to_string()));
        }
        let credentials = credentials.ok_or(OAuthError::MissingCredentials)?;

        debug!("Refreshing access token");

        let params = [
            ("client_key", credentials.client_key.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .http
            .post(&self.endpoints.token_url)
            .form(&params)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Refresh grant returned non-success status");
        }

        serde_json::from_str(&body).map_err(|e| {
            OAuthError::InvalidResponse(format!("Failed to parse refresh response: {e}"))
        })
    }
}

fn classify_transport(err: reqwest::Error) -> OAuthError {
    if err.is_timeout() {
        warn!("Token endpoint request timed out");
        OAuthError::Timeout
    } else {
        warn!(error = %err, "Token endpoint request failed");
        OAuthError::Transport(err.to_string())
    }
}
