//! OAuth 2.0 authorization-code flow against TikTok.
//!
//! - [`state`] - CSRF nonce generation
//! - [`authorize`] - consent URL construction
//! - [`client`] - token endpoint calls (code exchange, refresh)
//! - [`token`] - grant and persisted record types
//! - [`constants`] - compiled-in provider endpoints

pub mod authorize;
pub mod client;
pub mod constants;
pub mod state;
pub mod token;

pub use authorize::build_authorize_url;
pub use client::TokenClient;
pub use constants::ProviderEndpoints;
pub use state::generate_state;
pub use token::{TokenGrant, TokenRecord};

use std::fmt;

/// Errors raised by the OAuth layer.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// Required request input was missing; no network call was made.
    #[error("{0}")]
    Validation(String),

    /// Client key or secret is not configured.
    #[error("Missing TIKTOK_CLIENT_KEY or TIKTOK_CLIENT_SECRET environment variables")]
    MissingCredentials,

    /// The provider rejected the exchange. Carries the provider's message.
    #[error("{0}")]
    ExchangeFailed(String),

    /// The token endpoint did not answer within the configured timeout.
    #[error("Token endpoint request timed out")]
    Timeout,

    /// Connection-level failure talking to the token endpoint.
    #[error("Token endpoint unreachable: {0}")]
    Transport(String),

    /// The provider answered but the body could not be decoded.
    #[error("{0}")]
    InvalidResponse(String),

    /// The OS random source failed.
    #[error("Random source unavailable: {0}")]
    Entropy(String),
}

/// Client key and secret, validated once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_key: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_key: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_key: client_key.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Both values present and non-empty, or nothing.
    pub fn from_parts(client_key: Option<&str>, client_secret: Option<&str>) -> Option<Self> {
        match (client_key, client_secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Some(Self::new(key, secret))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_key", &self.client_key)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
