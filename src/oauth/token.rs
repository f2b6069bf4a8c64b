//! Token types.
//!
//! [`TokenGrant`] is the normalized success body of a code exchange.
//! [`TokenRecord`] is the persisted form: the grant plus the moment it was
//! obtained and the derived expiry.
//!
//! # Persisted shape
//!
//! ```text
//! {
//!   "access_token": "...",
//!   "refresh_token": "...",        // omitted when the provider sent none
//!   "open_id": "...",
//!   "expires_in": 86400,
//!   "scope": "user.info.basic,video.upload",
//!   "token_type": "Bearer",
//!   "created_at": "2026-01-01T00:00:00Z",
//!   "expires_at": "2026-01-02T00:00:00Z"
//! }
//! ```

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::OAuthError;

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Token fields returned by a successful authorization-code exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub open_id: String,
    /// Remaining lifetime in seconds at issuance.
    pub expires_in: i64,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Refresh token lifetime in seconds, when the provider reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<i64>,
}

/// The single persisted token record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenRecord {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub open_id: String,
    pub expires_in: i64,
    pub scope: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TokenGrant {
    /// Moment this grant stops being valid when obtained at `created_at`.
    ///
    /// Fails when `expires_in` does not fit the calendar, which only a
    /// malformed provider response can produce.
    pub fn expiry_from(&self, created_at: DateTime<Utc>) -> Result<DateTime<Utc>, OAuthError> {
        ChronoDuration::try_seconds(self.expires_in)
            .and_then(|lifetime| created_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                OAuthError::InvalidResponse(format!(
                    "Token lifetime out of range: expires_in={}",
                    self.expires_in
                ))
            })
    }
}

impl TokenRecord {
    /// Build a record from a grant obtained at `created_at`.
    ///
    /// `expires_at` is always `created_at + expires_in`.
    pub fn from_grant(grant: TokenGrant, created_at: DateTime<Utc>) -> Result<Self, OAuthError> {
        let expires_at = grant.expiry_from(created_at)?;
        Ok(Self {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            open_id: grant.open_id,
            expires_in: grant.expires_in,
            scope: grant.scope,
            token_type: grant.token_type,
            refresh_expires_in: grant.refresh_expires_in,
            created_at,
            expires_at,
        })
    }

    /// Build a record stamped with the current time.
    pub fn issued_now(grant: TokenGrant) -> Result<Self, OAuthError> {
        Self::from_grant(grant, Utc::now())
    }

    /// Lifetime to hand to the key-value store. Negative lifetimes clamp to zero.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.expires_in.max(0) as u64)
    }

    /// Whole hours of lifetime, as shown on the success page.
    pub fn expires_in_hours(&self) -> i64 {
        self.expires_in / 3600
    }
}
