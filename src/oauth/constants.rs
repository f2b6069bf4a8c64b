//! Compiled-in TikTok OAuth endpoints.
//!
//! These are not runtime settings. [`ProviderEndpoints::default`] carries
//! them into the token client; tests build their own value pointing at a mock
//! token endpoint.

/// Authorization (consent) page.
pub const AUTH_URL: &str = "https://www.tiktok.com/v2/auth/authorize/";

/// Token endpoint, shared by the code exchange and the refresh grant.
pub const TOKEN_URL: &str = "https://open.tiktokapis.com/v2/oauth/token/";

/// Redirect URI registered with the provider.
pub const REDIRECT_URI: &str = "https://bot.boringrats.dev/callback";

/// Requested scopes, comma-delimited as TikTok expects.
pub const SCOPES: &str = "video.upload,user.info.basic";

/// Provider endpoints used by the token client and the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scopes: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            redirect_uri: REDIRECT_URI.to_string(),
            scopes: SCOPES.to_string(),
        }
    }
}

impl ProviderEndpoints {
    /// Same endpoints with the token URL replaced (used against mock servers).
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }
}
