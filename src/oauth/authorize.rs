//! Authorization URL construction.

use super::constants::ProviderEndpoints;

/// Build the provider consent URL for `client_key` carrying `state`.
pub fn build_authorize_url(endpoints: &ProviderEndpoints, client_key: &str, state: &str) -> String {
    format!(
        "{}?client_key={}&scope={}&response_type=code&redirect_uri={}&state={}",
        endpoints.auth_url,
        urlencoding::encode(client_key),
        urlencoding::encode(&endpoints.scopes),
        urlencoding::encode(&endpoints.redirect_uri),
        urlencoding::encode(state),
    )
}
