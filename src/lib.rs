pub mod api;
pub mod config;
pub mod error;
pub mod oauth;
pub mod server;
pub mod store;
pub mod web;

use crate::config::Config;
use crate::oauth::{ClientCredentials, ProviderEndpoints, TokenClient};
use crate::store::TokenStore;

use std::sync::Arc;

/// Shared application state accessible from all handlers.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: Option<Arc<ClientCredentials>>,
    pub oauth: Arc<TokenClient>,
    pub tokens: TokenStore,
}

impl AppState {
    pub fn new(
        config: Config,
        credentials: Option<ClientCredentials>,
        endpoints: ProviderEndpoints,
        tokens: TokenStore,
    ) -> Self {
        let oauth = TokenClient::new(endpoints, config.tiktok.request_timeout());
        Self {
            config: Arc::new(config),
            credentials: credentials.map(Arc::new),
            oauth: Arc::new(oauth),
            tokens,
        }
    }

    /// Validate credentials and attach the configured store backend.
    ///
    /// Fails only when `server.require_credentials` is set and credentials
    /// are missing.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let credentials = config.validated_credentials()?;
        let tokens = TokenStore::new(store::from_config(&config.store));
        Ok(Self::new(
            config,
            credentials,
            ProviderEndpoints::default(),
            tokens,
        ))
    }

    pub fn credentials(&self) -> Option<&ClientCredentials> {
        self.credentials.as_deref()
    }

    /// Client key and secret are both present.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }
}
