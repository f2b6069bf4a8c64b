use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::oauth::ClientCredentials;

// ---------------------------------------------------------------------------
// Main configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tiktok: TikTokConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Refuse to start without a client key and secret.
    #[serde(default)]
    pub require_credentials: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            require_credentials: false,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct TikTokConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// Bound on each token endpoint call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Bind the authorization `state` to a cookie and check it on callback.
    #[serde(default)]
    pub verify_state: bool,
}

impl Default for TikTokConfig {
    fn default() -> Self {
        Self {
            client_key: None,
            client_secret: None,
            request_timeout_secs: default_request_timeout_secs(),
            verify_state: false,
        }
    }
}

impl std::fmt::Debug for TikTokConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TikTokConfig")
            .field("client_key", &self.client_key)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("verify_state", &self.verify_state)
            .finish()
    }
}

impl TikTokConfig {
    /// Client key and secret when both are set and non-empty.
    pub fn credentials(&self) -> Option<ClientCredentials> {
        ClientCredentials::from_parts(self.client_key.as_deref(), self.client_secret.as_deref())
    }

    /// The client key alone, which is all the landing page needs.
    pub fn client_key(&self) -> Option<&str> {
        self.client_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Token storage backend type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// No persistence; `/tokens` answers 501.
    #[default]
    None,
    Memory,
    File,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Directory for the file backend.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::None,
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_port() -> u16 {
    8787
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
const fn default_request_timeout_secs() -> u64 {
    10
}
fn default_store_path() -> PathBuf {
    PathBuf::from("tokgate-store")
}
fn default_log_level() -> String {
    "info".to_string()
}

// ---------------------------------------------------------------------------
// Config loading and env overrides
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a TOML file, then apply environment variable
    /// overrides. A missing file yields defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            config
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Resolve credentials once. Fails only when `require_credentials` is set.
    pub fn validated_credentials(&self) -> anyhow::Result<Option<ClientCredentials>> {
        match self.tiktok.credentials() {
            Some(creds) => Ok(Some(creds)),
            None if self.server.require_credentials => Err(anyhow::anyhow!(
                "TIKTOK_CLIENT_KEY and TIKTOK_CLIENT_SECRET must both be set"
            )),
            None => Ok(None),
        }
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Client credentials use the provider-facing names `TIKTOK_CLIENT_KEY`
    /// and `TIKTOK_CLIENT_SECRET`; everything else is `TOKGATE_*`.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        macro_rules! env_str {
            ($env:expr, $field:expr) => {
                if let Some(val) = lookup($env) {
                    $field = val;
                }
            };
        }
        macro_rules! env_bool {
            ($env:expr, $field:expr) => {
                if let Some(val) = lookup($env) {
                    $field = matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
                }
            };
        }
        macro_rules! env_parse {
            ($env:expr, $field:expr) => {
                if let Some(val) = lookup($env) {
                    match val.parse() {
                        Ok(parsed) => $field = parsed,
                        Err(_) => tracing::warn!(var = $env, value = %val, "Ignoring unparsable env override"),
                    }
                }
            };
        }
        macro_rules! env_opt_str {
            ($env:expr, $field:expr) => {
                if let Some(val) = lookup($env) {
                    $field = if val.is_empty() { None } else { Some(val) };
                }
            };
        }

        // -- Server --
        env_str!("TOKGATE_SERVER_HOST", self.server.host);
        env_parse!("TOKGATE_SERVER_PORT", self.server.port);
        env_bool!("TOKGATE_REQUIRE_CREDENTIALS", self.server.require_credentials);

        // -- Provider --
        env_opt_str!("TIKTOK_CLIENT_KEY", self.tiktok.client_key);
        env_opt_str!("TIKTOK_CLIENT_SECRET", self.tiktok.client_secret);
        env_parse!("TOKGATE_REQUEST_TIMEOUT_SECS", self.tiktok.request_timeout_secs);
        env_bool!("TOKGATE_VERIFY_STATE", self.tiktok.verify_state);

        // -- Store --
        env_parse!("TOKGATE_STORE_BACKEND", self.store.backend);
        if let Some(val) = lookup("TOKGATE_STORE_PATH") {
            self.store.path = PathBuf::from(val);
        }

        // -- Logging --
        env_str!("TOKGATE_LOG_LEVEL", self.logging.level);
        env_bool!("TOKGATE_LOG_JSON", self.logging.json);
    }
}
