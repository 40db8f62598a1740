use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::{ApplyArgs, ConnectionArgs, WebhookListenArgs};
use crate::models::{API_ENDPOINT, Network};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_MIN_RETRY_INTERVAL_MS: u64 = 2;
pub const DEFAULT_MAX_RETRY_INTERVAL_MS: u64 = 10;

pub fn default_user_agent() -> String {
    format!("bitindex-rs: v{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_key: String,
    pub network: Network,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub min_retry_interval_ms: u64,
    pub max_retry_interval_ms: u64,
    pub webhook: WebhookConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            network: Network::Main,
            base_url: API_ENDPOINT.to_string(),
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            min_retry_interval_ms: DEFAULT_MIN_RETRY_INTERVAL_MS,
            max_retry_interval_ms: DEFAULT_MAX_RETRY_INTERVAL_MS,
            webhook: WebhookConfig::default(),
        }
    }
}

// The api key must never end up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<REDACTED>" })
            .field("network", &self.network)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("min_retry_interval_ms", &self.min_retry_interval_ms)
            .field("max_retry_interval_ms", &self.max_retry_interval_ms)
            .field("webhook", &self.webhook)
            .finish()
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn min_retry_interval(&self) -> Duration {
        Duration::from_millis(self.min_retry_interval_ms)
    }

    /// Never shorter than the minimum interval.
    pub fn max_retry_interval(&self) -> Duration {
        Duration::from_millis(self.max_retry_interval_ms.max(self.min_retry_interval_ms))
    }
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub listen_address: String,
    pub path: String,
    pub secret: Option<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:8080".to_string(),
            path: "/bitindex/webhook".to_string(),
            secret: None,
        }
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("listen_address", &self.listen_address)
            .field("path", &self.path)
            .field("secret", &self.secret.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl ApplyArgs for ClientConfig {
    fn apply_connection(&mut self, args: &ConnectionArgs) {
        if let Some(api_key) = &args.api_key {
            self.api_key = api_key.clone();
        }
        if let Some(network) = args.network {
            self.network = network;
        }
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(max_retries) = args.max_retries {
            self.max_retries = max_retries;
        }
    }

    fn apply_webhook(&mut self, args: &WebhookListenArgs) {
        if let Some(listen_address) = &args.listen_address {
            self.webhook.listen_address = listen_address.clone();
        }
        if let Some(path) = &args.path {
            self.webhook.path = path.clone();
        }
        if let Some(secret) = &args.secret {
            self.webhook.secret = Some(secret.clone());
        }
    }
}
