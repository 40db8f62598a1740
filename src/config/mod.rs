mod defaults;
pub mod loader;

pub use defaults::{
    ClientConfig, DEFAULT_MAX_RETRIES, DEFAULT_MAX_RETRY_INTERVAL_MS, DEFAULT_MIN_RETRY_INTERVAL_MS,
    DEFAULT_TIMEOUT_SECS, WebhookConfig, default_user_agent,
};
pub use loader::{client_config, load_configuration};
