use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::error::ApiInternalError;
use super::network::Network;
use crate::http::ApiResponse;

type HmacSha256 = Hmac<Sha256>;

const SECRET_CHECK_CONTEXT: &[u8] = b"bitindex-webhook-secret";

/// Webhook endpoint registered for the API key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfigResponse {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    pub id: String,
    pub url: String,
    pub secret: String,
    pub enabled: bool,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ApiResponse for WebhookConfigResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

/// Body of a webhook configuration update. An unset URL keeps the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookUpdateConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub enabled: bool,
}

/// An address watched for incoming payments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoredAddress {
    #[serde(rename = "addr", alias = "address")]
    pub address: String,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl MonitoredAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            created_at: None,
        }
    }
}

pub type MonitoredAddresses = Vec<MonitoredAddress>;

/// Payment notification POSTed by BitIndex to the registered webhook URL.
///
/// Callbacks can arrive more than once and out of order. Receivers should keep
/// the highest `confirmations` seen per txid/vout and compare with `>=` rather
/// than waiting for an exact count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookNotification {
    pub txid: String,
    pub address: String,
    /// Present when the address belongs to a monitored xpub.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xpub: Option<String>,
    /// Derivation path, set together with `xpub`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub satoshis: i64,
    pub confirmations: i64,
    pub vout: u32,
    pub secret: String,
    pub network: Network,
}

impl WebhookNotification {
    /// Checks the shared secret without leaking timing information.
    pub fn has_secret(&self, expected: &str) -> bool {
        let Ok(mut expected_mac) = HmacSha256::new_from_slice(expected.as_bytes()) else {
            return false;
        };
        expected_mac.update(SECRET_CHECK_CONTEXT);
        let expected_tag = expected_mac.finalize().into_bytes();

        let Ok(mut received_mac) = HmacSha256::new_from_slice(self.secret.as_bytes()) else {
            return false;
        };
        received_mac.update(SECRET_CHECK_CONTEXT);
        received_mac.verify_slice(&expected_tag).is_ok()
    }

    /// True once the payment has at least `threshold` confirmations.
    pub fn is_settled(&self, threshold: i64) -> bool {
        self.confirmations >= threshold
    }

    /// Returns the notification with its shared secret blanked, for display.
    pub fn redacted(mut self) -> Self {
        self.secret.clear();
        self
    }
}
