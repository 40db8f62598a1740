//! Webhook registration: the callback endpoint and the monitored address list.
//!
//! Incoming callbacks are handled by [`crate::webhooks`].

use log::{debug, info};
use reqwest::Method;

use crate::http::{BitIndexClient, BitIndexError};
use crate::log::mask_string;
use crate::models::{MonitoredAddress, MonitoredAddresses, WebhookConfigResponse, WebhookUpdateConfig};

const WEBHOOK_ENDPOINT: &str = "webhook/endpoint";
const MONITORED_ADDRESSES: &str = "webhook/monitored_addrs";

impl BitIndexClient {
    /// Returns the callback endpoint registered for this API key.
    pub async fn get_webhook_config(&self) -> Result<WebhookConfigResponse, BitIndexError> {
        debug!("Requesting webhook config");
        self.request(Method::GET, WEBHOOK_ENDPOINT, None).await
    }

    /// Replaces the registered callback endpoint.
    ///
    /// An update without a URL keeps the current one, which is how callbacks
    /// are switched on or off or the secret rotated.
    pub async fn update_webhook_config(
        &self,
        config: &WebhookUpdateConfig,
    ) -> Result<WebhookConfigResponse, BitIndexError> {
        let masked_url = config.url.as_deref().map(mask_string).unwrap_or_default();
        info!(url = &*masked_url, enabled = config.enabled; "Updating webhook config");
        let body = serde_json::to_value(config)?;
        self.request(Method::PUT, WEBHOOK_ENDPOINT, Some(body)).await
    }

    pub async fn get_monitored_addresses(&self) -> Result<MonitoredAddresses, BitIndexError> {
        debug!("Requesting monitored addresses");
        self.request(Method::GET, MONITORED_ADDRESSES, None).await
    }

    /// Adds `addresses` to the monitored list and returns the stored entries.
    pub async fn add_monitored_addresses(
        &self,
        addresses: &[MonitoredAddress],
    ) -> Result<MonitoredAddresses, BitIndexError> {
        let address_count = addresses.len();
        info!(address_count = address_count; "Adding monitored addresses");
        let body = serde_json::to_value(addresses)?;
        self.request(Method::PUT, MONITORED_ADDRESSES, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::default_user_agent;
    use crate::endpoints::test_support::{TEST_API_KEY, test_client};

    #[tokio::test]
    async fn test_get_webhook_config_sends_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/main/webhook/endpoint"))
            .and(header("api_key", TEST_API_KEY))
            .and(header("user-agent", default_user_agent().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "wh-1",
                "url": "https://example.com/bitindex/webhook",
                "secret": "secret123key",
                "enabled": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let config = client.get_webhook_config().await.unwrap();

        assert_eq!(config.id, "wh-1");
        assert!(config.enabled);
    }

    #[tokio::test]
    async fn test_update_webhook_config_puts_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/v3/main/webhook/endpoint"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "url": "https://example.com/hook",
                "secret": "Top-Secret-New-Key2",
                "enabled": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "url": "https://example.com/hook",
                "secret": "Top-Secret-New-Key2",
                "enabled": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let update = WebhookUpdateConfig {
            url: Some("https://example.com/hook".to_string()),
            secret: Some("Top-Secret-New-Key2".to_string()),
            enabled: true,
        };
        let config = client.update_webhook_config(&update).await.unwrap();

        assert_eq!(config.url, "https://example.com/hook");
        assert_eq!(config.secret, "Top-Secret-New-Key2");
    }

    #[tokio::test]
    async fn test_monitored_addresses_round_trip() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/v3/main/webhook/monitored_addrs"))
            .and(body_json(json!([{"addr": "1abc"}, {"addr": "1def"}])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"addr": "1abc", "createdAt": "2019-10-01T00:00:00Z"},
                {"addr": "1def", "createdAt": "2019-10-01T00:00:00Z"}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v3/main/webhook/monitored_addrs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"addr": "1abc"}])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        let added = client
            .add_monitored_addresses(&[MonitoredAddress::new("1abc"), MonitoredAddress::new("1def")])
            .await
            .unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(added[1].created_at.as_deref(), Some("2019-10-01T00:00:00Z"));

        let monitored = client.get_monitored_addresses().await.unwrap();
        assert_eq!(monitored, vec![MonitoredAddress::new("1abc")]);
    }
}
