//! High-level client for the BitIndex API.
//!
//! [`BitIndexClient`] owns the retrying transport and exposes one async method
//! per API endpoint. The endpoint methods live next to the resource they
//! query (see the `endpoints` module); this file holds construction and the
//! state shared by all of them.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitindex::http::BitIndexClient;
//! use bitindex::models::Network;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = BitIndexClient::new(std::env::var("BITINDEX_API_KEY")?, Network::Main)?;
//!
//! let info = client.address_info("16ZqP5Tb22KJuvSAbjNkoiZs13mmRmexZA").await?;
//! println!("address balance: {}", info.balance);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::Method;
use url::Url;

use super::error::BitIndexError;
use super::http_client::HttpClient;
use super::types::{ApiResponse, LastRequest};
use crate::config::ClientConfig;
use crate::models::Network;

/// Client for the BitIndex v3 API.
///
/// Every call goes through a single `reqwest` client wrapped in an
/// exponential-backoff retry middleware, so connection pooling is shared
/// across calls.
///
/// # Thread Safety
///
/// `BitIndexClient` is safe to share across threads and can be used
/// from multiple async tasks concurrently.
pub struct BitIndexClient {
    http_client: HttpClient,
}

impl BitIndexClient {
    /// Creates a client for `network` with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`BitIndexError::MissingApiKey`] if `api_key` is blank, or a
    /// request error if the HTTP client cannot be initialized.
    pub fn new(api_key: impl Into<String>, network: Network) -> Result<Self, BitIndexError> {
        let config = ClientConfig {
            api_key: api_key.into(),
            network,
            ..ClientConfig::default()
        };
        Self::with_config(&config)
    }

    /// Creates a client from a full configuration (base URL, timeouts, retries).
    pub fn with_config(config: &ClientConfig) -> Result<Self, BitIndexError> {
        let http_client = HttpClient::with_config(config)?;
        Ok(Self { http_client })
    }

    pub fn network(&self) -> Network {
        self.http_client.network()
    }

    /// Switches subsequent requests to another network.
    pub fn set_network(&mut self, network: Network) {
        self.http_client.set_network(network);
    }

    /// Returns the base URL without the network segment.
    pub fn get_address(&self) -> String {
        self.http_client.base_url().to_string()
    }

    /// Full URL an endpoint resolves to on the current network.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, BitIndexError> {
        self.http_client.endpoint_url(endpoint)
    }

    /// Method, URL, body and status of the most recent request.
    pub async fn last_request(&self) -> Option<LastRequest> {
        self.http_client.last_request().await
    }

    /// Round-trip time of the most recent request.
    pub async fn get_last_request_latency(&self) -> Option<Duration> {
        self.http_client.get_latency().await
    }

    /// Generic request against any endpoint of the current network.
    ///
    /// `endpoint` is relative to `{base_url}{network}/` and may include a query
    /// string. Useful for endpoints this crate does not wrap yet.
    pub async fn request<T: ApiResponse>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, BitIndexError> {
        self.http_client.send_request(method, endpoint, body).await
    }
}
