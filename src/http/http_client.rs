// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use tokio::sync::RwLock;
use url::Url;

use super::error::BitIndexError;
use super::types::{ApiResponse, LastRequest, error_from_body};
use crate::config::ClientConfig;
use crate::log::mask_string;
use crate::models::Network;

const API_KEY_HEADER: &str = "api_key";

pub(crate) struct HttpClient {
    base_url: Url,
    network: Network,
    client: reqwest_middleware::ClientWithMiddleware,
    last_request: RwLock<Option<LastRequest>>,
}

impl HttpClient {
    pub fn with_config(config: &ClientConfig) -> Result<Self, BitIndexError> {
        if config.api_key.trim().is_empty() {
            return Err(BitIndexError::MissingApiKey);
        }

        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let retry_policy = reqwest_retry::policies::ExponentialBackoff::builder()
            .retry_bounds(config.min_retry_interval(), config.max_retry_interval())
            .build_with_max_retries(config.max_retries);

        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|_| BitIndexError::MissingApiKey)?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);

        let inner_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        let client = reqwest_middleware::ClientBuilder::new(inner_client)
            .with(reqwest_retry::RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            base_url,
            network: config.network,
            client,
            last_request: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn set_network(&mut self, network: Network) {
        self.network = network;
    }

    /// Resolves an endpoint (path plus optional query) against `{base_url}{network}/`.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, BitIndexError> {
        Ok(self.base_url.join(&format!("{}/{}", self.network, endpoint))?)
    }

    pub async fn send_request<T: ApiResponse>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, BitIndexError> {
        let url = self.endpoint_url(endpoint)?;
        let post_data = body.as_ref().map(serde_json::to_string).transpose()?;

        let req = match method {
            Method::GET => self.client.get(url.clone()),
            Method::POST | Method::PUT => {
                let req = self.client.request(method.clone(), url.clone());
                if let Some(data) = &post_data {
                    req.body(data.clone()).header(CONTENT_TYPE, "application/json")
                } else {
                    req
                }
            },
            other => return Err(BitIndexError::UnsupportedMethod(other)),
        };

        let start = Instant::now();
        let resp = req.send().await?;
        let latency = start.elapsed();
        let status = resp.status();
        let masked_url = mask_string(url.as_str());

        debug!(
            method:% = method,
            url = &*masked_url,
            status = status.as_u16(),
            latency_ms = latency.as_millis() as u64;
            "BitIndex request completed"
        );

        self.record(LastRequest {
            method,
            url: url.to_string(),
            post_data,
            status_code: status,
            latency,
        })
        .await;

        let text = resp.text().await?;

        if status != StatusCode::OK {
            let err = error_from_body(status, &text);
            warn!(
                status = status.as_u16(),
                error:% = err;
                "BitIndex request failed"
            );
            return Err(err);
        }

        let decoded: T = serde_json::from_str(&text)?;
        if let Some(message) = decoded.embedded_error() {
            return Err(BitIndexError::Api { status, message });
        }
        Ok(decoded)
    }

    async fn record(&self, request: LastRequest) {
        *self.last_request.write().await = Some(request);
    }

    pub async fn last_request(&self) -> Option<LastRequest> {
        self.last_request.read().await.clone()
    }

    pub async fn get_latency(&self) -> Option<Duration> {
        self.last_request.read().await.as_ref().map(|r| r.latency)
    }
}
