//! Transaction lookups and broadcast.

use log::{debug, info, warn};
use reqwest::Method;
use serde_json::json;

use crate::http::utils::{check_raw_transaction, encode_segment};
use crate::http::{BitIndexClient, BitIndexError};
use crate::models::{SendTransactionResponse, Transaction, TransactionRaw};

impl BitIndexClient {
    /// Returns the decoded transaction `txid`.
    pub async fn get_transaction(&self, txid: &str) -> Result<Transaction, BitIndexError> {
        debug!(txid = txid; "Requesting transaction");
        let path = format!("tx/{}", encode_segment(txid)?);
        self.request(Method::GET, &path, None).await
    }

    /// Returns the serialized transaction `txid` as hex.
    pub async fn get_transaction_raw(&self, txid: &str) -> Result<TransactionRaw, BitIndexError> {
        debug!(txid = txid; "Requesting raw transaction");
        let path = format!("rawtx/{}", encode_segment(txid)?);
        self.request(Method::GET, &path, None).await
    }

    /// Broadcasts a serialized transaction to the network.
    ///
    /// # Arguments
    ///
    /// * `raw_tx` - The signed transaction, hex encoded
    ///
    /// # Errors
    ///
    /// - [`BitIndexError::InvalidRawTransaction`] if `raw_tx` is empty or not
    ///   hex; no request is made in that case
    /// - [`BitIndexError::Broadcast`] if the network rejects the transaction,
    ///   carrying the node's reject code and reason
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitindex::http::{BitIndexClient, BitIndexError};
    /// use bitindex::models::Network;
    ///
    /// # async fn example(raw_tx: &str) -> Result<(), anyhow::Error> {
    /// let client = BitIndexClient::new("my-api-key", Network::Main)?;
    /// match client.send_transaction(raw_tx).await {
    ///     Ok(sent) => println!("broadcast {}", sent.txid),
    ///     Err(BitIndexError::Broadcast { code, message, .. }) => {
    ///         println!("rejected ({}): {}", code, message);
    ///     }
    ///     Err(e) => return Err(e.into()),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_transaction(&self, raw_tx: &str) -> Result<SendTransactionResponse, BitIndexError> {
        check_raw_transaction(raw_tx)?;

        let size_bytes = raw_tx.trim().len() / 2;
        info!(target: "audit", size_bytes = size_bytes; "Broadcasting transaction");

        let body = json!({ "rawtx": raw_tx.trim() });
        match self.request::<SendTransactionResponse>(Method::POST, "tx/send", Some(body)).await {
            Ok(sent) => {
                info!(target: "audit", txid = &*sent.txid; "Transaction broadcast accepted");
                Ok(sent)
            },
            Err(e) => {
                warn!(
                    target: "audit",
                    error:% = e;
                    "Transaction broadcast failed"
                );
                Err(e)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::endpoints::test_support::{test_client, test_config};
    use crate::http::{BitIndexClient, BitIndexError};

    const TXID: &str = "e9865ab744ef236f0f436455a439263a53d9708f5eca66625dccb85cf1ff5947";
    const RAW_TX: &str = "0100000001a2b3c4d5";

    #[tokio::test]
    async fn test_get_transaction_decodes_outputs() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v3/main/tx/{}", TXID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "txid": TXID,
                "blockheight": 600123,
                "blocktime": 1570000000,
                "confirmations": 2,
                "vin": [{"txid": "aa", "vout": 0, "n": 0, "addr": "1abc", "valueSat": 5000}],
                "vout": [
                    {"n": 0, "value": 0.00001273, "valueSat": 1273, "scriptPubKey": {"addresses": ["1def"], "type": "pubkeyhash", "reqSigs": 1}},
                    {"n": 1, "valueSat": 3000, "spentTxId": "bb", "spentIndex": 0, "spentHeight": 600200}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let tx = client.get_transaction(TXID).await.unwrap();

        assert_eq!(tx.txid, TXID);
        assert!(tx.is_confirmed());
        assert!(tx.mined_at().is_some());
        assert_eq!(tx.vin[0].address_addr, "1abc");
        assert_eq!(tx.vout[0].script_pub_key.script_type, "pubkeyhash");
        assert!(!tx.vout[0].is_spent());
        assert!(tx.vout[1].is_spent());
    }

    #[tokio::test]
    async fn test_get_transaction_raw_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v3/main/rawtx/{}", TXID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rawtx": RAW_TX})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let raw = client.get_transaction_raw(TXID).await.unwrap();

        assert_eq!(raw.raw_tx, RAW_TX);
    }

    #[tokio::test]
    async fn test_send_transaction_posts_rawtx() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v3/main/tx/send"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"rawtx": RAW_TX})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"txid": TXID})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let sent = client.send_transaction(RAW_TX).await.unwrap();

        assert_eq!(sent.txid, TXID);
        let last = client.last_request().await.unwrap();
        assert_eq!(last.post_data.as_deref(), Some(r#"{"rawtx":"0100000001a2b3c4d5"}"#));
    }

    #[tokio::test]
    async fn test_send_transaction_rejection_carries_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v3/main/tx/send"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [],
                "message": {"code": 26, "message": "66: insufficient priority"}
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let err = client.send_transaction(RAW_TX).await.unwrap_err();

        match err {
            BitIndexError::Broadcast { status, code, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(code, 26);
                assert_eq!(message, "66: insufficient priority");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_transaction_rejects_invalid_hex_without_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        assert!(matches!(
            client.send_transaction("not-hex").await,
            Err(BitIndexError::InvalidRawTransaction(_))
        ));
        assert!(matches!(
            client.send_transaction("").await,
            Err(BitIndexError::InvalidRawTransaction(_))
        ));
        assert!(client.last_request().await.is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v3/main/tx/{}", TXID)))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v3/main/tx/{}", TXID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"txid": TXID})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = BitIndexClient::with_config(&test_config(&mock_server, 1)).unwrap();
        let tx = client.get_transaction(TXID).await.unwrap();

        assert_eq!(tx.txid, TXID);
        assert!(client.get_last_request_latency().await.is_some());
    }

    #[tokio::test]
    async fn test_rate_limit_is_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v3/main/rawtx/{}", TXID)))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v3/main/rawtx/{}", TXID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rawtx": RAW_TX})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = BitIndexClient::with_config(&test_config(&mock_server, 1)).unwrap();
        let raw = client.get_transaction_raw(TXID).await.unwrap();

        assert_eq!(raw.raw_tx, RAW_TX);
        let last = client.last_request().await.unwrap();
        assert_eq!(last.status_code, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unsupported_method_fails_without_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let err = client
            .request::<serde_json::Value>(Method::DELETE, "x", None)
            .await
            .unwrap_err();

        match err {
            BitIndexError::UnsupportedMethod(m) => assert_eq!(m, Method::DELETE),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(client.last_request().await.is_none());
    }

    #[tokio::test]
    async fn test_server_error_without_retries_keeps_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v3/main/tx/{}", TXID)))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let err = client.get_transaction(TXID).await.unwrap_err();

        match err {
            BitIndexError::ServerError { status, body } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "upstream unavailable");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
