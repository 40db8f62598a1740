use log::debug;
use reqwest::Method;

use crate::http::utils::encode_segment;
use crate::http::{BitIndexClient, BitIndexError};
use crate::models::{BlockHashByHeightResponse, BlockHeaderResponse, BlockRawResponse, BlockResponse};

impl BitIndexClient {
    /// Returns the hash of the main-chain block at `height`.
    pub async fn get_block_hash_by_height(&self, height: u64) -> Result<BlockHashByHeightResponse, BitIndexError> {
        debug!(height = height; "Requesting block hash");
        self.request(Method::GET, &format!("block-index/{}", height), None).await
    }

    pub async fn get_block_header(&self, hash: &str) -> Result<BlockHeaderResponse, BitIndexError> {
        debug!(hash = hash; "Requesting block header");
        let path = format!("blockheader/{}", encode_segment(hash)?);
        self.request(Method::GET, &path, None).await
    }

    /// Returns the block `hash` with the ids of its transactions.
    pub async fn get_block(&self, hash: &str) -> Result<BlockResponse, BitIndexError> {
        debug!(hash = hash; "Requesting block");
        let path = format!("block/{}", encode_segment(hash)?);
        self.request(Method::GET, &path, None).await
    }

    /// Returns the serialized block `hash` as hex.
    pub async fn get_block_raw(&self, hash: &str) -> Result<BlockRawResponse, BitIndexError> {
        debug!(hash = hash; "Requesting raw block");
        let path = format!("rawblock/{}", encode_segment(hash)?);
        self.request(Method::GET, &path, None).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::endpoints::test_support::test_client;
    use crate::http::BitIndexError;
    use crate::models::Network;

    const HASH: &str = "0000000000000000028ab8d4b7e0c1c2f68c3ee4e31afc8b7a8d5a0c2b2a9a41";

    #[tokio::test]
    async fn test_block_hash_by_height() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/main/block-index/600000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"blockHash": HASH})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let response = client.get_block_hash_by_height(600000).await.unwrap();

        assert_eq!(response.block_hash, HASH);
    }

    #[tokio::test]
    async fn test_block_header_and_block() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v3/main/blockheader/{}", HASH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hash": HASH,
                "height": 600000,
                "time": 1570000000,
                "versionHex": "20000000",
                "chainwork": "00ff"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v3/main/block/{}", HASH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hash": HASH,
                "height": 600000,
                "isMainChain": true,
                "poolInfo": {"poolName": "TAAL", "url": "https://taal.com"},
                "tx": ["aa", "bb"]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        let header = client.get_block_header(HASH).await.unwrap();
        assert_eq!(header.height, 600000);
        assert_eq!(header.version_hex, "20000000");
        assert_eq!(header.chain_work, "00ff");
        assert!(header.timestamp().is_some());

        let block = client.get_block(HASH).await.unwrap();
        assert!(block.is_main_chain);
        assert_eq!(block.pool_info.pool_name, "TAAL");
        assert_eq!(block.tx, vec!["aa", "bb"]);
    }

    #[tokio::test]
    async fn test_raw_block_follows_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v3/test/rawblock/{}", HASH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rawblock": "00000020"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut client = test_client(&mock_server);
        client.set_network(Network::Test);
        let raw = client.get_block_raw(HASH).await.unwrap();

        assert_eq!(raw.raw_block, "00000020");
        assert_eq!(client.network(), Network::Test);
    }

    #[tokio::test]
    async fn test_dot_segment_hash_is_rejected_without_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        for hash in ["..", ".", ""] {
            match client.get_block(hash).await {
                Err(BitIndexError::InvalidPathSegment(segment)) => assert_eq!(segment, hash),
                other => panic!("unexpected result: {other:?}"),
            }
        }
        assert!(client.last_request().await.is_none());
    }
}
