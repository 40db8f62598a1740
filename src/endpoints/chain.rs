use log::debug;
use reqwest::Method;

use crate::http::utils::with_query;
use crate::http::{BitIndexClient, BitIndexError};
use crate::models::{
    ChainBestBlockHashResponse, ChainDifficultyResponse, ChainInfoResponse, ChainLastBlockHashResponse,
};

fn status_query(query: &str) -> String {
    with_query("status", vec![("q", query.to_string())])
}

impl BitIndexClient {
    pub async fn chain_info(&self) -> Result<ChainInfoResponse, BitIndexError> {
        debug!("Requesting chain info");
        self.request(Method::GET, &status_query("chainInfo"), None).await
    }

    pub async fn chain_difficulty(&self) -> Result<ChainDifficultyResponse, BitIndexError> {
        debug!("Requesting chain difficulty");
        self.request(Method::GET, &status_query("getDifficulty"), None).await
    }

    pub async fn chain_best_block_hash(&self) -> Result<ChainBestBlockHashResponse, BitIndexError> {
        debug!("Requesting best block hash");
        self.request(Method::GET, &status_query("getBestBlockHash"), None).await
    }

    /// Returns the indexer's sync tip next to the node's last block.
    pub async fn chain_last_block_hash(&self) -> Result<ChainLastBlockHashResponse, BitIndexError> {
        debug!("Requesting last block hash");
        self.request(Method::GET, &status_query("getLastBlockHash"), None).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::endpoints::test_support::test_client;

    #[test]
    fn test_status_query() {
        assert_eq!(status_query("getDifficulty"), "status?q=getDifficulty");
    }

    #[tokio::test]
    async fn test_chain_status_queries() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/main/status"))
            .and(query_param("q", "chainInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "info": {"blocks": 600000, "connections": 8, "network": "livenet", "relayfee": 0.00001}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v3/main/status"))
            .and(query_param("q", "getDifficulty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"difficulty": 123456.5})))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v3/main/status"))
            .and(query_param("q", "getBestBlockHash"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bestblockhash": "00aa"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v3/main/status"))
            .and(query_param("q", "getLastBlockHash"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "syncTipHash": "00aa",
                "lastblockhash": "00aa"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        let info = client.chain_info().await.unwrap();
        assert_eq!(info.info.blocks, 600000);
        assert_eq!(info.info.network, "livenet");

        let difficulty = client.chain_difficulty().await.unwrap();
        assert_eq!(difficulty.difficulty, 123456.5);

        let best = client.chain_best_block_hash().await.unwrap();
        assert_eq!(best.best_block_hash, "00aa");

        let last = client.chain_last_block_hash().await.unwrap();
        assert!(last.is_synced());
    }

    #[tokio::test]
    async fn test_chain_status_checks_http_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/main/status"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Unauthorized",
                "errors": []
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let err = client.chain_difficulty().await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }
}
