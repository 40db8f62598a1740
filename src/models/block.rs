use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiInternalError;
use crate::http::ApiResponse;

/// Response of `block-index/{height}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockHashByHeightResponse {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    #[serde(rename = "blockHash")]
    pub block_hash: String,
}

/// Response of `blockheader/{hash}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockHeaderResponse {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    pub bits: String,
    #[serde(rename = "chainwork")]
    pub chain_work: String,
    pub confirmations: i64,
    pub difficulty: f64,
    pub hash: String,
    pub height: i64,
    #[serde(rename = "mediantime")]
    pub median_time: i64,
    #[serde(rename = "merkleroot")]
    pub merkle_root: String,
    #[serde(rename = "nextblockhash")]
    pub next_block_hash: String,
    pub nonce: i64,
    #[serde(rename = "previousblockhash")]
    pub previous_block_hash: String,
    pub time: i64,
    pub version: i64,
    #[serde(rename = "versionHex")]
    pub version_hex: String,
}

impl BlockHeaderResponse {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

/// Response of `block/{hash}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockResponse {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    pub bits: String,
    #[serde(rename = "chainwork")]
    pub chain_work: String,
    pub confirmations: i64,
    pub difficulty: f64,
    pub hash: String,
    pub height: i64,
    #[serde(rename = "isMainChain")]
    pub is_main_chain: bool,
    #[serde(rename = "merkleroot")]
    pub merkle_root: String,
    #[serde(rename = "nextblockhash")]
    pub next_block_hash: String,
    pub nonce: i64,
    #[serde(rename = "poolInfo")]
    pub pool_info: PoolInfo,
    #[serde(rename = "previousblockhash")]
    pub previous_block_hash: String,
    pub reward: f64,
    pub size: i64,
    pub time: i64,
    /// Transaction ids contained in the block.
    pub tx: Vec<String>,
    pub version: i64,
}

impl BlockResponse {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolInfo {
    #[serde(rename = "poolName")]
    pub pool_name: String,
    pub url: String,
}

/// Response of `rawblock/{hash}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockRawResponse {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    #[serde(rename = "rawblock")]
    pub raw_block: String,
}

impl ApiResponse for BlockHashByHeightResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

impl ApiResponse for BlockHeaderResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

impl ApiResponse for BlockResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

impl ApiResponse for BlockRawResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}
