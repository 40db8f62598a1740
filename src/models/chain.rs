use serde::{Deserialize, Serialize};

use super::error::ApiInternalError;
use crate::http::ApiResponse;

/// Response of `status?q=chainInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainInfoResponse {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    pub info: ChainInfo,
}

/// Node status as reported by the indexer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainInfo {
    pub blocks: i64,
    pub connections: i64,
    pub difficulty: f64,
    pub errors: String,
    pub network: String,
    #[serde(rename = "protocolversion")]
    pub protocol_version: i64,
    pub proxy: String,
    #[serde(rename = "relayfee")]
    pub relay_fee: f64,
    pub testnet: bool,
    #[serde(rename = "timeoffset")]
    pub time_offset: i64,
    pub version: i64,
}

/// Response of `status?q=getDifficulty`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainDifficultyResponse {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    pub difficulty: f64,
}

/// Response of `status?q=getBestBlockHash`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainBestBlockHashResponse {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: String,
}

/// Response of `status?q=getLastBlockHash`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainLastBlockHashResponse {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    #[serde(rename = "syncTipHash")]
    pub sync_tip_hash: String,
    #[serde(rename = "lastblockhash")]
    pub last_block_hash: String,
}

impl ChainLastBlockHashResponse {
    /// True when the indexer has caught up with the node's tip.
    pub fn is_synced(&self) -> bool {
        !self.last_block_hash.is_empty() && self.sync_tip_hash == self.last_block_hash
    }
}

impl ApiResponse for ChainInfoResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

impl ApiResponse for ChainDifficultyResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

impl ApiResponse for ChainBestBlockHashResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

impl ApiResponse for ChainLastBlockHashResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}
