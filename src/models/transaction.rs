use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{ApiErrorResponse, ApiInternalError};
use crate::http::ApiResponse;

/// A decoded transaction as returned by `tx/{txid}` and inside transaction
/// listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    #[serde(rename = "blockhash")]
    pub block_hash: String,
    #[serde(rename = "blockheight")]
    pub block_height: i64,
    #[serde(rename = "blocktime")]
    pub block_time: i64,
    pub confirmations: i64,
    pub fees: f64,
    pub hash: String,
    #[serde(rename = "locktime")]
    pub lock_time: i64,
    #[serde(rename = "rawtx")]
    pub raw_tx: String,
    pub size: i64,
    pub time: i64,
    pub txid: String,
    #[serde(rename = "valueIn")]
    pub value_in: f64,
    #[serde(rename = "valueOut")]
    pub value_out: f64,
    pub version: i32,
    pub vin: Vec<VinObject>,
    pub vout: Vec<VoutObject>,
}

impl Transaction {
    /// Time of the block that mined the transaction; `None` while unconfirmed.
    pub fn mined_at(&self) -> Option<DateTime<Utc>> {
        if self.block_time <= 0 {
            return None;
        }
        DateTime::from_timestamp(self.block_time, 0)
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmations > 0
    }
}

impl ApiResponse for Transaction {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

/// Response of `rawtx/{txid}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionRaw {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    #[serde(rename = "rawtx")]
    pub raw_tx: String,
}

impl ApiResponse for TransactionRaw {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VinObject {
    pub address: String,
    #[serde(rename = "addr")]
    pub address_addr: String,
    pub n: u32,
    #[serde(rename = "scriptSig")]
    pub script_sig: ScriptSigObject,
    pub sequence: i64,
    pub txid: String,
    pub value: f64,
    #[serde(rename = "valueSat")]
    pub value_satoshis: i64,
    pub vout: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSigObject {
    pub asm: String,
    pub hex: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoutObject {
    pub n: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKeyObject,
    #[serde(rename = "spentHeight")]
    pub spent_height: Option<i64>,
    #[serde(rename = "spentIndex")]
    pub spent_index: Option<i64>,
    #[serde(rename = "spentTxId")]
    pub spent_txid: Option<String>,
    pub value: f64,
    #[serde(rename = "valueSat")]
    pub value_satoshis: i64,
}

impl VoutObject {
    pub fn is_spent(&self) -> bool {
        self.spent_txid.as_deref().is_some_and(|txid| !txid.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptPubKeyObject {
    pub addresses: Vec<String>,
    pub asm: String,
    pub hex: String,
    #[serde(rename = "reqSigs")]
    pub required_signatures: u32,
    #[serde(rename = "type")]
    pub script_type: String,
}

/// Response of `tx/send`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendTransactionResponse {
    #[serde(flatten)]
    pub api_error: ApiErrorResponse,
    pub txid: String,
}

impl ApiResponse for SendTransactionResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}
