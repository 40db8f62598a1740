use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use super::error::ApiInternalError;
use super::transaction::Transaction;
use crate::http::ApiResponse;

/// Balance and history summary for a single address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressInfo {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    #[serde(rename = "addrStr")]
    pub address: String,
    pub balance: f64,
    #[serde(rename = "balanceSat")]
    pub balance_satoshis: i64,
    #[serde(rename = "totalReceived")]
    pub total_received: f64,
    #[serde(rename = "totalReceivedSat")]
    pub total_received_satoshis: i64,
    #[serde(rename = "totalSent")]
    pub total_sent: f64,
    #[serde(rename = "totalSentSat")]
    pub total_sent_satoshis: i64,
    pub transactions: Vec<String>,
    // The API spells these "Apperances".
    #[serde(rename = "txApperances")]
    pub tx_appearances: i64,
    #[serde(rename = "unconfirmedBalance")]
    pub unconfirmed_balance: f64,
    #[serde(rename = "unconfirmedBalanceSat")]
    pub unconfirmed_balance_satoshis: i64,
    #[serde(rename = "unconfirmedTxApperances")]
    pub unconfirmed_tx_appearances: i64,
}

impl ApiResponse for AddressInfo {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

/// A standard UTXO entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnspentTransaction {
    pub address: String,
    pub amount: f64,
    pub confirmations: i64,
    pub height: i64,
    #[serde(rename = "outputIndex")]
    pub output_index: i64,
    pub satoshis: i64,
    pub script: String,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    pub txid: String,
    pub value: i64,
    pub vout: u32,
}

pub type UnspentTransactions = Vec<UnspentTransaction>;

/// Body of the `addrs/txs` request.
///
/// Addresses are sent comma-joined in the `addrs` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GetTransactionsRequest {
    #[serde(rename = "addrs", serialize_with = "join_addresses")]
    pub addresses: Vec<String>,
    #[serde(rename = "afterBlockHash", skip_serializing_if = "Option::is_none")]
    pub after_block_hash: Option<String>,
    #[serde(rename = "afterHeight", skip_serializing_if = "Option::is_none")]
    pub after_height: Option<String>,
    #[serde(rename = "fromIndex", skip_serializing_if = "Option::is_none")]
    pub from_index: Option<u64>,
    #[serde(rename = "includeAsm")]
    pub include_asm: bool,
    #[serde(rename = "includeHex")]
    pub include_hex: bool,
    #[serde(rename = "toIndex", skip_serializing_if = "Option::is_none")]
    pub to_index: Option<u64>,
}

impl GetTransactionsRequest {
    pub fn for_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// A page of transactions for one or more addresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetTransactionsResponse {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
    #[serde(rename = "totalItems")]
    pub total_items: i64,
    pub from: i64,
    pub to: i64,
    pub items: Vec<Transaction>,
}

impl ApiResponse for GetTransactionsResponse {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

/// Body of the `addrs/utxo` request.
///
/// The sort travels both as a `sort` field here and as a query parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GetUnspentTransactionsRequest {
    #[serde(rename = "addrs", serialize_with = "join_addresses")]
    pub addresses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "sort_as_string")]
    pub sort: Option<UtxoSort>,
}

impl GetUnspentTransactionsRequest {
    pub fn for_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: UtxoSort) -> Self {
        self.sort = Some(sort);
        self
    }
}

fn join_addresses<S: Serializer>(addresses: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&addresses.join(","))
}

fn sort_as_string<S: Serializer>(sort: &Option<UtxoSort>, serializer: S) -> Result<S::Ok, S::Error> {
    match sort {
        Some(sort) => serializer.collect_str(sort),
        None => serializer.serialize_none(),
    }
}

/// Sort direction used by list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order: {}", other)),
        }
    }
}

/// UTXO sort expression, rendered as `field:order` (e.g. `value:desc`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtxoSort {
    pub field: String,
    pub order: SortOrder,
}

impl UtxoSort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

impl fmt::Display for UtxoSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.order)
    }
}

impl FromStr for UtxoSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = match s.split_once(':') {
            Some((field, order)) => (field, order.parse()?),
            None => (s, SortOrder::Asc),
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("Invalid sort: {}", s));
        }
        Ok(UtxoSort::new(field, order))
    }
}
