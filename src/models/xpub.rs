use serde::{Deserialize, Serialize};

use super::address::SortOrder;
use super::error::ApiInternalError;
use crate::http::ApiResponse;

/// An address derived from an xpub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpubAddress {
    pub address: String,
    /// Derivation chain: `0` for receive, `1` for change.
    pub chain: u32,
    /// Index within the chain.
    pub num: u32,
    /// Derivation path relative to the xpub, e.g. `0/5`.
    pub path: String,
    /// Unix time until which the address is reserved, when reserved.
    #[serde(rename = "reserveUntil", skip_serializing_if = "Option::is_none")]
    pub reserve_until: Option<i64>,
}

pub type XpubAddresses = Vec<XpubAddress>;

/// Filters for `xpub/{xpub}/addrs`. Unset fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XpubAddressesQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub order: Option<SortOrder>,
    /// Restrict the result to a single derived address.
    pub address: Option<String>,
}

impl XpubAddressesQuery {
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Query pairs to send. Zero offsets/limits and blank filters are omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.to_string()));
        }
        if let Some(address) = self.address.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            pairs.push(("address", address.to_string()));
        }
        pairs
    }
}

/// Aggregate balance across every address derived from an xpub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpubBalance {
    #[serde(flatten)]
    pub api_error: ApiInternalError,
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
    #[serde(rename = "txApperances")]
    pub tx_appearances: i64,
    #[serde(rename = "unconfirmedBalance")]
    pub unconfirmed_balance: f64,
    #[serde(rename = "unconfirmedBalanceSat")]
    pub unconfirmed_balance_satoshis: i64,
}

impl ApiResponse for XpubBalance {
    fn embedded_error(&self) -> Option<String> {
        self.api_error.message()
    }
}

/// A history entry for an xpub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpubTransaction {
    pub txid: String,
    pub address: String,
    pub chain: u32,
    pub num: u32,
    pub path: String,
    #[serde(rename = "blockheight")]
    pub block_height: i64,
    pub confirmations: i64,
    pub satoshis: i64,
    pub vout: u32,
}

pub type XpubTransactions = Vec<XpubTransaction>;
