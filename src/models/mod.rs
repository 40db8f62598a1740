//! JSON document types of the BitIndex v3 API.
//!
//! Field names follow the remote schema through `serde` renames. Every response
//! type tolerates missing fields, and most of them carry the error fields the
//! API embeds in its documents (see [`ApiInternalError`]).

mod address;
mod block;
mod chain;
mod error;
mod network;
mod transaction;
mod webhook;
mod xpub;

pub use address::{
    AddressInfo, GetTransactionsRequest, GetTransactionsResponse, GetUnspentTransactionsRequest, SortOrder,
    UnspentTransaction, UnspentTransactions, UtxoSort,
};
pub use block::{BlockHashByHeightResponse, BlockHeaderResponse, BlockRawResponse, BlockResponse, PoolInfo};
pub use chain::{
    ChainBestBlockHashResponse, ChainDifficultyResponse, ChainInfo, ChainInfoResponse, ChainLastBlockHashResponse,
};
pub use error::{ApiErrorMessage, ApiErrorResponse, ApiInternalError};
pub use network::{API_ENDPOINT, Network};
pub use transaction::{
    ScriptPubKeyObject, ScriptSigObject, SendTransactionResponse, Transaction, TransactionRaw, VinObject, VoutObject,
};
pub use webhook::{
    MonitoredAddress, MonitoredAddresses, WebhookConfigResponse, WebhookNotification, WebhookUpdateConfig,
};
pub use xpub::{XpubAddress, XpubAddresses, XpubAddressesQuery, XpubBalance, XpubTransaction, XpubTransactions};
