//! Address lookups: balance summary, unspent outputs and history.

use log::debug;
use reqwest::Method;

use crate::http::utils::{encode_segment, with_query};
use crate::http::{BitIndexClient, BitIndexError};
use crate::log::mask_string;
use crate::models::{
    AddressInfo, GetTransactionsRequest, GetTransactionsResponse, GetUnspentTransactionsRequest, UnspentTransactions,
};

impl BitIndexClient {
    /// Returns the balance summary and transaction ids of `address`.
    ///
    /// # Errors
    ///
    /// Returns [`BitIndexError::Api`] when the address is unknown or invalid,
    /// or a transport error if the API cannot be reached.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitindex::http::BitIndexClient;
    /// use bitindex::models::Network;
    ///
    /// # async fn example() -> Result<(), anyhow::Error> {
    /// let client = BitIndexClient::new("my-api-key", Network::Main)?;
    /// let info = client.address_info("16ZqP5Tb22KJuvSAbjNkoiZs13mmRmexZA").await?;
    /// println!("{} sat across {} txs", info.balance_satoshis, info.tx_appearances);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn address_info(&self, address: &str) -> Result<AddressInfo, BitIndexError> {
        let masked = mask_string(address);
        debug!(address = &*masked; "Requesting address info");
        let path = format!("addr/{}", encode_segment(address)?);
        self.request(Method::GET, &path, None).await
    }

    /// Returns the unspent outputs of a single address.
    pub async fn address_unspent_transactions(&self, address: &str) -> Result<UnspentTransactions, BitIndexError> {
        let masked = mask_string(address);
        debug!(address = &*masked; "Requesting address utxos");
        let path = format!("addr/{}/utxo", encode_segment(address)?);
        self.request(Method::GET, &path, None).await
    }

    /// Returns a page of transactions touching any of the requested addresses.
    ///
    /// Paging is controlled with `from_index`/`to_index`; `after_height` and
    /// `after_block_hash` restrict the result to newer transactions.
    pub async fn get_transactions(
        &self,
        request: &GetTransactionsRequest,
    ) -> Result<GetTransactionsResponse, BitIndexError> {
        let address_count = request.addresses.len();
        debug!(address_count = address_count; "Requesting transactions for addresses");
        let body = serde_json::to_value(request)?;
        self.request(Method::POST, "addrs/txs", Some(body)).await
    }

    /// Returns the unspent outputs of several addresses at once.
    ///
    /// When the request carries a [`UtxoSort`](crate::models::UtxoSort) it is
    /// sent as the `sort` query parameter and in the body.
    pub async fn get_unspent_transactions(
        &self,
        request: &GetUnspentTransactionsRequest,
    ) -> Result<UnspentTransactions, BitIndexError> {
        let address_count = request.addresses.len();
        debug!(address_count = address_count; "Requesting utxos for addresses");
        let pairs = request
            .sort
            .as_ref()
            .map(|sort| vec![("sort", sort.to_string())])
            .unwrap_or_default();
        let path = with_query("addrs/utxo", pairs);
        let body = serde_json::to_value(request)?;
        self.request(Method::POST, &path, Some(body)).await
    }
}
