//! Extended public key (xpub) endpoints.
//!
//! BitIndex derives and tracks addresses for an xpub server side. The xpub
//! itself is sensitive (it reveals every address of the wallet), so it is
//! always masked in logs.

use log::debug;
use reqwest::Method;

use crate::http::utils::{encode_segment, with_query};
use crate::http::{BitIndexClient, BitIndexError};
use crate::log::mask_string;
use crate::models::{UnspentTransactions, UtxoSort, XpubAddresses, XpubAddressesQuery, XpubBalance, XpubTransactions};

fn xpub_path(xpub: &str, resource: &str) -> Result<String, BitIndexError> {
    Ok(format!("xpub/{}/{}", encode_segment(xpub)?, resource))
}

impl BitIndexClient {
    /// Returns the next unused receive address of `xpub`.
    ///
    /// The API answers with a list, normally holding a single entry. A non-zero
    /// `reserve_secs` reserves the address for that many seconds, so concurrent
    /// callers are handed different addresses.
    pub async fn get_xpub_next_address(&self, xpub: &str, reserve_secs: u64) -> Result<XpubAddresses, BitIndexError> {
        let masked = mask_string(xpub);
        debug!(xpub = &*masked, reserve_secs = reserve_secs; "Requesting next xpub address");
        let mut pairs = Vec::new();
        if reserve_secs > 0 {
            pairs.push(("reserveTime", reserve_secs.to_string()));
        }
        let path = with_query(&xpub_path(xpub, "addrs/next")?, pairs);
        self.request(Method::GET, &path, None).await
    }

    /// Lists derived addresses of `xpub`, filtered and paged by `query`.
    pub async fn get_xpub_addresses(
        &self,
        xpub: &str,
        query: &XpubAddressesQuery,
    ) -> Result<XpubAddresses, BitIndexError> {
        let masked = mask_string(xpub);
        debug!(xpub = &*masked; "Requesting xpub addresses");
        let path = with_query(&xpub_path(xpub, "addrs")?, query.to_pairs());
        self.request(Method::GET, &path, None).await
    }

    pub async fn get_xpub_balance(&self, xpub: &str) -> Result<XpubBalance, BitIndexError> {
        let masked = mask_string(xpub);
        debug!(xpub = &*masked; "Requesting xpub balance");
        self.request(Method::GET, &xpub_path(xpub, "status")?, None).await
    }

    /// Returns the unspent outputs across every derived address of `xpub`.
    pub async fn get_xpub_unspent_transactions(
        &self,
        xpub: &str,
        sort: Option<&UtxoSort>,
    ) -> Result<UnspentTransactions, BitIndexError> {
        let masked = mask_string(xpub);
        debug!(xpub = &*masked; "Requesting xpub utxos");
        let pairs = sort.map(|s| vec![("sort", s.to_string())]).unwrap_or_default();
        let path = with_query(&xpub_path(xpub, "utxo")?, pairs);
        self.request(Method::GET, &path, None).await
    }

    pub async fn get_xpub_transactions(&self, xpub: &str) -> Result<XpubTransactions, BitIndexError> {
        let masked = mask_string(xpub);
        debug!(xpub = &*masked; "Requesting xpub transactions");
        self.request(Method::GET, &xpub_path(xpub, "txs")?, None).await
    }
}
