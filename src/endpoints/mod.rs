//! Endpoint wrappers, one file per API resource.
//!
//! Each file adds methods to [`BitIndexClient`](crate::http::BitIndexClient)
//! that build the resource path, hand it to the shared transport and return
//! the decoded model.

mod address;
mod block;
mod chain;
mod transaction;
mod webhook;
mod xpub;
