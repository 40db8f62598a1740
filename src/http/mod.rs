//! HTTP client module for the BitIndex blockchain-indexing API.
//!
//! This module provides the transport every endpoint goes through: base URL
//! selection by network, the `api_key` header, exponential-backoff retries,
//! JSON decoding and status checking.
//!
//! # Architecture
//!
//! - [`BitIndexClient`] - Public client, one method per API endpoint
//! - [`BitIndexError`] - Error types for client operations
//! - [`LastRequest`] - Record of the most recent request, for debugging
//! - [`ApiResponse`] - Hook letting response types report errors embedded in
//!   a `200 OK` body
//!
//! # Error Handling
//!
//! Any status other than `200 OK` becomes an error carrying the message from
//! the API's error document, or the raw body when it has none. Transient
//! failures (connect errors, timeouts, 5xx, 408, 429) are retried before the
//! error is surfaced.

mod bitindex_client;
mod error;
mod http_client;
mod types;
pub(crate) mod utils;

pub use bitindex_client::BitIndexClient;
pub use error::{BitIndexError, BitIndexResult};
pub use types::{ApiResponse, ErrorBody, ErrorMessage, LastRequest};
