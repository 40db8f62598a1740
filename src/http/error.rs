//! Error types for BitIndex client operations.
//!
//! This module defines the [`BitIndexError`] enum which encompasses all possible
//! failure modes when talking to the BitIndex API.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Errors that can occur while calling the BitIndex API.
///
/// # Error Categories
///
/// - **Network errors**: [`RequestFailed`](BitIndexError::RequestFailed),
///   [`MiddlewareError`](BitIndexError::MiddlewareError)
/// - **API errors**: [`Api`](BitIndexError::Api),
///   [`Broadcast`](BitIndexError::Broadcast),
///   [`ServerError`](BitIndexError::ServerError)
/// - **Client errors**: [`MissingApiKey`](BitIndexError::MissingApiKey),
///   [`UrlError`](BitIndexError::UrlError),
///   [`UnsupportedMethod`](BitIndexError::UnsupportedMethod),
///   [`JsonError`](BitIndexError::JsonError),
///   [`InvalidRawTransaction`](BitIndexError::InvalidRawTransaction),
///   [`InvalidPathSegment`](BitIndexError::InvalidPathSegment)
///
/// # Example
///
/// ```rust,no_run
/// use bitindex::http::BitIndexError;
///
/// fn handle_error(err: BitIndexError) {
///     match err {
///         BitIndexError::Api { status, message } => {
///             eprintln!("BitIndex returned {}: {}", status, message);
///         }
///         BitIndexError::RequestFailed(e) => {
///             eprintln!("Network error: {}", e);
///         }
///         _ => eprintln!("Other error: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum BitIndexError {
    /// No API key was configured. Every BitIndex endpoint requires one.
    #[error("missing required api key")]
    MissingApiKey,

    /// The HTTP request failed due to a network or connection error.
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// An error occurred in the retry middleware layer.
    ///
    /// This may indicate that all retry attempts have been exhausted.
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),

    /// The API reported a failure with a readable message, either through a
    /// non-200 status or an error embedded in a 200 payload.
    #[error("error: {message} (status {status})")]
    Api {
        /// The HTTP status code returned by the API.
        status: StatusCode,
        /// The message extracted from the error document.
        message: String,
    },

    /// A transaction broadcast was rejected by the network.
    #[error("broadcast rejected {code}: {message} (status {status})")]
    Broadcast {
        status: StatusCode,
        /// Node reject code, e.g. `26` for policy failures.
        code: i64,
        message: String,
    },

    /// The API returned a non-200 status whose body carried no error message.
    #[error("Server error {status}: {body}")]
    ServerError {
        /// The HTTP status code returned by the server.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// Failed to build the request URL from the base URL and endpoint.
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Only `GET`, `POST` and `PUT` are used by the API.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(Method),

    /// Failed to serialize the request body or deserialize the response.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The raw transaction handed to `send_transaction` is not valid hex.
    #[error("Invalid raw transaction: {0}")]
    InvalidRawTransaction(String),

    /// An identifier that cannot be used as a path segment (empty, `.` or `..`).
    #[error("Invalid path segment: {0:?}")]
    InvalidPathSegment(String),
}

impl BitIndexError {
    /// Returns the HTTP status for errors that came back from the API.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BitIndexError::Api { status, .. }
            | BitIndexError::Broadcast { status, .. }
            | BitIndexError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type BitIndexResult<T> = Result<T, BitIndexError>;
