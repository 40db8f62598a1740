// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::BitIndexError;
use crate::models::{ApiErrorResponse, ApiInternalError};

/// Snapshot of the most recent request issued by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct LastRequest {
    pub method: Method,
    pub url: String,
    /// The JSON body sent with `POST`/`PUT` requests.
    pub post_data: Option<String>,
    pub status_code: StatusCode,
    pub latency: Duration,
}

/// A decoded response body that may carry an error reported by the API even
/// though the HTTP status was `200 OK`.
pub trait ApiResponse: DeserializeOwned {
    /// Returns the embedded error message, if the payload reports one.
    fn embedded_error(&self) -> Option<String> {
        None
    }
}

impl<T: DeserializeOwned> ApiResponse for Vec<T> {}

/// Untyped bodies from [`BitIndexClient::request`](crate::http::BitIndexClient::request).
impl ApiResponse for serde_json::Value {}

/// Error document returned by the API alongside non-200 statuses.
///
/// Most endpoints send `{"message": "...", "name": "...", "errors": [...]}`;
/// the broadcast endpoint nests the message as `{"code": n, "message": "..."}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub errors: Vec<String>,
    pub message: Option<ErrorMessage>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    Coded {
        #[serde(default)]
        code: i64,
        #[serde(default)]
        message: String,
    },
}

impl ErrorBody {
    /// Converts the error document into the most specific [`BitIndexError`].
    pub fn into_error(self, status: StatusCode, raw_body: &str) -> BitIndexError {
        match self.message {
            Some(ErrorMessage::Coded { code, message }) => BitIndexError::Broadcast {
                status,
                code,
                message: if message.is_empty() { self.errors.join(", ") } else { message },
            },
            Some(ErrorMessage::Text(message)) if !message.is_empty() => BitIndexError::Api { status, message },
            _ if !self.errors.is_empty() => BitIndexError::Api {
                status,
                message: self.errors.join(", "),
            },
            _ => BitIndexError::ServerError {
                status,
                body: raw_body.to_string(),
            },
        }
    }
}

/// Maps a non-200 response body to an error.
pub(crate) fn error_from_body(status: StatusCode, body: &str) -> BitIndexError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.into_error(status, body),
        Err(_) => BitIndexError::ServerError {
            status,
            body: body.to_string(),
        },
    }
}

impl ApiInternalError {
    pub(crate) fn message(&self) -> Option<String> {
        if !self.error_message.is_empty() {
            Some(self.error_message.clone())
        } else if !self.errors.is_empty() {
            Some(self.errors.join(", "))
        } else {
            None
        }
    }
}

impl ApiErrorResponse {
    pub(crate) fn message(&self) -> Option<String> {
        if !self.message.error_message.is_empty() {
            Some(self.message.error_message.clone())
        } else if !self.errors.is_empty() {
            Some(self.errors.join(", "))
        } else {
            None
        }
    }
}
