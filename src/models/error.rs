use serde::{Deserialize, Serialize};

/// Error fields the API embeds in most response documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiInternalError {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "message", skip_serializing_if = "String::is_empty")]
    pub error_message: String,
    #[serde(rename = "name", skip_serializing_if = "String::is_empty")]
    pub error_name: String,
}

/// Error document returned by the broadcast endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub message: ApiErrorMessage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorMessage {
    #[serde(rename = "code")]
    pub error_code: i64,
    #[serde(rename = "message")]
    pub error_message: String,
}
