//! Helpers for building endpoint paths and validating request input.
//!
//! Caller-supplied identifiers (addresses, txids, block hashes, xpubs) end up
//! as path segments, so they are percent-encoded before being joined onto the
//! network base URL. Query strings are assembled with the same encoder used
//! for HTML forms, with keys emitted in sorted order.

use url::form_urlencoded;

use super::error::BitIndexError;

/// Characters that must not appear unescaped inside a single path segment.
/// URL parsing treats `\` as `/` for http(s) URLs.
const SEGMENT_RESERVED: &[char] = &['/', '\\', '?', '#', '%', ' '];

/// Percent-encodes a single path segment.
///
/// Base58 addresses, hex hashes and xpubs pass through untouched; anything that
/// would change the shape of the path is escaped.
///
/// Empty segments and dot segments (`.`, `..`) are rejected: URL resolution
/// removes dot segments even when percent-encoded, so they cannot address a
/// resource.
pub fn encode_segment(segment: &str) -> Result<String, BitIndexError> {
    if segment.is_empty() || segment == "." || segment == ".." {
        return Err(BitIndexError::InvalidPathSegment(segment.to_string()));
    }
    if !segment.contains(SEGMENT_RESERVED) {
        return Ok(segment.to_string());
    }
    Ok(form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20"))
}

/// Appends `key=value` pairs to `path` as a query string.
///
/// Pairs are sorted by key so that the same parameters always produce the
/// same URL. Nothing is appended when `pairs` is empty.
pub fn with_query(path: &str, mut pairs: Vec<(&str, String)>) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    format!("{}?{}", path, serializer.finish())
}

/// Validates a raw transaction before it is broadcast.
///
/// The API expects the serialized transaction as a hex string. Rejecting bad
/// input locally avoids a round-trip (and a retry cycle) for a request that
/// can never succeed.
pub fn check_raw_transaction(raw_tx: &str) -> Result<(), BitIndexError> {
    let raw_tx = raw_tx.trim();
    if raw_tx.is_empty() {
        return Err(BitIndexError::InvalidRawTransaction("transaction is empty".to_string()));
    }
    hex::decode(raw_tx).map_err(|e| BitIndexError::InvalidRawTransaction(e.to_string()))?;
    Ok(())
}
