//! Config and result types — the externally visible contract of the codec.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

/// Fatal transform failure.
///
/// Only the encode path can fail, and only when a value cannot be
/// serialized at all. Every decode-path anomaly (invalid base64, failed
/// printability or round-trip checks) is a deliberate no-op, not an error.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("SERIALIZE: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ── Direction ─────────────────────────────────────────────────────────────

/// Which way a transformer pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

// ── TransformConfig ───────────────────────────────────────────────────────

/// Configuration for one transformer pass.
///
/// `fields` lists the dotted paths eligible for transformation (empty means
/// transform nothing). `exclude` lists exact key names or full paths that
/// always pass through verbatim, overriding `fields`. `deep` enables
/// recursion into unmatched nested containers. The `decode_request` /
/// `encode_response` toggles are carried for the HTTP interceptor layer and
/// are not interpreted by the core.
///
/// # Example
///
/// ```
/// use smart_codec::TransformConfig;
///
/// let config: TransformConfig = serde_json::from_str(
///     r#"{"fields": ["content"], "exclude": ["id"], "deep": true}"#,
/// ).unwrap();
/// assert_eq!(config.fields, ["content"]);
/// assert!(config.deep);
/// assert!(!config.decode_request);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformConfig {
    pub fields: Vec<String>,
    pub exclude: Vec<String>,
    pub deep: bool,
    pub decode_request: bool,
    pub encode_response: bool,
}

impl TransformConfig {
    /// The "as stored" preset: deep traversal over the given field list,
    /// both interceptor directions enabled.
    pub fn storage<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
            deep: true,
            decode_request: true,
            encode_response: true,
        }
    }

    /// The "as exposed over the API" preset: like [`storage`](Self::storage)
    /// but with record-metadata keys excluded.
    pub fn api<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: vec![
                "id".to_string(),
                "createdAt".to_string(),
                "updatedAt".to_string(),
            ],
            ..Self::storage(fields)
        }
    }
}

// ── TransformResult ───────────────────────────────────────────────────────

/// Outcome of one session pass: the transformed document plus metadata.
///
/// `transformed_fields` lists every concrete path (with concrete sequence
/// indices) that actually changed, in traversal order. Sizes are serialized
/// JSON byte lengths; `timestamp` is Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    pub data: Value,
    pub transformed_fields: Vec<String>,
    pub original_size: usize,
    pub transformed_size: usize,
    pub timestamp: i64,
}

/// Aggregated outcome of a batch pass over a sequence of documents.
///
/// Each document is transformed independently with the same config;
/// `transformed_fields` entries are prefixed with the element index
/// (`[3].content`) and sizes are summed across elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTransformResult {
    pub data: Vec<Value>,
    pub transformed_fields: Vec<String>,
    pub original_size: usize,
    pub transformed_size: usize,
    pub timestamp: i64,
}
