//! Transform Session — single-pass façade over the Tree Transformer.
//!
//! `smart_encode` / `smart_decode` run one pass and wrap the result with
//! telemetry: serialized byte sizes before and after, the ordered list of
//! concrete field paths touched, and a millisecond timestamp. Batch
//! variants apply the same configuration independently to each element of a
//! sequence and aggregate the metadata.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::transform::transform;
use crate::types::{BatchTransformResult, Direction, TransformConfig, TransformError, TransformResult};

/// Encode every configured field of `doc`, collecting metadata.
///
/// # Errors
///
/// Fails only on serialization failure, which is fatal for the call.
///
/// # Example
///
/// ```
/// use smart_codec::{smart_encode, smart_decode, TransformConfig};
/// use serde_json::json;
///
/// let config = TransformConfig::storage(["learnerTextResponse"]);
/// let doc = json!({"learnerTextResponse": "<p>Test answer</p>"});
///
/// let encoded = smart_encode(&doc, &config).unwrap();
/// assert_eq!(encoded.transformed_fields, ["learnerTextResponse"]);
///
/// let decoded = smart_decode(&encoded.data, &config).unwrap();
/// assert_eq!(decoded.data, doc);
/// ```
pub fn smart_encode(
    doc: &Value,
    config: &TransformConfig,
) -> Result<TransformResult, TransformError> {
    run(doc, config, Direction::Encode)
}

/// Decode every configured field of `doc`, collecting metadata.
///
/// Fields that are not actually encoded pass through unchanged and are not
/// reported as transformed.
pub fn smart_decode(
    doc: &Value,
    config: &TransformConfig,
) -> Result<TransformResult, TransformError> {
    run(doc, config, Direction::Decode)
}

fn run(
    doc: &Value,
    config: &TransformConfig,
    direction: Direction,
) -> Result<TransformResult, TransformError> {
    let original_size = serde_json::to_vec(doc)?.len();
    let out = transform(doc, config, direction)?;
    let transformed_size = serde_json::to_vec(&out.doc)?.len();
    debug!(
        ?direction,
        touched = out.transformed_fields.len(),
        original_size,
        transformed_size,
        "smart transform pass"
    );
    Ok(TransformResult {
        data: out.doc,
        transformed_fields: out.transformed_fields,
        original_size,
        transformed_size,
        timestamp: Utc::now().timestamp_millis(),
    })
}

/// Encode each document of a batch independently with the same config.
pub fn smart_encode_batch(
    docs: &[Value],
    config: &TransformConfig,
) -> Result<BatchTransformResult, TransformError> {
    run_batch(docs, config, Direction::Encode)
}

/// Decode each document of a batch independently with the same config.
pub fn smart_decode_batch(
    docs: &[Value],
    config: &TransformConfig,
) -> Result<BatchTransformResult, TransformError> {
    run_batch(docs, config, Direction::Decode)
}

fn run_batch(
    docs: &[Value],
    config: &TransformConfig,
    direction: Direction,
) -> Result<BatchTransformResult, TransformError> {
    let mut data = Vec::with_capacity(docs.len());
    let mut transformed_fields = Vec::new();
    let mut original_size = 0;
    let mut transformed_size = 0;
    for (i, doc) in docs.iter().enumerate() {
        let item = run(doc, config, direction)?;
        transformed_fields.extend(
            item.transformed_fields
                .into_iter()
                .map(|path| format!("[{i}].{path}")),
        );
        original_size += item.original_size;
        transformed_size += item.transformed_size;
        data.push(item.data);
    }
    debug!(
        ?direction,
        items = docs.len(),
        touched = transformed_fields.len(),
        "smart transform batch"
    );
    Ok(BatchTransformResult {
        data,
        transformed_fields,
        original_size,
        transformed_size,
        timestamp: Utc::now().timestamp_millis(),
    })
}
