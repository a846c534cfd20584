//! Selective field-transformation codec ("smart encode/decode").
//!
//! Walks an arbitrarily shaped JSON document, base64-encodes the fields a
//! [`TransformConfig`] marks for obscuring, and reverses the transformation
//! later with strict validation so that no legitimate document is corrupted
//! and no incidental base64-looking text is mistakenly decoded.
//!
//! This is obfuscation for storage and transit, not confidentiality: base64
//! is trivially reversible by design.
//!
//! # Example
//!
//! ```
//! use smart_codec::{smart_decode, smart_encode, TransformConfig};
//! use serde_json::json;
//!
//! let config = TransformConfig::storage(["learnerTextResponse", "learnerChoices"]);
//! let doc = json!({
//!     "id": 123,
//!     "learnerTextResponse": "<p>Test answer</p>",
//!     "learnerChoices": ["Option A", "Option B"],
//! });
//!
//! let encoded = smart_encode(&doc, &config).unwrap();
//! assert_eq!(encoded.data["id"], json!(123));
//! assert!(encoded.data["learnerTextResponse"].is_string());
//! assert_eq!(
//!     encoded.transformed_fields,
//!     ["learnerTextResponse", "learnerChoices[0]", "learnerChoices[1]"],
//! );
//!
//! let decoded = smart_decode(&encoded.data, &config).unwrap();
//! assert_eq!(decoded.data, doc);
//! ```
//!
//! # Module map
//!
//! - [`value`] — single-scalar base64 encode/decode with multi-layer
//!   unwrapping and round-trip validation;
//! - [`transform`](mod@transform) — the recursive tree walker;
//! - [`session`] — `smart_encode`/`smart_decode` façade, presets, batch
//!   variants and telemetry;
//! - path matching lives in the `smart-codec-field-path` crate, re-exported
//!   here as [`FieldPath`] and [`TreePath`].
//!
//! Every call is a pure, synchronous function of its inputs: no shared
//! state, no I/O, safe to invoke concurrently without locking. Callers
//! processing adversarial documents should bound size and nesting depth
//! themselves; the codec bounds only its own decode layering.

pub mod session;
pub mod transform;
pub mod types;
pub mod value;

pub use session::{smart_decode, smart_decode_batch, smart_encode, smart_encode_batch};
pub use transform::{transform, Transformed};
pub use types::{BatchTransformResult, Direction, TransformConfig, TransformError, TransformResult};
pub use value::{decode_value, encode_value, DecodeOutcome};

pub use smart_codec_field_path::{FieldPath, TreePath};
