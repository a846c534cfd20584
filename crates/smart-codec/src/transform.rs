//! Tree Transformer — the recursive walker over a document.
//!
//! Walks a [`Value`] tree with a growing concrete path, applying the Value
//! Codec at configured positions and leaving everything else untouched. The
//! output always has exactly the input's shape (same keys, same sequence
//! lengths); only leaf values at matched positions change. The input is
//! never mutated.

use serde_json::{Map, Value};
use smart_codec_field_path::{matches, FieldPath, TreePath};

use crate::types::{Direction, TransformConfig, TransformError};
use crate::value::{
    decode_str, decode_value, encode_composite, encode_value, is_short_numeric, DecodeOutcome,
};

/// Output of one transformer pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    /// The rebuilt document.
    pub doc: Value,
    /// Concrete paths (with sequence indices) that changed, in walk order.
    pub transformed_fields: Vec<String>,
}

/// Run one pass over `doc` in the given direction.
///
/// With no configured fields the document comes back unchanged and the
/// touched-path list is empty.
///
/// # Errors
///
/// Only the encode direction can fail, and only on serialization failure.
///
/// # Example
///
/// ```
/// use smart_codec::{transform, Direction, TransformConfig};
/// use serde_json::json;
///
/// let config = TransformConfig {
///     fields: vec!["content".to_string()],
///     ..Default::default()
/// };
/// let doc = json!({"id": 7, "content": "Should be encoded"});
/// let out = transform(&doc, &config, Direction::Encode).unwrap();
/// assert_eq!(out.doc["id"], json!(7));
/// assert_ne!(out.doc["content"], doc["content"]);
/// assert_eq!(out.transformed_fields, ["content"]);
/// ```
pub fn transform(
    doc: &Value,
    config: &TransformConfig,
    direction: Direction,
) -> Result<Transformed, TransformError> {
    let fields: Vec<FieldPath> = config
        .fields
        .iter()
        .map(|f| FieldPath::parse(f))
        .filter(|f| !f.is_empty())
        .collect();
    let exclude: Vec<FieldPath> = config.exclude.iter().map(|e| FieldPath::parse(e)).collect();

    let mut walker = Walker {
        fields: &fields,
        exclude_keys: &config.exclude,
        exclude_paths: &exclude,
        deep: config.deep,
        direction,
        touched: Vec::new(),
    };
    let mut path = TreePath::new();
    let doc = walker.walk(doc, &mut path)?;
    Ok(Transformed {
        doc,
        transformed_fields: walker.touched,
    })
}

struct Walker<'a> {
    fields: &'a [FieldPath],
    exclude_keys: &'a [String],
    exclude_paths: &'a [FieldPath],
    deep: bool,
    direction: Direction,
    touched: Vec<String>,
}

impl Walker<'_> {
    fn walk(&mut self, value: &Value, path: &mut TreePath) -> Result<Value, TransformError> {
        match value {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    path.push_index(i);
                    let next = self.walk(item, path);
                    path.pop();
                    out.push(next?);
                }
                Ok(Value::Array(out))
            }
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, val) in map {
                    path.push_key(key.clone());
                    let next = self.visit_entry(key, val, path);
                    path.pop();
                    out.insert(key.clone(), next?);
                }
                Ok(Value::Object(out))
            }
            // Scalars reached without a key context pass through.
            scalar => Ok(scalar.clone()),
        }
    }

    /// One key/value pair; `path` already ends with `key`.
    fn visit_entry(
        &mut self,
        key: &str,
        value: &Value,
        path: &mut TreePath,
    ) -> Result<Value, TransformError> {
        // Exclusion is a hard stop, checked before inclusion.
        if self.is_excluded(key, path) {
            return Ok(value.clone());
        }
        if matches(self.fields, key, path) {
            return self.apply_matched(value, path);
        }
        if self.deep && (value.is_object() || value.is_array()) {
            return self.walk(value, path);
        }
        Ok(value.clone())
    }

    fn is_excluded(&self, key: &str, path: &TreePath) -> bool {
        self.exclude_keys.iter().any(|k| k == key)
            || self
                .exclude_paths
                .iter()
                .any(|p| path.matches_normalized(p))
    }

    /// A matched field: sequences transform string elements independently
    /// (recursing into composite elements); everything else goes through
    /// the Value Codec directly.
    fn apply_matched(
        &mut self,
        value: &Value,
        path: &mut TreePath,
    ) -> Result<Value, TransformError> {
        match value {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    path.push_index(i);
                    let next = match item {
                        Value::String(_) => self.apply_leaf(item, path),
                        Value::Array(_) | Value::Object(_) => self.walk(item, path),
                        other => Ok(other.clone()),
                    };
                    path.pop();
                    out.push(next?);
                }
                Ok(Value::Array(out))
            }
            other => self.apply_leaf(other, path),
        }
    }

    fn apply_leaf(&mut self, value: &Value, path: &TreePath) -> Result<Value, TransformError> {
        match self.direction {
            Direction::Encode => self.encode_leaf(value, path),
            Direction::Decode => Ok(self.decode_leaf(value, path)),
        }
    }

    fn encode_leaf(&mut self, value: &Value, path: &TreePath) -> Result<Value, TransformError> {
        let encoded = match value {
            Value::Null => return Ok(Value::Null),
            // Short plain numbers (ids, years, scores) are not worth a
            // base64 round trip, even when their field matches.
            Value::String(s) if is_short_numeric(s) => return Ok(value.clone()),
            Value::Number(n) if is_short_numeric(&n.to_string()) => return Ok(value.clone()),
            Value::Object(_) => encode_composite(value)?,
            other => encode_value(other)?,
        };
        self.touched.push(path.to_string());
        Ok(Value::String(encoded))
    }

    /// Decode has no numeric exemption: the Value Codec's validation makes
    /// it a safe no-op on anything that is not actually encoded.
    fn decode_leaf(&mut self, value: &Value, path: &TreePath) -> Value {
        match value {
            Value::String(s) => match decode_str(s) {
                DecodeOutcome::Changed(v) => {
                    self.touched.push(path.to_string());
                    v
                }
                DecodeOutcome::Unchanged => value.clone(),
            },
            other => decode_value(other),
        }
    }
}
