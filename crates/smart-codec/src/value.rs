//! Value Codec — single-scalar base64 encode and strictly validated,
//! multi-layer decode.
//!
//! Encoding is a pure function: strings pass their text through, every
//! other value is serialized to canonical JSON text first, and the UTF-8
//! bytes are base64-encoded. Decoding is the risky direction: plain text
//! can *resemble* base64, so a candidate is accepted only if it survives
//! alphabet/length validation, a printable-ratio check, and an exact
//! re-encode round-trip. Anything that fails degrades to "return the input
//! unchanged" — the decode path never errors.

use base64::alphabet;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;

use crate::types::TransformError;

// ── Heuristic constants ───────────────────────────────────────────────────
//
// Preserved verbatim for compatibility with documents already in storage;
// do not re-derive.

/// Shortest trimmed string considered a base64 candidate.
pub const MIN_ENCODED_LEN: usize = 4;

/// Minimum share of printable characters a decoded candidate must have.
pub const PRINTABLE_RATIO: f64 = 0.85;

/// Maximum number of nested base64 layers unwrapped per value.
pub const MAX_DECODE_LAYERS: usize = 5;

/// Longest all-digit string exempted from encoding (ids, years, scores).
pub const NUMERIC_EXEMPT_MAX_LEN: usize = 10;

/// Prefix tagging an explicitly composite encoded value.
pub const COMPOSITE_TAG: &str = "json64:";

/// Decoder accepting both padded and unpadded input. Trailing-bit checks
/// stay strict; the round-trip comparison requires canonical form anyway.
const PERMISSIVE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// ── Encode ────────────────────────────────────────────────────────────────

/// Encode a value to a base64 string.
///
/// Strings contribute their text as-is; every other value is serialized to
/// canonical JSON first. Encoding an already-base64-looking string layers —
/// [`decode_value`] unwraps layers back.
///
/// # Errors
///
/// Fails only if the value cannot be serialized at all.
///
/// # Example
///
/// ```
/// use smart_codec::value::encode_value;
/// use serde_json::json;
///
/// assert_eq!(encode_value(&json!("Hello")).unwrap(), "SGVsbG8=");
/// assert_eq!(encode_value(&json!(true)).unwrap(), "dHJ1ZQ==");
/// ```
pub fn encode_value(value: &Value) -> Result<String, TransformError> {
    let encoded = match value {
        Value::String(s) => STANDARD.encode(s.as_bytes()),
        other => STANDARD.encode(serde_json::to_string(other)?.as_bytes()),
    };
    Ok(encoded)
}

/// Encode a composite value with the [`COMPOSITE_TAG`] wrapper.
///
/// The tag makes the decode side strip it and always attempt structured
/// parsing of the payload, so mappings survive a full round trip as
/// mappings.
pub fn encode_composite(value: &Value) -> Result<String, TransformError> {
    let payload = STANDARD.encode(serde_json::to_string(value)?.as_bytes());
    Ok(format!("{COMPOSITE_TAG}{payload}"))
}

/// True for all-digit strings short enough to be ids/years/scores.
///
/// The encode direction skips these even at matched fields; round-tripping
/// a small plain number through base64 is useless churn.
pub fn is_short_numeric(s: &str) -> bool {
    !s.is_empty() && s.len() <= NUMERIC_EXEMPT_MAX_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

// ── Decode ────────────────────────────────────────────────────────────────

/// What a decode attempt did.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// The value was recognized as encoded and replaced.
    Changed(Value),
    /// The value was left exactly as supplied.
    Unchanged,
}

/// Decode a value, reversing up to [`MAX_DECODE_LAYERS`] layers of base64.
///
/// Non-strings and anything failing validation come back unchanged; this
/// function cannot fail.
///
/// # Example
///
/// ```
/// use smart_codec::value::decode_value;
/// use serde_json::json;
///
/// assert_eq!(decode_value(&json!("SGVsbG8=")), json!("Hello"));
/// // Unpadded input decodes too.
/// assert_eq!(decode_value(&json!("SGVsbG8")), json!("Hello"));
/// // Plain text that merely resembles base64 is left alone.
/// assert_eq!(decode_value(&json!("2024")), json!("2024"));
/// ```
pub fn decode_value(value: &Value) -> Value {
    match value {
        Value::String(s) => match decode_str(s) {
            DecodeOutcome::Changed(v) => v,
            DecodeOutcome::Unchanged => value.clone(),
        },
        other => other.clone(),
    }
}

/// Decode a string, reporting whether anything changed.
pub fn decode_str(s: &str) -> DecodeOutcome {
    if let Some(payload) = s.strip_prefix(COMPOSITE_TAG) {
        // Tagged composite: unwrap whatever layers are present, then always
        // attempt structured parsing of the result.
        let (text, _) = unwrap_layers(payload);
        return DecodeOutcome::Changed(parse_structured(text));
    }
    let (text, layers) = unwrap_layers(s);
    if layers == 0 {
        return DecodeOutcome::Unchanged;
    }
    DecodeOutcome::Changed(parse_structured(text))
}

/// Peel base64 layers off `s`, stopping at the first layer that fails
/// validation, a layer that decodes to itself, or the layer cap.
fn unwrap_layers(s: &str) -> (String, usize) {
    let mut current = s.to_string();
    let mut layers = 0;
    while layers < MAX_DECODE_LAYERS {
        match try_decode_layer(&current) {
            Some(next) if next != current => {
                current = next;
                layers += 1;
            }
            _ => break,
        }
    }
    (current, layers)
}

/// Attempt to strip exactly one base64 layer, or reject.
fn try_decode_layer(s: &str) -> Option<String> {
    let trimmed = s.trim_end_matches('=');
    if trimmed.len() < MIN_ENCODED_LEN {
        return None;
    }
    if !trimmed.bytes().all(is_base64_byte) {
        return None;
    }
    let bytes = PERMISSIVE.decode(trimmed).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    if !is_mostly_printable(&text) {
        return None;
    }
    // Round-trip check: only genuine base64 re-encodes to the exact input.
    // This is what keeps hashes and short codes from being mangled.
    if STANDARD_NO_PAD.encode(text.as_bytes()) != trimmed {
        return None;
    }
    Some(text)
}

/// Parse the fully unwrapped text as JSON if possible, else keep the string.
fn parse_structured(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}

fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/'
}

/// Printable means tab/newline/CR or codepoint ≥ 32 and ≠ 127. The ratio
/// threshold rejects accidental alphabet matches in short identifiers.
fn is_mostly_printable(text: &str) -> bool {
    let total = text.chars().count();
    if total == 0 {
        return false;
    }
    let printable = text
        .chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || (c as u32 >= 32 && c as u32 != 127))
        .count();
    printable as f64 / total as f64 >= PRINTABLE_RATIO
}
