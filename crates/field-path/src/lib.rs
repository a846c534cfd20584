//! Dotted field-path normalization and matching.
//!
//! Configured paths address positions in a JSON-like document with two
//! styles: a bare field name (`question`) matches that key at any depth,
//! while a multi-segment path (`questions.choices.choice`) matches only the
//! exact nested shape. Sequence indices never participate in matching; they
//! are normalized out of both the configured paths and the concrete
//! traversal path.
//!
//! # Example
//!
//! ```
//! use smart_codec_field_path::{matches, FieldPath, TreePath};
//!
//! let fields = vec![
//!     FieldPath::parse("question"),
//!     FieldPath::parse("choices.choice"),
//! ];
//!
//! // Bare names match anywhere.
//! let mut path = TreePath::new();
//! path.push_key("quiz");
//! path.push_key("question");
//! assert!(matches(&fields, "question", &path));
//!
//! // Nested paths match only their exact position.
//! let mut nested = TreePath::new();
//! nested.push_key("choices");
//! nested.push_index(0);
//! nested.push_key("choice");
//! assert!(matches(&fields, "choice", &nested));
//!
//! let mut top = TreePath::new();
//! top.push_key("choice");
//! assert!(!matches(&fields, "choice", &top));
//! ```

mod types;

pub use types::{strip_index, FieldPath, PathStep, TreePath};

/// Decide whether a key at a concrete position is configured for
/// transformation.
///
/// `concrete` must already include `key` as its last step. A key matches if
/// either:
///
/// - some configured path is a single segment equal to `key` (bare names
///   match at any depth), or
/// - some configured path has the same normalized segment count as
///   `concrete` with every segment equal at the same index.
///
/// Known ambiguity, kept deliberately: a bare rule for a name shadows any
/// more specific nested rule for an unrelated field of the same name at a
/// different depth.
pub fn matches(fields: &[FieldPath], key: &str, concrete: &TreePath) -> bool {
    fields.iter().any(|field| {
        if field.is_bare() {
            field.segments()[0] == key
        } else {
            concrete.matches_normalized(field)
        }
    })
}
