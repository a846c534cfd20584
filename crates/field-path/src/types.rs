//! Path types: normalized configured paths and concrete traversal paths.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── FieldPath ─────────────────────────────────────────────────────────────

/// A normalized dotted field path from configuration.
///
/// Parsing splits on `.`, strips a trailing bracketed numeric index from
/// each segment (`choices[0]` → `choices`), trims whitespace, and drops
/// empty segments. Two paths are equal when their normalized segment
/// sequences are equal.
///
/// # Example
///
/// ```
/// use smart_codec_field_path::FieldPath;
///
/// let path = FieldPath::parse("questions[2]. choices .choice");
/// assert_eq!(path.segments(), ["questions", "choices", "choice"]);
/// assert_eq!(path.to_string(), "questions.choices.choice");
/// assert_eq!(path, FieldPath::parse("questions.choices[0].choice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse and normalize a dotted path string.
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .map(|seg| strip_index(seg.trim()).to_string())
            .filter(|seg| !seg.is_empty())
            .collect();
        Self { segments }
    }

    /// The normalized segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True if the path is a single bare field name.
    ///
    /// Bare names match their key at any depth; multi-segment paths match
    /// only their exact nested position.
    pub fn is_bare(&self) -> bool {
        self.segments.len() == 1
    }

    /// True if the path normalized to nothing.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<String> for FieldPath {
    fn from(s: String) -> Self {
        FieldPath::parse(&s)
    }
}

impl From<FieldPath> for String {
    fn from(p: FieldPath) -> Self {
        p.to_string()
    }
}

/// Strip a trailing bracketed numeric index from a path segment.
///
/// `choices[0]` → `choices`; segments without a numeric suffix (including
/// `a[b]` or a dangling `[`) pass through untouched.
pub fn strip_index(segment: &str) -> &str {
    if !segment.ends_with(']') {
        return segment;
    }
    let Some(open) = segment.rfind('[') else {
        return segment;
    };
    let inner = &segment[open + 1..segment.len() - 1];
    if !inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit()) {
        &segment[..open]
    } else {
        segment
    }
}

// ── TreePath ──────────────────────────────────────────────────────────────

/// One step of a concrete traversal path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// A mapping key.
    Key(String),
    /// A sequence index.
    Index(usize),
}

/// The concrete path of the current position during a document walk.
///
/// Grows and shrinks as the walker descends; `keys` exposes the
/// index-stripped view used for matching, while `Display` renders the
/// concrete form (`questions[2].choice`) recorded in transform metadata.
///
/// # Example
///
/// ```
/// use smart_codec_field_path::TreePath;
///
/// let mut path = TreePath::new();
/// path.push_key("questions");
/// path.push_index(2);
/// path.push_key("choice");
/// assert_eq!(path.to_string(), "questions[2].choice");
/// assert_eq!(path.keys().collect::<Vec<_>>(), ["questions", "choice"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePath {
    steps: Vec<PathStep>,
}

impl TreePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.steps.push(PathStep::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.steps.push(PathStep::Index(index));
    }

    pub fn pop(&mut self) {
        self.steps.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The key steps in order, with index steps normalized away.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|step| match step {
            PathStep::Key(k) => Some(k.as_str()),
            PathStep::Index(_) => None,
        })
    }

    /// Number of key steps (the normalized segment count).
    pub fn key_len(&self) -> usize {
        self.keys().count()
    }

    /// True if the normalized view equals the given configured path.
    pub fn matches_normalized(&self, field: &FieldPath) -> bool {
        field.segments().len() == self.key_len()
            && self.keys().zip(field.segments()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Key(k) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(k)?;
                }
                PathStep::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}
