//! Defines the normalized node sequence produced for JSONPath expressions.
use crate::error::JPathError;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::ops::Deref;

/// One selector step of a normalized path expression.
///
/// Serializes as `{ "type": <tag>, "parameter": <payload> }`; the four
/// payload-free kinds omit `parameter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameter", rename_all = "snake_case")]
pub enum Node {
    /// The value the expression is evaluated against (`$`).
    Root,
    /// All children of the current context (`*`, `[*]`).
    Wildcard,
    /// The current context and all of its descendants (`..`).
    RecursiveDescent,
    /// The parent of the current context (`^`).
    Parent,
    /// A single named or indexed child (`.name`, `[2]`, `['key']`).
    Property(Key),
    /// A union of selections, applied in listed order (`[1,2]`, `[:2]`).
    /// Never empty.
    #[serde(deserialize_with = "non_empty_union")]
    Properties(Vec<Selection>),
    /// An expression computing an index or key (`[(@.length-1)]`).
    Script(String),
    /// A predicate expression (`[?(@.isbn)]`).
    FilterScript(String),
    /// A nested path expression (`[$.other.path]`).
    Subpath(String),
    /// A zero-argument function call on the preceding property (`.round()`).
    Fn(String),
}

impl Node {
    pub fn property(key: impl Into<Key>) -> Self {
        Node::Property(key.into())
    }

    /// Builds a union from evaluator-side selections. The caller must pass at
    /// least one; `normalize` never produces an empty union.
    pub fn properties<I, S>(selections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selection>,
    {
        Node::Properties(selections.into_iter().map(Into::into).collect())
    }

    /// Normalizes the payload of a `Subpath` node.
    ///
    /// `normalize` never descends into subpaths; this is for the evaluator,
    /// right before it needs the nested selectors. Returns `None` for every
    /// other node kind.
    pub fn expand_subpath(&self) -> Option<Result<NormalizedPath, JPathError>> {
        match self {
            Node::Subpath(text) => Some(crate::parser::normalize(text)),
            _ => None,
        }
    }
}

fn non_empty_union<'de, D>(deserializer: D) -> Result<Vec<Selection>, D::Error>
where
    D: Deserializer<'de>,
{
    let selections = Vec::<Selection>::deserialize(deserializer)?;
    if selections.is_empty() {
        return Err(de::Error::invalid_length(0, &"at least one selection"));
    }
    Ok(selections)
}

/// Payload of a [`Node::Property`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Name(String),
    Index(i64),
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Index(value)
    }
}

/// One entry of a [`Node::Properties`] union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Name(String),
    Index(i64),
    Range(Range),
}

impl Selection {
    /// Converts a scalar entry into a property key, handing ranges back unchanged.
    pub fn into_key(self) -> Result<Key, Selection> {
        match self {
            Selection::Name(name) => Ok(Key::Name(name)),
            Selection::Index(index) => Ok(Key::Index(index)),
            range @ Selection::Range(_) => Err(range),
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::Name(value.to_string())
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Selection::Name(value)
    }
}

impl From<i64> for Selection {
    fn from(value: i64) -> Self {
        Selection::Index(value)
    }
}

impl From<Range> for Selection {
    fn from(value: Range) -> Self {
        Selection::Range(value)
    }
}

/// A `start:end:step` slice. `end: None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: i64,
    pub end: Option<i64>,
    pub step: i64,
}

impl Range {
    pub fn new(start: i64, end: Option<i64>, step: i64) -> Self {
        Self { start, end, step }
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            step: 1,
        }
    }
}

/// The node sequence produced by [`crate::normalize`].
///
/// Read-only once built: it derefs to `[Node]` and can be taken apart with
/// [`NormalizedPath::into_nodes`], but never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedPath {
    nodes: Vec<Node>,
}

impl NormalizedPath {
    pub(crate) fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// True if the expression is anchored at the root value.
    pub fn is_rooted(&self) -> bool {
        matches!(self.nodes.first(), Some(Node::Root))
    }
}

impl Deref for NormalizedPath {
    type Target = [Node];

    fn deref(&self) -> &[Node] {
        &self.nodes
    }
}

impl IntoIterator for NormalizedPath {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a NormalizedPath {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

// --- Token notation ---

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "'{name}'"),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "range({}:", self.start)?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        write!(f, ":{})", self.step)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Name(name) => write!(f, "'{name}'"),
            Selection::Index(index) => write!(f, "{index}"),
            Selection::Range(range) => write!(f, "{range}"),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Root => f.write_str("root"),
            Node::Wildcard => f.write_str("wildcard"),
            Node::RecursiveDescent => f.write_str("recursive_descent"),
            Node::Parent => f.write_str("parent"),
            Node::Property(key) => write!(f, "property({key})"),
            Node::Properties(selections) => {
                f.write_str("properties([")?;
                for (idx, selection) in selections.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{selection}")?;
                }
                f.write_str("])")
            }
            Node::Script(code) => write!(f, "script({code})"),
            Node::FilterScript(code) => write!(f, "filter_script({code})"),
            Node::Subpath(text) => write!(f, "subpath({text})"),
            Node::Fn(name) => write!(f, "fn('{name}')"),
        }
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, node) in self.nodes.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{node}")?;
        }
        f.write_str("]")
    }
}
