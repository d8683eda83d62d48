//! Document tree representation.
//!
//! A document is a tree of [`Node`]s built from three shapes: scalars,
//! ordered sequences, and keyed mappings. Containers share their storage
//! behind an `Arc`, so cloning a node is cheap and every mutator returns a
//! new container instead of touching the one it was called on. A tree handle
//! therefore behaves as a value: writes through one handle are never observed
//! through another.
//!
//! # Example
//!
//! ```
//! use yamlpatch::document::node::{Mapping, Node, Sequence};
//!
//! let seq = Sequence::from(vec![Node::from(1i64), Node::from(2i64)]);
//! let longer = seq.append(Node::from(3i64));
//!
//! assert_eq!(seq.len(), 2); // the original is untouched
//! assert_eq!(longer.len(), 3);
//!
//! let map = Mapping::single("name", Node::from("web"));
//! assert!(map.matches("name", "web"));
//! ```

use indexmap::IndexMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use thiserror::Error;

/// A leaf value.
#[derive(Debug, Clone)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

// Floats compare by bit pattern so scalars can serve as mapping keys.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Integer(a), Scalar::Integer(b)) => a == b,
            (Scalar::Unsigned(a), Scalar::Unsigned(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a.to_bits() == b.to_bits(),
            (Scalar::String(a), Scalar::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Null => {}
            Scalar::Bool(b) => b.hash(state),
            Scalar::Integer(i) => i.hash(state),
            Scalar::Unsigned(u) => u.hash(state),
            Scalar::Float(f) => f.to_bits().hash(state),
            Scalar::String(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Unsigned(u) => write!(f, "{}", u),
            Scalar::Float(fl) => write!(f, "{}", fl),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

/// The shape of a node, used for type checks and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

impl NodeKind {
    /// Returns the kind name preceded by its article ("a map", "an array").
    pub fn with_article(&self) -> &'static str {
        match self {
            NodeKind::Scalar => "a scalar",
            NodeKind::Sequence => "an array",
            NodeKind::Mapping => "a map",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "array",
            NodeKind::Mapping => "map",
        };
        write!(f, "{}", name)
    }
}

/// An ordered list of nodes with copy-on-write storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    items: Arc<Vec<Node>>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Node> {
        self.items.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    /// Returns a copy with `node` spliced in at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx > len`.
    pub fn insert_at(&self, idx: usize, node: Node) -> Sequence {
        self.updated(|items| items.insert(idx, node))
    }

    /// Returns a copy with the element at `idx` replaced by `node`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len`.
    pub fn replace_at(&self, idx: usize, node: Node) -> Sequence {
        self.updated(|items| items[idx] = node)
    }

    /// Returns a copy with `node` added after the last element.
    pub fn append(&self, node: Node) -> Sequence {
        self.updated(|items| items.push(node))
    }

    /// Returns a copy without the element at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len`.
    pub fn remove_at(&self, idx: usize) -> Sequence {
        self.updated(|items| {
            items.remove(idx);
        })
    }

    /// Calls `visit` with every element and its position.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Node, usize),
    {
        for (idx, item) in self.items.iter().enumerate() {
            visit(item, idx);
        }
    }

    fn updated<F>(&self, edit: F) -> Sequence
    where
        F: FnOnce(&mut Vec<Node>),
    {
        let mut items = Arc::clone(&self.items);
        edit(Arc::make_mut(&mut items));
        Sequence { items }
    }
}

impl std::ops::Index<usize> for Sequence {
    type Output = Node;

    fn index(&self, idx: usize) -> &Node {
        &self.items[idx]
    }
}

impl From<Vec<Node>> for Sequence {
    fn from(items: Vec<Node>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }
}

impl FromIterator<Node> for Sequence {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// A keyed collection of nodes with copy-on-write storage.
///
/// Keys are scalars so documents with non-string keys survive a patch, but
/// only string keys are visible to lookups and key listings. Entry order is
/// preserved for output; equality ignores it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Arc<IndexMap<Scalar, Node>>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapping holding one string entry.
    pub fn single(key: &str, value: Node) -> Self {
        let mut entries = IndexMap::new();
        entries.insert(Scalar::String(key.to_string()), value);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Number of entries, including ones with non-string keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(&Scalar::String(key.to_string()))
    }

    /// Returns true if `key` holds the string scalar `value`.
    pub fn matches(&self, key: &str, value: &str) -> bool {
        matches!(
            self.get(key),
            Some(Node::Scalar(Scalar::String(s))) if s == value
        )
    }

    /// Returns a copy with `key` set to `node`. An existing key keeps its position.
    pub fn replace(&self, key: &str, node: Node) -> Mapping {
        self.updated(|entries| {
            entries.insert(Scalar::String(key.to_string()), node);
        })
    }

    /// Returns a copy without `key`.
    pub fn remove(&self, key: &str) -> Mapping {
        self.updated(|entries| {
            entries.shift_remove(&Scalar::String(key.to_string()));
        })
    }

    /// Calls `visit` with every string key, in entry order.
    pub fn for_each_key<F>(&self, mut visit: F)
    where
        F: FnMut(&str),
    {
        for key in self.entries.keys().filter_map(Scalar::as_str) {
            visit(key);
        }
    }

    /// Iterates over every entry, including non-string keys.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Scalar, Node> {
        self.entries.iter()
    }

    fn updated<F>(&self, edit: F) -> Mapping
    where
        F: FnOnce(&mut IndexMap<Scalar, Node>),
    {
        let mut entries = Arc::clone(&self.entries);
        edit(Arc::make_mut(&mut entries));
        Mapping { entries }
    }
}

impl FromIterator<(Scalar, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Scalar, Node)>>(iter: I) -> Self {
        Self {
            entries: Arc::new(iter.into_iter().collect()),
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Sequence),
    Mapping(Mapping),
}

/// A native value that has no counterpart in the document tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CloneError {
    #[error("unexpected node kind 'tagged' with tag '{tag}'")]
    Tagged { tag: String },

    #[error("unexpected node kind '{kind}' used as a map key")]
    ComplexKey { kind: NodeKind },
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn empty_mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    pub fn empty_sequence() -> Self {
        Node::Sequence(Sequence::new())
    }

    /// A mapping holding the single string entry `key: value`.
    pub fn single_key_mapping(key: &str, value: &str) -> Self {
        Node::Mapping(Mapping::single(key, Node::from(value)))
    }

    /// Deep-copies a native YAML value into a fresh tree.
    ///
    /// Fails on values the tree cannot represent: custom-tagged values and
    /// container keys.
    pub fn from_native(value: &serde_yaml::Value) -> Result<Node, CloneError> {
        convert_native(value, false)
    }

    /// Converts the tree back into a native YAML value.
    pub fn to_native(&self) -> serde_yaml::Value {
        use serde_yaml::Value;

        match self {
            Node::Scalar(Scalar::Null) => Value::Null,
            Node::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            Node::Scalar(Scalar::Integer(i)) => Value::Number((*i).into()),
            Node::Scalar(Scalar::Unsigned(u)) => Value::Number((*u).into()),
            Node::Scalar(Scalar::Float(f)) => Value::Number((*f).into()),
            Node::Scalar(Scalar::String(s)) => Value::String(s.clone()),
            Node::Sequence(seq) => Value::Sequence(seq.iter().map(Node::to_native).collect()),
            Node::Mapping(map) => Value::Mapping(
                map.iter()
                    .map(|(k, v)| (Node::Scalar(k.clone()).to_native(), v.to_native()))
                    .collect(),
            ),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Mapping(_) => NodeKind::Mapping,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

/// Shared conversion for the strict deep copy and the lenient document reader.
///
/// With `unwrap_tags` set, tagged values are reduced to their inner value.
pub(crate) fn convert_native(
    value: &serde_yaml::Value,
    unwrap_tags: bool,
) -> Result<Node, CloneError> {
    use serde_yaml::Value;

    let node = match value {
        Value::Null => Node::null(),
        Value::Bool(b) => Node::from(*b),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Node::from(i),
            (None, Some(u)) => Node::Scalar(Scalar::Unsigned(u)),
            (None, None) => Node::from(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Node::from(s.as_str()),
        Value::Sequence(items) => Node::Sequence(
            items
                .iter()
                .map(|item| convert_native(item, unwrap_tags))
                .collect::<Result<Sequence, _>>()?,
        ),
        Value::Mapping(entries) => Node::Mapping(
            entries
                .iter()
                .map(|(k, v)| {
                    let key = match convert_native(k, unwrap_tags)? {
                        Node::Scalar(scalar) => scalar,
                        other => return Err(CloneError::ComplexKey { kind: other.kind() }),
                    };
                    Ok((key, convert_native(v, unwrap_tags)?))
                })
                .collect::<Result<Mapping, _>>()?,
        ),
        Value::Tagged(tagged) if unwrap_tags => convert_native(&tagged.value, unwrap_tags)?,
        Value::Tagged(tagged) => {
            return Err(CloneError::Tagged {
                tag: tagged.tag.to_string(),
            })
        }
    };
    Ok(node)
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<Sequence> for Node {
    fn from(seq: Sequence) -> Self {
        Node::Sequence(seq)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(map)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(Scalar::String(s))
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Scalar(Scalar::Integer(i))
    }
}

impl From<u64> for Node {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Node::Scalar(Scalar::Integer(i)),
            Err(_) => Node::Scalar(Scalar::Unsigned(u)),
        }
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Scalar(Scalar::Float(f))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: &[i64]) -> Sequence {
        values.iter().map(|v| Node::from(*v)).collect()
    }

    #[test]
    fn test_sequence_mutators_leave_original_untouched() {
        let original = seq(&[1, 2, 3]);

        assert_eq!(original.insert_at(0, Node::from(0i64)), seq(&[0, 1, 2, 3]));
        assert_eq!(original.replace_at(1, Node::from(9i64)), seq(&[1, 9, 3]));
        assert_eq!(original.append(Node::from(4i64)), seq(&[1, 2, 3, 4]));
        assert_eq!(original.remove_at(2), seq(&[1, 2]));

        assert_eq!(original, seq(&[1, 2, 3]));
    }

    #[test]
    fn test_sequence_for_each_visits_in_order() {
        let mut seen = Vec::new();
        seq(&[5, 6]).for_each(|node, idx| seen.push((node.clone(), idx)));
        assert_eq!(seen, vec![(Node::from(5i64), 0), (Node::from(6i64), 1)]);
    }

    #[test]
    fn test_mapping_replace_keeps_position() {
        let map = Mapping::single("a", Node::from(1i64))
            .replace("b", Node::from(2i64))
            .replace("a", Node::from(3i64));

        let mut keys = Vec::new();
        map.for_each_key(|k| keys.push(k.to_string()));
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Node::from(3i64)));
    }

    #[test]
    fn test_mapping_remove_leaves_original_untouched() {
        let map = Mapping::single("a", Node::from(1i64)).replace("b", Node::from(2i64));
        let smaller = map.remove("a");

        assert_eq!(smaller.len(), 1);
        assert!(smaller.get("a").is_none());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_mapping_equality_ignores_order() {
        let ab = Mapping::single("a", Node::from(1i64)).replace("b", Node::from(2i64));
        let ba = Mapping::single("b", Node::from(2i64)).replace("a", Node::from(1i64));
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_mapping_matches_only_strings() {
        let map = Mapping::single("port", Node::from(80i64)).replace("name", Node::from("web"));
        assert!(map.matches("name", "web"));
        assert!(!map.matches("name", "api"));
        assert!(!map.matches("port", "80"));
        assert!(!map.matches("missing", "web"));
    }

    #[test]
    fn test_non_string_keys_are_invisible() {
        let map: Mapping = vec![
            (Scalar::Integer(1), Node::from("one")),
            (Scalar::String("1".to_string()), Node::from("string one")),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("1"), Some(&Node::from("string one")));

        let mut keys = Vec::new();
        map.for_each_key(|k| keys.push(k.to_string()));
        assert_eq!(keys, vec!["1"]);
    }

    #[test]
    fn test_from_native_and_back() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("a: [1, 2.5, true, null, x]\n3: three\n").unwrap();
        let node = Node::from_native(&value).unwrap();

        let a = node.as_mapping().unwrap().get("a").unwrap();
        assert_eq!(a.as_sequence().unwrap().len(), 5);
        assert_eq!(node.to_native(), value);
    }

    #[test]
    fn test_large_unsigned_integers_stay_integers() {
        let value: serde_yaml::Value = serde_yaml::from_str("18446744073709551615").unwrap();
        let node = Node::from_native(&value).unwrap();

        assert_eq!(node, Node::from(u64::MAX));
        assert_eq!(node.as_scalar().unwrap().to_string(), "18446744073709551615");
        assert_eq!(node.to_native(), value);
        assert_eq!(Node::from(7u64), Node::from(7i64));
    }

    #[test]
    fn test_from_native_rejects_tags() {
        let value: serde_yaml::Value = serde_yaml::from_str("!secret value").unwrap();
        assert!(matches!(
            Node::from_native(&value),
            Err(CloneError::Tagged { .. })
        ));
        assert_eq!(
            convert_native(&value, true).unwrap(),
            Node::from("value")
        );
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(Node::empty_mapping().kind().to_string(), "map");
        assert_eq!(Node::empty_sequence().kind().with_article(), "an array");
        assert_eq!(Node::null().kind(), NodeKind::Scalar);
    }
}
