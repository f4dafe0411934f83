use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::Scalar;

// -----------------------------------------------------------------------------
// Node

/// The intermediate tree produced by a walk.
///
/// `Node` implements [`Serialize`], so any serde format encodes it:
///
/// ```
/// use jv_view::{Node, NodeMap};
///
/// let mut map = NodeMap::new();
/// map.insert("int1", Node::I64(1));
/// map.insert("list", Node::Sequence(vec![Node::String("red".into())]));
///
/// let json = serde_json::to_string(&Node::Mapping(map)).unwrap();
/// assert_eq!(json, r#"{"int1":1,"list":["red"]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    F64(f64),
    Char(char),
    String(String),
    Sequence(Vec<Node>),
    Mapping(NodeMap),
}

impl Node {
    /// Returns `true` for [`Node::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Node::I64(v) => Some(v),
            Node::U64(v) => i64::try_from(v).ok(),
            Node::I128(v) => i64::try_from(v).ok(),
            Node::U128(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is an integer that fits.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Node::I64(v) => u64::try_from(v).ok(),
            Node::U64(v) => Some(v),
            Node::I128(v) => u64::try_from(v).ok(),
            Node::U128(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Node::F64(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_mapping(&self) -> Option<&NodeMap> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if this node is a mapping.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?.get(key)
    }
}

impl From<Scalar<'_>> for Node {
    fn from(scalar: Scalar<'_>) -> Self {
        match scalar {
            Scalar::Bool(v) => Node::Bool(v),
            Scalar::I64(v) => Node::I64(v),
            Scalar::U64(v) => Node::U64(v),
            Scalar::I128(v) => Node::I128(v),
            Scalar::U128(v) => Node::U128(v),
            Scalar::F64(v) => Node::F64(v),
            Scalar::Char(v) => Node::Char(v),
            Scalar::Str(v) => Node::String(String::from(v)),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(v) => serializer.serialize_bool(*v),
            Node::I64(v) => serializer.serialize_i64(*v),
            Node::U64(v) => serializer.serialize_u64(*v),
            Node::I128(v) => serializer.serialize_i128(*v),
            Node::U128(v) => serializer.serialize_u128(*v),
            Node::F64(v) => serializer.serialize_f64(*v),
            Node::Char(v) => serializer.serialize_char(*v),
            Node::String(v) => serializer.serialize_str(v),
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Mapping(map) => map.serialize(serializer),
        }
    }
}

// -----------------------------------------------------------------------------
// NodeMap

/// An insertion-ordered mapping from names to nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeMap {
    entries: Vec<(Cow<'static, str>, Node)>,
}

impl NodeMap {
    /// Creates an empty map.
    #[inline]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Creates an empty map with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts an entry, replacing the value of an existing key in place.
    pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, node: Node) -> Option<Node> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(core::mem::replace(slot, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    // Appends without looking for an existing key.
    // Callers guarantee `key` is not present yet.
    #[inline]
    pub(crate) fn push_unique(&mut self, key: impl Into<Cow<'static, str>>, node: Node) {
        self.entries.push((key.into(), node));
    }

    /// Returns the node stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_ref())
    }

    /// Returns the entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for NodeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            state.serialize_entry(key.as_ref(), node)?;
        }
        state.end()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{Node, NodeMap};

    #[test]
    fn insert_keeps_order_and_replaces() {
        let mut map = NodeMap::new();
        assert_eq!(map.insert("b", Node::I64(1)), None);
        assert_eq!(map.insert("a", Node::Null), None);
        assert_eq!(map.insert("b", Node::I64(2)), Some(Node::I64(1)));

        assert_eq!(map.keys().collect::<alloc::vec::Vec<_>>(), ["b", "a"]);
        assert_eq!(map.get("b").and_then(Node::as_i64), Some(2));
    }

    #[test]
    fn integer_accessors() {
        assert_eq!(Node::U64(3).as_i64(), Some(3));
        assert_eq!(Node::I64(-1).as_u64(), None);
        assert_eq!(Node::U128(u128::MAX).as_u64(), None);
    }

    #[test]
    fn ron_encoding() {
        let mut map = NodeMap::new();
        map.insert("array", Node::Sequence(vec![Node::Char('x'), Node::Bool(true)]));
        map.insert("sub", Node::Null);

        let text = ron::to_string(&Node::Mapping(map)).unwrap();
        assert_eq!(text, r#"{"array":['x',true],"sub":()}"#);
    }
}
