use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use indexmap::{Equivalent, IndexMap};

use crate::hash::FixedHashState;
use crate::node::{NodeKey, NodeValue};

// -----------------------------------------------------------------------------
// NodeMap

/// An insertion-ordered map from [`NodeKey`] to [`NodeValue`].
///
/// This is the in-memory shape of one structured level of a document before
/// it is bound to any concrete type. Equality is order-insensitive; iteration
/// follows insertion order.
#[derive(Clone, PartialEq)]
pub struct NodeMap(IndexMap<NodeKey, NodeValue, FixedHashState>);

impl NodeMap {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self(IndexMap::with_hasher(FixedHashState))
    }

    /// Creates an empty map with room for at least `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity_and_hasher(capacity, FixedHashState))
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inserts an entry, returning the previous value bound to the key.
    #[inline]
    pub fn insert(
        &mut self,
        key: impl Into<NodeKey>,
        value: impl Into<NodeValue>,
    ) -> Option<NodeValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value bound to `key`.
    ///
    /// String keys can be looked up directly by `&str`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&NodeValue>
    where
        Q: ?Sized + Hash + Equivalent<NodeKey>,
    {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<NodeKey>,
    {
        self.0.contains_key(key)
    }

    /// An iterator over the entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&NodeKey, &NodeValue)> {
        self.0.iter()
    }

    /// An iterator over the keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &NodeKey> {
        self.0.keys()
    }

    /// An iterator over the values in insertion order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &NodeValue> {
        self.0.values()
    }

    /// Produces a fresh [`FieldMap`] with every key coerced to its canonical
    /// string form.
    ///
    /// `self` is left untouched. Distinct keys sharing one canonical form
    /// collapse, with the later entry winning.
    pub fn normalize_keys(&self) -> FieldMap {
        let mut fields = FieldMap::with_capacity(self.len());
        for (key, value) in self.iter() {
            fields.insert(key.canonical().into_owned(), value.clone());
        }
        fields
    }
}

impl Default for NodeMap {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl FromIterator<(NodeKey, NodeValue)> for NodeMap {
    fn from_iter<I: IntoIterator<Item = (NodeKey, NodeValue)>>(iter: I) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

impl IntoIterator for NodeMap {
    type Item = (NodeKey, NodeValue);
    type IntoIter = indexmap::map::IntoIter<NodeKey, NodeValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeMap {
    type Item = (&'a NodeKey, &'a NodeValue);
    type IntoIter = indexmap::map::Iter<'a, NodeKey, NodeValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// -----------------------------------------------------------------------------
// FieldMap

/// An insertion-ordered `String -> NodeValue` map.
///
/// The string-keyed shape of a serialized value: self-flattening produces
/// one, and reconstruction consumes one. The typed accessors cover the
/// common field shapes so reconstruction code stays short.
#[derive(Clone, PartialEq)]
pub struct FieldMap(IndexMap<String, NodeValue, FixedHashState>);

impl FieldMap {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self(IndexMap::with_hasher(FixedHashState))
    }

    /// Creates an empty map with room for at least `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity_and_hasher(capacity, FixedHashState))
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inserts an entry, returning the previous value bound to the key.
    #[inline]
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<NodeValue>,
    ) -> Option<NodeValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value bound to `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&NodeValue> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the integer field bound to `key`.
    #[inline]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(NodeValue::as_i64)
    }

    /// Returns the numeric field bound to `key`, promoting integers.
    #[inline]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(NodeValue::as_f64)
    }

    /// Returns the string field bound to `key`.
    #[inline]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(NodeValue::as_str)
    }

    /// Returns the boolean field bound to `key`.
    #[inline]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(NodeValue::as_bool)
    }

    /// An iterator over the entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&String, &NodeValue)> {
        self.0.iter()
    }
}

impl Default for FieldMap {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl FromIterator<(String, NodeValue)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, NodeValue)>>(iter: I) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, NodeValue);
    type IntoIter = indexmap::map::IntoIter<String, NodeValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// -----------------------------------------------------------------------------
// MapSupplier

/// A factory capability producing empty node maps.
///
/// The serialization layer allocates every map it returns through a
/// supplier, keeping the document model in control of allocation.
pub trait MapSupplier {
    /// Returns a new empty map with room for at least `capacity` entries.
    fn supply(&self, capacity: usize) -> NodeMap;
}

/// Supplies plain [`NodeMap`]s with the requested capacity.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultMapSupplier;

impl MapSupplier for DefaultMapSupplier {
    #[inline]
    fn supply(&self, capacity: usize) -> NodeMap {
        NodeMap::with_capacity(capacity)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DefaultMapSupplier, MapSupplier, NodeMap};
    use crate::node::{NodeKey, NodeValue};

    #[test]
    fn str_lookup() {
        let mut map = NodeMap::new();
        map.insert("==", "CustomType");
        map.insert(7i64, "seven");

        assert_eq!(map.get("==").and_then(NodeValue::as_str), Some("CustomType"));
        assert!(map.contains_key(&NodeKey::Int(7)));
        assert!(!map.contains_key("7"));
    }

    #[test]
    fn insertion_order_kept() {
        let mut map = NodeMap::new();
        map.insert("b", 1i64);
        map.insert("a", 2i64);
        let keys: alloc::vec::Vec<_> = map.keys().map(NodeKey::canonical).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn equality_ignores_order() {
        let mut a = NodeMap::new();
        a.insert("x", 1i64);
        a.insert("y", 2i64);
        let mut b = NodeMap::new();
        b.insert("y", 2i64);
        b.insert("x", 1i64);
        assert_eq!(a, b);
    }

    #[test]
    fn normalize_coerces_all_keys() {
        let mut map = NodeMap::new();
        map.insert("name", "a");
        map.insert(5i64, "five");
        map.insert(true, "yes");

        let fields = map.normalize_keys();
        assert_eq!(fields.get_str("name"), Some("a"));
        assert_eq!(fields.get_str("5"), Some("five"));
        assert_eq!(fields.get_str("true"), Some("yes"));
        // The source map is untouched.
        assert_eq!(map.len(), 3);
        assert!(map.contains_key(&NodeKey::Int(5)));
    }

    #[test]
    fn normalize_collapses_duplicates() {
        let mut map = NodeMap::new();
        map.insert("5", "str-keyed");
        map.insert(5i64, "int-keyed");
        let fields = map.normalize_keys();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get_str("5"), Some("int-keyed"));
    }

    #[test]
    fn supplier_capacity() {
        let map = DefaultMapSupplier.supply(4);
        assert!(map.is_empty());
    }
}
