use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use core::fmt;
use core::hash::{Hash, Hasher};

use indexmap::Equivalent;

// -----------------------------------------------------------------------------
// NodeKey

/// A key of a [`NodeMap`](crate::node::NodeMap).
///
/// Keys in a generic node tree are not restricted to strings: data lifted
/// from ordered formats may key entries by integers or booleans. Every key
/// has a canonical string form, available through
/// [`canonical`](NodeKey::canonical), which is what key normalization uses
/// when handing a map to the reconstruction side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKey {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl NodeKey {
    /// Returns the canonical string form of this key.
    ///
    /// Borrows for string keys, allocates for the rest.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            Self::Str(value) => Cow::Borrowed(value.as_str()),
            Self::Int(value) => Cow::Owned(value.to_string()),
            Self::Bool(value) => Cow::Owned(value.to_string()),
        }
    }

    /// Returns the string content if this is a [`Str`](NodeKey::Str) key.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

// `Str` keys hash exactly like their `str` content so that maps can be
// queried by `&str` through `Equivalent`.
impl Hash for NodeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Str(value) => value.hash(state),
            Self::Int(value) => value.hash(state),
            Self::Bool(value) => value.hash(state),
        }
    }
}

impl Equivalent<NodeKey> for str {
    #[inline]
    fn equivalent(&self, key: &NodeKey) -> bool {
        matches!(key, NodeKey::Str(value) if value == self)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<&str> for NodeKey {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for NodeKey {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for NodeKey {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for NodeKey {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

// -----------------------------------------------------------------------------
// Tests
