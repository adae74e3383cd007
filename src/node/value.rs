use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::node::NodeMap;

// -----------------------------------------------------------------------------
// NodeValue

/// One level of already-parsed generic data.
///
/// A value is a scalar, a sequence, or a nested [`NodeMap`]; nesting allows
/// a map to recursively contain further serialized-object markers.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<NodeValue>),
    Map(NodeMap),
}

impl NodeValue {
    /// Returns the type-identifier string form of this value.
    ///
    /// Only scalars have one; `Null`, sequences and maps yield `None`, which
    /// is the soft-fail path for an unusable type marker.
    pub fn as_identifier(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Bool(value) => Some(Cow::Owned(value.to_string())),
            Self::Int(value) => Some(Cow::Owned(value.to_string())),
            Self::Float(value) => Some(Cow::Owned(value.to_string())),
            Self::Str(value) => Some(Cow::Borrowed(value.as_str())),
            Self::Null | Self::Seq(_) | Self::Map(_) => None,
        }
    }

    /// Returns `true` for [`Null`](NodeValue::Null).
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string content of a [`Str`](NodeValue::Str) value.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the integer content of an [`Int`](NodeValue::Int) value.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the numeric content as `f64`, promoting integers.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean content of a [`Bool`](NodeValue::Bool) value.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the nested map of a [`Map`](NodeValue::Map) value.
    #[inline]
    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Self::Map(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the elements of a [`Seq`](NodeValue::Seq) value.
    #[inline]
    pub fn as_seq(&self) -> Option<&[NodeValue]> {
        match self {
            Self::Seq(value) => Some(value.as_slice()),
            _ => None,
        }
    }
}

impl From<bool> for NodeValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for NodeValue {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for NodeValue {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for NodeValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for NodeValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for NodeValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<NodeValue>> for NodeValue {
    #[inline]
    fn from(value: Vec<NodeValue>) -> Self {
        Self::Seq(value)
    }
}

impl From<NodeMap> for NodeValue {
    #[inline]
    fn from(value: NodeMap) -> Self {
        Self::Map(value)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::NodeValue;
    use crate::node::NodeMap;

    #[test]
    fn identifier_forms() {
        assert_eq!(
            NodeValue::from("CustomType").as_identifier().as_deref(),
            Some("CustomType")
        );
        assert_eq!(NodeValue::Int(12).as_identifier().as_deref(), Some("12"));
        assert_eq!(
            NodeValue::Bool(false).as_identifier().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn unusable_identifiers() {
        assert_eq!(NodeValue::Null.as_identifier(), None);
        assert_eq!(NodeValue::Seq(vec![]).as_identifier(), None);
        assert_eq!(NodeValue::Map(NodeMap::new()).as_identifier(), None);
    }

    #[test]
    fn numeric_promotion() {
        assert_eq!(NodeValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(NodeValue::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(NodeValue::Float(0.5).as_i64(), None);
    }
}
