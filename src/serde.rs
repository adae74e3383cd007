//! Serde bridging for the node model.
//!
//! Manual, visitor-based impls so generic trees can be lifted out of (or
//! fed into) any self-describing serde format. The crate still never parses
//! text itself; a format front end such as `serde_json` or `serde_yaml`
//! does, and hands over ready-made [`NodeValue`] trees.
//!
//! Integers that do not fit `i64` fall back to [`NodeValue::Float`].

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{Deserialize, Deserializer, Error, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::node::{FieldMap, NodeKey, NodeMap, NodeValue};

// -----------------------------------------------------------------------------
// Serialization

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(value) => serializer.serialize_str(value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Bool(value) => serializer.serialize_bool(*value),
        }
    }
}

impl Serialize for NodeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::Seq(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for NodeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// -----------------------------------------------------------------------------
// Deserialization

struct NodeKeyVisitor;

impl<'de> Visitor<'de> for NodeKeyVisitor {
    type Value = NodeKey;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, integer or boolean map key")
    }

    fn visit_bool<E: Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(NodeKey::Bool(value))
    }

    fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(NodeKey::Int(value))
    }

    fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(NodeKey::Int)
            .map_err(|_| E::custom("map key out of i64 range"))
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(NodeKey::from(value))
    }

    fn visit_string<E: Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(NodeKey::Str(value))
    }
}

impl<'de> Deserialize<'de> for NodeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeKeyVisitor)
    }
}

struct NodeValueVisitor;

impl<'de> Visitor<'de> for NodeValueVisitor {
    type Value = NodeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any node value")
    }

    fn visit_bool<E: Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(NodeValue::Bool(value))
    }

    fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(NodeValue::Int(value))
    }

    fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(match i64::try_from(value) {
            Ok(value) => NodeValue::Int(value),
            Err(_) => NodeValue::Float(value as f64),
        })
    }

    fn visit_f64<E: Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(NodeValue::Float(value))
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(NodeValue::from(value))
    }

    fn visit_string<E: Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(NodeValue::Str(value))
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(NodeValue::Null)
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(NodeValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(NodeValueVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element()? {
            values.push(value);
        }
        Ok(NodeValue::Seq(values))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        NodeMapVisitor.visit_map(map).map(NodeValue::Map)
    }
}

impl<'de> Deserialize<'de> for NodeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeValueVisitor)
    }
}

struct NodeMapVisitor;

impl<'de> Visitor<'de> for NodeMapVisitor {
    type Value = NodeMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a key-value map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = NodeMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<NodeKey, NodeValue>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for NodeMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NodeMapVisitor)
    }
}

struct FieldMapVisitor;

impl<'de> Visitor<'de> for FieldMapVisitor {
    type Value = FieldMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string-keyed map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = FieldMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, NodeValue>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldMapVisitor)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::node::{NodeMap, NodeValue};

    #[test]
    fn lift_from_json() {
        let value: NodeValue = serde_json::from_str(
            r#"{"==": "CustomType", "value": 5, "meta": {"tags": ["a", "b"], "rate": 0.5, "gone": null}}"#,
        )
        .unwrap();

        let map = value.as_map().unwrap();
        assert_eq!(map.get("==").and_then(NodeValue::as_str), Some("CustomType"));
        assert_eq!(map.get("value").and_then(NodeValue::as_i64), Some(5));

        let meta = map.get("meta").and_then(NodeValue::as_map).unwrap();
        assert_eq!(meta.get("rate").and_then(NodeValue::as_f64), Some(0.5));
        assert!(meta.get("gone").unwrap().is_null());
        assert_eq!(meta.get("tags").and_then(NodeValue::as_seq).map(<[_]>::len), Some(2));
    }

    #[test]
    fn emit_to_json() {
        let mut inner = NodeMap::new();
        inner.insert("==", "CustomType");
        inner.insert("value", 20i64);

        let mut map = NodeMap::new();
        map.insert("object", inner);
        map.insert("flag", true);

        assert_eq!(
            serde_json::to_value(NodeValue::Map(map)).unwrap(),
            json!({"object": {"==": "CustomType", "value": 20}, "flag": true})
        );
    }

    #[test]
    fn round_trip_preserves_order() {
        let text = r#"{"b": 1, "a": 2, "c": [1, 2, 3]}"#;
        let map: NodeMap = serde_json::from_str(text).unwrap();
        let keys: alloc::vec::Vec<_> = map.keys().map(|k| k.canonical()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"b":1,"a":2,"c":[1,2,3]}"#);
    }

    #[test]
    fn oversized_integers_fall_back() {
        let value: NodeValue = serde_json::from_str("18446744073709551615").unwrap();
        assert!(matches!(value, NodeValue::Float(_)));
    }

    #[test]
    fn field_map_requires_string_keys() {
        use crate::node::FieldMap;
        let fields: FieldMap = serde_json::from_str(r#"{"value": 5}"#).unwrap();
        assert_eq!(fields.get_i64("value"), Some(5));
    }
}
