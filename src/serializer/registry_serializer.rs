use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::hash::{FixedHashState, HashSet};
use crate::node::{MapSupplier, NodeMap};
use crate::registry::{MapSerializable, SERIALIZED_TYPE_KEY, TypeRegistryArc};
use crate::serializer::{Capability, NodeSerializer};

// -----------------------------------------------------------------------------
// RegistrySerializer

/// A [`NodeSerializer`] delegating identity resolution and reconstruction
/// to a shared [`TypeRegistry`](crate::registry::TypeRegistry).
///
/// The serializer holds no mutable state of its own: the capability sets
/// are fixed at construction and every call queries the registry's current
/// state through the handle. It supports no exact types; anything
/// implementing [`MapSerializable`] matches through the single declared
/// capability.
///
/// All input-data-driven failures (missing or malformed markers, unbound
/// identifiers, reconstruction errors) surface as `None`, leaving the raw
/// map for the caller. Callers wanting diagnostics can run
/// [`TypeRegistry::construct`](crate::registry::TypeRegistry::construct)
/// directly.
pub struct RegistrySerializer {
    registry: TypeRegistryArc,
    types: HashSet<TypeId>,
    capabilities: HashSet<Capability>,
}

impl RegistrySerializer {
    /// Creates a serializer delegating to `registry`.
    pub fn new(registry: TypeRegistryArc) -> Self {
        let mut capabilities = HashSet::with_hasher(FixedHashState);
        capabilities.insert(Capability::of::<dyn MapSerializable>());
        Self {
            registry,
            types: HashSet::with_hasher(FixedHashState),
            capabilities,
        }
    }

    /// Returns the delegated registry handle.
    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }
}

impl NodeSerializer for RegistrySerializer {
    fn deserialize(&self, map: &NodeMap) -> Option<Box<dyn MapSerializable>> {
        // Not a serialized object at all.
        let marker = map.get(SERIALIZED_TYPE_KEY)?;

        // Null or composite markers have no identifier form.
        let identifier = marker.as_identifier()?;

        // Unbound identifiers leave the raw map to the caller.
        let registry = self.registry.read();
        registry.get_by_identifier(&identifier)?;

        let fields = map.normalize_keys();
        registry.construct(&fields).ok()
    }

    fn serialize(
        &self,
        object: &dyn MapSerializable,
        supplier: &dyn MapSupplier,
    ) -> Option<NodeMap> {
        let fields = object.flatten();

        let mut serialized = supplier.supply(fields.len() + 1);
        for (key, value) in fields {
            serialized.insert(key, value);
        }

        // A marker supplied by the flattening itself is kept as-is.
        if !serialized.contains_key(SERIALIZED_TYPE_KEY) {
            let any: &dyn Any = object;
            let registry = self.registry.read();
            let identifier = registry.identifier_of(any.type_id())?;
            serialized.insert(SERIALIZED_TYPE_KEY, identifier);
        }

        Some(serialized)
    }

    fn supported_types(&self) -> &HashSet<TypeId> {
        &self.types
    }

    fn supported_capabilities(&self) -> &HashSet<Capability> {
        &self.capabilities
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::RegistrySerializer;
    use crate::node::{DefaultMapSupplier, FieldMap, NodeKey, NodeMap, NodeValue};
    use crate::registry::{
        ConstructError, FromNodeMap, MapSerializable, NamedType, SERIALIZED_TYPE_KEY,
        TypeRegistry, TypeRegistryArc,
    };
    use crate::serializer::{Capability, NodeSerializer};

    #[derive(Debug, PartialEq)]
    struct CustomType {
        value: i64,
    }

    impl MapSerializable for CustomType {
        fn flatten(&self) -> FieldMap {
            let mut fields = FieldMap::with_capacity(1);
            fields.insert("value", self.value);
            fields
        }
    }

    impl FromNodeMap for CustomType {
        fn from_node_map(fields: &FieldMap) -> Result<Self, ConstructError> {
            fields
                .get_i64("value")
                .map(|value| Self { value })
                .ok_or(ConstructError::MissingField {
                    field: "value".into(),
                })
        }
    }

    impl NamedType for CustomType {
        fn type_name() -> &'static str {
            "CustomType"
        }
    }

    /// Flattens with the marker already included, under a frozen identifier.
    struct SelfMarked;

    impl MapSerializable for SelfMarked {
        fn flatten(&self) -> FieldMap {
            let mut fields = FieldMap::with_capacity(2);
            fields.insert(SERIALIZED_TYPE_KEY, "frozen");
            fields.insert("present", true);
            fields
        }
    }

    impl FromNodeMap for SelfMarked {
        fn from_node_map(_fields: &FieldMap) -> Result<Self, ConstructError> {
            Ok(Self)
        }
    }

    impl NamedType for SelfMarked {
        fn type_name() -> &'static str {
            "SelfMarked"
        }
    }

    struct Unregistered;

    impl MapSerializable for Unregistered {
        fn flatten(&self) -> FieldMap {
            FieldMap::new()
        }
    }

    fn serializer() -> RegistrySerializer {
        let mut registry = TypeRegistry::new();
        registry.register_alias::<CustomType>("custom");
        registry.register::<SelfMarked>();
        RegistrySerializer::new(TypeRegistryArc::new(registry))
    }

    fn tagged(identifier: impl Into<NodeValue>, value: i64) -> NodeMap {
        let mut map = NodeMap::new();
        map.insert(SERIALIZED_TYPE_KEY, identifier);
        map.insert("value", value);
        map
    }

    #[test]
    fn deserialize_by_name() {
        let built = serializer().deserialize(&tagged("CustomType", 5)).unwrap();
        assert_eq!(built.take::<CustomType>().unwrap(), CustomType { value: 5 });
    }

    #[test]
    fn deserialize_by_alias() {
        let built = serializer().deserialize(&tagged("custom", 7)).unwrap();
        assert_eq!(built.take::<CustomType>().unwrap(), CustomType { value: 7 });
    }

    #[test]
    fn absent_without_marker() {
        let mut map = NodeMap::new();
        map.insert("value", 9i64);
        assert!(serializer().deserialize(&map).is_none());
    }

    #[test]
    fn absent_for_unknown_identifier() {
        assert!(serializer().deserialize(&tagged("nope", 1)).is_none());
        assert!(
            serializer()
                .deserialize(&tagged("totally.unknown.Type", 1))
                .is_none()
        );
    }

    #[test]
    fn absent_for_null_marker() {
        assert!(serializer().deserialize(&tagged(NodeValue::Null, 1)).is_none());
    }

    #[test]
    fn absent_for_composite_marker() {
        let marker = NodeValue::Map(NodeMap::new());
        assert!(serializer().deserialize(&tagged(marker, 1)).is_none());
    }

    #[test]
    fn reconstruction_failure_is_absent() {
        let mut map = NodeMap::new();
        map.insert(SERIALIZED_TYPE_KEY, "CustomType");
        assert!(serializer().deserialize(&map).is_none());
    }

    #[test]
    fn non_string_keys_normalized() {
        // An integer-keyed entry next to the marker; the source map stays
        // intact while reconstruction sees string keys only.
        let mut map = NodeMap::new();
        map.insert(SERIALIZED_TYPE_KEY, "CustomType");
        map.insert("value", 3i64);
        map.insert(10i64, "extra");

        let built = serializer().deserialize(&map).unwrap();
        assert_eq!(built.take::<CustomType>().unwrap(), CustomType { value: 3 });
        assert!(map.contains_key(&NodeKey::Int(10)));
    }

    #[test]
    fn serialize_tags_output() {
        let map = serializer()
            .serialize(&CustomType { value: 20 }, &DefaultMapSupplier)
            .unwrap();

        let mut expected = NodeMap::new();
        expected.insert("value", 20i64);
        expected.insert(SERIALIZED_TYPE_KEY, "CustomType");
        assert_eq!(map, expected);
    }

    #[test]
    fn serialize_keeps_supplied_marker() {
        let map = serializer()
            .serialize(&SelfMarked, &DefaultMapSupplier)
            .unwrap();
        assert_eq!(
            map.get(SERIALIZED_TYPE_KEY).and_then(NodeValue::as_str),
            Some("frozen")
        );
    }

    #[test]
    fn serialize_unregistered_is_absent() {
        assert!(
            serializer()
                .serialize(&Unregistered, &DefaultMapSupplier)
                .is_none()
        );
    }

    #[test]
    fn round_trip() {
        let serializer = serializer();
        let map = serializer
            .serialize(&CustomType { value: 42 }, &DefaultMapSupplier)
            .unwrap();
        let built = serializer.deserialize(&map).unwrap();
        assert_eq!(built.take::<CustomType>().unwrap(), CustomType { value: 42 });
    }

    #[test]
    fn capability_sets() {
        let serializer = serializer();
        assert!(serializer.supported_types().is_empty());
        assert_eq!(serializer.supported_capabilities().len(), 1);
        assert!(
            serializer
                .supported_capabilities()
                .contains(&Capability::of::<dyn MapSerializable>())
        );
    }

    #[test]
    fn structural_support() {
        let serializer = serializer();
        // Even unregistered types match structurally; registration only
        // matters once conversion actually runs.
        assert!(serializer.supports(&Unregistered));
        assert!(serializer.supports(&CustomType { value: 1 }));
    }

    #[test]
    fn registry_state_is_live() {
        let serializer = serializer();
        let map = tagged("late", 8);
        assert!(serializer.deserialize(&map).is_none());

        #[derive(Debug, PartialEq)]
        struct Late {
            value: i64,
        }

        impl MapSerializable for Late {
            fn flatten(&self) -> FieldMap {
                let mut fields = FieldMap::with_capacity(1);
                fields.insert("value", self.value);
                fields
            }
        }

        impl FromNodeMap for Late {
            fn from_node_map(fields: &FieldMap) -> Result<Self, ConstructError> {
                fields
                    .get_i64("value")
                    .map(|value| Self { value })
                    .ok_or(ConstructError::MissingField {
                        field: "value".into(),
                    })
            }
        }

        impl NamedType for Late {
            fn type_name() -> &'static str {
                "late"
            }
        }

        serializer.registry().write().register::<Late>();
        let built = serializer.deserialize(&map).unwrap();
        assert_eq!(built.take::<Late>().unwrap(), Late { value: 8 });
    }
}
