use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::hash::HashSet;
use crate::node::{MapSupplier, NodeMap};
use crate::registry::MapSerializable;
use crate::serializer::Capability;

// -----------------------------------------------------------------------------
// NodeSerializer

/// The polymorphic contract a document model invokes to hand off or
/// retrieve custom-typed values.
///
/// Both conversion directions soft-fail: `None` means "not handled here",
/// never "the document is corrupt". A caller receiving `None` keeps the
/// original representation as-is.
///
/// Support is declared through two immutable sets, fixed at construction:
/// exact types ([`supported_types`](NodeSerializer::supported_types)) and
/// capability interfaces
/// ([`supported_capabilities`](NodeSerializer::supported_capabilities))
/// through which any implementing type matches structurally.
pub trait NodeSerializer {
    /// Rebuilds a typed value from a generic node map.
    ///
    /// Must be a pure function of `map` and whatever external state the
    /// implementation delegates to, and must not mutate `map`. Returns
    /// `None` whenever the map is not a serialized object this serializer
    /// can resolve.
    fn deserialize(&self, map: &NodeMap) -> Option<Box<dyn MapSerializable>>;

    /// Flattens `object` into a freshly allocated node map, tagged with the
    /// type marker.
    ///
    /// The map is obtained through `supplier`, with capacity for the
    /// object's fields plus the marker entry. Returns `None` if the object
    /// cannot be serialized by this implementation.
    fn serialize(
        &self,
        object: &dyn MapSerializable,
        supplier: &dyn MapSupplier,
    ) -> Option<NodeMap>;

    /// Exact types this serializer handles directly.
    fn supported_types(&self) -> &HashSet<TypeId>;

    /// Capability interfaces this serializer recognizes; any type
    /// implementing one of them is supported.
    fn supported_capabilities(&self) -> &HashSet<Capability>;

    /// Whether `object`'s runtime type is covered by the declared sets.
    ///
    /// The delegation test a document model runs before calling
    /// [`serialize`](NodeSerializer::serialize).
    fn supports(&self, object: &dyn MapSerializable) -> bool {
        let any: &dyn Any = object;
        let type_id = any.type_id();
        self.supported_types().contains(&type_id)
            || self
                .supported_capabilities()
                .contains(&Capability::of::<dyn MapSerializable>())
    }
}
