use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::node::FieldMap;
use crate::registry::ConstructError;

// -----------------------------------------------------------------------------
// MapSerializable

/// The capability of flattening `self` into a string-keyed [`FieldMap`].
///
/// This is the one capability interface the registry-delegating serializer
/// recognizes: any type implementing it is eligible for delegation, without
/// the serializer enumerating concrete types.
///
/// The flattened map normally holds only the value's field-level data. It
/// *may* already include the
/// [`SERIALIZED_TYPE_KEY`](crate::registry::SERIALIZED_TYPE_KEY) entry, in
/// which case the serialization layer leaves that marker untouched.
///
/// # Examples
///
/// ```
/// use mapform::{FieldMap, MapSerializable};
///
/// struct Counter {
///     count: i64,
/// }
///
/// impl MapSerializable for Counter {
///     fn flatten(&self) -> FieldMap {
///         let mut fields = FieldMap::with_capacity(1);
///         fields.insert("count", self.count);
///         fields
///     }
/// }
/// ```
pub trait MapSerializable: Any {
    /// Flattens this value into its field-level representation.
    fn flatten(&self) -> FieldMap;
}

impl dyn MapSerializable {
    /// Returns `true` if the inner type is `T`.
    #[inline]
    pub fn is<T: MapSerializable>(&self) -> bool {
        let any: &dyn Any = self;
        any.type_id() == TypeId::of::<T>()
    }

    /// Downcasts to a concrete reference, or returns `None` on mismatch.
    #[inline]
    pub fn downcast_ref<T: MapSerializable>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Downcasts to a concrete mutable reference, or returns `None` on mismatch.
    #[inline]
    pub fn downcast_mut<T: MapSerializable>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }

    /// Takes the concrete value out of the box, or returns the box unchanged
    /// on mismatch.
    pub fn take<T: MapSerializable>(self: Box<Self>) -> Result<T, Box<Self>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            // Checked just above, the downcast cannot fail.
            Ok(*any.downcast::<T>().unwrap())
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for dyn MapSerializable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<dyn MapSerializable>")
    }
}

// -----------------------------------------------------------------------------
// FromNodeMap

/// Reconstruction counterpart of [`MapSerializable`].
///
/// `fields` still contains the type marker entry; implementations are free
/// to ignore it, but a type hierarchy registered under several identifiers
/// can read it to pick the exact shape to build.
pub trait FromNodeMap: MapSerializable + Sized {
    /// Rebuilds a value from its field-level representation.
    fn from_node_map(fields: &FieldMap) -> Result<Self, ConstructError>;
}

// -----------------------------------------------------------------------------
// NamedType

/// The canonical identifier a type registers under.
///
/// Kept short and human-chosen, the way a config author would write it in a
/// document; extra aliases can be bound through
/// [`TypeRegistry::register_alias`](crate::registry::TypeRegistry::register_alias).
pub trait NamedType {
    /// Returns the identifier this type registers under.
    fn type_name() -> &'static str;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::MapSerializable;
    use crate::node::FieldMap;

    #[derive(Debug, PartialEq)]
    struct Plain(i64);

    impl MapSerializable for Plain {
        fn flatten(&self) -> FieldMap {
            let mut fields = FieldMap::with_capacity(1);
            fields.insert("0", self.0);
            fields
        }
    }

    #[derive(Debug)]
    struct Other;

    impl MapSerializable for Other {
        fn flatten(&self) -> FieldMap {
            FieldMap::new()
        }
    }

    #[test]
    fn downcasting() {
        let boxed: Box<dyn MapSerializable> = Box::new(Plain(3));
        assert!(boxed.is::<Plain>());
        assert!(!boxed.is::<Other>());
        assert_eq!(boxed.downcast_ref::<Plain>(), Some(&Plain(3)));
        assert_eq!(boxed.take::<Plain>().unwrap(), Plain(3));
    }

    #[test]
    fn take_mismatch_returns_box() {
        let boxed: Box<dyn MapSerializable> = Box::new(Plain(3));
        let back = boxed.take::<Other>().unwrap_err();
        assert!(back.is::<Plain>());
    }
}
