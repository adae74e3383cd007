use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::node::FieldMap;
use crate::registry::{ConstructError, FromNodeMap, MapSerializable, NamedType};

// -----------------------------------------------------------------------------
// Registration

/// A function pointer container that enables dynamic reconstruction of one
/// concrete type.
///
/// While [`FromNodeMap`] allows reconstruction when the target type is
/// statically known, this record enables lookup and invocation using only an
/// identifier retrieved from serialized data. The registry never owns type
/// logic itself; every record is built from the type's own capabilities by
/// [`Registration::of`].
///
/// # Examples
///
/// ```
/// use mapform::{
///     ConstructError, FieldMap, FromNodeMap, MapSerializable, NamedType, Registration,
/// };
///
/// #[derive(Debug, PartialEq)]
/// struct Flag(bool);
///
/// impl MapSerializable for Flag {
///     fn flatten(&self) -> FieldMap {
///         let mut fields = FieldMap::with_capacity(1);
///         fields.insert("set", self.0);
///         fields
///     }
/// }
///
/// impl FromNodeMap for Flag {
///     fn from_node_map(fields: &FieldMap) -> Result<Self, ConstructError> {
///         fields
///             .get_bool("set")
///             .map(Flag)
///             .ok_or(ConstructError::MissingField { field: "set".into() })
///     }
/// }
///
/// impl NamedType for Flag {
///     fn type_name() -> &'static str {
///         "Flag"
///     }
/// }
///
/// let registration = Registration::of::<Flag>();
/// assert_eq!(registration.name(), "Flag");
///
/// let built = registration.construct(&Flag(true).flatten()).unwrap();
/// assert_eq!(built.take::<Flag>().unwrap(), Flag(true));
/// ```
#[derive(Clone)]
pub struct Registration {
    type_id: TypeId,
    name: &'static str,
    func: fn(&FieldMap) -> Result<Box<dyn MapSerializable>, ConstructError>,
}

impl Registration {
    /// Creates the registration record for `T`.
    pub fn of<T: FromNodeMap + NamedType>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: T::type_name(),
            func: |fields| {
                T::from_node_map(fields).map(|value| Box::new(value) as Box<dyn MapSerializable>)
            },
        }
    }

    /// Returns the [`TypeId`] of the registered type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the canonical identifier of the registered type.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invokes the captured constructor on `fields`.
    ///
    /// [`Registration`] does not carry a type flag, but the function used
    /// internally is type specific.
    #[inline(always)]
    pub fn construct(
        &self,
        fields: &FieldMap,
    ) -> Result<Box<dyn MapSerializable>, ConstructError> {
        (self.func)(fields)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("type_id", &self.type_id)
            .finish()
    }
}
