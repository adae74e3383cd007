use core::any::TypeId;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// Capability

/// Identity of a capability interface recognized by a serializer.
///
/// A capability stands in for "any type implementing this trait". Declaring
/// one in [`supported_capabilities`] lets a serializer match values
/// structurally, so new concrete types qualify the moment they implement a
/// recognized trait, without the serializer enumerating them.
///
/// Two capabilities are equal when they identify the same type; the stored
/// name is diagnostic only.
///
/// # Examples
///
/// ```
/// use mapform::{Capability, MapSerializable};
///
/// let capability = Capability::of::<dyn MapSerializable>();
/// assert_eq!(capability, Capability::of::<dyn MapSerializable>());
/// ```
///
/// [`supported_capabilities`]: crate::serializer::NodeSerializer::supported_capabilities
#[derive(Clone, Copy, Debug, Eq)]
pub struct Capability {
    id: TypeId,
    name: &'static str,
}

impl Capability {
    /// Returns the capability marker of the (usually unsized) type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the capability interface.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the type name of the capability interface.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Capability {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Capability {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
