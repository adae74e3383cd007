use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// AutoRegistration

/// A statically collected registration hook.
///
/// Submitted through [`submit_registration!`](crate::submit_registration)
/// and drained by [`TypeRegistry::auto_register`]. Direct construction is
/// possible for hooks that register more than one type.
pub struct AutoRegistration {
    register: fn(&mut TypeRegistry),
}

impl AutoRegistration {
    /// Creates a hook from a plain registration function.
    pub const fn new(register: fn(&mut TypeRegistry)) -> Self {
        Self { register }
    }

    /// Runs the hook against `registry`.
    #[inline]
    pub fn apply(&self, registry: &mut TypeRegistry) {
        (self.register)(registry);
    }
}

inventory::collect!(AutoRegistration);

#[doc(hidden)]
pub use inventory as __inventory;

/// Submits a type for [`TypeRegistry::auto_register`].
///
/// # Examples
///
/// ```
/// use mapform::{
///     ConstructError, FieldMap, FromNodeMap, MapSerializable, NamedType, TypeRegistry,
/// };
///
/// struct Marker;
///
/// impl MapSerializable for Marker {
///     fn flatten(&self) -> FieldMap {
///         FieldMap::new()
///     }
/// }
///
/// impl FromNodeMap for Marker {
///     fn from_node_map(_fields: &FieldMap) -> Result<Self, ConstructError> {
///         Ok(Self)
///     }
/// }
///
/// impl NamedType for Marker {
///     fn type_name() -> &'static str {
///         "Marker"
///     }
/// }
///
/// mapform::submit_registration!(Marker);
///
/// let mut registry = TypeRegistry::new();
/// registry.auto_register();
/// assert!(registry.get_by_identifier("Marker").is_some());
/// ```
#[macro_export]
macro_rules! submit_registration {
    ($ty:ty) => {
        $crate::registry::__inventory::submit! {
            $crate::registry::AutoRegistration::new(|registry| registry.register::<$ty>())
        }
    };
}

// -----------------------------------------------------------------------------
// Tests
