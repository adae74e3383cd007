use alloc::boxed::Box;
use alloc::string::String;
use core::any::TypeId;

use crate::hash::{FixedHashState, HashMap};
use crate::node::FieldMap;
use crate::registry::{
    ConstructError, FromNodeMap, MapSerializable, NamedType, Registration, SERIALIZED_TYPE_KEY,
};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reconstructible types.
///
/// This struct is the central store binding type identifiers to
/// [`Registration`]s. [Registering] a type indexes it under its canonical
/// name; further identifiers can be bound with
/// [`register_alias`](TypeRegistry::register_alias). The registry owns the
/// identifier ↔ type binding exclusively; serializers query it per call and
/// never cache it.
///
/// # Example
///
/// ```
/// use mapform::{
///     ConstructError, FieldMap, FromNodeMap, MapSerializable, NamedType, TypeRegistry,
///     SERIALIZED_TYPE_KEY,
/// };
///
/// #[derive(Debug, PartialEq)]
/// struct Tag(String);
///
/// impl MapSerializable for Tag {
///     fn flatten(&self) -> FieldMap {
///         let mut fields = FieldMap::with_capacity(1);
///         fields.insert("tag", self.0.clone());
///         fields
///     }
/// }
///
/// impl FromNodeMap for Tag {
///     fn from_node_map(fields: &FieldMap) -> Result<Self, ConstructError> {
///         fields
///             .get_str("tag")
///             .map(|tag| Tag(tag.into()))
///             .ok_or(ConstructError::MissingField { field: "tag".into() })
///     }
/// }
///
/// impl NamedType for Tag {
///     fn type_name() -> &'static str {
///         "Tag"
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Tag>();
///
/// let mut fields = FieldMap::new();
/// fields.insert(SERIALIZED_TYPE_KEY, "Tag");
/// fields.insert("tag", "hello");
///
/// let built = registry.construct(&fields).unwrap();
/// assert_eq!(built.take::<Tag>().unwrap(), Tag("hello".into()));
/// ```
///
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    registrations: HashMap<TypeId, Registration>,
    identifier_to_id: HashMap<String, TypeId>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            registrations: HashMap::with_hasher(FixedHashState),
            identifier_to_id: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Registers the type `T` under its canonical name.
    ///
    /// Re-registering a type refreshes its record. Binding an identifier
    /// that is already taken overwrites the previous binding, so the last
    /// registration wins.
    pub fn register<T: FromNodeMap + NamedType>(&mut self) {
        self.insert(Registration::of::<T>());
    }

    /// Registers the type `T` and additionally binds `alias` to it.
    ///
    /// The alias resolves to the same type as the canonical name; either
    /// identifier is valid as a marker value.
    pub fn register_alias<T: FromNodeMap + NamedType>(&mut self, alias: impl Into<String>) {
        self.register::<T>();
        self.identifier_to_id.insert(alias.into(), TypeId::of::<T>());
    }

    /// Inserts a prebuilt [`Registration`], binding its canonical name.
    pub fn insert(&mut self, registration: Registration) {
        self.identifier_to_id
            .insert(String::from(registration.name()), registration.type_id());
        self.registrations
            .insert(registration.type_id(), registration);
    }

    /// Whether the type with the given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.registrations.contains_key(&type_id)
    }

    /// Returns the [`Registration`] of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&Registration> {
        self.registrations.get(&type_id)
    }

    /// Returns the [`Registration`] bound to the given identifier, canonical
    /// name or alias.
    ///
    /// If the identifier is bound to nothing, returns `None`.
    pub fn get_by_identifier(&self, identifier: &str) -> Option<&Registration> {
        match self.identifier_to_id.get(identifier) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the canonical identifier of the type with the given
    /// [`TypeId`], or `None` if it has not been registered.
    #[inline]
    pub fn identifier_of(&self, type_id: TypeId) -> Option<&'static str> {
        self.get(type_id).map(Registration::name)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns `true` if no type has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// An iterator over the [`Registration`]s of the registered types.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Registration> {
        self.registrations.values()
    }

    /// Rebuilds a value from its string-keyed field map.
    ///
    /// The marker entry under [`SERIALIZED_TYPE_KEY`] picks the registered
    /// type; its constructor is then invoked with the full map, marker
    /// included. Every failure surfaces as a typed [`ConstructError`], which
    /// is the diagnostic channel the soft-failing serializer layer deliberately
    /// flattens away.
    pub fn construct(
        &self,
        fields: &FieldMap,
    ) -> Result<Box<dyn MapSerializable>, ConstructError> {
        let marker = fields
            .get(SERIALIZED_TYPE_KEY)
            .ok_or(ConstructError::MissingTypeMarker)?;
        let identifier = marker
            .as_identifier()
            .ok_or(ConstructError::UnusableTypeMarker)?;
        let registration = self.get_by_identifier(&identifier).ok_or_else(|| {
            ConstructError::UnknownIdentifier {
                identifier: identifier.clone().into_owned(),
            }
        })?;
        registration.construct(fields)
    }

    /// Registers all statically submitted types.
    ///
    /// Types are submitted with
    /// [`submit_registration!`](crate::submit_registration) and collected by
    /// the [`inventory`] crate. Repeated calls are cheap and will not insert
    /// duplicates.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) {
        for entry in inventory::iter::<crate::registry::AutoRegistration> {
            entry.apply(self);
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
