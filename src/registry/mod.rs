//! Identifier-indexed registry of reconstructible types.
//!
//! ## Menu
//!
//! - [`MapSerializable`]: the capability of flattening `self` into a
//!   string-keyed [`FieldMap`](crate::node::FieldMap).
//! - [`FromNodeMap`]: the reconstruction counterpart.
//! - [`NamedType`]: the canonical identifier a type registers under.
//! - [`Registration`]: one type's registry record, carrying its captured
//!   constructor.
//! - [`TypeRegistry`]: the identifier / type table with the
//!   [`construct`](TypeRegistry::construct) entry point.
//! - [`TypeRegistryArc`]: a clonable, thread-shared registry handle
//!   (`std` feature).
//! - [`ConstructError`]: everything that can go wrong while rebuilding a
//!   value from its field map.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, types submitted through
//! [`submit_registration!`](crate::submit_registration) are collected
//! statically by the [`inventory`] crate and drained into a registry by
//! [`TypeRegistry::auto_register`].

// -----------------------------------------------------------------------------
// Modules

mod construct_error;
mod registration;
mod serializable;
mod type_registry;

#[cfg(feature = "auto_register")]
mod auto;
#[cfg(feature = "std")]
mod registry_arc;

// -----------------------------------------------------------------------------
// Exports

pub use construct_error::ConstructError;
pub use registration::Registration;
pub use serializable::{FromNodeMap, MapSerializable, NamedType};
pub use type_registry::TypeRegistry;

#[cfg(feature = "auto_register")]
pub use auto::AutoRegistration;
#[cfg(feature = "auto_register")]
#[doc(hidden)]
pub use auto::__inventory;
#[cfg(feature = "std")]
pub use registry_arc::TypeRegistryArc;

// -----------------------------------------------------------------------------
// Wire-level constants

/// The reserved key whose presence marks a node map as a serialized object.
///
/// Its value is a type identifier: a canonical type name or a registered
/// alias. Reconstruction reads this key out of the field map it is handed,
/// so normalization keeps the entry in place.
pub const SERIALIZED_TYPE_KEY: &str = "==";
