#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod hash;
pub mod node;
pub mod registry;
pub mod serde;
pub mod serializer;

// -----------------------------------------------------------------------------
// Top-level exports

pub use node::{DefaultMapSupplier, FieldMap, MapSupplier, NodeKey, NodeMap, NodeValue};
pub use registry::{
    ConstructError, FromNodeMap, MapSerializable, NamedType, Registration,
    SERIALIZED_TYPE_KEY, TypeRegistry,
};
pub use serializer::{Capability, NodeSerializer};

#[cfg(feature = "std")]
pub use registry::TypeRegistryArc;
#[cfg(feature = "std")]
pub use serializer::RegistrySerializer;

#[cfg(feature = "auto_register")]
pub use registry::AutoRegistration;
