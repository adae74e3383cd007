//! The serializer contract and its registry-delegating implementation.
//!
//! ## Menu
//!
//! - [`Capability`]: identity of a capability interface a serializer
//!   recognizes structurally.
//! - [`NodeSerializer`]: the polymorphic contract a document model invokes
//!   to hand off or retrieve custom-typed values.
//! - [`RegistrySerializer`]: the contract implementation that delegates
//!   identity resolution and reconstruction to a shared
//!   [`TypeRegistry`](crate::registry::TypeRegistry) (`std` feature).

// -----------------------------------------------------------------------------
// Modules

mod capability;
mod node_serializer;

#[cfg(feature = "std")]
mod registry_serializer;

// -----------------------------------------------------------------------------
// Exports

pub use capability::Capability;
pub use node_serializer::NodeSerializer;

#[cfg(feature = "std")]
pub use registry_serializer::RegistrySerializer;
