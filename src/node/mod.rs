//! The generic node model: loosely-typed keys, values and maps.
//!
//! ## Menu
//!
//! - [`NodeKey`]: an opaque map key, string / integer / boolean.
//! - [`NodeValue`]: one level of parsed data, scalar, sequence or nested map.
//! - [`NodeMap`]: an insertion-ordered `NodeKey -> NodeValue` map.
//! - [`FieldMap`]: the string-keyed map shape consumed by reconstruction and
//!   produced by self-flattening values.
//! - [`MapSupplier`]: the factory capability through which the serialization
//!   layer obtains every map it returns.

// -----------------------------------------------------------------------------
// Modules

mod key;
mod map;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use key::NodeKey;
pub use map::{DefaultMapSupplier, FieldMap, MapSupplier, NodeMap};
pub use value::NodeValue;
