use alloc::borrow::Cow;
use alloc::string::String;
use core::{error, fmt};

// -----------------------------------------------------------------------------
// ConstructError

/// An enumeration of all error outcomes that might happen when rebuilding a
/// value through [`TypeRegistry::construct`](crate::registry::TypeRegistry::construct)
/// or a [`FromNodeMap`](crate::registry::FromNodeMap) implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructError {
    /// The field map carries no type marker entry.
    MissingTypeMarker,
    /// The marker is present but its value has no identifier string form.
    UnusableTypeMarker,
    /// The marker identifier is not bound to any registered type.
    UnknownIdentifier { identifier: String },
    /// A field required by the target type is not present.
    MissingField { field: Cow<'static, str> },
    /// A field is present but holds a value of the wrong shape.
    InvalidField {
        field: Cow<'static, str>,
        expected: &'static str,
    },
    /// Reconstruction failed for a type-specific reason.
    Failed { message: Cow<'static, str> },
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTypeMarker => {
                write!(f, "field map carries no type marker")
            }
            Self::UnusableTypeMarker => {
                write!(f, "type marker value has no identifier form")
            }
            Self::UnknownIdentifier { identifier } => {
                write!(f, "identifier `{identifier}` is not bound to any registered type")
            }
            Self::MissingField { field } => {
                write!(f, "required field `{field}` is missing")
            }
            Self::InvalidField { field, expected } => {
                write!(f, "field `{field}` does not hold {expected}")
            }
            Self::Failed { message } => {
                write!(f, "reconstruction failed: {message}")
            }
        }
    }
}

impl error::Error for ConstructError {}
