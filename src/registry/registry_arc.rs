use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A clonable, thread-shared handle on a [`TypeRegistry`].
///
/// The registry is externally owned and may keep growing while serializers
/// hold this handle; every lookup goes through the lock, so serializers
/// always see the registry's current state.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Wraps `registry` into a shared handle.
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.read().iter().map(|registration| registration.name()))
            .finish()
    }
}
