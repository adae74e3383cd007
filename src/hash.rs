//! Hash containers over a fixed-seed `foldhash` state.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x9C3B_57A1_4E86_D20F);

/// A fixed hasher whose results only depend on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`],
/// created through [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Hash state based upon a random but fixed seed.
///
/// Identifier and type tables across the crate use this state so that map
/// iteration stays stable between runs of the same binary.
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Container aliases

/// A [`hashbrown::HashMap`] with the crate-default hash state.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] with the crate-default hash state.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hash, Hasher};

    use super::FixedHashState;

    #[test]
    fn fixed_results() {
        let mut a = FixedHashState.build_hasher();
        let mut b = FixedHashState.build_hasher();
        "marker".hash(&mut a);
        "marker".hash(&mut b);
        assert_eq!(a.finish(), b.finish());
    }
}
