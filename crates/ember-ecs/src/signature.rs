//! Component signatures.
//!
//! A [`Signature`] is a fixed-width bitset with one bit per
//! [`ComponentTypeId`](crate::component::ComponentTypeId). An entity's
//! signature records which component types it currently owns; a system's
//! signature records which component types it requires. Membership matching
//! is a single superset test between the two.

use std::fmt;

use crate::component::ComponentTypeId;

/// Maximum number of distinct component types a registry can hold.
///
/// This is the width of [`Signature`] in bits. Registering more component
/// types than this is a fatal configuration error.
pub const MAX_COMPONENT_TYPES: usize = 32;

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A set of component type ids, packed one bit per id.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Signature(u32);

impl Signature {
    /// The signature with no bits set.
    pub const EMPTY: Signature = Signature(0);

    /// Set the bit for `id`.
    #[inline]
    pub fn set(&mut self, id: ComponentTypeId) {
        self.0 |= 1 << id.index();
    }

    /// Clear the bit for `id`.
    #[inline]
    pub fn clear(&mut self, id: ComponentTypeId) {
        self.0 &= !(1 << id.index());
    }

    /// Whether the bit for `id` is set.
    #[inline]
    pub fn test(&self, id: ComponentTypeId) -> bool {
        self.0 & (1 << id.index()) != 0
    }

    /// Whether every bit set in `required` is also set in `self`.
    ///
    /// This is the matching predicate: an entity qualifies for a system iff
    /// the entity's signature contains all of the system's required bits.
    #[inline]
    pub fn contains_all(&self, required: Signature) -> bool {
        self.0 & required.0 == required.0
    }

    /// Whether no bits are set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0b{:b})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> ComponentTypeId {
        ComponentTypeId(raw)
    }

    #[test]
    fn set_test_clear() {
        let mut sig = Signature::EMPTY;
        assert!(!sig.test(id(0)));
        sig.set(id(0));
        sig.set(id(5));
        assert!(sig.test(id(0)));
        assert!(sig.test(id(5)));
        assert!(!sig.test(id(4)));
        sig.clear(id(0));
        assert!(!sig.test(id(0)));
        assert!(sig.test(id(5)));
    }

    #[test]
    fn contains_all_is_a_superset_test() {
        let mut entity = Signature::EMPTY;
        entity.set(id(1));
        entity.set(id(2));
        entity.set(id(7));

        let mut required = Signature::EMPTY;
        required.set(id(1));
        required.set(id(2));

        assert!(entity.contains_all(required));
        assert!(entity.contains_all(Signature::EMPTY));

        required.set(id(3));
        assert!(!entity.contains_all(required));
    }

    #[test]
    fn empty_matches_everything_and_nothing_matches_missing_bits() {
        let empty = Signature::EMPTY;
        assert!(empty.is_empty());
        assert!(empty.contains_all(Signature::EMPTY));

        let mut required = Signature::EMPTY;
        required.set(id(0));
        assert!(!empty.contains_all(required));
    }

    #[test]
    fn highest_bit_is_usable() {
        let mut sig = Signature::EMPTY;
        sig.set(id(MAX_COMPONENT_TYPES as u32 - 1));
        assert!(sig.test(id(31)));
        assert!(!sig.is_empty());
    }
}
