//! Entity identifiers.
//!
//! An [`Entity`] is a plain sequential id handed out by a
//! [`Registry`](crate::registry::Registry). It carries no data of its own;
//! every component operation routes through the registry that issued it.
//! Ids are never reclaimed for the lifetime of the registry, so a handle
//! stays unambiguous even after the entity is destroyed.

use std::fmt;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An opaque entity identifier. Entities compare equal by id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw id.
    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }

    /// The id as a table index.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_id() {
        assert_eq!(Entity::new(3), Entity::new(3));
        assert_ne!(Entity::new(3), Entity::new(4));
    }

    #[test]
    fn ordering_follows_id() {
        let mut entities = vec![Entity::new(2), Entity::new(0), Entity::new(1)];
        entities.sort();
        let ids: Vec<u32> = entities.iter().map(|e| e.id()).collect();
        assert_eq!(ids, [0, 1, 2]);
    }

    #[test]
    fn display_is_the_raw_id() {
        assert_eq!(Entity::new(17).to_string(), "17");
        assert_eq!(format!("{:?}", Entity::new(17)), "Entity(17)");
    }
}
