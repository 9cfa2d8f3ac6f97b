//! Systems and their matched-entity caches.
//!
//! A system declares a required [`Signature`] and caches the entities that
//! satisfy it. The cache is maintained exclusively by
//! [`Registry::update`](crate::registry::Registry::update); the system never
//! evaluates the matching predicate itself.
//!
//! Behavior lives on the concrete system type as ordinary methods with
//! whatever parameters they need (a time step, an asset store, a render
//! target). The [`System`] trait only exposes the membership state, which
//! keeps it object-safe so the registry can own systems of any type.

use std::any::Any;

use crate::component::ComponentTypeId;
use crate::entity::Entity;
use crate::signature::Signature;

// ---------------------------------------------------------------------------
// SystemState
// ---------------------------------------------------------------------------

/// A system's required signature plus its current matches.
///
/// Concrete systems embed one of these and hand it out through
/// [`System::state`] / [`System::state_mut`].
#[derive(Debug, Default)]
pub struct SystemState {
    signature: Signature,
    entities: Vec<Entity>,
}

impl SystemState {
    /// Create a state with an empty requirement and no matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` to the required signature.
    ///
    /// Intended to be called from the system's constructor, before the
    /// system is handed to a registry; the requirement is logically
    /// immutable afterwards.
    pub fn require(&mut self, id: ComponentTypeId) {
        self.signature.set(id);
    }

    /// The required signature.
    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// The current matches, in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Whether `entity` is currently matched.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Record `entity` as matched. Adding an entity that is already matched
    /// is a no-op, so the cache keeps set semantics.
    pub(crate) fn add_entity(&mut self, entity: Entity) {
        if !self.entities.contains(&entity) {
            self.entities.push(entity);
        }
    }

    /// Erase `entity` from the matches by identity.
    pub(crate) fn remove_entity(&mut self, entity: Entity) {
        self.entities.retain(|&e| e != entity);
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// A behavior unit operating on every entity whose signature is a superset
/// of its requirement.
pub trait System: 'static {
    /// The membership state.
    fn state(&self) -> &SystemState;

    /// Mutable membership state. Reserved for the owning registry.
    fn state_mut(&mut self) -> &mut SystemState;
}

/// Internal object-safe extension that adds downcasting, so the registry
/// can recover the concrete system type behind a `Box<dyn DynSystem>`.
pub(crate) trait DynSystem: System {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<S: System> DynSystem for S {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentTypes;

    struct Pos;
    struct Vel;

    fn entity(id: u32) -> Entity {
        Entity::new(id)
    }

    #[test]
    fn require_accumulates_bits() {
        let mut types = ComponentTypes::new();
        let pos = types.id_of::<Pos>();
        let vel = types.id_of::<Vel>();

        let mut state = SystemState::new();
        state.require(pos);
        state.require(vel);

        let mut expected = Signature::EMPTY;
        expected.set(pos);
        expected.set(vel);
        assert_eq!(state.signature(), expected);
    }

    #[test]
    fn add_entity_keeps_set_semantics() {
        let mut state = SystemState::new();
        state.add_entity(entity(1));
        state.add_entity(entity(2));
        state.add_entity(entity(1));
        assert_eq!(state.entities(), &[entity(1), entity(2)]);
    }

    #[test]
    fn remove_entity_erases_by_identity() {
        let mut state = SystemState::new();
        state.add_entity(entity(1));
        state.add_entity(entity(2));
        state.add_entity(entity(3));
        state.remove_entity(entity(2));
        assert_eq!(state.entities(), &[entity(1), entity(3)]);
        assert!(!state.contains(entity(2)));

        // Removing an entity that is not matched is a no-op.
        state.remove_entity(entity(42));
        assert_eq!(state.entities().len(), 2);
    }
}
