//! The [`Registry`] coordinates entities, pools, and systems.
//!
//! It is the sole owner of entity id allocation, the per-entity signature
//! table, every component pool, and every system. Structural changes
//! (entity creation, component add/remove, entity destruction) are staged
//! and only reconciled into system membership by [`Registry::update`] -- the
//! single synchronization barrier. Nothing else ever changes a system's
//! matched list, so no system can observe a topology change mid-iteration
//! within one step.
//!
//! Ownership is single: pools and systems live in the registry, and callers
//! only ever hold borrows that end with the call that produced them.

use std::any::{type_name, TypeId};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::mem;

use crate::component::ComponentTypes;
use crate::entity::Entity;
use crate::pool::{AnyPool, Pool};
use crate::signature::Signature;
use crate::system::{DynSystem, System};
use crate::EcsError;

fn missing_component<T>(entity: Entity) -> EcsError {
    EcsError::MissingComponent {
        entity,
        component: type_name::<T>(),
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The coordinator owning entities, pools, and systems.
///
/// One registry is one world instance: ids it issues are meaningless to any
/// other registry, and are never reclaimed for its lifetime.
#[derive(Default)]
pub struct Registry {
    /// Authoritative component set per entity, indexed by entity id.
    signatures: Vec<Signature>,
    /// Whether the id is live (created and not yet retired by the barrier).
    alive: Vec<bool>,
    /// Component type ids, assigned on first use.
    types: ComponentTypes,
    /// One pool per component type, indexed by `ComponentTypeId`.
    pools: Vec<Option<Box<dyn AnyPool>>>,
    /// One system instance per system type.
    systems: HashMap<TypeId, Box<dyn DynSystem>>,
    /// Entities whose membership must be (re)evaluated at the next barrier:
    /// freshly created or with a changed signature.
    pending_add: BTreeSet<Entity>,
    /// Entities to retire at the next barrier.
    pending_remove: BTreeSet<Entity>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entity_count", &self.signatures.len())
            .field("component_types", &self.types.len())
            .field("system_count", &self.systems.len())
            .finish()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // -- entities -----------------------------------------------------------

    /// Allocate the next sequential entity id.
    ///
    /// The new entity has an empty signature and belongs to no system; it is
    /// staged for membership evaluation at the next [`update`](Self::update).
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.signatures.len() as u32);
        self.signatures.push(Signature::EMPTY);
        self.alive.push(true);
        self.pending_add.insert(entity);
        entity
    }

    /// Stage `entity` for destruction at the next [`update`](Self::update).
    ///
    /// Until the barrier runs the entity keeps its components and its system
    /// memberships. Afterwards it is retired: every system drops it, its
    /// signature is cleared, and its id is never handed out again.
    pub fn destroy_entity(&mut self, entity: Entity) {
        if !self.guard_live(entity, "destroy_entity") {
            return;
        }
        self.pending_remove.insert(entity);
    }

    /// Total number of ids ever issued, including retired ones.
    pub fn entity_count(&self) -> usize {
        self.signatures.len()
    }

    /// Whether `entity` has been created and not yet retired.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.get(entity.index()).copied().unwrap_or(false)
    }

    // -- components ---------------------------------------------------------

    /// Attach `value` to `entity`, overwriting any existing `T`.
    ///
    /// Lazily creates the pool for `T` on first use, grows it to cover the
    /// entity's id, and sets the signature bit. Membership is not
    /// reconciled here: the entity is staged and systems only see the
    /// change after the next [`update`](Self::update).
    pub fn add_component<T: 'static>(&mut self, entity: Entity, value: T) {
        if !self.guard_live(entity, "add_component") {
            return;
        }
        let id = self.types.id_of::<T>();
        if self.pools.len() <= id.index() {
            self.pools.resize_with(id.index() + 1, || None);
        }
        let pool = self.pools[id.index()]
            .get_or_insert_with(|| Box::new(Pool::<T>::new()))
            .as_any_mut()
            .downcast_mut::<Pool<T>>()
            .expect("pool element type matches its component id");
        pool.resize(entity.index() + 1);
        pool.set(entity.index(), value);
        self.signatures[entity.index()].set(id);
        self.pending_add.insert(entity);
    }

    /// Detach `T` from `entity`.
    ///
    /// Clears the signature bit synchronously, so
    /// [`has_component`](Self::has_component) reflects the removal
    /// immediately. The pool slot
    /// keeps the stale value; it is unreachable through the checked
    /// accessors. System membership catches up at the next barrier.
    pub fn remove_component<T: 'static>(&mut self, entity: Entity) {
        if !self.guard_live(entity, "remove_component") {
            return;
        }
        let Some(id) = self.types.lookup::<T>() else {
            return;
        };
        self.signatures[entity.index()].clear(id);
        self.pending_add.insert(entity);
    }

    /// Whether `entity` currently owns a `T`. O(1) signature bit test.
    pub fn has_component<T: 'static>(&self, entity: Entity) -> bool {
        self.types
            .lookup::<T>()
            .is_some_and(|id| self.signatures[entity.index()].test(id))
    }

    /// The `T` attached to `entity`.
    ///
    /// The signature is authoritative: if the bit is unset this is
    /// [`EcsError::MissingComponent`], never a stale read.
    pub fn get_component<T: 'static>(&self, entity: Entity) -> Result<&T, EcsError> {
        let id = self
            .types
            .lookup::<T>()
            .ok_or_else(|| missing_component::<T>(entity))?;
        if !self.signatures[entity.index()].test(id) {
            return Err(missing_component::<T>(entity));
        }
        self.pools
            .get(id.index())
            .and_then(|slot| slot.as_deref())
            .and_then(|pool| pool.as_any().downcast_ref::<Pool<T>>())
            .and_then(|pool| pool.get(entity.index()))
            .ok_or_else(|| missing_component::<T>(entity))
    }

    /// Mutable access to the `T` attached to `entity`.
    pub fn get_component_mut<T: 'static>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        let id = self
            .types
            .lookup::<T>()
            .ok_or_else(|| missing_component::<T>(entity))?;
        if !self.signatures[entity.index()].test(id) {
            return Err(missing_component::<T>(entity));
        }
        self.pools
            .get_mut(id.index())
            .and_then(|slot| slot.as_deref_mut())
            .and_then(|pool| pool.as_any_mut().downcast_mut::<Pool<T>>())
            .and_then(|pool| pool.get_mut(entity.index()))
            .ok_or_else(|| missing_component::<T>(entity))
    }

    /// The component type map. Systems resolve their required ids here.
    pub fn component_types(&self) -> &ComponentTypes {
        &self.types
    }

    /// Mutable component type map, for constructing systems that lazily
    /// assign ids via [`ComponentTypes::id_of`].
    pub fn component_types_mut(&mut self) -> &mut ComponentTypes {
        &mut self.types
    }

    // -- systems ------------------------------------------------------------

    /// Register `system`, keyed by its type. One instance per system type;
    /// registering a second instance replaces the first.
    pub fn add_system<S: System>(&mut self, system: S) {
        if self
            .systems
            .insert(TypeId::of::<S>(), Box::new(system))
            .is_some()
        {
            tracing::warn!(system = type_name::<S>(), "system replaced");
        }
    }

    /// Deregister the `S` instance. Returns whether one was registered.
    pub fn remove_system<S: System>(&mut self) -> bool {
        self.systems.remove(&TypeId::of::<S>()).is_some()
    }

    /// Whether an `S` instance is registered.
    pub fn has_system<S: System>(&self) -> bool {
        self.systems.contains_key(&TypeId::of::<S>())
    }

    /// Borrow the registered `S` instance.
    pub fn get_system<S: System>(&self) -> Result<&S, EcsError> {
        self.systems
            .get(&TypeId::of::<S>())
            .and_then(|system| system.as_any().downcast_ref::<S>())
            .ok_or(EcsError::SystemNotFound {
                system: type_name::<S>(),
            })
    }

    /// Mutably borrow the registered `S` instance.
    pub fn get_system_mut<S: System>(&mut self) -> Result<&mut S, EcsError> {
        self.systems
            .get_mut(&TypeId::of::<S>())
            .and_then(|system| system.as_any_mut().downcast_mut::<S>())
            .ok_or(EcsError::SystemNotFound {
                system: type_name::<S>(),
            })
    }

    /// Run `f` with the registered `S` and the registry itself.
    ///
    /// A system iterating its matches needs the registry to read and write
    /// components, but the registry owns the system -- a direct call would
    /// alias. `run_system` lifts the system out for the duration of the
    /// closure and reinserts it afterwards; `S` is absent from the registry
    /// while `f` runs.
    pub fn run_system<S: System, R>(
        &mut self,
        f: impl FnOnce(&mut S, &mut Registry) -> R,
    ) -> Result<R, EcsError> {
        let key = TypeId::of::<S>();
        let mut boxed = self.systems.remove(&key).ok_or(EcsError::SystemNotFound {
            system: type_name::<S>(),
        })?;
        let system = boxed
            .as_any_mut()
            .downcast_mut::<S>()
            .expect("system box keyed by its own TypeId");
        let out = f(system, self);
        self.systems.insert(key, boxed);
        Ok(out)
    }

    // -- synchronization ----------------------------------------------------

    /// The synchronization barrier.
    ///
    /// Drains the staged entities: every freshly created or signature-changed
    /// entity is matched against every system -- added where its signature
    /// contains the requirement, removed where it no longer does. Then drains
    /// the staged destructions: the entity leaves every system, its signature
    /// is cleared, and the id is retired.
    ///
    /// All structural mutations requested since the previous barrier become
    /// visible to system iteration here, and only here.
    pub fn update(&mut self) {
        let staged = mem::take(&mut self.pending_add);
        let retiring = mem::take(&mut self.pending_remove);
        if !staged.is_empty() || !retiring.is_empty() {
            tracing::debug!(
                staged = staged.len(),
                retiring = retiring.len(),
                "reconciling system membership"
            );
        }

        for &entity in &staged {
            if retiring.contains(&entity) {
                continue;
            }
            let signature = self.signatures[entity.index()];
            for system in self.systems.values_mut() {
                if signature.contains_all(system.state().signature()) {
                    system.state_mut().add_entity(entity);
                } else {
                    system.state_mut().remove_entity(entity);
                }
            }
        }

        for &entity in &retiring {
            for system in self.systems.values_mut() {
                system.state_mut().remove_entity(entity);
            }
            self.signatures[entity.index()] = Signature::EMPTY;
            self.alive[entity.index()] = false;
        }
    }

    // -- internal -----------------------------------------------------------

    fn guard_live(&self, entity: Entity, operation: &'static str) -> bool {
        if self.is_alive(entity) {
            return true;
        }
        tracing::warn!(
            entity = entity.id(),
            operation,
            "ignoring operation on retired entity"
        );
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
