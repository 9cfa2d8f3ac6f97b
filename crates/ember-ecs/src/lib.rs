//! Ember ECS -- signature-and-pool Entity-Component-System core.
//!
//! Components are plain `'static` data types attached to integer [`Entity`]
//! ids. Each entity carries a [`Signature`] bitset recording which component
//! types it owns; each [`System`] declares the signature it requires. The
//! [`Registry`] owns all storage and reconciles system membership at one
//! explicit synchronization barrier, [`Registry::update`], so structural
//! changes never land while a system is iterating.
//!
//! # Quick Start
//!
//! ```
//! use ember_ecs::prelude::*;
//!
//! struct Position { x: f32, y: f32 }
//! struct Velocity { dx: f32, dy: f32 }
//!
//! struct Movers { state: SystemState }
//!
//! impl Movers {
//!     fn new(types: &mut ComponentTypes) -> Self {
//!         let mut state = SystemState::new();
//!         state.require(types.id_of::<Position>());
//!         state.require(types.id_of::<Velocity>());
//!         Self { state }
//!     }
//! }
//!
//! impl System for Movers {
//!     fn state(&self) -> &SystemState { &self.state }
//!     fn state_mut(&mut self) -> &mut SystemState { &mut self.state }
//! }
//!
//! let mut registry = Registry::new();
//! let movers = Movers::new(registry.component_types_mut());
//! registry.add_system(movers);
//!
//! let entity = registry.create_entity();
//! registry.add_component(entity, Position { x: 0.0, y: 0.0 });
//! registry.add_component(entity, Velocity { dx: 1.0, dy: 0.0 });
//!
//! registry.update();
//! assert_eq!(registry.get_system::<Movers>().unwrap().state().entities(), &[entity]);
//! ```

#![deny(unsafe_code)]

pub mod component;
pub mod entity;
pub mod pool;
pub mod registry;
pub mod signature;
pub mod system;

use crate::entity::Entity;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by ECS operations.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The entity's signature does not include the requested component type.
    #[error("entity {entity} has no component '{component}'")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    /// No system of the requested type is registered.
    #[error("system '{system}' is not registered")]
    SystemNotFound { system: &'static str },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::component::{ComponentTypeId, ComponentTypes};
    pub use crate::entity::Entity;
    pub use crate::pool::{AnyPool, Pool};
    pub use crate::registry::Registry;
    pub use crate::signature::{Signature, MAX_COMPONENT_TYPES};
    pub use crate::system::{System, SystemState};
    pub use crate::EcsError;
}

// ---------------------------------------------------------------------------
// Integration Tests
// ---------------------------------------------------------------------------
