//! Ember Engine -- the game-facing layer over [`ember_ecs`].
//!
//! This crate supplies what a 2D game needs around the ECS core: the
//! built-in plain-data components, the movement/animation/render systems,
//! a string-keyed [`AssetStore`](assets::AssetStore), and the tile-grid
//! level loader. It contains no windowing, GPU, or input code -- the render
//! target is an opaque [`RenderQueue`](systems::RenderQueue) of draw
//! commands and the asset store holds texture metadata only, so an external
//! renderer owns the actual I/O.
//!
//! # Quick Start
//!
//! ```
//! use ember_engine::prelude::*;
//!
//! let mut registry = Registry::new();
//! let movement = MovementSystem::new(registry.component_types_mut());
//! registry.add_system(movement);
//!
//! let tank = registry.create_entity();
//! registry.add_component(tank, Transform::at(Vec2::new(10.0, 20.0)));
//! registry.add_component(tank, RigidBody::new(Vec2::new(30.0, 0.0)));
//!
//! registry.update();
//! registry
//!     .run_system::<MovementSystem, _>(|system, registry| system.run(registry, 1.0))
//!     .unwrap()
//!     .unwrap();
//!
//! let transform = registry.get_component::<Transform>(tank).unwrap();
//! assert_eq!(transform.position, Vec2::new(40.0, 20.0));
//! ```

#![deny(unsafe_code)]

pub mod assets;
pub mod components;
pub mod systems;
pub mod tilemap;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

/// Re-export the ECS core for convenience.
pub use ember_ecs;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common engine usage.
pub mod prelude {
    // Re-export everything from the ECS prelude.
    pub use ember_ecs::prelude::*;

    // Engine-specific exports.
    pub use crate::assets::{AssetError, AssetStore, TextureInfo};
    pub use crate::components::{Animation, Rect, RigidBody, Sprite, Transform, Vec2};
    pub use crate::systems::{
        AnimationSystem, DrawOp, MovementSystem, RenderError, RenderQueue, RenderSystem,
    };
    pub use crate::tilemap::{load_tilemap, load_tilemap_file, TilemapConfig, TilemapError};
}
