//! The built-in systems.
//!
//! Each system declares its component requirement at construction time and
//! exposes a `run` method with the parameters its behavior needs -- a time
//! step, a clock, or the asset store and render queue. Membership is
//! maintained by [`Registry::update`](ember_ecs::registry::Registry::update);
//! `run` only walks the cached matches.

pub mod animation;
pub mod movement;
pub mod render;

pub use animation::AnimationSystem;
pub use movement::MovementSystem;
pub use render::{DrawOp, RenderError, RenderQueue, RenderSystem};
