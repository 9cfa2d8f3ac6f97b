//! Sprite rendering into an opaque draw queue.
//!
//! The actual renderer is a collaborator outside this crate, so the system
//! emits backend-agnostic [`DrawOp`] records into a caller-owned
//! [`RenderQueue`] instead of talking to a graphics API.

use ember_ecs::prelude::*;

use crate::assets::{AssetError, AssetStore};
use crate::components::{Rect, Sprite, Transform};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by a render pass.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Ecs(#[from] EcsError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

// ---------------------------------------------------------------------------
// DrawOp / RenderQueue
// ---------------------------------------------------------------------------

/// One resolved draw command: copy `src` of the texture to `dst` of the
/// target surface, rotated by `rotation` degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub texture_id: String,
    pub src: Rect,
    pub dst: Rect,
    pub rotation: f64,
}

/// The opaque target surface: an ordered list of draw commands for the
/// external renderer to consume.
#[derive(Debug, Default)]
pub struct RenderQueue {
    ops: Vec<DrawOp>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// The queued commands, in draw order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Discard all queued commands. Call between frames.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

// ---------------------------------------------------------------------------
// RenderSystem
// ---------------------------------------------------------------------------

/// Emits a [`DrawOp`] for every entity with a [`Transform`] and a
/// [`Sprite`], back-to-front by `z_index`.
pub struct RenderSystem {
    state: SystemState,
}

impl RenderSystem {
    pub fn new(types: &mut ComponentTypes) -> Self {
        let mut state = SystemState::new();
        state.require(types.id_of::<Transform>());
        state.require(types.id_of::<Sprite>());
        Self { state }
    }

    /// Queue one frame's draw commands.
    ///
    /// Matches are sorted by ascending `z_index` per frame; the sort is
    /// stable, so entities on the same layer keep match order.
    pub fn run(
        &self,
        registry: &Registry,
        assets: &AssetStore,
        queue: &mut RenderQueue,
    ) -> Result<(), RenderError> {
        let mut order: Vec<(i32, Entity)> = Vec::with_capacity(self.state.entities().len());
        for &entity in self.state.entities() {
            order.push((registry.get_component::<Sprite>(entity)?.z_index, entity));
        }
        order.sort_by_key(|&(z, _)| z);

        for (_, entity) in order {
            let transform = registry.get_component::<Transform>(entity)?;
            let sprite = registry.get_component::<Sprite>(entity)?;
            let texture = assets.texture(&sprite.asset_id)?;
            queue.push(DrawOp {
                texture_id: texture.id.clone(),
                src: sprite.src,
                dst: Rect::new(
                    transform.position.x as i32,
                    transform.position.y as i32,
                    (sprite.width as f32 * transform.scale.x) as u32,
                    (sprite.height as f32 * transform.scale.y) as u32,
                ),
                rotation: transform.rotation,
            });
        }
        Ok(())
    }
}

impl System for RenderSystem {
    fn state(&self) -> &SystemState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SystemState {
        &mut self.state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
