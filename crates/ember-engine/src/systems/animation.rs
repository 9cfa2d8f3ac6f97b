//! Flip-book sprite animation.

use std::time::Duration;

use ember_ecs::prelude::*;

use crate::components::{Animation, Sprite};

/// Advances every animated sprite to the frame implied by the clock.
///
/// The clock is whatever monotonic value the caller runs the simulation on;
/// pacing is not this system's concern.
pub struct AnimationSystem {
    state: SystemState,
}

impl AnimationSystem {
    pub fn new(types: &mut ComponentTypes) -> Self {
        let mut state = SystemState::new();
        state.require(types.id_of::<Animation>());
        state.require(types.id_of::<Sprite>());
        Self { state }
    }

    /// Select each entity's frame for clock value `now` and repoint its
    /// sprite's source rect at it. Frames are laid out horizontally, so the
    /// rect slides by one sprite width per frame.
    pub fn run(&self, registry: &mut Registry, now: Duration) -> Result<(), EcsError> {
        for &entity in self.state.entities() {
            let animation = registry.get_component_mut::<Animation>(entity)?;
            if animation.num_frames == 0 {
                continue;
            }
            let elapsed = now.saturating_sub(animation.start);
            let frames_elapsed = elapsed.as_millis() as u64 * animation.frame_rate as u64 / 1000;
            animation.current_frame = (frames_elapsed % animation.num_frames as u64) as u32;
            let frame = animation.current_frame;

            let sprite = registry.get_component_mut::<Sprite>(entity)?;
            sprite.src.x = (frame * sprite.width) as i32;
        }
        Ok(())
    }
}

impl System for AnimationSystem {
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
