//! Constant-velocity integration.

use ember_ecs::prelude::*;

use crate::components::{RigidBody, Transform};

/// Moves every entity with a [`Transform`] and a [`RigidBody`] by its
/// velocity each step.
pub struct MovementSystem {
    state: SystemState,
}

impl MovementSystem {
    pub fn new(types: &mut ComponentTypes) -> Self {
        let mut state = SystemState::new();
        state.require(types.id_of::<Transform>());
        state.require(types.id_of::<RigidBody>());
        Self { state }
    }

    /// Integrate one step of `dt` seconds.
    pub fn run(&self, registry: &mut Registry, dt: f32) -> Result<(), EcsError> {
        for &entity in self.state.entities() {
            let velocity = registry.get_component::<RigidBody>(entity)?.velocity;
            let transform = registry.get_component_mut::<Transform>(entity)?;
            transform.position += velocity * dt;
        }
        Ok(())
    }
}

impl System for MovementSystem {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Vec2;

    fn setup() -> Registry {
        let mut registry = Registry::new();
        let movement = MovementSystem::new(registry.component_types_mut());
        registry.add_system(movement);
        registry
    }

    #[test]
    fn integrates_position_by_velocity() {
        let mut registry = setup();
        let e = registry.create_entity();
        registry.add_component(e, Transform::at(Vec2::new(10.0, 20.0)));
        registry.add_component(e, RigidBody::new(Vec2::new(40.0, -20.0)));
        registry.update();

        registry
            .run_system::<MovementSystem, _>(|system, registry| system.run(registry, 0.5))
            .unwrap()
            .unwrap();

        let transform = registry.get_component::<Transform>(e).unwrap();
        assert_eq!(transform.position, Vec2::new(30.0, 10.0));
    }

    #[test]
    fn ignores_entities_without_a_rigid_body() {
        let mut registry = setup();
        let e = registry.create_entity();
        registry.add_component(e, Transform::at(Vec2::new(1.0, 1.0)));
        registry.update();

        registry
            .run_system::<MovementSystem, _>(|system, registry| system.run(registry, 1.0))
            .unwrap()
            .unwrap();

        let transform = registry.get_component::<Transform>(e).unwrap();
        assert_eq!(transform.position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn repeated_steps_accumulate() {
        let mut registry = setup();
        let e = registry.create_entity();
        registry.add_component(e, Transform::default());
        registry.add_component(e, RigidBody::new(Vec2::new(3.0, 0.0)));
        registry.update();

        for _ in 0..4 {
            registry
                .run_system::<MovementSystem, _>(|system, registry| system.run(registry, 0.25))
                .unwrap()
                .unwrap();
        }

        let transform = registry.get_component::<Transform>(e).unwrap();
        assert_eq!(transform.position, Vec2::new(3.0, 0.0));
    }
}
