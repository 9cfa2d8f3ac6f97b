//! Property tests for the registry.
//!
//! These tests use `proptest` to generate random sequences of structural
//! operations and verify that after every synchronization barrier, each
//! system's matched list is exactly the set of live entities whose signature
//! contains the system's requirement.

use ember_ecs::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Pos {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, PartialEq)]
struct Vel {
    dx: f32,
    dy: f32,
}

struct Positioned {
    state: SystemState,
}

impl Positioned {
    fn new(types: &mut ComponentTypes) -> Self {
        let mut state = SystemState::new();
        state.require(types.id_of::<Pos>());
        Self { state }
    }
}

impl System for Positioned {
    fn state(&self) -> &SystemState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut SystemState {
        &mut self.state
    }
}

struct Moving {
    state: SystemState,
}

impl Moving {
    fn new(types: &mut ComponentTypes) -> Self {
        let mut state = SystemState::new();
        state.require(types.id_of::<Pos>());
        state.require(types.id_of::<Vel>());
        Self { state }
    }
}

impl System for Moving {
    fn state(&self) -> &SystemState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut SystemState {
        &mut self.state
    }
}

/// Structural operations the generator can pick from. Index operands are
/// taken modulo the number of created entities, so ops may target retired
/// entities on purpose.
#[derive(Debug, Clone)]
enum RegistryOp {
    Create,
    AddPos(usize),
    AddVel(usize),
    RemovePos(usize),
    RemoveVel(usize),
    Destroy(usize),
    Update,
}

fn registry_op_strategy() -> impl Strategy<Value = RegistryOp> {
    prop_oneof![
        3 => Just(RegistryOp::Create),
        2 => (0..64usize).prop_map(RegistryOp::AddPos),
        2 => (0..64usize).prop_map(RegistryOp::AddVel),
        1 => (0..64usize).prop_map(RegistryOp::RemovePos),
        1 => (0..64usize).prop_map(RegistryOp::RemoveVel),
        1 => (0..64usize).prop_map(RegistryOp::Destroy),
        2 => Just(RegistryOp::Update),
    ]
}

/// Reference model of one entity's structural state.
#[derive(Debug, Default, Clone)]
struct ModelEntity {
    has_pos: bool,
    has_vel: bool,
    alive: bool,
    pending_destroy: bool,
}

fn check_membership<S: System>(registry: &Registry, model: &[(Entity, ModelEntity)], require_vel: bool) {
    let matched = registry.get_system::<S>().unwrap().state().entities();

    // Set semantics: no duplicates.
    let mut seen = std::collections::HashSet::new();
    for &e in matched {
        assert!(seen.insert(e), "duplicate match for {e}");
    }

    for (entity, state) in model {
        let expected = state.alive && state.has_pos && (!require_vel || state.has_vel);
        assert_eq!(
            matched.contains(entity),
            expected,
            "membership mismatch for {entity}: {state:?}"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    #[test]
    fn membership_equals_predicate_after_every_barrier(
        ops in prop::collection::vec(registry_op_strategy(), 1..80)
    ) {
        let mut registry = Registry::new();
        let positioned = Positioned::new(registry.component_types_mut());
        registry.add_system(positioned);
        let moving = Moving::new(registry.component_types_mut());
        registry.add_system(moving);

        let mut model: Vec<(Entity, ModelEntity)> = Vec::new();

        for op in ops {
            match op {
                RegistryOp::Create => {
                    let e = registry.create_entity();
                    model.push((e, ModelEntity { alive: true, ..ModelEntity::default() }));
                }
                RegistryOp::AddPos(i) => {
                    if model.is_empty() { continue; }
                    let idx = i % model.len();
                    let (e, state) = &mut model[idx];
                    registry.add_component(*e, Pos { x: 0.0, y: 0.0 });
                    if state.alive {
                        state.has_pos = true;
                    }
                }
                RegistryOp::AddVel(i) => {
                    if model.is_empty() { continue; }
                    let idx = i % model.len();
                    let (e, state) = &mut model[idx];
                    registry.add_component(*e, Vel { dx: 0.0, dy: 0.0 });
                    if state.alive {
                        state.has_vel = true;
                    }
                }
                RegistryOp::RemovePos(i) => {
                    if model.is_empty() { continue; }
                    let idx = i % model.len();
                    let (e, state) = &mut model[idx];
                    registry.remove_component::<Pos>(*e);
                    if state.alive {
                        state.has_pos = false;
                    }
                }
                RegistryOp::RemoveVel(i) => {
                    if model.is_empty() { continue; }
                    let idx = i % model.len();
                    let (e, state) = &mut model[idx];
                    registry.remove_component::<Vel>(*e);
                    if state.alive {
                        state.has_vel = false;
                    }
                }
                RegistryOp::Destroy(i) => {
                    if model.is_empty() { continue; }
                    let idx = i % model.len();
                    let (e, state) = &mut model[idx];
                    registry.destroy_entity(*e);
                    if state.alive {
                        state.pending_destroy = true;
                    }
                }
                RegistryOp::Update => {
                    registry.update();
                    for (_, state) in &mut model {
                        if state.pending_destroy {
                            state.alive = false;
                            state.has_pos = false;
                            state.has_vel = false;
                            state.pending_destroy = false;
                        }
                    }
                    check_membership::<Positioned>(&registry, &model, false);
                    check_membership::<Moving>(&registry, &model, true);
                }
            }
        }

        // Signatures are synchronous even when membership is deferred.
        for (entity, state) in &model {
            prop_assert_eq!(registry.has_component::<Pos>(*entity), state.has_pos);
            prop_assert_eq!(registry.has_component::<Vel>(*entity), state.has_vel);
        }
    }
}
