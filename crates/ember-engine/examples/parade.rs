//! Headless parade demo -- loads a small level, marches a column of tanks
//! across it, and prints each frame's draw queue.
//!
//! Run with:
//!   cargo run --example parade -p ember-engine
//!
//! Set `RUST_LOG=debug` to watch the registry reconcile membership.

use std::time::Duration;

use anyhow::Result;
use ember_engine::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut registry = Registry::new();
    let movement = MovementSystem::new(registry.component_types_mut());
    registry.add_system(movement);
    let animation = AnimationSystem::new(registry.component_types_mut());
    registry.add_system(animation);
    let render = RenderSystem::new(registry.component_types_mut());
    registry.add_system(render);

    let mut assets = AssetStore::new();
    assets.add_texture(TextureInfo {
        id: "meadow".to_owned(),
        path: "assets/tilemaps/meadow.png".into(),
        width: 64,
        height: 64,
    });
    assets.add_texture(TextureInfo {
        id: "tank".to_owned(),
        path: "assets/images/tank.png".into(),
        width: 64,
        height: 32,
    });

    let config = TilemapConfig {
        asset_id: "meadow".to_owned(),
        tile_size: 32,
        scale: 1.0,
        sheet_columns: 2,
        sheet_rows: 2,
        z_index: 0,
    };
    load_tilemap(&mut registry, &config, "0,1,0,1\n2,3,2,3")?;

    for i in 0..3u32 {
        let tank = registry.create_entity();
        registry.add_component(tank, Transform::at(Vec2::new(0.0, i as f32 * 40.0)));
        registry.add_component(tank, RigidBody::new(Vec2::new(20.0 + i as f32 * 10.0, 0.0)));
        let mut sprite = Sprite::new("tank", 32, 32);
        sprite.z_index = 1;
        registry.add_component(tank, sprite);
        registry.add_component(tank, Animation::new(2, 4, Duration::ZERO));
    }

    let mut queue = RenderQueue::new();
    for frame in 1..=5u64 {
        let now = Duration::from_millis(250 * frame);

        registry.update();
        registry.run_system::<MovementSystem, _>(|system, registry| system.run(registry, 0.25))??;
        registry.run_system::<AnimationSystem, _>(|system, registry| system.run(registry, now))??;

        queue.clear();
        registry
            .get_system::<RenderSystem>()?
            .run(&registry, &assets, &mut queue)?;

        println!("frame {frame}: {} draws", queue.len());
        for op in queue.ops() {
            println!(
                "  {:>8} src({:3},{:3}) -> dst({:3},{:3}) {}x{}",
                op.texture_id, op.src.x, op.src.y, op.dst.x, op.dst.y, op.dst.w, op.dst.h
            );
        }
    }

    Ok(())
}
