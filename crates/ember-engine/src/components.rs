//! The built-in component types.
//!
//! Components are plain data; all behavior lives in the systems. Any other
//! `'static` type works as a component too -- these are just the ones the
//! built-in systems operate on.

use std::ops::{Add, AddAssign, Mul};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Vec2 / Rect
// ---------------------------------------------------------------------------

/// A 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// An axis-aligned pixel rectangle. Used both for tile-sheet source regions
/// and for destination placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Where an entity sits in the world: position, per-axis scale, and rotation
/// in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
    pub rotation: f64,
}

impl Transform {
    pub fn new(position: Vec2, scale: Vec2, rotation: f64) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }

    /// A transform at `position` with unit scale and no rotation.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::default(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// RigidBody
// ---------------------------------------------------------------------------

/// Constant-velocity movement. Integrated by
/// [`MovementSystem`](crate::systems::MovementSystem).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidBody {
    pub velocity: Vec2,
}

impl RigidBody {
    pub fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }
}

// ---------------------------------------------------------------------------
// Sprite
// ---------------------------------------------------------------------------

/// A textured quad: which texture, which sub-region of it, and the draw
/// order layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Texture id resolved through the [`AssetStore`](crate::assets::AssetStore).
    pub asset_id: String,
    /// Unscaled width in pixels.
    pub width: u32,
    /// Unscaled height in pixels.
    pub height: u32,
    /// Draw order: lower values render first (further back).
    pub z_index: i32,
    /// Source region within the texture.
    pub src: Rect,
}

impl Sprite {
    /// A sprite covering the whole texture region from its origin, on layer 0.
    pub fn new(asset_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            asset_id: asset_id.into(),
            width,
            height,
            z_index: 0,
            src: Rect::new(0, 0, width, height),
        }
    }
}

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

/// Flip-book animation over horizontally laid out frames.
///
/// [`AnimationSystem`](crate::systems::AnimationSystem) derives the current
/// frame from the clock it is handed, so the component stores when the
/// animation started, not a running timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Total frames in the strip. Must be at least 1.
    pub num_frames: u32,
    /// Frames per second.
    pub frame_rate: u32,
    /// Clock value at which frame 0 started.
    pub start: Duration,
    /// Frame selected by the last animation pass.
    pub current_frame: u32,
}

impl Animation {
    pub fn new(num_frames: u32, frame_rate: u32, start: Duration) -> Self {
        Self {
            num_frames,
            frame_rate,
            start,
            current_frame: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
