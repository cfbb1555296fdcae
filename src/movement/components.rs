//! Movement domain: facing and per-frame intent read by the melee controller.

use avian2d::prelude::*;
use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn direction(self) -> i32 {
        match self {
            Facing::Right => 1,
            Facing::Left => -1,
        }
    }

    pub fn sign(self) -> f32 {
        self.direction() as f32
    }
}

/// What the controlling player or AI wants this frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MeleeIntent {
    /// World-space point the attack is aimed at (the cursor).
    pub aim_point: Vec2,
    /// Horizontal key input: -1 left, 0 none, 1 right.
    pub move_axis: i8,
}

/// Grounded means no vertical motion this frame.
pub fn on_ground(velocity: &LinearVelocity) -> bool {
    velocity.y == 0.0
}
