//! Host domain: the per-actor state the host game owns and the melee engine reads.

use bevy::prelude::*;

/// The host's item-use animation counter.
///
/// `remaining` counts down once per frame while an item is being used; the
/// actor is attacking for as long as it is above zero.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemAnimation {
    pub remaining: u32,
    pub max: u32,
}

impl ItemAnimation {
    pub fn start(duration: u32) -> Self {
        Self {
            remaining: duration,
            max: duration,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Normalized swing progress: 0 at the first frame, 1 at the end.
    pub fn progress(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        1.0 - (self.remaining as f32 / self.max as f32).clamp(0.0, 1.0)
    }

    /// True during the first two frames of an active use.
    pub fn is_opening(&self) -> bool {
        self.is_active() && self.remaining + 1 >= self.max
    }
}

/// The host's attack cooldown field. While non-zero the host's hit
/// detection registers no hits for this actor.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackCooldown {
    pub ticks: u32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.current = (self.current - amount.max(0)).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

/// Axis-aligned hit bounds centered on the entity's translation.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HitBounds {
    pub size: Vec2,
}

impl HitBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn rect(&self, center: Vec2) -> Rect {
        Rect::from_center_size(center, self.size)
    }
}
