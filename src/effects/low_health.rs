//! Low-health screen effects: an intensity that eases towards a target
//! taken from current health, and a bleed drip rate that follows it.

use std::sync::LazyLock;

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::core::curve::{Gradient, Keyframe};
use crate::core::math::step_towards;
use crate::core::LOGIC_DELTA_TIME;
use crate::host::Health;

/// Target intensity over current health points.
pub static LOW_HEALTH_INTENSITY: LazyLock<Gradient<f32>> = LazyLock::new(|| {
    Gradient::new(vec![
        Keyframe::new(0.0, 1.0),
        Keyframe::new(20.0, 1.0),
        Keyframe::new(50.0, 0.0),
        Keyframe::new(100.0, 0.0),
    ])
    .expect("low health intensity keys are ordered")
});

/// Intensity change per second.
pub const INTENSITY_RATE: f32 = 0.75;
/// Drips per frame at full intensity.
pub const BLEED_RATE: f32 = 0.25;

/// Put on the locally controlled actor only.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LowHealthEffects {
    pub intensity: f32,
    pub bleed_counter: f32,
}

impl LowHealthEffects {
    /// Advances one frame and returns how many blood drips to spawn.
    pub fn update(&mut self, current_health: i32) -> u32 {
        let goal = LOW_HEALTH_INTENSITY.sample(current_health as f32);
        self.intensity = step_towards(self.intensity, goal, INTENSITY_RATE * LOGIC_DELTA_TIME);

        self.bleed_counter += self.intensity * BLEED_RATE;
        let mut drips = 0;
        while self.bleed_counter >= 1.0 {
            self.bleed_counter -= 1.0;
            drips += 1;
        }
        drips
    }
}

/// One blood particle should be emitted over `entity`.
#[derive(Debug, Clone, Copy)]
pub struct BleedDrip {
    pub entity: Entity,
}

impl Message for BleedDrip {}

pub(crate) fn update_low_health_effects(
    mut drips: MessageWriter<BleedDrip>,
    mut query: Query<(Entity, &Health, &mut LowHealthEffects)>,
) {
    for (entity, health, mut effects) in &mut query {
        for _ in 0..effects.update(health.current) {
            drips.write(BleedDrip { entity });
        }
    }
}
