//! Effects domain: health-driven feedback for the local actor.

mod low_health;

pub use low_health::{BLEED_RATE, BleedDrip, INTENSITY_RATE, LOW_HEALTH_INTENSITY, LowHealthEffects};

use bevy::prelude::*;

use crate::core::FrameSet;
use crate::effects::low_health::update_low_health_effects;

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<BleedDrip>()
            .add_systems(FixedUpdate, update_low_health_effects.in_set(FrameSet::Feedback));
    }
}
