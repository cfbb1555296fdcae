//! Host domain: the slice of the host game the melee engine plugs into.
//!
//! The host owns item animation counters, health, the per-hit update path
//! and the floating text list. The melee engine only reads these or hooks
//! the hit path through [`HostHitPipeline`].

mod components;
mod resources;
mod systems;

pub use components::{AttackCooldown, Health, HitBounds, ItemAnimation, Team};
pub use resources::{
    CRIT_DAMAGE_MULTIPLIER, CRIT_DAMAGE_TEXT_COLOR, DAMAGE_TEXT_COLOR, DEFAULT_COOLDOWN_FACTOR,
    DEFAULT_COOLDOWN_MIN, FloatingText, FloatingTexts, HitStep, HostHitPipeline, OverrideScope,
};
pub use systems::MAX_KNOCKBACK_SPEED;

use bevy::prelude::*;

use crate::core::FrameSet;
use crate::host::systems::{
    advance_item_animations, expire_floating_texts, run_host_hit_pipeline, tick_attack_cooldowns,
};

pub struct HostPlugin;

impl Plugin for HostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HostHitPipeline>()
            .init_resource::<FloatingTexts>()
            .add_systems(FixedUpdate, run_host_hit_pipeline.in_set(FrameSet::Apply))
            .add_systems(
                FixedUpdate,
                (
                    advance_item_animations,
                    tick_attack_cooldowns,
                    expire_floating_texts,
                )
                    .in_set(FrameSet::Advance),
            );
    }
}
