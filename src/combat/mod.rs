//! Combat domain: arc-based melee swings, hit registration and damage scaling.

mod components;
mod cooldown_override;
mod events;
pub mod geometry;
mod resources;
pub mod scaling;
pub mod swing;
mod systems;

pub use components::{
    AttackState, BodyFrame, CooldownTracker, Debris, LegFrame, MeleeWeapon, SwingPose,
};
pub use cooldown_override::{CooldownOverrideError, InstallOutcome, install_cooldown_override};
pub use events::{
    CooldownNotification, DamageEvent, DeathEvent, DebrisKnocked, MeleeHit, SwingStarted,
};
pub use geometry::{Sector, rect_intersects_arc};
pub use resources::CombatRng;
pub use scaling::{ScaledHit, scale_hit};
pub use swing::{select_pose, swing_rotation};
pub use systems::{
    DEBRIS_MIN_AGE_TICKS, HIT_COOLDOWN_TICKS, MAX_DEBRIS_KNOCKS_PER_FRAME, SWING_HALF_ARC,
    can_hit,
};

use bevy::prelude::*;

use crate::combat::systems::{
    age_debris, apply_cooldown_notifications, apply_debris_knocks, detect_melee_hits,
    drive_swing_animation, knock_debris, resolve_melee_hits, tick_cooldown_trackers,
    track_attack_state,
};
use crate::content::MeleeConfig;
use crate::core::FrameSet;
use crate::host::HostHitPipeline;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        let seed = app
            .world()
            .get_resource::<MeleeConfig>()
            .map_or(0, |config| config.rng_seed);

        app.insert_resource(CombatRng::new(seed))
            .add_message::<SwingStarted>()
            .add_message::<MeleeHit>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<CooldownNotification>()
            .add_message::<DebrisKnocked>()
            .add_systems(FixedUpdate, track_attack_state.in_set(FrameSet::Track))
            .add_systems(
                FixedUpdate,
                (drive_swing_animation, knock_debris)
                    .chain()
                    .in_set(FrameSet::Swing),
            )
            .add_systems(FixedUpdate, detect_melee_hits.in_set(FrameSet::Hits))
            .add_systems(FixedUpdate, resolve_melee_hits.in_set(FrameSet::Resolve))
            .add_systems(
                FixedUpdate,
                (apply_cooldown_notifications, apply_debris_knocks).in_set(FrameSet::Feedback),
            )
            .add_systems(
                FixedUpdate,
                (tick_cooldown_trackers, age_debris).in_set(FrameSet::Advance),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            FixedUpdate,
            systems::log_item_location
                .after(drive_swing_animation)
                .in_set(FrameSet::Swing),
        );
    }

    /// Patches the host hit path once every plugin has been built.
    fn finish(&self, app: &mut App) {
        let scope = app
            .world()
            .get_resource::<MeleeConfig>()
            .map(|config| config.cooldown_override_scope)
            .unwrap_or_default();

        let Some(mut pipeline) = app.world_mut().get_resource_mut::<HostHitPipeline>() else {
            error!("No host hit pipeline to patch; add HostPlugin before CombatPlugin");
            panic!("cooldown override: host hit pipeline missing");
        };

        match install_cooldown_override(&mut pipeline, scope) {
            Ok(InstallOutcome::Installed) => {
                info!("Host attack cooldown override installed ({:?})", scope);
            }
            Ok(InstallOutcome::AlreadyInstalled) => {
                debug!("Host attack cooldown override already installed");
            }
            Err(err) => {
                error!("{}", err);
                panic!("cooldown override: {err}");
            }
        }
    }
}
