//! Core domain: the fixed frame clock, system ordering, and shared math.

pub mod curve;
pub mod math;
mod resources;

pub use curve::{CurveError, Gradient, Keyframe, Lerp, evaluate, sample_array};
pub use resources::{LOGIC_DELTA_TIME, SimTick, TICK_RATE};

use bevy::prelude::*;

/// Stages of one logic frame, chained in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Attack state follows the host animation counter.
    Track,
    /// Rotation, pose and secondary knocks.
    Swing,
    /// Host hit detection against live targets.
    Hits,
    /// Damage scaling of confirmed hits.
    Resolve,
    /// The host's per-hit update path.
    Apply,
    /// Combat text, cooldown trackers, health effects.
    Feedback,
    /// Counters move forward for the next frame.
    Advance,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimTick>()
            .configure_sets(
                FixedUpdate,
                (
                    FrameSet::Track,
                    FrameSet::Swing,
                    FrameSet::Hits,
                    FrameSet::Resolve,
                    FrameSet::Apply,
                    FrameSet::Feedback,
                    FrameSet::Advance,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, advance_tick.in_set(FrameSet::Advance));
    }
}

fn advance_tick(mut tick: ResMut<SimTick>) {
    tick.0 += 1;
}
