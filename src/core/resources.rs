//! Core domain: frame clock resources.

use bevy::prelude::*;

/// Logic frames per second of the host game loop.
pub const TICK_RATE: f64 = 60.0;

/// Seconds per logic frame.
pub const LOGIC_DELTA_TIME: f32 = 1.0 / 60.0;

/// Number of logic frames processed so far.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimTick(pub u64);
