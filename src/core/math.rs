//! Scalar helpers shared by the curve, swing and effect code.

use std::f32::consts::{PI, TAU};

/// Moves `current` towards `goal` by at most `step`.
pub fn step_towards(current: f32, goal: f32, step: f32) -> f32 {
    if current < goal {
        (current + step).min(goal)
    } else {
        (current - step).max(goal)
    }
}

/// Where `value` sits between `from` and `to`, unclamped.
pub fn inverse_lerp(from: f32, to: f32, value: f32) -> f32 {
    (value - from) / (to - from)
}

/// Normalizes an angle into (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Normalizes an angle into [0, TAU).
pub fn modulo_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Integer sign where zero maps to zero.
pub fn sign(value: f32) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
