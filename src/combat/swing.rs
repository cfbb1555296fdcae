//! Swing animation: attack progress to rotation, rotation to body pose.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use bevy::math::FloatExt;
use bevy::prelude::*;

use crate::combat::components::{AttackState, BodyFrame, LegFrame, SwingPose};
use crate::core::curve::{Keyframe, sample_array};
use crate::core::math::{modulo_angle, sign};
use crate::movement::Facing;

/// Start of the swing, relative to the attack angle.
pub const SWING_MIN_OFFSET: f32 = -FRAC_PI_2 * 1.25;
/// Furthest point of the swing, relative to the attack angle.
pub const SWING_MAX_OFFSET: f32 = FRAC_PI_2;

/// `(progress, fraction of the way from min to max)`.
/// 0.15 -> 0.151 is the strike: the blade snaps from wind-up to follow-through.
pub const SWING_KEYS: [(f32, f32); 7] = [
    (0.0, 0.0),
    (0.1, 0.0),
    (0.15, 0.125),
    (0.151, 0.8),
    (0.5, 1.0),
    (0.8, 0.8),
    (1.0, 0.8),
];

/// Pitch thresholds, highest first, with the pose and unmirrored offset.
pub const POSE_LADDER: [(f32, BodyFrame, Vec2); 4] = [
    (0.95, BodyFrame::Use1, Vec2::new(-8.0, -9.0)),
    (0.7, BodyFrame::Use2, Vec2::new(4.0, -8.0)),
    (0.3, BodyFrame::Use3, Vec2::new(4.0, 2.0)),
    (0.05, BodyFrame::Use4, Vec2::new(4.0, 7.0)),
];
pub const FALLBACK_POSE: (BodyFrame, Vec2) = (BodyFrame::Walk5, Vec2::new(-8.0, 2.0));

/// Horizontal aim needed to force the lunging leg frames.
const LUNGE_AIM_THRESHOLD: f32 = 0.5;

/// +1 when the swing sweeps with facing, -1 when it sweeps against it.
pub fn swing_direction(state: &AttackState, facing: Facing) -> i32 {
    if state.flipped {
        -facing.direction()
    } else {
        facing.direction()
    }
}

/// Rotation bounds of a swing, swapped so it always sweeps back to front.
pub fn swing_bounds(attack_angle: f32, direction: i32) -> (f32, f32) {
    let min = attack_angle + SWING_MIN_OFFSET;
    let max = attack_angle + SWING_MAX_OFFSET;
    if direction < 0 { (max, min) } else { (min, max) }
}

pub fn swing_keyframes(min: f32, max: f32) -> [Keyframe<f32>; 7] {
    SWING_KEYS.map(|(position, fraction)| Keyframe::new(position, min.lerp(max, fraction)))
}

/// Weapon rotation at `progress` through the swing.
pub fn swing_rotation(state: &AttackState, facing: Facing, progress: f32) -> f32 {
    let (min, max) = swing_bounds(state.angle, swing_direction(state, facing));
    sample_array(&swing_keyframes(min, max), progress)
}

/// How high the weapon points: 1 straight up, 0 straight down.
///
/// A weapon pointing behind the attacker reads as fully up or fully down.
pub fn pitch(rotation: f32, facing: Facing) -> f32 {
    let direction = Vec2::from_angle(rotation);
    if sign(direction.x) != facing.direction() {
        return if direction.y < 0.0 { 1.0 } else { 0.0 };
    }
    ((1.0 - direction.y) * 0.5).clamp(0.0, 1.0)
}

/// Body frame and item offset for a weapon rotation. Stateless, no hysteresis.
pub fn select_pose(rotation: f32, facing: Facing) -> (BodyFrame, Vec2) {
    let pitch = pitch(rotation, facing);
    let (body, offset) = POSE_LADDER
        .iter()
        .find(|(threshold, _, _)| pitch > *threshold)
        .map(|&(_, body, offset)| (body, offset))
        .unwrap_or(FALLBACK_POSE);
    (body, Vec2::new(offset.x * facing.sign(), offset.y))
}

/// Leg frame override while swinging on the ground without moving.
pub fn select_legs(state: &AttackState, grounded: bool, move_axis: i8) -> Option<LegFrame> {
    if !grounded || move_axis != 0 {
        return None;
    }
    Some(if state.direction.x.abs() > LUNGE_AIM_THRESHOLD {
        if state.flipped {
            LegFrame::Walk8
        } else {
            LegFrame::Jump
        }
    } else {
        LegFrame::Walk13
    })
}

/// Everything the renderer needs for one attacking frame.
pub fn compute_pose(
    state: &AttackState,
    facing: Facing,
    progress: f32,
    center: Vec2,
    grounded: bool,
    move_axis: i8,
) -> SwingPose {
    let rotation = modulo_angle(swing_rotation(state, facing, progress));
    let (body, offset) = select_pose(rotation, facing);

    let mut item_rotation = rotation + FRAC_PI_4;
    if facing == Facing::Left {
        item_rotation += FRAC_PI_2;
    }

    SwingPose {
        rotation,
        body,
        offset,
        legs: select_legs(state, grounded, move_axis),
        item_rotation,
        item_location: center + offset,
    }
}
