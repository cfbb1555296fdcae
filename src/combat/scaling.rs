//! Momentum-based damage and knockback scaling, with its combat-text styling.

use std::sync::LazyLock;

use bevy::color::Srgba;

use crate::core::curve::{Gradient, Keyframe};

/// Scale at zero speed, before the floor of 1 applies.
pub const SCALE_BASE: f32 = 0.78;
/// Attacker speed (units per tick) that adds 1.0 to the scale.
pub const SCALE_SPEED_DIVISOR: f32 = 8.0;

/// Text colour over the gradient scale (the hit scale, doubled on crits).
pub static DAMAGE_SCALE_COLORS: LazyLock<Gradient<Srgba>> = LazyLock::new(|| {
    Gradient::new(vec![
        Keyframe::new(0.0, Srgba::BLACK),
        Keyframe::new(1.0, Srgba::rgb_u8(211, 211, 211)),
        Keyframe::new(1.25, Srgba::rgb_u8(0, 128, 0)),
        Keyframe::new(1.75, Srgba::rgb_u8(255, 255, 0)),
        Keyframe::new(2.5, Srgba::rgb_u8(255, 0, 0)),
    ])
    .expect("damage scale colour keys are ordered")
});

/// Outcome of scaling one confirmed hit.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledHit {
    pub damage: i32,
    pub knockback: f32,
    pub crit: bool,
    pub scale: f32,
    /// `(x1.25)` or `(CRITx1.25)`.
    pub display_text: String,
    pub display_color: Srgba,
}

/// `max(1, 0.78 + speed / 8)`.
pub fn velocity_scale(attacker_speed: f32) -> f32 {
    (SCALE_BASE + attacker_speed / SCALE_SPEED_DIVISOR).max(1.0)
}

/// Rounds scaled damage to the nearest integer, ties to even.
pub fn round_damage(value: f32) -> i32 {
    value.round_ties_even() as i32
}

pub fn scale_hit(
    base_damage: i32,
    base_knockback: f32,
    crit: bool,
    attacker_speed: f32,
) -> ScaledHit {
    let scale = velocity_scale(attacker_speed);
    let gradient_scale = if crit { scale * 2.0 } else { scale };

    ScaledHit {
        damage: round_damage(base_damage as f32 * scale),
        knockback: base_knockback * scale,
        crit,
        scale,
        display_text: format!("({}{:.2})", if crit { "CRITx" } else { "x" }, scale),
        display_color: DAMAGE_SCALE_COLORS.sample(gradient_scale),
    }
}
