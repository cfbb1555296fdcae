//! Combat domain: melee weapon, attack state and swing output components.

use bevy::prelude::*;

use crate::core::math::inverse_lerp;
use crate::core::TICK_RATE;
use crate::host::{AttackCooldown, ItemAnimation};

/// Melee behaviour of the weapon an attacker is swinging.
///
/// Inserting it on an entity opts that entity into this combat model and
/// creates its [`AttackState`] and [`SwingPose`].
#[derive(Component, Debug, Clone, PartialEq)]
#[require(AttackState, SwingPose, ItemAnimation, AttackCooldown)]
pub struct MeleeWeapon {
    /// Sprite size in world units.
    pub size: Vec2,
    pub scale: f32,
    /// Frames one swing lasts.
    pub use_animation: u32,
    pub base_damage: i32,
    pub base_knockback: f32,
    /// Crit probability in `[0, 1]`.
    pub crit_chance: f32,
    /// Scale damage and knockback by the attacker's speed.
    pub velocity_based_damage: bool,
    /// Every second swing runs in reverse.
    pub alternate_swings: bool,
}

impl Default for MeleeWeapon {
    fn default() -> Self {
        Self {
            size: Vec2::new(32.0, 32.0),
            scale: 1.0,
            use_animation: 20,
            base_damage: 20,
            base_knockback: 5.0,
            crit_chance: 0.04,
            velocity_based_damage: true,
            alternate_swings: false,
        }
    }
}

impl MeleeWeapon {
    /// Reach of the swing arc: the scaled sprite diagonal, plus a quarter.
    pub fn attack_range(&self) -> f32 {
        (self.size * self.scale * 1.25).length()
    }

    /// 0 for swings of 5+ per second, 1 for swings of 0.5 per second or slower.
    pub fn heaviness(&self) -> f32 {
        let seconds = self.use_animation.max(1) as f32 / TICK_RATE as f32;
        let swings_per_second = 1.0 / seconds;
        inverse_lerp(5.0, 0.5, swings_per_second).clamp(0.0, 1.0)
    }
}

/// Per-attacker attack bookkeeping, owned by the melee controller.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AttackState {
    /// Unit vector from the attacker to the aim point at swing start.
    pub direction: Vec2,
    pub angle: f32,
    /// Swings started so far. Never resets.
    pub number: u32,
    /// Mirrors the swing so it runs front-to-back.
    pub flipped: bool,
    /// Whether the previous frame was attacking.
    pub attacking: bool,
    /// Targets already struck by the current swing.
    pub hit_targets: Vec<Entity>,
}

impl Default for AttackState {
    fn default() -> Self {
        Self {
            direction: Vec2::X,
            angle: 0.0,
            number: 0,
            flipped: false,
            attacking: false,
            hit_targets: Vec::new(),
        }
    }
}

/// Body animation frames the swing pose ladder selects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyFrame {
    /// Arm raised overhead.
    Use1,
    Use2,
    #[default]
    Use3,
    Use4,
    /// Arm trailing low behind the body.
    Walk5,
}

/// Leg frames forced while swinging in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegFrame {
    Jump,
    Walk8,
    Walk13,
}

/// Render-facing output of the swing driver, refreshed every attacking frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct SwingPose {
    pub rotation: f32,
    pub body: BodyFrame,
    /// Item offset from the attacker center, mirrored by facing.
    pub offset: Vec2,
    pub legs: Option<LegFrame>,
    pub item_rotation: f32,
    pub item_location: Vec2,
}

/// Secondary scenery object that swings can knock around.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Debris {
    pub age_ticks: u32,
    pub active: bool,
}

impl Debris {
    pub fn fresh() -> Self {
        Self {
            age_ticks: 0,
            active: true,
        }
    }
}

/// Attack cooldown imposed on an actor after a melee hit lands on it.
/// While active the actor cannot land melee hits of its own.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CooldownTracker {
    pub ticks: u32,
    /// Set by the best hit in its class; other sources must not shorten it.
    pub authoritative: bool,
}

impl CooldownTracker {
    pub fn apply(&mut self, ticks: u32, authoritative: bool) {
        if authoritative || (!self.authoritative && ticks > self.ticks) {
            self.ticks = ticks;
            self.authoritative |= authoritative;
        }
    }

    pub fn is_active(&self) -> bool {
        self.ticks > 0
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.saturating_sub(1);
        if self.ticks == 0 {
            self.authoritative = false;
        }
    }
}
