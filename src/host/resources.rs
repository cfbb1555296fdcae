//! Host domain: the host's per-hit update path and its floating text list.

use bevy::color::Srgba;
use bevy::prelude::*;

/// Factor of the host's built-in post-hit cooldown assignment.
pub const DEFAULT_COOLDOWN_FACTOR: f64 = 0.33;
/// Floor of the host's built-in post-hit cooldown assignment.
pub const DEFAULT_COOLDOWN_MIN: u32 = 1;

/// The host doubles critical hits when applying them.
pub const CRIT_DAMAGE_MULTIPLIER: i32 = 2;

/// Colours the host uses for its own damage numbers.
pub const DAMAGE_TEXT_COLOR: Srgba = Srgba::rgb(1.0, 160.0 / 255.0, 80.0 / 255.0);
pub const CRIT_DAMAGE_TEXT_COLOR: Srgba = Srgba::rgb(1.0, 100.0 / 255.0, 30.0 / 255.0);

/// One step of the host's per-hit update path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitStep {
    ApplyDamage,
    EmitCombatText,
    /// `attacker.cooldown = max(min, trunc(item_animation.max * factor))`
    AssignAttackCooldown { factor: f64, min: u32 },
    /// As above, skipped for attackers carrying a `MeleeWeapon`.
    AssignAttackCooldownExceptCombatModel { factor: f64, min: u32 },
}

impl HitStep {
    pub fn cooldown_for(factor: f64, min: u32, item_animation_max: u32) -> u32 {
        ((item_animation_max as f64 * factor) as u32).max(min)
    }
}

/// Which attacks the cooldown override applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub enum OverrideScope {
    /// Strip the host assignment for every attack.
    AllAttacks,
    /// Strip it only for attackers governed by this combat model.
    #[default]
    CombatModelOnly,
}

/// The ordered steps the host runs for every damage event.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HostHitPipeline {
    pub steps: Vec<HitStep>,
    /// Set once an override has been installed.
    pub override_scope: Option<OverrideScope>,
}

impl Default for HostHitPipeline {
    fn default() -> Self {
        Self {
            steps: vec![
                HitStep::ApplyDamage,
                HitStep::EmitCombatText,
                HitStep::AssignAttackCooldown {
                    factor: DEFAULT_COOLDOWN_FACTOR,
                    min: DEFAULT_COOLDOWN_MIN,
                },
            ],
            override_scope: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub text: String,
    pub color: Srgba,
    pub anchor: Rect,
    pub crit: bool,
    /// The damaged entity, for texts the host spawns on hits.
    pub target: Option<Entity>,
    pub spawned_tick: u64,
    pub remaining_ticks: u32,
    /// Already claimed by a combat-text filter.
    pub restyled: bool,
}

/// Floating combat texts currently on screen.
#[derive(Resource, Debug, Default)]
pub struct FloatingTexts {
    pub entries: Vec<FloatingText>,
}

impl FloatingTexts {
    pub fn spawn(&mut self, text: FloatingText) -> usize {
        self.entries.push(text);
        self.entries.len() - 1
    }

    pub fn for_target(&self, target: Entity) -> impl Iterator<Item = &FloatingText> {
        self.entries
            .iter()
            .filter(move |entry| entry.target == Some(target))
    }
}
