//! Host domain: the host's damage application and per-frame counters.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{DamageEvent, DeathEvent, MeleeWeapon};
use crate::content::MeleeConfig;
use crate::core::SimTick;
use crate::host::components::{AttackCooldown, Health, HitBounds, ItemAnimation};
use crate::host::resources::{
    CRIT_DAMAGE_MULTIPLIER, CRIT_DAMAGE_TEXT_COLOR, DAMAGE_TEXT_COLOR, FloatingText,
    FloatingTexts, HitStep, HostHitPipeline,
};

/// Per-tick speed cap after knockback is added.
pub const MAX_KNOCKBACK_SPEED: f32 = 24.0;

/// Runs the host's per-hit update path for every damage event.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_host_hit_pipeline(
    mut damage_events: MessageReader<DamageEvent>,
    mut deaths: MessageWriter<DeathEvent>,
    pipeline: Res<HostHitPipeline>,
    tick: Res<SimTick>,
    config: Res<MeleeConfig>,
    mut texts: ResMut<FloatingTexts>,
    mut targets: Query<(
        &mut Health,
        &Transform,
        Option<&HitBounds>,
        Option<&mut LinearVelocity>,
    )>,
    mut attackers: Query<(&ItemAnimation, &mut AttackCooldown, Has<MeleeWeapon>)>,
) {
    for event in damage_events.read() {
        let amount = if event.crit {
            event.amount * CRIT_DAMAGE_MULTIPLIER
        } else {
            event.amount
        };
        let Ok((mut health, transform, bounds, mut velocity)) = targets.get_mut(event.target)
        else {
            debug!("Damage event for {:?} without health, ignored", event.target);
            continue;
        };

        for step in &pipeline.steps {
            match *step {
                HitStep::ApplyDamage => {
                    let was_dead = health.is_dead();
                    health.take_damage(amount);
                    if let Some(velocity) = velocity.as_mut() {
                        apply_knockback(velocity, event.knockback);
                    }
                    if !was_dead && health.is_dead() {
                        deaths.write(DeathEvent {
                            entity: event.target,
                            killer: event.source,
                        });
                    }
                }
                HitStep::EmitCombatText => {
                    let center = transform.translation.truncate();
                    let anchor = bounds
                        .map(|bounds| bounds.rect(center))
                        .unwrap_or_else(|| Rect::from_center_size(center, Vec2::ONE));
                    texts.spawn(FloatingText {
                        text: amount.to_string(),
                        color: if event.crit {
                            CRIT_DAMAGE_TEXT_COLOR
                        } else {
                            DAMAGE_TEXT_COLOR
                        },
                        anchor,
                        crit: event.crit,
                        target: Some(event.target),
                        spawned_tick: tick.0,
                        remaining_ticks: config.floating_text_lifetime_ticks,
                        restyled: false,
                    });
                }
                HitStep::AssignAttackCooldown { factor, min } => {
                    if let Ok((animation, mut cooldown, _)) = attackers.get_mut(event.source) {
                        cooldown.ticks = HitStep::cooldown_for(factor, min, animation.max);
                    }
                }
                HitStep::AssignAttackCooldownExceptCombatModel { factor, min } => {
                    if let Ok((animation, mut cooldown, governed)) =
                        attackers.get_mut(event.source)
                        && !governed
                    {
                        cooldown.ticks = HitStep::cooldown_for(factor, min, animation.max);
                    }
                }
            }
        }
    }
}

fn apply_knockback(velocity: &mut LinearVelocity, knockback: Vec2) {
    velocity.0 += knockback;
    let speed = velocity.0.length();
    if speed > MAX_KNOCKBACK_SPEED {
        velocity.0 *= MAX_KNOCKBACK_SPEED / speed;
    }
}

pub(crate) fn advance_item_animations(mut query: Query<&mut ItemAnimation>) {
    for mut animation in &mut query {
        if animation.remaining > 0 {
            animation.remaining -= 1;
        }
    }
}

pub(crate) fn tick_attack_cooldowns(mut query: Query<&mut AttackCooldown>) {
    for mut cooldown in &mut query {
        cooldown.ticks = cooldown.ticks.saturating_sub(1);
    }
}

pub(crate) fn expire_floating_texts(mut texts: ResMut<FloatingTexts>) {
    texts.entries.retain_mut(|entry| {
        entry.remaining_ticks = entry.remaining_ticks.saturating_sub(1);
        entry.remaining_ticks > 0
    });
}
