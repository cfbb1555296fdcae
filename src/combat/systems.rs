//! Combat domain: the per-frame melee controller.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{AttackState, CooldownTracker, Debris, MeleeWeapon, SwingPose};
use crate::combat::events::{
    CooldownNotification, DamageEvent, DebrisKnocked, MeleeHit, SwingStarted,
};
use crate::combat::geometry::Sector;
use crate::combat::resources::CombatRng;
use crate::combat::scaling::scale_hit;
use crate::combat::swing::compute_pose;
use crate::content::MeleeConfig;
use crate::core::SimTick;
use crate::host::{AttackCooldown, Health, HitBounds, ItemAnimation, Team};
use crate::movement::{Facing, MeleeIntent, on_ground};
use crate::ui::{COMBAT_TEXT_FILTER_PRIORITY, CombatTextQueue};

/// Half-angle of the swing arc for targets and debris alike.
pub const SWING_HALF_ARC: f32 = std::f32::consts::FRAC_PI_2;
/// Most debris one attacker can knock in a single frame.
pub const MAX_DEBRIS_KNOCKS_PER_FRAME: usize = 5;
/// Debris younger than this is still settling and cannot be knocked.
pub const DEBRIS_MIN_AGE_TICKS: u32 = 30;
/// Cooldown window a confirmed hit imposes on its target.
pub const HIT_COOLDOWN_TICKS: u32 = 20;

/// Follows the host animation counter and starts new swings.
///
/// A swing starts when the counter leaves zero, or when the host restarts
/// it at its maximum between frames.
pub(crate) fn track_attack_state(
    mut swings: MessageWriter<SwingStarted>,
    mut query: Query<(
        Entity,
        &MeleeWeapon,
        &ItemAnimation,
        &Transform,
        Option<&MeleeIntent>,
        &mut AttackState,
    )>,
) {
    for (entity, weapon, animation, transform, intent, mut state) in &mut query {
        let attacking = animation.is_active();
        let restarted = attacking && animation.remaining == animation.max;

        if attacking && (!state.attacking || restarted) {
            let center = transform.translation.truncate();
            let aim = intent.map_or(Vec2::ZERO, |intent| intent.aim_point - center);

            state.direction = aim.normalize_or(Vec2::X);
            state.angle = state.direction.to_angle();
            state.number += 1;
            state.flipped = weapon.alternate_swings && state.number % 2 == 0;
            state.hit_targets.clear();

            let heaviness = weapon.heaviness();
            debug!(
                "Swing {} started by {:?}: angle={:.3}, heaviness={:.2}",
                state.number, entity, state.angle, heaviness
            );
            swings.write(SwingStarted {
                attacker: entity,
                attack_number: state.number,
                direction: state.direction,
                heaviness,
            });
        }

        state.attacking = attacking;
    }
}

pub(crate) fn drive_swing_animation(
    mut query: Query<(
        &AttackState,
        &ItemAnimation,
        &Transform,
        Option<&Facing>,
        Option<&LinearVelocity>,
        Option<&MeleeIntent>,
        &mut SwingPose,
    )>,
) {
    for (state, animation, transform, facing, velocity, intent, mut pose) in &mut query {
        if !animation.is_active() {
            continue;
        }
        *pose = compute_pose(
            state,
            facing.copied().unwrap_or_default(),
            animation.progress(),
            transform.translation.truncate(),
            velocity.is_none_or(on_ground),
            intent.map_or(0, |intent| intent.move_axis),
        );
    }
}

#[cfg(feature = "dev-tools")]
pub(crate) fn log_item_location(query: Query<(Entity, &SwingPose, &ItemAnimation)>) {
    for (entity, pose, animation) in &query {
        if animation.is_active() {
            debug!(
                "{:?} item at ({:.1}, {:.1}) body={:?} legs={:?}",
                entity, pose.item_location.x, pose.item_location.y, pose.body, pose.legs
            );
        }
    }
}

/// Knocks eligible debris caught in a swing's opening frames.
pub(crate) fn knock_debris(
    mut knocks: MessageWriter<DebrisKnocked>,
    attackers: Query<(Entity, &MeleeWeapon, &AttackState, &ItemAnimation, &Transform)>,
    debris: Query<(Entity, &Debris, &Transform, &HitBounds)>,
) {
    for (attacker, weapon, state, animation, transform) in &attackers {
        if !animation.is_opening() {
            continue;
        }

        let sector = Sector::new(
            transform.translation.truncate(),
            state.angle,
            SWING_HALF_ARC,
            weapon.attack_range(),
        );

        let mut knocked = 0;
        for (entity, piece, piece_transform, bounds) in &debris {
            if !piece.active || piece.age_ticks < DEBRIS_MIN_AGE_TICKS {
                continue;
            }
            if !sector.intersects_rect(bounds.rect(piece_transform.translation.truncate())) {
                continue;
            }

            knocks.write(DebrisKnocked {
                debris: entity,
                attacker,
                direction: state.direction,
            });
            knocked += 1;
            if knocked >= MAX_DEBRIS_KNOCKS_PER_FRAME {
                break;
            }
        }
    }
}

/// Whether the host's hit detection may register hits for this attacker.
pub fn can_hit(animation: &ItemAnimation) -> bool {
    animation.is_active()
}

/// The host's hit detection callback: primary arc test against live targets.
#[allow(clippy::type_complexity)]
pub(crate) fn detect_melee_hits(
    mut hits: MessageWriter<MeleeHit>,
    mut rng: ResMut<CombatRng>,
    mut attackers: Query<(
        Entity,
        &MeleeWeapon,
        &mut AttackState,
        &ItemAnimation,
        &AttackCooldown,
        &Transform,
        Option<&Team>,
        Option<&CooldownTracker>,
    )>,
    targets: Query<(Entity, &Transform, &HitBounds, &Health, Option<&Team>)>,
) {
    for (attacker, weapon, mut state, animation, cooldown, transform, team, stunned) in
        &mut attackers
    {
        if !can_hit(animation) || cooldown.ticks > 0 {
            continue;
        }
        if stunned.is_some_and(CooldownTracker::is_active) {
            continue;
        }

        let sector = Sector::new(
            transform.translation.truncate(),
            state.angle,
            SWING_HALF_ARC,
            weapon.attack_range(),
        );

        for (target, target_transform, bounds, target_health, target_team) in &targets {
            if target == attacker || state.hit_targets.contains(&target) {
                continue;
            }
            if target_health.is_dead() {
                continue;
            }
            if team.is_some() && team == target_team {
                continue;
            }
            if !sector.intersects_rect(bounds.rect(target_transform.translation.truncate())) {
                continue;
            }

            state.hit_targets.push(target);
            hits.write(MeleeHit {
                attacker,
                target,
                crit: rng.roll_crit(weapon.crit_chance),
            });
        }
    }
}

/// Scales confirmed hits and hands them to the host.
pub(crate) fn resolve_melee_hits(
    mut hits: MessageReader<MeleeHit>,
    mut damage: MessageWriter<DamageEvent>,
    mut cooldowns: MessageWriter<CooldownNotification>,
    mut text_queue: ResMut<CombatTextQueue>,
    tick: Res<SimTick>,
    attackers: Query<(&MeleeWeapon, &Transform, Option<&LinearVelocity>, Option<&Facing>)>,
    targets: Query<&Transform>,
) {
    for hit in hits.read() {
        let Ok((weapon, transform, velocity, facing)) = attackers.get(hit.attacker) else {
            continue;
        };
        let Ok(target_transform) = targets.get(hit.target) else {
            continue;
        };

        let facing = facing.copied().unwrap_or_default();
        let away = (target_transform.translation - transform.translation).truncate();
        let knockback_direction = away.normalize_or(Vec2::new(facing.sign(), 0.0));

        let (amount, knockback) = if weapon.velocity_based_damage {
            let speed = velocity.map_or(0.0, |velocity| velocity.length());
            let scaled = scale_hit(weapon.base_damage, weapon.base_knockback, hit.crit, speed);
            debug!(
                "Hit {:?} -> {:?}: damage {} -> {} (scale {:.2})",
                hit.attacker, hit.target, weapon.base_damage, scaled.damage, scaled.scale
            );
            text_queue.enqueue(
                COMBAT_TEXT_FILTER_PRIORITY,
                hit.target,
                scaled.display_text,
                scaled.display_color,
                scaled.crit,
                tick.0,
            );
            (scaled.damage, scaled.knockback)
        } else {
            (weapon.base_damage, weapon.base_knockback)
        };

        damage.write(DamageEvent {
            source: hit.attacker,
            target: hit.target,
            amount,
            knockback: knockback_direction * knockback,
            crit: hit.crit,
        });
        cooldowns.write(CooldownNotification {
            target: hit.target,
            ticks: HIT_COOLDOWN_TICKS,
            authoritative: true,
        });
    }
}

pub(crate) fn apply_cooldown_notifications(
    mut commands: Commands,
    mut notifications: MessageReader<CooldownNotification>,
    mut trackers: Query<&mut CooldownTracker>,
) {
    for note in notifications.read() {
        if let Ok(mut tracker) = trackers.get_mut(note.target) {
            tracker.apply(note.ticks, note.authoritative);
        } else {
            let mut tracker = CooldownTracker::default();
            tracker.apply(note.ticks, note.authoritative);
            commands.entity(note.target).try_insert(tracker);
        }
    }
}

/// Default sink for debris knocks: an impulse along the swing direction.
pub(crate) fn apply_debris_knocks(
    mut knocks: MessageReader<DebrisKnocked>,
    config: Res<MeleeConfig>,
    mut debris: Query<&mut LinearVelocity, With<Debris>>,
) {
    for knock in knocks.read() {
        if let Ok(mut velocity) = debris.get_mut(knock.debris) {
            velocity.0 += knock.direction * config.debris_knock_speed;
            debug!("Debris {:?} knocked by {:?}", knock.debris, knock.attacker);
        }
    }
}

pub(crate) fn tick_cooldown_trackers(mut query: Query<&mut CooldownTracker>) {
    for mut tracker in &mut query {
        if tracker.is_active() {
            tracker.tick();
        }
    }
}

pub(crate) fn age_debris(mut query: Query<&mut Debris>) {
    for mut debris in &mut query {
        debris.age_ticks = debris.age_ticks.saturating_add(1);
    }
}
