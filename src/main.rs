use avian2d::prelude::*;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use swingcraft::MeleeCombatPlugin;
use swingcraft::combat::{DamageEvent, Debris, MeleeWeapon};
use swingcraft::content::MeleeConfig;
use swingcraft::core::{FrameSet, SimTick, TICK_RATE};
use swingcraft::effects::LowHealthEffects;
use swingcraft::host::{Health, HitBounds, ItemAnimation, Team};
use swingcraft::movement::{Facing, MeleeIntent};

const SWINGS: usize = 4;
const TARGETS: usize = 4;
const DEBRIS: usize = 6;

/// One resolved hit, printed as a JSON line.
#[derive(Serialize)]
struct HitReport {
    tick: u64,
    attacker: u64,
    target: u64,
    damage: i32,
    knockback: [f32; 2],
    crit: bool,
}

#[derive(Component)]
struct Attacker;

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE))
        .add_plugins(MeleeCombatPlugin)
        .add_systems(Startup, spawn_arena)
        .add_systems(FixedUpdate, report_hits.in_set(FrameSet::Feedback));
    app.finish();
    app.cleanup();
    app.world_mut().run_schedule(Startup);

    for swing in 0..SWINGS {
        let frames = begin_swing(app.world_mut());
        // One extra frame lets deferred combat text resolve.
        for _ in 0..=frames {
            swingcraft::step(&mut app);
        }
        info!("Swing {} finished", swing + 1);
    }

    let world = app.world_mut();
    let mut survivors = world.query_filtered::<&Health, Without<Attacker>>();
    let alive = survivors.iter(world).filter(|h| !h.is_dead()).count();
    info!("{} of {} targets still standing", alive, TARGETS);
}

fn spawn_arena(mut commands: Commands, config: Res<MeleeConfig>) {
    let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);

    commands.spawn((
        Attacker,
        Transform::default(),
        MeleeWeapon {
            alternate_swings: true,
            ..default()
        },
        Facing::Right,
        MeleeIntent::default(),
        LinearVelocity(Vec2::new(6.0, 0.0)),
        Health::new(100),
        Team::Player,
        HitBounds::new(20.0, 42.0),
        LowHealthEffects::default(),
    ));

    for _ in 0..TARGETS {
        let position = Vec2::new(rng.random_range(10.0..50.0), rng.random_range(-30.0..30.0));
        commands.spawn((
            Transform::from_translation(position.extend(0.0)),
            Health::new(60),
            Team::Enemy,
            HitBounds::new(24.0, 36.0),
            LinearVelocity::ZERO,
        ));
    }

    for _ in 0..DEBRIS {
        let position = Vec2::new(rng.random_range(-60.0..60.0), rng.random_range(-20.0..20.0));
        commands.spawn((
            Transform::from_translation(position.extend(0.0)),
            Debris {
                age_ticks: rng.random_range(0..60),
                active: true,
            },
            HitBounds::new(6.0, 6.0),
            LinearVelocity::ZERO,
        ));
    }
}

/// Aims the attacker at the nearest living target and starts a swing.
fn begin_swing(world: &mut World) -> u32 {
    let mut targets = world.query_filtered::<(&Transform, &Health), Without<Attacker>>();
    let aim = targets
        .iter(world)
        .filter(|(_, health)| !health.is_dead())
        .map(|(transform, _)| transform.translation.truncate())
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        .unwrap_or(Vec2::X);

    let mut attacker = world
        .query_filtered::<(&MeleeWeapon, &mut MeleeIntent, &mut ItemAnimation), With<Attacker>>();
    let Ok((weapon, mut intent, mut animation)) = attacker.single_mut(world) else {
        return 0;
    };
    intent.aim_point = aim;
    *animation = ItemAnimation::start(weapon.use_animation);
    weapon.use_animation
}

fn report_hits(mut hits: MessageReader<DamageEvent>, tick: Res<SimTick>) {
    for hit in hits.read() {
        let report = HitReport {
            tick: tick.0,
            attacker: hit.source.to_bits(),
            target: hit.target.to_bits(),
            damage: hit.amount,
            knockback: hit.knockback.to_array(),
            crit: hit.crit,
        };
        match serde_json::to_string(&report) {
            Ok(line) => println!("{line}"),
            Err(err) => warn!("Could not serialize hit report: {}", err),
        }
    }
}
