//! End-to-end melee frames on a headless app.

use avian2d::prelude::*;
use bevy::prelude::*;

use swingcraft::combat::{
    AttackState, BodyFrame, CooldownTracker, Debris, HIT_COOLDOWN_TICKS, MeleeWeapon, SwingPose,
};
use swingcraft::content::MeleeConfig;
use swingcraft::effects::LowHealthEffects;
use swingcraft::host::{
    AttackCooldown, FloatingTexts, Health, HitBounds, HitStep, HostHitPipeline, ItemAnimation,
    OverrideScope, Team,
};
use swingcraft::movement::{Facing, MeleeIntent};
use swingcraft::{MeleeCombatPlugin, create_headless_app_with_config, step};

const SWING_FRAMES: u32 = 20;

fn test_app() -> App {
    create_headless_app_with_config(MeleeConfig {
        rng_seed: 42,
        ..MeleeConfig::default()
    })
}

fn sure_weapon() -> MeleeWeapon {
    MeleeWeapon {
        crit_chance: 0.0,
        use_animation: SWING_FRAMES,
        ..MeleeWeapon::default()
    }
}

fn spawn_attacker(app: &mut App, velocity: Vec2, aim: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            Transform::default(),
            sure_weapon(),
            Facing::Right,
            MeleeIntent {
                aim_point: aim,
                move_axis: 0,
            },
            LinearVelocity(velocity),
            Team::Player,
        ))
        .id()
}

fn spawn_target(app: &mut App, position: Vec2, team: Team) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position.extend(0.0)),
            Health::new(100),
            team,
            HitBounds::new(20.0, 20.0),
            LinearVelocity::ZERO,
        ))
        .id()
}

fn start_swing(app: &mut App, attacker: Entity) {
    app.world_mut()
        .entity_mut(attacker)
        .insert(ItemAnimation::start(SWING_FRAMES));
}

fn health(app: &App, entity: Entity) -> i32 {
    app.world()
        .get::<Health>(entity)
        .map(|health| health.current)
        .unwrap_or_default()
}

fn run_frames(app: &mut App, frames: u32) {
    for _ in 0..frames {
        step(app);
    }
}

// ============================================================================
// Hit registration
// ============================================================================

#[test]
fn test_swing_hits_enemies_in_the_arc_only() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0));
    let ahead = spawn_target(&mut app, Vec2::new(30.0, 0.0), Team::Enemy);
    let behind = spawn_target(&mut app, Vec2::new(-30.0, 0.0), Team::Enemy);
    let friend = spawn_target(&mut app, Vec2::new(30.0, 10.0), Team::Player);
    let far = spawn_target(&mut app, Vec2::new(200.0, 0.0), Team::Enemy);

    start_swing(&mut app, attacker);
    step(&mut app);

    assert_eq!(health(&app, ahead), 80);
    assert_eq!(health(&app, behind), 100);
    assert_eq!(health(&app, friend), 100);
    assert_eq!(health(&app, far), 100);
}

#[test]
fn test_one_hit_per_target_per_swing() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0));
    let target = spawn_target(&mut app, Vec2::new(30.0, 0.0), Team::Enemy);

    start_swing(&mut app, attacker);
    run_frames(&mut app, SWING_FRAMES);
    assert_eq!(health(&app, target), 80);

    start_swing(&mut app, attacker);
    run_frames(&mut app, SWING_FRAMES);
    assert_eq!(health(&app, target), 60);

    let state = app.world().get::<AttackState>(attacker).expect("attack state");
    assert_eq!(state.number, 2);
}

#[test]
fn test_no_hits_once_the_swing_ends() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0));
    start_swing(&mut app, attacker);
    run_frames(&mut app, SWING_FRAMES);

    let late = spawn_target(&mut app, Vec2::new(30.0, 0.0), Team::Enemy);
    run_frames(&mut app, 3);
    assert_eq!(health(&app, late), 100);
}

#[test]
fn test_dead_targets_are_not_hit_again() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0));
    let target = spawn_target(&mut app, Vec2::new(30.0, 0.0), Team::Enemy);
    app.world_mut().entity_mut(target).insert(Health::new(20));

    start_swing(&mut app, attacker);
    run_frames(&mut app, SWING_FRAMES);
    assert_eq!(health(&app, target), 0);
    let texts_after_kill = app
        .world()
        .resource::<FloatingTexts>()
        .for_target(target)
        .count();

    start_swing(&mut app, attacker);
    step(&mut app);

    let texts = app.world().resource::<FloatingTexts>();
    assert_eq!(texts.for_target(target).count(), texts_after_kill);
    let state = app.world().get::<AttackState>(attacker).expect("attack state");
    assert_eq!(state.number, 2);
    assert!(state.hit_targets.is_empty());
}

#[test]
fn test_struck_actor_cannot_hit_back() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0));
    app.world_mut().entity_mut(attacker).insert(CooldownTracker {
        ticks: 5,
        authoritative: true,
    });
    let target = spawn_target(&mut app, Vec2::new(30.0, 0.0), Team::Enemy);

    start_swing(&mut app, attacker);
    step(&mut app);
    assert_eq!(health(&app, target), 100);
}

#[test]
fn test_hit_sets_authoritative_target_cooldown() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0));
    let target = spawn_target(&mut app, Vec2::new(30.0, 0.0), Team::Enemy);

    start_swing(&mut app, attacker);
    step(&mut app);

    let tracker = app
        .world()
        .get::<CooldownTracker>(target)
        .expect("hit inserts a tracker");
    assert!(tracker.authoritative);
    assert!(tracker.ticks <= HIT_COOLDOWN_TICKS && tracker.ticks >= HIT_COOLDOWN_TICKS - 1);
}

// ============================================================================
// Scaling and combat text
// ============================================================================

#[test]
fn test_running_attacker_scales_damage_and_knockback() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::new(8.0, 0.0), Vec2::new(100.0, 0.0));
    let target = spawn_target(&mut app, Vec2::new(30.0, 0.0), Team::Enemy);

    start_swing(&mut app, attacker);
    step(&mut app);

    // 20 * 1.78 = 35.6
    assert_eq!(health(&app, target), 64);
    let knockback = app
        .world()
        .get::<LinearVelocity>(target)
        .expect("target velocity");
    assert!((knockback.x - 8.9).abs() < 1e-3);
    assert!(knockback.y.abs() < 1e-3);
}

#[test]
fn test_scale_text_attaches_to_host_text_next_frame() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::new(8.0, 0.0), Vec2::new(100.0, 0.0));
    let target = spawn_target(&mut app, Vec2::new(30.0, 0.0), Team::Enemy);

    start_swing(&mut app, attacker);
    step(&mut app);
    {
        let texts = app.world().resource::<FloatingTexts>();
        let host: Vec<_> = texts.for_target(target).collect();
        assert_eq!(host.len(), 1);
        assert_eq!(host[0].text, "36");
        assert!(!host[0].restyled);
    }

    step(&mut app);
    let texts = app.world().resource::<FloatingTexts>();
    assert!(texts.for_target(target).all(|text| text.restyled));
    assert!(texts.entries.iter().any(|text| text.text == "(x1.78)"));
}

// ============================================================================
// Cooldown override
// ============================================================================

#[test]
fn test_host_cooldown_skipped_for_this_combat_model() {
    let mut app = test_app();
    let pipeline = app.world().resource::<HostHitPipeline>();
    assert_eq!(pipeline.override_scope, Some(OverrideScope::CombatModelOnly));

    let attacker = spawn_attacker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0));
    spawn_target(&mut app, Vec2::new(30.0, 0.0), Team::Enemy);
    start_swing(&mut app, attacker);
    step(&mut app);

    let cooldown = app.world().get::<AttackCooldown>(attacker).expect("cooldown");
    assert_eq!(cooldown.ticks, 0);
}

#[test]
fn test_all_attacks_scope_removes_host_assignment() {
    let app = create_headless_app_with_config(MeleeConfig {
        cooldown_override_scope: OverrideScope::AllAttacks,
        ..MeleeConfig::default()
    });
    let pipeline = app.world().resource::<HostHitPipeline>();
    assert!(
        !pipeline
            .steps
            .iter()
            .any(|step| matches!(step, HitStep::AssignAttackCooldown { .. }))
    );
}

#[test]
#[should_panic(expected = "cooldown override")]
fn test_unknown_host_pipeline_is_fatal_at_load() {
    let mut app = App::new();
    app.insert_resource(MeleeConfig::default())
        .insert_resource(HostHitPipeline {
            steps: vec![HitStep::ApplyDamage, HitStep::EmitCombatText],
            override_scope: None,
        })
        .add_plugins(MeleeCombatPlugin);
    app.finish();
}

// ============================================================================
// Swing animation and debris
// ============================================================================

#[test]
fn test_swing_start_records_direction_and_pose() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::ZERO, Vec2::new(0.0, -50.0));

    start_swing(&mut app, attacker);
    step(&mut app);

    let state = app.world().get::<AttackState>(attacker).expect("attack state");
    assert_eq!(state.number, 1);
    assert!((state.direction - Vec2::NEG_Y).length() < 1e-5);
    assert!((state.angle + std::f32::consts::FRAC_PI_2).abs() < 1e-5);

    let pose = app.world().get::<SwingPose>(attacker).expect("pose");
    assert!(pose.rotation >= 0.0 && pose.rotation < std::f32::consts::TAU);
}

#[test]
fn test_degenerate_aim_falls_back_to_forward() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::ZERO, Vec2::ZERO);

    start_swing(&mut app, attacker);
    step(&mut app);

    let state = app.world().get::<AttackState>(attacker).expect("attack state");
    assert_eq!(state.direction, Vec2::X);
    assert_eq!(state.angle, 0.0);

    // Progress 0 sits at the swing's start, behind and above: arm overhead.
    let pose = app.world().get::<SwingPose>(attacker).expect("pose");
    assert_eq!(pose.body, BodyFrame::Use1);
    assert_eq!(pose.item_location, Vec2::new(-8.0, -9.0));
}

#[test]
fn test_debris_knocks_are_capped_and_age_gated() {
    let mut app = test_app();
    let attacker = spawn_attacker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0));

    let mut settled = Vec::new();
    for i in 0..7 {
        let id = app
            .world_mut()
            .spawn((
                Transform::from_xyz(20.0, -12.0 + 4.0 * i as f32, 0.0),
                Debris {
                    age_ticks: 40,
                    active: true,
                },
                HitBounds::new(3.0, 3.0),
                LinearVelocity::ZERO,
            ))
            .id();
        settled.push(id);
    }
    let fresh = app
        .world_mut()
        .spawn((
            Transform::from_xyz(25.0, 0.0, 0.0),
            Debris::fresh(),
            HitBounds::new(3.0, 3.0),
            LinearVelocity::ZERO,
        ))
        .id();
    let inactive = app
        .world_mut()
        .spawn((
            Transform::from_xyz(25.0, 4.0, 0.0),
            Debris {
                age_ticks: 90,
                active: false,
            },
            HitBounds::new(3.0, 3.0),
            LinearVelocity::ZERO,
        ))
        .id();

    start_swing(&mut app, attacker);
    step(&mut app);

    let moved = |app: &App, id: Entity| {
        app.world()
            .get::<LinearVelocity>(id)
            .is_some_and(|v| v.x > 0.0)
    };
    assert_eq!(settled.iter().filter(|&&id| moved(&app, id)).count(), 5);
    assert!(!moved(&app, fresh));
    assert!(!moved(&app, inactive));
}

// ============================================================================
// Effects and determinism
// ============================================================================

#[test]
fn test_low_health_intensity_rises() {
    let mut app = test_app();
    let wounded = app
        .world_mut()
        .spawn((Health::new(10), LowHealthEffects::default()))
        .id();
    run_frames(&mut app, 2);

    let effects = app.world().get::<LowHealthEffects>(wounded).expect("effects");
    assert!((effects.intensity - 2.0 * 0.75 / 60.0).abs() < 1e-5);
}

#[test]
fn test_same_seed_same_outcome() {
    let outcome = || {
        let mut app = test_app();
        let attacker = app
            .world_mut()
            .spawn((
                Transform::default(),
                MeleeWeapon {
                    crit_chance: 0.5,
                    ..sure_weapon()
                },
                MeleeIntent {
                    aim_point: Vec2::new(100.0, 0.0),
                    move_axis: 0,
                },
                Team::Player,
            ))
            .id();
        let targets: Vec<_> = (0..6)
            .map(|i| spawn_target(&mut app, Vec2::new(25.0, -15.0 + 6.0 * i as f32), Team::Enemy))
            .collect();
        for _ in 0..3 {
            start_swing(&mut app, attacker);
            run_frames(&mut app, SWING_FRAMES);
        }
        targets.iter().map(|&t| health(&app, t)).collect::<Vec<_>>()
    };

    assert_eq!(outcome(), outcome());
}
