//! Arc-based melee combat for a host action game.
//!
//! Swings are driven from the host's item animation counter, targets are
//! hit by arc-sector tests instead of hitboxes, damage scales with the
//! attacker's momentum, and the host's own post-hit cooldown is overridden.

pub mod combat;
pub mod content;
pub mod core;
pub mod effects;
pub mod host;
pub mod movement;
pub mod ui;

use bevy::prelude::*;

use crate::content::MeleeConfig;
use crate::core::TICK_RATE;

/// Every melee plugin, in dependency order.
pub struct MeleeCombatPlugin;

impl Plugin for MeleeCombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            host::HostPlugin,
            combat::CombatPlugin,
            ui::UiPlugin,
            effects::EffectsPlugin,
        ));
    }
}

/// Headless app reading its config from disk, ready to step.
pub fn create_headless_app() -> App {
    build_headless(None)
}

/// Headless app with an explicit config, ready to step.
pub fn create_headless_app_with_config(config: MeleeConfig) -> App {
    build_headless(Some(config))
}

fn build_headless(config: Option<MeleeConfig>) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE));
    if let Some(config) = config {
        app.insert_resource(config);
    }
    app.add_plugins(MeleeCombatPlugin);
    app.finish();
    app.cleanup();
    app
}

/// Runs exactly one logic frame.
pub fn step(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}
