//! Data definitions for the RON configuration file.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::host::OverrideScope;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/melee.ron";

/// Tunables that are not part of the combat contract.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MeleeConfig {
    pub schema_version: u32,
    /// Seed for crit rolls.
    pub rng_seed: u64,
    pub cooldown_override_scope: OverrideScope,
    /// Impulse added to knocked debris, in units per tick.
    pub debris_knock_speed: f32,
    pub floating_text_lifetime_ticks: u32,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            rng_seed: 0,
            cooldown_override_scope: OverrideScope::CombatModelOnly,
            debris_knock_speed: 4.0,
            floating_text_lifetime_ticks: 60,
        }
    }
}

/// Where [`ContentPlugin`](super::ContentPlugin) reads the config from.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub std::path::PathBuf);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(DEFAULT_CONFIG_PATH.into())
    }
}
