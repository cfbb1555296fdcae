//! Content domain: RON configuration loaded once at startup.

mod data;
mod loader;
mod validation;

pub use data::{CONFIG_SCHEMA_VERSION, ConfigPath, DEFAULT_CONFIG_PATH, MeleeConfig};
pub use loader::{ConfigLoadError, load_config, parse_config};
pub use validation::{ValidationError, validate_config};

use bevy::prelude::*;

/// Inserts [`MeleeConfig`]. A config already present in the world is kept;
/// otherwise it is read from [`ConfigPath`]. Either way a config that fails
/// validation is replaced by the defaults.
pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        if let Some(inserted) = app.world().get_resource::<MeleeConfig>().cloned() {
            app.insert_resource(accept_config(inserted, "inserted resource"));
            return;
        }

        let path = app
            .world()
            .get_resource::<ConfigPath>()
            .cloned()
            .unwrap_or_default();

        let config = match load_config(&path.0) {
            Ok(config) => {
                let source = path.0.display().to_string();
                accept_config(config, &source)
            }
            Err(err) => {
                warn!("{}; using default melee config", err);
                MeleeConfig::default()
            }
        };

        app.insert_resource(config);
    }
}

/// Returns `config` if it validates, the defaults otherwise.
fn accept_config(config: MeleeConfig, source: &str) -> MeleeConfig {
    let issues = validate_config(&config);
    if issues.is_empty() {
        info!("Using melee config from {}", source);
        return config;
    }
    for issue in &issues {
        warn!("Melee config {}", issue);
    }
    warn!("Melee config from {} rejected, using defaults", source);
    MeleeConfig::default()
}
