//! Semantic checks on a parsed config.

use super::data::{CONFIG_SCHEMA_VERSION, MeleeConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}': {}", self.field, self.message)
    }
}

/// Push an error for `field` unless `ok` holds.
macro_rules! check {
    ($errors:expr, $ok:expr, $field:expr, $($message:tt)+) => {
        if !$ok {
            $errors.push(ValidationError {
                field: $field,
                message: format!($($message)+),
            });
        }
    };
}

/// Returns every problem found, empty when the config is usable.
pub fn validate_config(config: &MeleeConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check!(
        errors,
        config.schema_version == CONFIG_SCHEMA_VERSION,
        "schema_version",
        "expected {}, found {}",
        CONFIG_SCHEMA_VERSION,
        config.schema_version
    );
    check!(
        errors,
        config.debris_knock_speed.is_finite() && config.debris_knock_speed >= 0.0,
        "debris_knock_speed",
        "must be a non-negative number, found {}",
        config.debris_knock_speed
    );
    // Texts must outlive the one-tick deferral of the scale filter.
    check!(
        errors,
        config.floating_text_lifetime_ticks >= 2,
        "floating_text_lifetime_ticks",
        "must be at least 2, found {}",
        config.floating_text_lifetime_ticks
    );

    errors
}
