//! Removes the host's built-in post-hit attack cooldown so the melee
//! engine's own cooldown model is the only one in effect.

use thiserror::Error;

use crate::host::{
    DEFAULT_COOLDOWN_FACTOR, DEFAULT_COOLDOWN_MIN, HitStep, HostHitPipeline, OverrideScope,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CooldownOverrideError {
    #[error(
        "host hit path has no `cooldown = max({min}, animation_max * {factor})` step \
         (found {found:?}); unsupported host version"
    )]
    PatternNotFound {
        factor: f64,
        min: u32,
        found: Vec<HitStep>,
    },
    #[error("cooldown override already installed with {installed:?}, refusing {requested:?}")]
    ConflictingScope {
        installed: OverrideScope,
        requested: OverrideScope,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    AlreadyInstalled,
}

fn is_default_assignment(step: &HitStep) -> bool {
    matches!(
        step,
        HitStep::AssignAttackCooldown { factor, min }
            if *factor == DEFAULT_COOLDOWN_FACTOR && *min == DEFAULT_COOLDOWN_MIN
    )
}

/// Patches the host hit path once for the process.
///
/// `AllAttacks` drops the cooldown assignment entirely. `CombatModelOnly`
/// keeps it for attackers outside this combat model.
pub fn install_cooldown_override(
    pipeline: &mut HostHitPipeline,
    scope: OverrideScope,
) -> Result<InstallOutcome, CooldownOverrideError> {
    if let Some(installed) = pipeline.override_scope {
        return if installed == scope {
            Ok(InstallOutcome::AlreadyInstalled)
        } else {
            Err(CooldownOverrideError::ConflictingScope {
                installed,
                requested: scope,
            })
        };
    }

    let Some(index) = pipeline.steps.iter().position(is_default_assignment) else {
        return Err(CooldownOverrideError::PatternNotFound {
            factor: DEFAULT_COOLDOWN_FACTOR,
            min: DEFAULT_COOLDOWN_MIN,
            found: pipeline.steps.clone(),
        });
    };

    match scope {
        OverrideScope::AllAttacks => {
            pipeline.steps.remove(index);
        }
        OverrideScope::CombatModelOnly => {
            pipeline.steps[index] = HitStep::AssignAttackCooldownExceptCombatModel {
                factor: DEFAULT_COOLDOWN_FACTOR,
                min: DEFAULT_COOLDOWN_MIN,
            };
        }
    }
    pipeline.override_scope = Some(scope);
    Ok(InstallOutcome::Installed)
}
