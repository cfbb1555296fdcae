//! UI domain: combat text submitted to the host's floating text list.

mod combat_text;
#[cfg(test)]
mod tests;

pub use combat_text::{
    COMBAT_TEXT_FILTER_PRIORITY, CombatTextQueue, DrainReport, PendingText, RESTYLED_TEXT_RAISE,
    SCALE_TEXT_GAP,
};

use bevy::prelude::*;

use crate::core::FrameSet;
use crate::ui::combat_text::drain_combat_text_queue;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTextQueue>()
            .add_systems(FixedUpdate, drain_combat_text_queue.in_set(FrameSet::Feedback));
    }
}
