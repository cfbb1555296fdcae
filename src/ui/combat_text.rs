//! Deferred combat-text filters.
//!
//! A confirmed hit enqueues its scale text here. The host spawns its own
//! damage number for the same hit later in the frame, so entries are only
//! drained on a later tick, where they restyle that host text and add the
//! scale text underneath it.

use bevy::color::Srgba;
use bevy::prelude::*;

use crate::content::MeleeConfig;
use crate::core::SimTick;
use crate::host::{FloatingText, FloatingTexts};

/// Matching priority of the velocity scale filter. Lower drains first.
pub const COMBAT_TEXT_FILTER_PRIORITY: i32 = 1;
/// How far the matched host text moves up to make room.
pub const RESTYLED_TEXT_RAISE: f32 = 16.0;
/// Gap between the host text and the scale text below it.
pub const SCALE_TEXT_GAP: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PendingText {
    pub priority: i32,
    pub seq: u64,
    pub target: Entity,
    pub text: String,
    pub color: Srgba,
    pub crit: bool,
    pub enqueued_tick: u64,
}

/// Single-consumer mailbox of pending combat-text filters.
#[derive(Resource, Debug, Default)]
pub struct CombatTextQueue {
    pending: Vec<PendingText>,
    next_seq: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub matched: usize,
    pub dropped: usize,
}

impl CombatTextQueue {
    pub fn enqueue(
        &mut self,
        priority: i32,
        target: Entity,
        text: String,
        color: Srgba,
        crit: bool,
        tick: u64,
    ) {
        self.pending.push(PendingText {
            priority,
            seq: self.next_seq,
            target,
            text,
            color,
            crit,
            enqueued_tick: tick,
        });
        self.next_seq += 1;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes entries enqueued before `tick`, in `(priority, seq)` order.
    pub fn take_ready(&mut self, tick: u64) -> Vec<PendingText> {
        let (mut ready, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|entry| entry.enqueued_tick < tick);
        self.pending = waiting;
        ready.sort_by_key(|entry| (entry.priority, entry.seq));
        ready
    }

    /// Applies every ready entry to the host's floating texts.
    pub fn drain_into(
        &mut self,
        texts: &mut FloatingTexts,
        tick: u64,
        lifetime: u32,
    ) -> DrainReport {
        let mut report = DrainReport::default();

        for entry in self.take_ready(tick) {
            let base = texts.entries.iter_mut().find(|text| {
                text.target == Some(entry.target)
                    && !text.restyled
                    && text.spawned_tick >= entry.enqueued_tick
            });
            let Some(base) = base else {
                debug!("No host combat text for {:?}, dropping '{}'", entry.target, entry.text);
                report.dropped += 1;
                continue;
            };

            base.color = entry.color;
            base.anchor.min.y -= RESTYLED_TEXT_RAISE;
            base.anchor.max.y -= RESTYLED_TEXT_RAISE;
            base.restyled = true;

            let corner = Vec2::new(base.anchor.center().x, base.anchor.max.y + SCALE_TEXT_GAP);
            texts.spawn(FloatingText {
                text: entry.text,
                color: entry.color,
                anchor: Rect::from_corners(corner, corner + Vec2::ONE),
                crit: entry.crit,
                target: None,
                spawned_tick: tick,
                remaining_ticks: lifetime,
                restyled: true,
            });
            report.matched += 1;
        }

        report
    }
}

pub(crate) fn drain_combat_text_queue(
    mut queue: ResMut<CombatTextQueue>,
    mut texts: ResMut<FloatingTexts>,
    tick: Res<SimTick>,
    config: Res<MeleeConfig>,
) {
    if queue.is_empty() {
        return;
    }
    queue.drain_into(&mut texts, tick.0, config.floating_text_lifetime_ticks);
}
