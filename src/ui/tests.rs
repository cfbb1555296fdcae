//! UI domain: unit tests for the deferred combat-text mailbox.

use bevy::color::Srgba;
use bevy::prelude::*;

use super::{CombatTextQueue, DrainReport, RESTYLED_TEXT_RAISE, SCALE_TEXT_GAP};
use crate::host::{DAMAGE_TEXT_COLOR, FloatingText, FloatingTexts};

const RED: Srgba = Srgba::rgb(1.0, 0.0, 0.0);

fn host_text(target: Entity, tick: u64) -> FloatingText {
    FloatingText {
        text: "18".to_string(),
        color: DAMAGE_TEXT_COLOR,
        anchor: Rect::new(90.0, 30.0, 110.0, 70.0),
        crit: false,
        target: Some(target),
        spawned_tick: tick,
        remaining_ticks: 60,
        restyled: false,
    }
}

fn targets() -> (Entity, Entity) {
    let mut world = World::new();
    (world.spawn_empty().id(), world.spawn_empty().id())
}

#[test]
fn test_entries_wait_one_tick() {
    let (target, _) = targets();
    let mut queue = CombatTextQueue::default();
    queue.enqueue(1, target, "(x1.78)".into(), RED, false, 5);

    assert!(queue.take_ready(5).is_empty());
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.take_ready(6).len(), 1);
    assert!(queue.is_empty());
}

#[test]
fn test_ready_entries_sorted_by_priority_then_order() {
    let (a, b) = targets();
    let mut queue = CombatTextQueue::default();
    queue.enqueue(2, a, "late".into(), RED, false, 0);
    queue.enqueue(1, b, "first".into(), RED, false, 0);
    queue.enqueue(1, a, "second".into(), RED, false, 0);

    let order: Vec<_> = queue.take_ready(1).into_iter().map(|e| e.text).collect();
    assert_eq!(order, vec!["first", "second", "late"]);
}

#[test]
fn test_drain_restyles_host_text_and_adds_scale_text() {
    let (target, _) = targets();
    let mut texts = FloatingTexts::default();
    texts.spawn(host_text(target, 3));

    let mut queue = CombatTextQueue::default();
    let green = Srgba::rgb(0.0, 0.5, 0.0);
    queue.enqueue(1, target, "(x1.25)".into(), green, false, 3);

    let report = queue.drain_into(&mut texts, 4, 45);
    assert_eq!(report, DrainReport { matched: 1, dropped: 0 });
    assert_eq!(texts.entries.len(), 2);

    let base = &texts.entries[0];
    assert!(base.restyled);
    assert_eq!(base.color, green);
    assert_eq!(base.anchor.min.y, 30.0 - RESTYLED_TEXT_RAISE);
    assert_eq!(base.anchor.max.y, 70.0 - RESTYLED_TEXT_RAISE);

    let extra = &texts.entries[1];
    assert_eq!(extra.text, "(x1.25)");
    assert_eq!(extra.target, None);
    assert_eq!(extra.remaining_ticks, 45);
    assert_eq!(extra.anchor.min, Vec2::new(100.0, 70.0 - RESTYLED_TEXT_RAISE + SCALE_TEXT_GAP));
    assert_eq!(extra.anchor.size(), Vec2::ONE);
}

#[test]
fn test_each_host_text_matched_once() {
    let (target, _) = targets();
    let mut texts = FloatingTexts::default();
    texts.spawn(host_text(target, 0));
    texts.spawn(host_text(target, 0));

    let mut queue = CombatTextQueue::default();
    queue.enqueue(1, target, "(x1.10)".into(), Srgba::WHITE, false, 0);
    queue.enqueue(1, target, "(x1.20)".into(), Srgba::WHITE, false, 0);
    queue.enqueue(1, target, "(x1.30)".into(), Srgba::WHITE, false, 0);

    let report = queue.drain_into(&mut texts, 1, 60);
    assert_eq!(report, DrainReport { matched: 2, dropped: 1 });
    assert!(texts.entries[0].restyled && texts.entries[1].restyled);
}

#[test]
fn test_unrelated_or_stale_host_text_is_not_matched() {
    let (target, other) = targets();
    let mut texts = FloatingTexts::default();
    texts.spawn(host_text(other, 2));
    texts.spawn(host_text(target, 1));

    let mut queue = CombatTextQueue::default();
    queue.enqueue(1, target, "(x1.50)".into(), Srgba::WHITE, true, 2);

    let report = queue.drain_into(&mut texts, 3, 60);
    assert_eq!(report, DrainReport { matched: 0, dropped: 1 });
    assert!(texts.entries.iter().all(|text| !text.restyled));
    assert!(queue.is_empty());
}
