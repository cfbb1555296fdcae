//! Combat domain: messages written by the melee controller.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// An attacker entered the attacking state.
#[derive(Debug, Clone, Copy)]
pub struct SwingStarted {
    pub attacker: Entity,
    pub attack_number: u32,
    pub direction: Vec2,
    /// 0 for light swings, 1 for heavy ones. Drives the swing sound blend.
    pub heaviness: f32,
}

impl Message for SwingStarted {}

/// The host's hit detection accepted `target` for the current swing.
#[derive(Debug, Clone, Copy)]
pub struct MeleeHit {
    pub attacker: Entity,
    pub target: Entity,
    pub crit: bool,
}

impl Message for MeleeHit {}

/// Final damage for the host's damage application routine.
#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: i32,
    pub knockback: Vec2,
    pub crit: bool,
}

impl Message for DamageEvent {}

#[derive(Debug, Clone, Copy)]
pub struct DeathEvent {
    pub entity: Entity,
    pub killer: Entity,
}

impl Message for DeathEvent {}

/// Sets a target's hit cooldown window.
#[derive(Debug, Clone, Copy)]
pub struct CooldownNotification {
    pub target: Entity,
    pub ticks: u32,
    pub authoritative: bool,
}

impl Message for CooldownNotification {}

/// A swing clipped a piece of debris.
#[derive(Debug, Clone, Copy)]
pub struct DebrisKnocked {
    pub debris: Entity,
    pub attacker: Entity,
    pub direction: Vec2,
}

impl Message for DebrisKnocked {}
