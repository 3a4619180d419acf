//! Projectile events
//!
//! Исходящие: ProjectileFired, ProjectileExpired (движок: VFX, звук, cleanup)
//! Входящие: ProjectileHit (collision report от движка)

use bevy::prelude::*;

/// Event: выстрел (снаряд уже заспавнен)
#[derive(Event, Debug, Clone)]
pub struct ProjectileFired {
    pub shooter: Entity,
    pub target: Entity,
    pub projectile: Entity,
}

/// Event: снаряд выработал дальность и удалён
#[derive(Event, Debug, Clone)]
pub struct ProjectileExpired {
    pub projectile: Entity,
    pub shooter: Entity,
    pub traveled: f32,
}

/// Event: снаряд задел актора (collision report)
///
/// Снаряд при этом не уничтожается — только дальность.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub shooter: Entity,
    pub target: Entity,
}
