//! Projectile domain — стрельба и дальность полёта
//!
//! Ядро решает КОГДА стрелять и КОГДА снаряд выработал дальность.
//! Движение и столкновения — на стороне движка (headless: HeadlessPlugin).

use bevy::prelude::*;

pub mod events;
pub mod fire;
pub mod flight;
pub mod systems;

pub use events::{ProjectileExpired, ProjectileFired, ProjectileHit};
pub use fire::{FireControl, Shot};
pub use flight::{FlightStatus, Projectile, ProjectileFlight, ProjectileVelocity};

use crate::SimulationSet;

/// Projectile Plugin
///
/// - fire_at_target — SimulationSet::Firing
/// - expire_projectiles — SimulationSet::Projectiles (после движения снарядов)
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProjectileFired>()
            .add_event::<ProjectileExpired>()
            .add_event::<ProjectileHit>();

        app.add_systems(FixedUpdate, systems::fire_at_target.in_set(SimulationSet::Firing))
            .add_systems(
                FixedUpdate,
                systems::expire_projectiles.in_set(SimulationSet::Projectiles),
            );
    }
}
