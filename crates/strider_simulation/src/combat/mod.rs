//! Combat system module
//!
//! ECS ответственность:
//! - Game state: Health, CombatStats
//! - Combat rules: урон от попадания снаряда
//! - Events: DamageDealt, EntityDied
//!
//! Движок ответственность:
//! - collision detection снаряда → ProjectileHit

use bevy::prelude::*;

pub mod damage;

#[cfg(test)]
mod damage_tests;

pub use damage::{calculate_damage, DamageDealt, EntityDied};

use crate::SimulationSet;

/// Combat Plugin
///
/// apply_projectile_hits — SimulationSet::Damage (после движения снарядов и врагов)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageDealt>().add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            damage::apply_projectile_hits.in_set(SimulationSet::Damage),
        );
    }
}
