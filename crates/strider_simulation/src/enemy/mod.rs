//! Enemy domain — враги с характером
//!
//! EnemyBehaviour + proximity quarry + погоня по прямой.

use bevy::prelude::*;

pub mod behaviour;
pub mod systems;

pub use behaviour::{EnemyBehaviour, Personality};

use crate::SimulationSet;

/// Enemy Plugin
///
/// Порядок выполнения (SimulationSet::Enemies):
/// 1. track_quarry — proximity (тег Player)
/// 2. provoke_on_hit — ProjectileHit провоцирует
/// 3. chase_quarry — движение
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                systems::track_quarry,
                systems::provoke_on_hit,
                systems::chase_quarry,
            )
                .chain()
                .in_set(SimulationSet::Enemies),
        );
    }
}
