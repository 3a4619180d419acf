//! Pursuit domain — погоня за выбранной целью
//!
//! Содержит:
//! - Pursuer (Idle → Rotating → Moving → Arrived state machine)
//! - steering helpers (look rotation, bounded turn, step)
//! - PursueRequest / PursuitEvent
//! - Системы: pursuit tick, ручное движение, aim

use bevy::prelude::*;

pub mod events;
pub mod pursuer;
pub mod steering;
pub mod systems;


pub use events::{PursueRequest, PursuitEvent};
pub use pursuer::{AbandonReason, PursuitConfig, PursuitInput, PursuitOutcome, PursuitState, Pursuer};
pub use steering::{facing_error, look_rotation, step_towards, turn_towards};

use crate::SimulationSet;

/// Pursuit Plugin
///
/// Порядок выполнения (SimulationSet::Pursuit):
/// 1. handle_pursue_requests — явные команды
/// 2. drive_pursuit — state machine (ручной ввод прерывает здесь же)
/// 3. apply_manual_movement — WASD движение поверх Idle
/// 4. aim_at_target — доворот к цели для fire gate
pub struct PursuitPlugin;

impl Plugin for PursuitPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PursueRequest>().add_event::<PursuitEvent>();

        app.add_systems(
            FixedUpdate,
            (
                systems::handle_pursue_requests,
                systems::drive_pursuit,
                systems::apply_manual_movement,
                systems::aim_at_target,
            )
                .chain()
                .in_set(SimulationSet::Pursuit),
        );
    }
}
