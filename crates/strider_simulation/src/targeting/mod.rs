//! Targeting domain — выбор цели
//!
//! Содержит:
//! - TargetSelector (слот цели + pick / proximity захват)
//! - PickRequest, ProximityEvent (вход от хоста), TargetEvent (уведомления)
//! - Системы обработки событий и stale validation

use bevy::prelude::*;

pub mod events;
pub mod selector;
pub mod systems;


pub use events::{PickRequest, ProximityEvent, TargetEvent};
pub use selector::{Acquisition, ClearReason, Target, TargetChange, TargetSelector, TargetingConfig};

use crate::SimulationSet;

/// Targeting Plugin
///
/// Порядок выполнения (SimulationSet::Targeting):
/// 1. process_pick_requests — explicit picks
/// 2. process_proximity_events — ambient захват / выход из радиуса
/// 3. validate_targets — сброс despawned/dead целей
/// 4. publish_target_changes — TargetEvent слушателям
pub struct TargetingPlugin;

impl Plugin for TargetingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PickRequest>()
            .add_event::<ProximityEvent>()
            .add_event::<TargetEvent>();

        app.add_systems(
            FixedUpdate,
            (
                systems::process_pick_requests,
                systems::process_proximity_events,
                systems::validate_targets,
                systems::publish_target_changes,
            )
                .chain()
                .in_set(SimulationSet::Targeting),
        );
    }
}
