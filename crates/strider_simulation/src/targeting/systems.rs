//! Targeting systems (FixedUpdate, начало цепочки)
//!
//! Порядок: picks → proximity → stale validation → publish.
//! К моменту pursuit'а слот цели уже финальный для этого тика.

use bevy::prelude::*;

use super::events::{PickRequest, ProximityEvent, TargetEvent};
use super::selector::{TargetChange, TargetSelector};
use crate::collaborators::PhysicsService;
use crate::components::{Actor, Dead};

/// Система: explicit picks через PhysicsService
///
/// Без PhysicsService (missing dependency) picks игнорируются с warning'ом.
pub fn process_pick_requests(
    mut picks: EventReader<PickRequest>,
    mut selectors: Query<&mut TargetSelector>,
    physics: Option<Res<PhysicsService>>,
) {
    for pick in picks.read() {
        let Some(physics) = physics.as_deref() else {
            crate::log_warning("Targeting: pick ignored — no PhysicsService installed");
            continue;
        };

        let Ok(mut selector) = selectors.get_mut(pick.picker) else {
            continue;
        };

        selector.select_at(pick.screen_point, physics.query());
    }
}

/// Система: ambient захват/сброс по proximity triggers
///
/// Дистанция считается по Transform'ам в момент события.
pub fn process_proximity_events(
    mut events: EventReader<ProximityEvent>,
    mut selectors: Query<(&Transform, &mut TargetSelector)>,
    transforms: Query<&Transform>,
) {
    for event in events.read() {
        match *event {
            ProximityEvent::Entered {
                observer,
                other,
                tag,
            } => {
                let Ok((observer_transform, mut selector)) = selectors.get_mut(observer) else {
                    continue;
                };
                let Ok(other_transform) = transforms.get(other) else {
                    continue;
                };

                let distance = observer_transform
                    .translation
                    .distance(other_transform.translation);
                selector.on_enter_range(other, tag, distance);
            }
            ProximityEvent::Exited { observer, other } => {
                if let Ok((_, mut selector)) = selectors.get_mut(observer) {
                    selector.on_exit_range(other);
                }
            }
        }
    }
}

/// Система: stale target detection
///
/// Цель, которой больше нет (despawn) или которая мертва, сбрасывается
/// до того, как кто-то попробует прочитать её позицию.
pub fn validate_targets(
    mut selectors: Query<&mut TargetSelector>,
    live_actors: Query<(), (With<Actor>, Without<Dead>)>,
) {
    for mut selector in selectors.iter_mut() {
        selector.validate(|entity| live_actors.contains(entity));
    }
}

/// Система: накопленные изменения слотов → TargetEvent
pub fn publish_target_changes(
    mut selectors: Query<(Entity, &mut TargetSelector)>,
    mut target_events: EventWriter<TargetEvent>,
) {
    for (owner, mut selector) in selectors.iter_mut() {
        if !selector.has_pending_changes() {
            continue;
        }

        for change in selector.drain_changes() {
            let event = match change {
                TargetChange::Acquired { target, previous } => TargetEvent::Targeted {
                    owner,
                    target,
                    previous,
                },
                TargetChange::Cleared { previous, reason } => TargetEvent::Untargeted {
                    owner,
                    target: previous,
                    reason,
                },
            };
            target_events.write(event);
        }
    }
}
