//! Pursuit systems (FixedUpdate, после targeting)
//!
//! Порядок: requests → pursuit tick → ручное движение → aim.

use std::collections::HashMap;

use bevy::prelude::*;

use super::events::{PursueRequest, PursuitEvent};
use super::pursuer::{PursuitInput, PursuitOutcome, Pursuer};
use super::steering::turn_towards;
use crate::collaborators::NavMeshService;
use crate::components::{Actor, Dead, MovementInput, MovementStats};
use crate::navigation::ActivePath;
use crate::targeting::TargetSelector;

/// Позиции живых акторов (цели pursuit'а / aim'а)
fn live_positions(actors: &Query<(Entity, &Transform), (With<Actor>, Without<Dead>)>) -> HashMap<Entity, Vec3> {
    actors
        .iter()
        .map(|(entity, transform)| (entity, transform.translation))
        .collect()
}

/// Система: PursueRequest → Pursuer::engage
pub fn handle_pursue_requests(
    mut requests: EventReader<PursueRequest>,
    mut pursuers: Query<&mut Pursuer>,
) {
    for request in requests.read() {
        if let Ok(mut pursuer) = pursuers.get_mut(request.pursuer) {
            pursuer.engage();
        }
    }
}

/// Система: один тик state machine каждого Pursuer'а
///
/// ParamSet: сначала читаем позиции целей, потом мутируем свои Transform'ы
/// (одна и та же entity может быть и pursuer'ом, и чьей-то целью).
pub fn drive_pursuit(
    mut params: ParamSet<(
        Query<(Entity, &Transform), (With<Actor>, Without<Dead>)>,
        Query<(
            Entity,
            &mut Transform,
            &mut Pursuer,
            &TargetSelector,
            &MovementStats,
            Option<&MovementInput>,
            Option<&mut ActivePath>,
        ), Without<Dead>>,
    )>,
    time: Res<Time<Fixed>>,
    nav: Option<Res<NavMeshService>>,
    mut pursuit_events: EventWriter<PursuitEvent>,
) {
    let positions = live_positions(&params.p0());
    let nav = nav.as_deref().map(NavMeshService::query);
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (entity, mut transform, mut pursuer, selector, stats, input, active_path) in
        params.p1().iter_mut()
    {
        let target = selector
            .target_entity()
            .and_then(|target| positions.get(&target).map(|pos| (target, *pos)));

        let outcome = pursuer.tick(
            &mut transform,
            PursuitInput {
                now,
                dt,
                target,
                manual_input: input.map(|input| input.direction).unwrap_or(Vec3::ZERO),
                move_speed: stats.move_speed,
                rotation_speed: stats.rotation_speed,
                nav,
            },
        );

        match outcome {
            PursuitOutcome::Steady => {}
            PursuitOutcome::Transitioned { from, to } => {
                crate::log(&format!("Pursuit {:?}: {:?} → {:?}", entity, from, to));
                pursuit_events.write(PursuitEvent::Transitioned {
                    pursuer: entity,
                    from,
                    to,
                });
            }
            PursuitOutcome::Abandoned { from, reason } => {
                crate::log_info(&format!(
                    "Pursuit {:?}: abandoned {:?} ({:?})",
                    entity, from, reason
                ));
                pursuit_events.write(PursuitEvent::Abandoned {
                    pursuer: entity,
                    from,
                    reason,
                });
            }
        }

        if let Some(mut active_path) = active_path {
            let shown = pursuer.visible_path();
            if !active_path.shows(shown) {
                active_path.path = shown.cloned();
            }
        }
    }
}

/// Система: ручное движение (WASD)
///
/// Желаемая позиция snap'ается на navmesh; не нашлось точки рядом → стоим.
/// Без NavMeshService двигаемся напрямую.
/// С живой целью facing принадлежит aim_at_target — только сдвигаемся.
pub fn apply_manual_movement(
    mut movers: Query<
        (&mut Transform, &MovementInput, &MovementStats, Option<&TargetSelector>),
        Without<Dead>,
    >,
    live_actors: Query<(), (With<Actor>, Without<Dead>)>,
    time: Res<Time<Fixed>>,
    nav: Option<Res<NavMeshService>>,
) {
    let dt = time.delta_secs();

    for (mut transform, input, stats, selector) in movers.iter_mut() {
        if !input.is_active() {
            continue;
        }

        let direction = input.direction.clamp_length_max(1.0);
        let desired = transform.translation + direction * stats.move_speed * dt;

        let next = match nav.as_deref() {
            Some(nav) => nav
                .query()
                .sample_position(desired, stats.navmesh_sample_distance),
            None => Some(desired),
        };

        let Some(next) = next else {
            continue;
        };

        transform.translation = next;

        let aiming = selector
            .and_then(TargetSelector::target_entity)
            .is_some_and(|target| live_actors.contains(target));
        if !aiming {
            turn_towards(&mut transform, direction, stats.rotation_speed, dt);
        }
    }
}

/// Система: доворот к цели, пока pursuer не рулит сам
///
/// Держит стрелка лицом к цели, чтобы fire gate (facing) мог сработать.
/// Работает и под ручным вводом: стрейф с целью стреляет.
pub fn aim_at_target(
    mut params: ParamSet<(
        Query<(Entity, &Transform), (With<Actor>, Without<Dead>)>,
        Query<(
            &mut Transform,
            &TargetSelector,
            Option<&Pursuer>,
            &MovementStats,
        ), Without<Dead>>,
    )>,
    time: Res<Time<Fixed>>,
) {
    let positions = live_positions(&params.p0());
    let dt = time.delta_secs();

    for (mut transform, selector, pursuer, stats) in params.p1().iter_mut() {
        if pursuer.is_some_and(|pursuer| pursuer.state().is_steering()) {
            continue;
        }

        let Some(target_pos) = selector
            .target_entity()
            .and_then(|target| positions.get(&target))
        else {
            continue;
        };

        let direction = *target_pos - transform.translation;
        turn_towards(&mut transform, direction, stats.rotation_speed, dt);
    }
}
