//! Enemy systems (SimulationSet::Enemies)

use std::collections::HashMap;

use bevy::prelude::*;

use super::behaviour::EnemyBehaviour;
use crate::components::{Actor, ActorTag, Dead, MovementStats};
use crate::projectile::ProjectileHit;
use crate::pursuit::{step_towards, turn_towards};
use crate::targeting::ProximityEvent;

/// Система: proximity triggers с тегом Player → quarry
pub fn track_quarry(
    mut events: EventReader<ProximityEvent>,
    mut enemies: Query<(&Transform, &mut EnemyBehaviour)>,
    transforms: Query<&Transform>,
) {
    for event in events.read() {
        match *event {
            ProximityEvent::Entered {
                observer,
                other,
                tag: ActorTag::Player,
            } => {
                let Ok((transform, mut enemy)) = enemies.get_mut(observer) else {
                    continue;
                };
                let Ok(other_transform) = transforms.get(other) else {
                    continue;
                };

                let distance = transform.translation.distance(other_transform.translation);
                if enemy.on_player_enter(other, distance) {
                    crate::log(&format!("Enemy {:?}: spotted {:?} at {:.2}m", observer, other, distance));
                }
            }
            ProximityEvent::Exited { observer, other } => {
                if let Ok((_, mut enemy)) = enemies.get_mut(observer) {
                    enemy.on_player_exit(other);
                }
            }
            ProximityEvent::Entered { .. } => {}
        }
    }
}

/// Система: урон провоцирует врага
pub fn provoke_on_hit(
    mut hits: EventReader<ProjectileHit>,
    mut enemies: Query<&mut EnemyBehaviour, Without<Dead>>,
) {
    for hit in hits.read() {
        if let Ok(mut enemy) = enemies.get_mut(hit.target) {
            enemy.provoke(hit.shooter);
        }
    }
}

/// Система: движение к quarry по прямой
///
/// ParamSet: позиции игроков читаем до мутации Transform'ов врагов.
pub fn chase_quarry(
    mut params: ParamSet<(
        Query<(Entity, &Transform), (With<Actor>, Without<Dead>)>,
        Query<(&mut Transform, &mut EnemyBehaviour, &MovementStats), Without<Dead>>,
    )>,
    time: Res<Time<Fixed>>,
) {
    let positions: HashMap<Entity, Vec3> = params
        .p0()
        .iter()
        .map(|(entity, transform)| (entity, transform.translation))
        .collect();
    let dt = time.delta_secs();

    for (mut transform, mut enemy, stats) in params.p1().iter_mut() {
        // Quarry мёртв / despawned → забываем
        for stale in [enemy.quarry(), enemy.provoked_by()].into_iter().flatten() {
            if !positions.contains_key(&stale) {
                enemy.forget(stale);
            }
        }

        let Some(quarry_pos) = enemy
            .chase_target()
            .and_then(|quarry| positions.get(&quarry).copied())
        else {
            continue;
        };

        let position = transform.translation;
        transform.translation = step_towards(position, quarry_pos, enemy.move_speed * dt);
        turn_towards(&mut transform, quarry_pos - position, stats.rotation_speed, dt);
    }
}
