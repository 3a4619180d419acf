//! Projectile systems
//!
//! fire_at_target (SimulationSet::Firing) → [движок/headless двигает снаряды]
//! → expire_projectiles (SimulationSet::Projectiles)

use std::collections::HashMap;

use bevy::prelude::*;

use super::events::{ProjectileExpired, ProjectileFired};
use super::fire::{FireControl, Shot};
use super::flight::{FlightStatus, Projectile, ProjectileFlight, ProjectileVelocity};
use crate::components::{Actor, CombatStats, Dead};
use crate::targeting::TargetSelector;

/// Система: cooldown + fire gate → spawn снаряда
pub fn fire_at_target(
    mut commands: Commands,
    mut shooters: Query<(Entity, &Transform, &TargetSelector, &CombatStats, &mut FireControl), Without<Dead>>,
    targets: Query<(Entity, &Transform), (With<Actor>, Without<Dead>)>,
    time: Res<Time<Fixed>>,
    mut fired_events: EventWriter<ProjectileFired>,
) {
    let dt = time.delta_secs();
    let positions: HashMap<Entity, Vec3> = targets
        .iter()
        .map(|(entity, transform)| (entity, transform.translation))
        .collect();

    for (shooter, transform, selector, stats, mut fire) in shooters.iter_mut() {
        fire.tick(dt);

        let Some(target) = selector.target_entity() else {
            continue;
        };
        let Some(&target_pos) = positions.get(&target) else {
            continue;
        };

        if !fire.ready() || !fire.has_shot(transform, target_pos, stats) {
            continue;
        }

        let shot = Shot::aimed(transform, target_pos, stats);
        let projectile = commands
            .spawn((
                Projectile { shooter },
                ProjectileFlight::on_spawn(transform.translation, stats.max_attack_distance, shot.direction),
                ProjectileVelocity(shot.velocity),
                Transform::from_translation(shot.spawn_position).looking_to(shot.direction, Vec3::Y),
                fire.projectile_prefab.clone(),
            ))
            .id();

        fire.start_cooldown();

        crate::log(&format!(
            "Fire: {:?} → {:?} projectile {:?} ({:.2}m)",
            shooter,
            target,
            projectile,
            transform.translation.distance(target_pos)
        ));
        fired_events.write(ProjectileFired {
            shooter,
            target,
            projectile,
        });
    }
}

/// Система: дальность выработана → ProjectileExpired + despawn
pub fn expire_projectiles(
    mut commands: Commands,
    projectiles: Query<(Entity, &Transform, &Projectile, &ProjectileFlight)>,
    mut expired_events: EventWriter<ProjectileExpired>,
) {
    for (entity, transform, projectile, flight) in projectiles.iter() {
        if flight.tick(transform.translation) == FlightStatus::Continue {
            continue;
        }

        let traveled = flight.traveled(transform.translation);
        crate::log(&format!(
            "Projectile {:?} expired after {:.2}m",
            entity, traveled
        ));

        expired_events.write(ProjectileExpired {
            projectile: entity,
            shooter: projectile.shooter,
            traveled,
        });
        commands.entity(entity).despawn();
    }
}
