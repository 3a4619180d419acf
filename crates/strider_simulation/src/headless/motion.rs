//! Projectile motion + collision (вместо physics движка)

use std::collections::HashMap;

use bevy::prelude::*;

use crate::components::{Actor, Dead};
use crate::config::SimulationConfig;
use crate::projectile::{Projectile, ProjectileFlight, ProjectileHit, ProjectileVelocity};

/// Кого каждый снаряд уже задел (collision enter — один раз на пару)
/// и где он был на прошлом тике
#[derive(Resource, Debug, Default)]
pub struct ProjectileContacts {
    struck: HashMap<Entity, Vec<Entity>>,
    last_position: HashMap<Entity, Vec3>,
}

impl ProjectileContacts {
    pub fn struck(&self, projectile: Entity) -> &[Entity] {
        self.struck.get(&projectile).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Расстояние от `point` до отрезка `from..to`
fn distance_to_segment(point: Vec3, from: Vec3, to: Vec3) -> f32 {
    let segment = to - from;
    let length_squared = segment.length_squared();
    if length_squared <= f32::EPSILON {
        return point.distance(from);
    }
    let t = ((point - from).dot(segment) / length_squared).clamp(0.0, 1.0);
    point.distance(from + segment * t)
}

/// Система: position += velocity * dt
pub fn integrate_projectile_motion(
    mut projectiles: Query<(&mut Transform, &ProjectileVelocity)>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();
    for (mut transform, velocity) in projectiles.iter_mut() {
        transform.translation += velocity.0 * dt;
    }
}

/// Система: swept-проверка снаряда против акторов → ProjectileHit
///
/// Отрезок = путь за тик; у нового снаряда он начинается от стрелка
/// (spawn point может оказаться внутри врага вплотную).
/// Стрелок не задевает сам себя. Снаряд летит дальше.
pub fn detect_projectile_hits(
    projectiles: Query<(Entity, &Transform, &Projectile, &ProjectileFlight), Without<Actor>>,
    actors: Query<(Entity, &Transform), (With<Actor>, Without<Dead>)>,
    config: Res<SimulationConfig>,
    mut contacts: ResMut<ProjectileContacts>,
    mut hit_events: EventWriter<ProjectileHit>,
) {
    let radius = config.headless.projectile_hit_radius;

    contacts
        .struck
        .retain(|projectile, _| projectiles.contains(*projectile));
    contacts
        .last_position
        .retain(|projectile, _| projectiles.contains(*projectile));

    for (projectile, transform, owner, flight) in projectiles.iter() {
        let to = transform.translation;
        let from = contacts
            .last_position
            .insert(projectile, to)
            .unwrap_or_else(|| flight.start());

        for (target, target_transform) in actors.iter() {
            if target == owner.shooter {
                continue;
            }
            if distance_to_segment(target_transform.translation, from, to) > radius {
                continue;
            }

            let struck = contacts.struck.entry(projectile).or_default();
            if struck.contains(&target) {
                continue;
            }
            struck.push(target);

            crate::log(&format!(
                "Projectile {:?} hit {:?} (shooter {:?})",
                projectile, target, owner.shooter
            ));
            hit_events.write(ProjectileHit {
                projectile,
                shooter: owner.shooter,
                target,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits_app() -> App {
        let mut app = App::new();
        app.insert_resource(SimulationConfig::default())
            .init_resource::<ProjectileContacts>()
            .add_event::<ProjectileHit>()
            .add_systems(Update, detect_projectile_hits);
        app
    }

    fn spawn_projectile(app: &mut App, shooter: Entity, at: Vec3) -> Entity {
        app.world_mut()
            .spawn((
                Projectile { shooter },
                ProjectileFlight::on_spawn(Vec3::ZERO, 10.0, Vec3::NEG_Z),
                Transform::from_translation(at),
            ))
            .id()
    }

    fn hits(app: &mut App) -> Vec<ProjectileHit> {
        app.world_mut()
            .resource_mut::<Events<ProjectileHit>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_distance_to_segment() {
        let from = Vec3::ZERO;
        let to = Vec3::new(0.0, 0.0, -4.0);
        assert!((distance_to_segment(Vec3::new(1.0, 0.0, -2.0), from, to) - 1.0).abs() < 1e-5);
        assert!((distance_to_segment(Vec3::new(0.0, 0.0, 2.0), from, to) - 2.0).abs() < 1e-5);
        assert!((distance_to_segment(Vec3::X, from, from) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_point_blank_enemy_is_hit_once() {
        let mut app = hits_app();
        let shooter = app
            .world_mut()
            .spawn((Actor::player("hero"), Transform::default()))
            .id();
        // Враг между стрелком и spawn point'ом
        let enemy = app
            .world_mut()
            .spawn((Actor::enemy("slime"), Transform::from_xyz(0.0, 0.0, -0.6)))
            .id();
        let projectile = spawn_projectile(&mut app, shooter, Vec3::new(0.0, 0.0, -1.8));

        app.update();
        let first = hits(&mut app);
        assert_eq!(
            first,
            vec![ProjectileHit {
                projectile,
                shooter,
                target: enemy
            }]
        );

        // Тот же снаряд, та же пара — второго hit'а нет
        app.world_mut().get_mut::<Transform>(projectile).unwrap().translation.z = -2.1;
        app.world_mut().get_mut::<Transform>(enemy).unwrap().translation.z = -2.0;
        app.update();
        assert!(hits(&mut app).is_empty());
        assert_eq!(app.world().resource::<ProjectileContacts>().struck(projectile), &[enemy]);
    }

    #[test]
    fn test_only_path_since_last_tick_is_swept() {
        let mut app = hits_app();
        let shooter = app
            .world_mut()
            .spawn((Actor::player("hero"), Transform::default()))
            .id();
        let projectile = spawn_projectile(&mut app, shooter, Vec3::new(0.0, 0.0, -2.0));
        app.update();

        // Враг встал на уже пролетенный участок
        app.world_mut()
            .spawn((Actor::enemy("slime"), Transform::from_xyz(0.0, 0.0, -1.0)));
        app.world_mut().get_mut::<Transform>(projectile).unwrap().translation.z = -3.0;
        app.update();

        assert!(hits(&mut app).is_empty());
    }
}
