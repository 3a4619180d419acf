//! Headless host — то, что в игре делает движок
//!
//! - proximity triggers по дистанции (SimulationSet::Sensing)
//! - интеграция velocity снарядов + collision по радиусу (SimulationSet::Motion)
//!
//! Каждая часть выключается в HeadlessConfig.

use bevy::prelude::*;

pub mod motion;
pub mod sensing;

pub use motion::ProjectileContacts;
pub use sensing::ProximityContacts;

use crate::config::SimulationConfig;
use crate::SimulationSet;

fn proximity_sensing_enabled(config: Option<Res<SimulationConfig>>) -> bool {
    config.is_some_and(|config| config.headless.proximity_sensing)
}

fn projectile_motion_enabled(config: Option<Res<SimulationConfig>>) -> bool {
    config.is_some_and(|config| config.headless.integrate_projectile_motion)
}

fn projectile_hits_enabled(config: Option<Res<SimulationConfig>>) -> bool {
    config.is_some_and(|config| config.headless.projectile_hits)
}

/// Headless Plugin (тесты, CLI симуляция)
pub struct HeadlessPlugin;

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProximityContacts>()
            .init_resource::<ProjectileContacts>();

        app.add_systems(
            FixedUpdate,
            sensing::sense_proximity
                .run_if(proximity_sensing_enabled)
                .in_set(SimulationSet::Sensing),
        )
        .add_systems(
            FixedUpdate,
            (
                motion::integrate_projectile_motion.run_if(projectile_motion_enabled),
                motion::detect_projectile_hits.run_if(projectile_hits_enabled),
            )
                .chain()
                .in_set(SimulationSet::Motion),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Actor, ProximitySensor};
    use crate::targeting::ProximityEvent;

    fn sensing_app() -> App {
        let mut app = App::new();
        app.insert_resource(SimulationConfig::default())
            .init_resource::<ProximityContacts>()
            .add_event::<ProximityEvent>()
            .add_systems(Update, sensing::sense_proximity);
        app
    }

    fn drain(app: &mut App) -> Vec<ProximityEvent> {
        app.world_mut()
            .resource_mut::<Events<ProximityEvent>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_enter_and_exit_are_edge_triggered() {
        let mut app = sensing_app();
        let observer = app
            .world_mut()
            .spawn((Actor::player("hero"), ProximitySensor::new(10.0), Transform::default()))
            .id();
        let enemy = app
            .world_mut()
            .spawn((Actor::enemy("slime"), Transform::from_xyz(5.0, 0.0, 0.0)))
            .id();

        app.update();
        let events = drain(&mut app);
        assert!(events.contains(&ProximityEvent::Entered {
            observer,
            other: enemy,
            tag: crate::components::ActorTag::Enemy
        }));

        // Остался внутри — повторного Entered нет
        app.update();
        assert!(drain(&mut app).is_empty());

        app.world_mut().get_mut::<Transform>(enemy).unwrap().translation.x = 15.0;
        app.update();
        assert_eq!(
            drain(&mut app),
            vec![ProximityEvent::Exited {
                observer,
                other: enemy
            }]
        );
    }

    #[test]
    fn test_despawned_actor_is_dropped_silently() {
        let mut app = sensing_app();
        let observer = app
            .world_mut()
            .spawn((Actor::player("hero"), ProximitySensor::new(10.0), Transform::default()))
            .id();
        let enemy = app
            .world_mut()
            .spawn((Actor::enemy("slime"), Transform::from_xyz(2.0, 0.0, 0.0)))
            .id();

        app.update();
        drain(&mut app);

        app.world_mut().despawn(enemy);
        app.update();

        assert!(drain(&mut app).is_empty());
        assert!(app.world().resource::<ProximityContacts>().inside(observer).is_empty());
    }
}
