//! Общие helpers для integration тестов: headless app, mock physics, spawn

#![allow(dead_code)]

use bevy::prelude::*;
use strider_simulation::collaborators::{PickRay, QueryFilter, RayHit};
use strider_simulation::*;

/// Physics, у которой любой pick попадает в заданного актора
pub struct PickEverything {
    pub hit: Option<RayHit>,
}

impl PhysicsQuery for PickEverything {
    fn screen_ray(&self, _screen_point: Vec2) -> Option<PickRay> {
        Some(PickRay {
            origin: Vec3::new(0.0, 20.0, 0.0),
            direction: Vec3::NEG_Y,
        })
    }

    fn cast_ray(
        &self,
        _ray: PickRay,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Result<Option<RayHit>, CollaboratorError> {
        Ok(self
            .hit
            .filter(|hit| hit.tag == filter.tag && hit.distance <= max_distance))
    }
}

/// Конфиг для сценариев: без collision'ов снарядов, чтобы цели не умирали
pub fn scenario_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.headless.projectile_hits = false;
    config
}

/// Headless app + open-field navmesh
pub fn scenario_app(config: SimulationConfig) -> App {
    let mut app = create_headless_app(42);
    app.insert_resource(NavMeshService::new(OpenFieldNavMesh::default()))
        .add_plugins((SimulationPlugin::with_config(config), HeadlessPlugin));
    app
}

pub fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    let world = app.world_mut();
    let player = world.resource_scope(|world, mut roster: Mut<Roster>| {
        let config = world.resource::<SimulationConfig>().clone();
        let mut commands = world.commands();
        roster.spawn_player(&mut commands, &config, position)
    });
    world.flush();
    player
}

pub fn spawn_enemy(app: &mut App, position: Vec3, personality: Personality) -> Entity {
    let world = app.world_mut();
    let enemy = world.resource_scope(|world, mut roster: Mut<Roster>| {
        let config = world.resource::<SimulationConfig>().clone();
        let mut commands = world.commands();
        roster.spawn_enemy(&mut commands, &config, position, personality)
    });
    world.flush();
    enemy
}

/// Тикаем, пока `done` не вернёт true; число тиков или None по лимиту
pub fn tick_until(app: &mut App, max_ticks: usize, done: impl Fn(&mut World) -> bool) -> Option<usize> {
    for tick in 0..max_ticks {
        run_fixed_tick(app);
        if done(app.world_mut()) {
            return Some(tick + 1);
        }
    }
    None
}

/// Все события типа E с начала прогона
///
/// run_fixed_tick не крутит First, поэтому буферы событий не чистятся.
pub fn events<E: Event + Clone>(app: &App) -> Vec<E> {
    let events = app.world().resource::<Events<E>>();
    events.get_cursor().read(events).cloned().collect()
}

pub fn pursuit_state(app: &App, entity: Entity) -> PursuitState {
    app.world()
        .get::<Pursuer>(entity)
        .map(Pursuer::state)
        .unwrap_or_default()
}

pub fn position(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .map(|transform| transform.translation)
        .unwrap_or(Vec3::NAN)
}
