//! Strider Simulation Core
//!
//! ECS-ядро top-down прототипа на Bevy 0.16: выбор цели, погоня по
//! navmesh маршруту, стрельба снарядами ограниченной дальности.
//!
//! Движок (рендер, physics, navmesh) подключается через коллабораторы:
//! - PhysicsQuery: pick ray + ray cast
//! - NavMeshQuery: маршруты + snap на navmesh
//! - ProximityEvent / ProjectileHit: trigger и collision события
//!
//! Без движка работает HeadlessPlugin (дистанционные triggers + motion).

use bevy::app::FixedMain;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod collaborators;
pub mod combat;
pub mod components;
pub mod config;
pub mod enemy;
pub mod headless;
pub mod logger;
pub mod navigation;
pub mod projectile;
pub mod pursuit;
pub mod roster;
pub mod targeting;

// Re-export базовых типов для удобства
pub use collaborators::{
    CollaboratorError, NavMeshQuery, NavMeshService, OpenFieldNavMesh, PhysicsQuery, PhysicsService,
};
pub use combat::{CombatPlugin, DamageDealt, EntityDied};
pub use components::*;
pub use config::{ConfigError, SimulationConfig};
pub use enemy::{EnemyBehaviour, EnemyPlugin, Personality};
pub use headless::HeadlessPlugin;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use navigation::{ActivePath, NavPath, PathPlanner, PathStatus};
pub use projectile::{FireControl, ProjectileFlight, ProjectilePlugin};
pub use pursuit::{PursuitPlugin, PursuitState, Pursuer};
pub use roster::{Roster, RosterPlugin};
pub use targeting::{TargetSelector, TargetingPlugin};

/// Фазы одного FixedUpdate тика (строго последовательно)
///
/// Sensing → Targeting → Pursuit → Firing → Motion → Projectiles → Enemies → Damage → Bookkeeping
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Proximity triggers (headless) — до того, как targeting их прочтёт
    Sensing,
    /// Picks, proximity захват, stale validation
    Targeting,
    /// Pursuit state machine, ручное движение, aim
    Pursuit,
    /// Fire gate → spawn снарядов
    Firing,
    /// Движение снарядов + collisions (движок или headless)
    Motion,
    /// Дальность полёта
    Projectiles,
    /// Враги: quarry, provoke, chase
    Enemies,
    /// ProjectileHit → Health → Dead
    Damage,
    /// Roster уборка
    Bookkeeping,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// HeadlessPlugin сюда не входит: в игре его работу делает движок.
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            // Детерминистичный RNG (seed по умолчанию)
            app.insert_resource(DeterministicRng::new(42));
        }

        app.insert_resource(self.config.clone())
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(self.config.tick_hz));

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Sensing,
                SimulationSet::Targeting,
                SimulationSet::Pursuit,
                SimulationSet::Firing,
                SimulationSet::Motion,
                SimulationSet::Projectiles,
                SimulationSet::Enemies,
                SimulationSet::Damage,
                SimulationSet::Bookkeeping,
            )
                .chain(),
        );

        app.add_plugins((
            TargetingPlugin,
            PursuitPlugin,
            ProjectilePlugin,
            EnemyPlugin,
            CombatPlugin,
            RosterPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Ровно один fixed тик, без реального времени
///
/// `app.update()` крутит FixedMain столько раз, сколько накопило wall clock —
/// для тестов и скриптов нужен ручной шаг.
pub fn run_fixed_tick(app: &mut App) {
    let world = app.world_mut();
    let timestep = world.resource::<Time<Fixed>>().timestep();
    world.resource_mut::<Time<Fixed>>().advance_by(timestep);
    world.run_schedule(FixedMain);
}

/// Пауза: FixedUpdate перестаёт получать время. Возвращает false без TimePlugin.
pub fn pause_simulation(world: &mut World) -> bool {
    let Some(mut time) = world.get_resource_mut::<Time<Virtual>>() else {
        return false;
    };
    time.pause();
    log_info("Simulation paused");
    true
}

pub fn resume_simulation(world: &mut World) -> bool {
    let Some(mut time) = world.get_resource_mut::<Time<Virtual>>() else {
        return false;
    };
    time.unpause();
    log_info("Simulation resumed");
    true
}

pub fn is_simulation_paused(world: &World) -> bool {
    world
        .get_resource::<Time<Virtual>>()
        .is_some_and(|time| time.is_paused())
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
