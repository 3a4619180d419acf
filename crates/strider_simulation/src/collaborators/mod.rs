//! Engine collaborators — то, что хост-движок поставляет ядру
//!
//! Ядро не симулирует физику и не строит navmesh. Оно только задаёт
//! вопросы через эти трейты и переживает любые ответы (включая ошибки).
//!
//! Transform access = bevy `Transform`, lifecycle = `Commands` + `PrefabId`,
//! clock = `Time<Fixed>`. Здесь только то, что ECS не даёт сам:
//! - `PhysicsQuery`: screen → ray, ray cast с фильтром по классификации
//! - `NavMeshQuery`: path query + snap точки на walkable поверхность

use bevy::prelude::*;
use thiserror::Error;

use crate::components::ActorTag;
use crate::navigation::PathStatus;

pub mod open_field;

pub use open_field::OpenFieldNavMesh;

/// Коллаборатор не смог ответить
///
/// Ядро никогда не пробрасывает эти ошибки наружу: логирует и
/// трактует как "нет попадания" / "нет маршрута в этом тике".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollaboratorError {
    #[error("collaborator is not ready to answer queries")]
    Unavailable,
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("query input is not finite")]
    NonFiniteInput,
}

/// Луч в мировых координатах (результат screen → world проекции)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Фильтр ray cast'а: только entity с этой классификацией
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryFilter {
    pub tag: ActorTag,
}

/// Попадание луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub distance: f32,
    pub tag: ActorTag,
}

/// Ответ navmesh на path query
#[derive(Debug, Clone, PartialEq)]
pub struct NavQueryResult {
    pub status: PathStatus,
    pub waypoints: Vec<Vec3>,
}

/// Physics/pick queries хоста (camera + collision world)
pub trait PhysicsQuery: Send + Sync {
    /// Проекция экранной точки в мировой луч (None = нет активной камеры)
    fn screen_ray(&self, screen_point: Vec2) -> Option<PickRay>;

    fn cast_ray(
        &self,
        ray: PickRay,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Result<Option<RayHit>, CollaboratorError>;
}

/// Navmesh pathfinding хоста
pub trait NavMeshQuery: Send + Sync {
    fn compute_path(&self, from: Vec3, to: Vec3) -> Result<NavQueryResult, CollaboratorError>;

    /// Ближайшая walkable точка в радиусе `max_distance` (None = вне navmesh)
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;
}

/// Resource: установленный physics query сервис
///
/// Отсутствие ресурса = degraded режим: picks игнорируются.
#[derive(Resource)]
pub struct PhysicsService(pub Box<dyn PhysicsQuery>);

impl PhysicsService {
    pub fn new(query: impl PhysicsQuery + 'static) -> Self {
        Self(Box::new(query))
    }

    pub fn query(&self) -> &dyn PhysicsQuery {
        self.0.as_ref()
    }
}

/// Resource: установленный navmesh сервис
///
/// Отсутствие ресурса = движение напрямую к цели (reduced configuration).
#[derive(Resource)]
pub struct NavMeshService(pub Box<dyn NavMeshQuery>);

impl NavMeshService {
    pub fn new(query: impl NavMeshQuery + 'static) -> Self {
        Self(Box::new(query))
    }

    pub fn query(&self) -> &dyn NavMeshQuery {
        self.0.as_ref()
    }
}
