//! World компоненты: PrefabId, ProximitySensor

use bevy::prelude::*;

/// Prefab для визуального представления (data-driven)
///
/// Движок видит `Added<PrefabId>` и инстанцирует визуал.
/// Ядро не знает ничего про ассеты — только идентификатор.
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PrefabId(pub String);

impl Default for PrefabId {
    fn default() -> Self {
        Self("actor".to_string())
    }
}

impl PrefabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Proximity trigger актора (sphere collider движка)
///
/// Движок шлёт ProximityEvent, когда кто-то входит/выходит из радиуса.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ProximitySensor {
    pub radius: f32,
}

impl Default for ProximitySensor {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl ProximitySensor {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn contains(&self, distance: f32) -> bool {
        distance <= self.radius
    }
}
