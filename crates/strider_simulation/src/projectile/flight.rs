//! ProjectileFlight — дальность полёта снаряда
//!
//! Единственное условие уничтожения в ядре: пройденная дистанция от точки
//! выстрела ≥ max_distance. Проверка по наблюдаемой позиции, поэтому
//! перелёт на один тик движения допустим.

use bevy::prelude::*;

/// Снаряд: кто выстрелил
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(ProjectileFlight, ProjectileVelocity)]
pub struct Projectile {
    pub shooter: Entity,
}

/// Скорость снаряда (м/с, мировые координаты)
///
/// Движение интегрирует physics движка (или HeadlessPlugin).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ProjectileVelocity(pub Vec3);

/// Результат проверки дальности
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    Continue,
    Expire,
}

#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ProjectileFlight {
    /// Точка выстрела (фиксируется при spawn'е)
    start: Vec3,
    max_distance: f32,
    direction: Vec3,
}

impl ProjectileFlight {
    pub fn on_spawn(start: Vec3, max_distance: f32, direction: Vec3) -> Self {
        Self {
            start,
            max_distance,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Пройдено от точки выстрела до `current`
    pub fn traveled(&self, current: Vec3) -> f32 {
        self.start.distance(current)
    }

    pub fn tick(&self, current: Vec3) -> FlightStatus {
        if self.traveled(current) >= self.max_distance {
            FlightStatus::Expire
        } else {
            FlightStatus::Continue
        }
    }
}
