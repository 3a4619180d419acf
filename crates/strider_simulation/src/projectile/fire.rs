//! FireControl — когда актор стреляет по цели
//!
//! Fire gate (все три условия):
//! - facing error ≤ facing_threshold
//! - дистанция ≤ max_attack_distance
//! - cooldown истёк

use bevy::prelude::*;

use crate::components::{CombatStats, PrefabId};
use crate::pursuit::facing_error;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct FireControl {
    /// Минимальный интервал между выстрелами (секунды)
    pub fire_interval: f32,
    /// Допустимая ошибка прицела (радианы)
    pub facing_threshold: f32,
    /// Prefab снаряда для движка
    pub projectile_prefab: PrefabId,
    /// Текущий cooldown timer (уменьшается до 0)
    cooldown: f32,
}

impl Default for FireControl {
    fn default() -> Self {
        Self::new(0.5, 0.1, PrefabId::new("projectile"))
    }
}

impl FireControl {
    pub fn new(fire_interval: f32, facing_threshold: f32, projectile_prefab: PrefabId) -> Self {
        Self {
            fire_interval,
            facing_threshold,
            projectile_prefab,
            cooldown: 0.0,
        }
    }

    pub fn ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn tick(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown = self.fire_interval;
    }

    /// Fire gate без учёта cooldown'а: прицел и дистанция
    pub fn has_shot(&self, shooter: &Transform, target: Vec3, stats: &CombatStats) -> bool {
        stats.in_range(shooter.translation.distance(target))
            && facing_error(shooter, target) <= self.facing_threshold
    }
}

/// Параметры выстрела: точка spawn'а и скорость снаряда
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub spawn_position: Vec3,
    pub direction: Vec3,
    pub velocity: Vec3,
}

impl Shot {
    /// Снаряд появляется на `projectile_offset` впереди стрелка и летит к цели
    pub fn aimed(shooter: &Transform, target: Vec3, stats: &CombatStats) -> Self {
        let forward = shooter.forward();
        let direction = (target - shooter.translation).normalize_or(*forward);

        Self {
            spawn_position: shooter.translation + *forward * stats.projectile_offset,
            direction,
            velocity: direction * stats.projectile_speed,
        }
    }
}
