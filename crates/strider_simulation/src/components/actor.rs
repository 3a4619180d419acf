//! Базовые компоненты акторов: Actor, Health, CombatStats
//!
//! Composition вместо иерархии Character → Player/Enemy:
//! Actor — data-only запись, поведение навешивается отдельными компонентами
//! (TargetSelector, Pursuer, EnemyBehaviour).

use bevy::prelude::*;
use serde::Deserialize;

/// Классификация entity (trigger tags + ray cast filter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Deserialize)]
pub enum ActorTag {
    Player,
    #[default]
    Enemy,
}

/// Актор (игрок, враг) — базовый компонент для живых существ
///
/// Автоматически добавляет Health, MovementStats, CombatStats, PrefabId через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    crate::components::MovementStats,
    CombatStats,
    crate::components::PrefabId
)]
pub struct Actor {
    pub name: String,
    pub tag: ActorTag,
}

impl Actor {
    pub fn player(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: ActorTag::Player,
        }
    }

    pub fn enemy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: ActorTag::Enemy,
        }
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Боевые параметры (урон + дальнобойность снаряда)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CombatStats {
    /// Урон одного попадания
    pub power: u32,
    /// Скорость снаряда (м/с)
    pub projectile_speed: f32,
    /// Максимальная дистанция атаки = максимальная дальность полёта снаряда
    pub max_attack_distance: f32,
    /// Смещение spawn точки снаряда вперёд от стрелка
    pub projectile_offset: f32,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            power: 10,
            projectile_speed: 20.0,
            max_attack_distance: 10.0,
            projectile_offset: 1.5,
        }
    }
}

impl CombatStats {
    pub fn in_range(&self, distance: f32) -> bool {
        distance <= self.max_attack_distance
    }
}

/// Marker: актор мёртв (health == 0), не может быть целью
///
/// Entity не удаляется — движок решает, что делать с визуалом.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;
