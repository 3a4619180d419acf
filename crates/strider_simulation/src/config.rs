//! Simulation tuning (RON файлы)
//!
//! Всё, что в прототипах было inspector-полями, собрано в один Resource.
//! Per-actor компоненты (MovementStats, TargetingConfig, ...) засеваются
//! отсюда при spawn'е, дальше живут своей жизнью.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::navigation::PlannerConfig;
use crate::pursuit::PursuitConfig;
use crate::targeting::TargetingConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Корневой конфиг симуляции
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Частота FixedUpdate (Hz)
    pub tick_hz: f64,
    pub targeting: TargetingConfig,
    pub planner: PlannerConfig,
    pub pursuit: PursuitConfig,
    pub combat: CombatConfig,
    pub enemy: EnemyConfig,
    pub headless: HeadlessConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            targeting: TargetingConfig::default(),
            planner: PlannerConfig::default(),
            pursuit: PursuitConfig::default(),
            combat: CombatConfig::default(),
            enemy: EnemyConfig::default(),
            headless: HeadlessConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&text)
    }
}

/// Player/character combat + locomotion defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub health: u32,
    pub power: u32,
    pub move_speed: f32,
    /// Множитель slerp (rotation_speed * dt, clamp 1.0)
    pub rotation_speed: f32,
    pub projectile_speed: f32,
    pub max_attack_distance: f32,
    /// Смещение точки spawn'а снаряда вперёд от стрелка
    pub projectile_offset: f32,
    /// Минимальный интервал между выстрелами (секунды)
    pub fire_interval: f32,
    pub projectile_prefab: String,
    pub prefab: String,
    /// Радиус snap'а ручного движения на navmesh
    pub navmesh_sample_distance: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            health: 100,
            power: 10,
            move_speed: 5.0,
            rotation_speed: 10.0,
            projectile_speed: 20.0,
            max_attack_distance: 10.0,
            projectile_offset: 1.5,
            fire_interval: 0.5,
            projectile_prefab: "projectile".to_string(),
            prefab: "player".to_string(),
            navmesh_sample_distance: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub health: u32,
    pub power: u32,
    pub detection_radius: f32,
    pub move_speed: f32,
    /// Сколько врагов roster спавнит при init
    pub initial_count: usize,
    /// Радиус кольца начальной расстановки
    pub spawn_radius: f32,
    /// Доля Aggressive среди начальных врагов (остальные Peaceful)
    pub aggressive_ratio: f64,
    pub prefab: String,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            health: 30,
            power: 5,
            detection_radius: 10.0,
            move_speed: 5.0,
            initial_count: 3,
            spawn_radius: 8.0,
            aggressive_ratio: 0.5,
            prefab: "enemy".to_string(),
        }
    }
}

/// Что headless хост делает вместо движка
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeadlessConfig {
    /// Интегрировать velocity снарядов (в движке это делает physics)
    pub integrate_projectile_motion: bool,
    /// Distance-based proximity triggers вместо trigger colliders
    pub proximity_sensing: bool,
    /// Distance-based collision снаряда с актором вместо collider'ов
    pub projectile_hits: bool,
    /// Радиус попадания снаряда (метры)
    pub projectile_hit_radius: f32,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            integrate_projectile_motion: true,
            proximity_sensing: true,
            projectile_hits: true,
            projectile_hit_radius: 0.5,
        }
    }
}
