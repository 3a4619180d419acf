//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовая запись + характеристики (Actor, Health, CombatStats, Dead)
//! - movement: ручной ввод и скорости (MovementInput, MovementStats)
//! - world: то, что материализует движок (PrefabId, ProximitySensor)

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
