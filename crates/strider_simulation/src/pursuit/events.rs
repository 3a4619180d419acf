//! Pursuit events

use bevy::prelude::*;

use super::pursuer::{AbandonReason, PursuitState};

/// Event: явная команда "догнать текущую цель" (правый клик, AI)
#[derive(Event, Debug, Clone)]
pub struct PursueRequest {
    pub pursuer: Entity,
}

/// Смена состояния pursuit'а (анимации, UI, аудио)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PursuitEvent {
    Transitioned {
        pursuer: Entity,
        from: PursuitState,
        to: PursuitState,
    },
    Abandoned {
        pursuer: Entity,
        from: PursuitState,
        reason: AbandonReason,
    },
}
