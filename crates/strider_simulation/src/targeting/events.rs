//! Targeting events
//!
//! Входящие (хост → ядро): PickRequest, ProximityEvent
//! Исходящие (ядро → слушатели): TargetEvent

use bevy::prelude::*;

use super::selector::ClearReason;
use crate::components::ActorTag;

/// Event: pick экранной точкой (левый клик)
#[derive(Event, Debug, Clone)]
pub struct PickRequest {
    /// Чей TargetSelector обновляем
    pub picker: Entity,
    pub screen_point: Vec2,
}

/// Proximity trigger события от движка
///
/// - Entered: `other` вошёл в trigger наблюдателя
/// - Exited: `other` вышел из trigger'а
#[derive(Event, Debug, Clone, PartialEq)]
pub enum ProximityEvent {
    Entered {
        observer: Entity,
        other: Entity,
        tag: ActorTag,
    },
    Exited {
        observer: Entity,
        other: Entity,
    },
}

/// Изменение цели актора (слушатели: подсветка, UI, аудио)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum TargetEvent {
    Targeted {
        owner: Entity,
        target: Entity,
        previous: Option<Entity>,
    },
    Untargeted {
        owner: Entity,
        target: Entity,
        reason: ClearReason,
    },
}
