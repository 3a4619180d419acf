//! TargetSelector — единственный слот цели актора
//!
//! Два пути захвата, один слот и одна процедура сброса:
//! - explicit pick: screen point → ray cast (фильтр по классификации)
//! - ambient: proximity trigger вошёл в acquisition radius
//!
//! Изменения копятся в `changes` и публикуются системой как TargetEvent
//! (untargeted/targeted уведомления слушателям).

use bevy::prelude::*;
use serde::Deserialize;

use crate::collaborators::{PhysicsQuery, QueryFilter};
use crate::components::ActorTag;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Максимальная длина луча при pick'е
    pub max_pick_distance: f32,
    /// Proximity захват только ближе этого радиуса
    pub acquisition_radius: f32,
    /// Кого можно выбирать целью
    pub hostile_tag: ActorTag,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            max_pick_distance: 100.0,
            acquisition_radius: 10.0,
            hostile_tag: ActorTag::Enemy,
        }
    }
}

/// Как цель попала в слот
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    Pick,
    Proximity,
}

/// Выбранная цель
///
/// Позиция не хранится: она принадлежит движку и читается каждый тик.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub entity: Entity,
    pub acquisition: Acquisition,
}

/// Почему слот опустел
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearReason {
    /// Pick промахнулся мимо врагов
    PickMissed,
    /// Цель вышла из proximity радиуса
    LeftRange,
    /// Entity удалена / мертва
    Despawned,
    /// Явный сброс хостом
    Explicit,
}

/// Изменение слота цели (для уведомлений)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetChange {
    Acquired {
        target: Entity,
        previous: Option<Entity>,
    },
    Cleared {
        previous: Entity,
        reason: ClearReason,
    },
}

#[derive(Component, Debug, Clone, Default)]
pub struct TargetSelector {
    config: TargetingConfig,
    target: Option<Target>,
    changes: Vec<TargetChange>,
}

impl TargetSelector {
    pub fn new(config: TargetingConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }

    pub fn target(&self) -> Option<Target> {
        self.target
    }

    pub fn target_entity(&self) -> Option<Entity> {
        self.target.map(|target| target.entity)
    }

    /// Explicit pick через physics query
    ///
    /// Попадание во врага → новая цель. Промах → сброс текущей цели.
    /// Отказ коллаборатора (нет камеры, ошибка cast'а) → слот не трогаем.
    pub fn select_at(&mut self, screen_point: Vec2, physics: &dyn PhysicsQuery) -> Option<Target> {
        let Some(ray) = physics.screen_ray(screen_point) else {
            crate::log_warning(&format!(
                "TargetSelector: no pick ray for screen point {:?}",
                screen_point
            ));
            return self.target;
        };

        let filter = QueryFilter {
            tag: self.config.hostile_tag,
        };

        match physics.cast_ray(ray, self.config.max_pick_distance, filter) {
            Ok(Some(hit))
                if hit.tag == self.config.hostile_tag
                    && hit.distance <= self.config.max_pick_distance =>
            {
                self.acquire(hit.entity, Acquisition::Pick);
                crate::log_info(&format!(
                    "TargetSelector: picked {:?} at {:.2}m",
                    hit.entity, hit.distance
                ));
                self.target
            }
            Ok(_) => {
                self.clear(ClearReason::PickMissed);
                None
            }
            Err(err) => {
                crate::log_warning(&format!("TargetSelector: pick ray cast failed: {}", err));
                self.target
            }
        }
    }

    /// Proximity trigger: `entity` вошёл в trigger на дистанции `distance`
    ///
    /// Захватывает только враждебную entity внутри acquisition radius и
    /// только в пустой слот (pick-цель не перебивается). Возвращает true при захвате.
    pub fn on_enter_range(&mut self, entity: Entity, tag: ActorTag, distance: f32) -> bool {
        if tag != self.config.hostile_tag || distance > self.config.acquisition_radius {
            return false;
        }

        if self.target.is_some() {
            return false;
        }

        self.acquire(entity, Acquisition::Proximity);
        crate::log_info(&format!(
            "TargetSelector: {:?} acquired by proximity at {:.2}m",
            entity, distance
        ));
        true
    }

    /// Proximity trigger: `entity` покинул trigger
    pub fn on_exit_range(&mut self, entity: Entity) -> bool {
        if self.target_entity() != Some(entity) {
            return false;
        }

        self.clear(ClearReason::LeftRange)
    }

    /// Сбросить слот (синхронно). Возвращает true если цель была.
    pub fn clear(&mut self, reason: ClearReason) -> bool {
        let Some(previous) = self.target.take() else {
            return false;
        };

        crate::log_info(&format!(
            "TargetSelector: target {:?} cleared ({:?})",
            previous.entity, reason
        ));
        self.changes.push(TargetChange::Cleared {
            previous: previous.entity,
            reason,
        });
        true
    }

    /// Проверка stale цели: `is_live` = entity ещё существует и жива
    pub fn validate(&mut self, is_live: impl Fn(Entity) -> bool) -> bool {
        match self.target {
            Some(target) if !is_live(target.entity) => self.clear(ClearReason::Despawned),
            _ => false,
        }
    }

    /// Забрать накопленные изменения (публикуются как события)
    pub fn drain_changes(&mut self) -> Vec<TargetChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    fn acquire(&mut self, entity: Entity, acquisition: Acquisition) {
        let previous = self.target_entity();
        self.target = Some(Target {
            entity,
            acquisition,
        });

        // Повторный pick той же цели — не событие
        if previous != Some(entity) {
            self.changes.push(TargetChange::Acquired {
                target: entity,
                previous,
            });
        }
    }
}
