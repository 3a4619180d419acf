//! Pursuer — state machine "повернуться → дойти → остановиться"
//!
//! Idle → Rotating → Moving → Arrived → Idle
//!
//! Правила одного тика:
//! - ручной ввод перебивает всё (→ Idle в этом же тике)
//! - цель пропала → Idle
//! - маршрут запрашивается ДО шага движения
//! - невалидный маршрут → Idle (fail-closed)

use std::sync::Arc;

use bevy::prelude::*;
use serde::Deserialize;

use super::steering::{step_towards, turn_towards};
use crate::collaborators::NavMeshQuery;
use crate::components::MovementInput;
use crate::navigation::{NavPath, PathPlanner, PathResult, PlannerConfig};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Ближе этого к цели = дошли (метры)
    pub arrival_distance: f32,
    /// Допустимая ошибка facing'а перед движением (радианы)
    pub facing_threshold: f32,
    /// Waypoint считается пройденным ближе этого (метры)
    pub waypoint_tolerance: f32,
    /// Начинать pursuit сразу при захвате новой цели
    pub engage_on_acquire: bool,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            arrival_distance: 0.5,
            facing_threshold: 0.1,
            waypoint_tolerance: 0.05,
            engage_on_acquire: true,
        }
    }
}

/// Состояние pursuit'а
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PursuitState {
    #[default]
    Idle,
    /// Доворачиваемся к цели на месте
    Rotating { target: Entity },
    /// Идём по маршруту; `destination` = текущий waypoint
    Moving { target: Entity, destination: Vec3 },
    /// Дошли; следующий тик → Idle
    Arrived { target: Entity },
}

impl PursuitState {
    pub fn target(&self) -> Option<Entity> {
        match *self {
            PursuitState::Idle => None,
            PursuitState::Rotating { target }
            | PursuitState::Moving { target, .. }
            | PursuitState::Arrived { target } => Some(target),
        }
    }

    /// Pursuer сам управляет facing'ом (aim не вмешивается)
    pub fn is_steering(&self) -> bool {
        matches!(
            self,
            PursuitState::Rotating { .. } | PursuitState::Moving { .. }
        )
    }
}

/// Почему pursuit прерван
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbandonReason {
    /// Игрок взял управление
    ManualOverride,
    /// Цель сброшена / despawned
    TargetLost,
    /// Navmesh не дал валидного маршрута
    NoRoute,
}

/// Итог одного тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PursuitOutcome {
    Steady,
    Transitioned {
        from: PursuitState,
        to: PursuitState,
    },
    Abandoned {
        from: PursuitState,
        reason: AbandonReason,
    },
}

/// Входные данные тика (всё, что принадлежит движку)
pub struct PursuitInput<'a> {
    /// Время симуляции (секунды)
    pub now: f32,
    pub dt: f32,
    /// Текущая цель и её позиция (None = цели нет или она stale)
    pub target: Option<(Entity, Vec3)>,
    /// Ручной ввод за этот тик
    pub manual_input: Vec3,
    pub move_speed: f32,
    pub rotation_speed: f32,
    /// None → прямолинейное движение к цели
    pub nav: Option<&'a dyn NavMeshQuery>,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Pursuer {
    config: PursuitConfig,
    state: PursuitState,
    planner: PathPlanner,
    /// Последняя цель, за которой уже начинали pursuit
    engaged: Option<Entity>,
    /// Явный PursueRequest ждёт следующего тика
    engage_requested: bool,
    route: Option<Arc<NavPath>>,
    waypoint_index: usize,
}

impl Pursuer {
    pub fn new(config: PursuitConfig, planner: PlannerConfig) -> Self {
        Self {
            config,
            planner: PathPlanner::new(planner),
            ..default()
        }
    }

    pub fn config(&self) -> &PursuitConfig {
        &self.config
    }

    pub fn state(&self) -> PursuitState {
        self.state
    }

    pub fn planner(&self) -> &PathPlanner {
        &self.planner
    }

    /// Маршрут для отрисовки: только пока идём
    pub fn visible_path(&self) -> Option<&Arc<NavPath>> {
        match self.state {
            PursuitState::Moving { .. } => self.planner.current_path(),
            _ => None,
        }
    }

    /// Начать pursuit текущей цели на следующем тике (даже если уже гнались)
    pub fn engage(&mut self) {
        self.engage_requested = true;
    }

    pub fn tick(&mut self, transform: &mut Transform, input: PursuitInput) -> PursuitOutcome {
        let from = self.state;

        // Ручной ввод главнее любого состояния
        if input.manual_input.length_squared() > MovementInput::DEAD_ZONE {
            self.engage_requested = false;
            if from == PursuitState::Idle {
                return PursuitOutcome::Steady;
            }
            self.reset();
            return PursuitOutcome::Abandoned {
                from,
                reason: AbandonReason::ManualOverride,
            };
        }

        let Some((target, target_pos)) = input.target else {
            self.engaged = None;
            self.engage_requested = false;
            if from == PursuitState::Idle {
                return PursuitOutcome::Steady;
            }
            self.reset();
            return PursuitOutcome::Abandoned {
                from,
                reason: AbandonReason::TargetLost,
            };
        };

        // Слот переключили на другую цель посреди pursuit'а → начинаем заново
        if let Some(current) = from.target() {
            if current != target && !matches!(from, PursuitState::Arrived { .. }) {
                self.reset();
                self.engaged = Some(target);
                return self.transition(from, PursuitState::Rotating { target });
            }
        }

        match from {
            PursuitState::Idle => {
                let fresh = self.config.engage_on_acquire && self.engaged != Some(target);
                if !(fresh || self.engage_requested) {
                    return PursuitOutcome::Steady;
                }

                self.engaged = Some(target);
                self.engage_requested = false;
                self.transition(from, PursuitState::Rotating { target })
            }
            PursuitState::Rotating { .. } => {
                let remaining = turn_towards(
                    transform,
                    target_pos - transform.translation,
                    input.rotation_speed,
                    input.dt,
                );

                if remaining <= self.config.facing_threshold {
                    self.transition(
                        from,
                        PursuitState::Moving {
                            target,
                            destination: target_pos,
                        },
                    )
                } else {
                    PursuitOutcome::Steady
                }
            }
            PursuitState::Moving { .. } => self.tick_moving(transform, &input, target, target_pos),
            PursuitState::Arrived { .. } => {
                self.reset();
                self.transition(from, PursuitState::Idle)
            }
        }
    }

    fn tick_moving(
        &mut self,
        transform: &mut Transform,
        input: &PursuitInput,
        target: Entity,
        target_pos: Vec3,
    ) -> PursuitOutcome {
        let from = self.state;
        let position = transform.translation;

        if position.distance(target_pos) <= self.config.arrival_distance {
            return self.arrive(from, target);
        }

        // Маршрут — до движения
        let waypoint = match input.nav {
            Some(nav) => {
                let result = self
                    .planner
                    .request_path(input.now, position, target_pos, target, nav);
                if !result.is_valid() {
                    self.reset();
                    return PursuitOutcome::Abandoned {
                        from,
                        reason: AbandonReason::NoRoute,
                    };
                }
                self.next_waypoint(&result, position, target_pos)
            }
            None => target_pos,
        };

        let next = step_towards(position, waypoint, input.move_speed * input.dt);
        turn_towards(transform, waypoint - position, input.rotation_speed, input.dt);
        transform.translation = next;

        if next.distance(target_pos) <= self.config.arrival_distance {
            return self.arrive(from, target);
        }

        self.state = PursuitState::Moving {
            target,
            destination: waypoint,
        };
        PursuitOutcome::Steady
    }

    /// Текущий waypoint маршрута (пройденные пропускаем)
    fn next_waypoint(&mut self, result: &PathResult, position: Vec3, target_pos: Vec3) -> Vec3 {
        let Some(path) = result.path() else {
            return target_pos;
        };

        let fresh = self
            .route
            .as_ref()
            .is_none_or(|route| !Arc::ptr_eq(route, path));
        if fresh {
            // waypoints[0] = стартовая позиция
            self.route = Some(Arc::clone(path));
            self.waypoint_index = 1;
        }

        let waypoints = path.waypoints();
        while self.waypoint_index < waypoints.len()
            && position.distance(waypoints[self.waypoint_index]) <= self.config.waypoint_tolerance
        {
            self.waypoint_index += 1;
        }

        waypoints
            .get(self.waypoint_index)
            .copied()
            .unwrap_or(target_pos)
    }

    fn arrive(&mut self, from: PursuitState, target: Entity) -> PursuitOutcome {
        self.planner.clear();
        self.route = None;
        self.waypoint_index = 0;
        self.transition(from, PursuitState::Arrived { target })
    }

    fn transition(&mut self, from: PursuitState, to: PursuitState) -> PursuitOutcome {
        self.state = to;
        PursuitOutcome::Transitioned { from, to }
    }

    fn reset(&mut self) {
        self.state = PursuitState::Idle;
        self.planner.clear();
        self.route = None;
        self.waypoint_index = 0;
        self.engage_requested = false;
    }
}
