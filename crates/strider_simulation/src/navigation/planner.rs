//! PathPlanner — обёртка над navmesh query с throttle пересчёта
//!
//! Политика:
//! - Кэш переиспользуется, пока с прошлого пересчёта прошло < `recompute_interval`
//! - Смена target identity сбрасывает throttle (немедленный пересчёт)
//! - Принимаем только Complete; Partial/Invalid → validity false (fail-closed),
//!   старый маршрут остаётся только при `retain_last_path`
//! - Ошибки коллаборатора = Invalid (лог, без паники)

use std::sync::Arc;

use bevy::prelude::*;
use serde::Deserialize;

use super::path::NavPath;
use crate::collaborators::NavMeshQuery;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Минимальное время между пересчётами (секунды)
    pub recompute_interval: f32,
    /// Держать последний валидный маршрут, когда новый не получился
    ///
    /// Видно только читателям `current_path()` (хост, который сам ведёт
    /// planner). Pursuer любой невалидный ответ трактует как NoRoute и
    /// очищает planner, retained маршрут он не использует.
    pub retain_last_path: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            recompute_interval: 0.5,
            retain_last_path: false,
        }
    }
}

/// Ответ planner'а на запрос маршрута
#[derive(Debug, Clone, Default)]
pub struct PathResult {
    path: Option<Arc<NavPath>>,
    valid: bool,
    recomputed: bool,
}

impl PathResult {
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Был ли в этом запросе реальный navmesh query (false = отдали кэш)
    pub fn recomputed(&self) -> bool {
        self.recomputed
    }

    pub fn path(&self) -> Option<&Arc<NavPath>> {
        self.path.as_ref()
    }

    /// Длина маршрута; ∞ для невалидного результата
    pub fn length(&self) -> f32 {
        match (&self.path, self.valid) {
            (Some(path), true) => path.length(),
            _ => f32::INFINITY,
        }
    }

    pub fn waypoints(&self) -> &[Vec3] {
        self.path.as_deref().map(NavPath::waypoints).unwrap_or(&[])
    }
}

/// Планировщик маршрута одного актора
///
/// Единственный владелец текущего NavPath. Остальные видят его через
/// `Arc` клоны и никогда не мутируют.
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    config: PlannerConfig,
    current: Option<Arc<NavPath>>,
    valid: bool,
    last_target: Option<Entity>,
    last_recompute: Option<f32>,
}

impl PathPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn current_path(&self) -> Option<&Arc<NavPath>> {
        self.current.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn last_recompute(&self) -> Option<f32> {
        self.last_recompute
    }

    /// Запрос маршрута `from → to` для цели `target` в момент `now`
    pub fn request_path(
        &mut self,
        now: f32,
        from: Vec3,
        to: Vec3,
        target: Entity,
        nav: &dyn NavMeshQuery,
    ) -> PathResult {
        if self.last_target != Some(target) {
            // Новая цель: старый маршрут ведёт не туда, throttle не действует
            self.last_target = Some(target);
            self.last_recompute = None;
            self.current = None;
            self.valid = false;
        }

        if let Some(last) = self.last_recompute {
            if now - last < self.config.recompute_interval {
                return self.snapshot(false);
            }
        }

        // Штампуем время даже при неудаче: повтор — на следующем интервале
        self.last_recompute = Some(now);

        let candidate = match nav.compute_path(from, to) {
            Ok(result) => NavPath::new(result.status, result.waypoints),
            Err(err) => {
                crate::log_warning(&format!(
                    "PathPlanner: navmesh query failed for {:?}: {}",
                    target, err
                ));
                NavPath::invalid()
            }
        };

        if candidate.is_valid() {
            crate::log(&format!(
                "PathPlanner: route to {:?} — length {:.2}m, {} corners",
                target,
                candidate.length(),
                candidate.waypoints().len()
            ));
            self.current = Some(Arc::new(candidate));
            self.valid = true;
        } else {
            crate::log_warning(&format!(
                "PathPlanner: no usable route to {:?} (status {:?}, {} corners)",
                target,
                candidate.status(),
                candidate.waypoints().len()
            ));
            self.valid = false;
            if !self.config.retain_last_path {
                self.current = None;
            }
        }

        self.snapshot(true)
    }

    /// Сбросить маршрут и throttle (arrival, отмена pursuit)
    pub fn clear(&mut self) {
        self.current = None;
        self.valid = false;
        self.last_target = None;
        self.last_recompute = None;
    }

    fn snapshot(&self, recomputed: bool) -> PathResult {
        PathResult {
            path: self.current.clone(),
            valid: self.valid,
            recomputed,
        }
    }
}

/// Component: текущий маршрут актора для отрисовки (path line в движке)
///
/// Pursuit система пишет сюда `Arc` из planner'а; None = рисовать нечего.
#[derive(Component, Debug, Clone, Default)]
pub struct ActivePath {
    pub path: Option<Arc<NavPath>>,
}

impl ActivePath {
    /// Показывает ли компонент уже этот же маршрут (по указателю)
    ///
    /// Системы проверяют это до записи — иначе Changed<ActivePath> спамит.
    pub fn shows(&self, path: Option<&Arc<NavPath>>) -> bool {
        match (self.path.as_ref(), path) {
            (Some(old), Some(new)) => Arc::ptr_eq(old, new),
            (None, None) => true,
            _ => false,
        }
    }
}
