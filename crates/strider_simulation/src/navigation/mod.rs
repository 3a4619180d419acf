//! Navigation domain — маршруты и throttled path planner
//!
//! Содержит:
//! - NavPath / PathStatus (неизменяемый маршрут от navmesh)
//! - PathPlanner (кэш + throttle пересчёта + fail-closed политика)
//! - ActivePath (текущий маршрут для отрисовки движком)

pub mod path;
pub mod planner;

#[cfg(test)]
mod planner_tests;

pub use path::{path_length, NavPath, PathStatus};
pub use planner::{ActivePath, PathPlanner, PathResult, PlannerConfig};
