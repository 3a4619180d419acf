//! Tests for PathPlanner throttle and fail-closed policy.

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use bevy::prelude::*;

    use crate::collaborators::{CollaboratorError, NavMeshQuery, NavQueryResult};
    use crate::navigation::{PathPlanner, PathStatus, PlannerConfig};

    /// Navmesh, отвечающий по скрипту; пустой скрипт = прямая линия
    #[derive(Default)]
    struct ScriptedNavMesh {
        calls: AtomicUsize,
        script: Mutex<VecDeque<Result<NavQueryResult, CollaboratorError>>>,
    }

    impl ScriptedNavMesh {
        fn push(&self, response: Result<NavQueryResult, CollaboratorError>) {
            self.script.lock().unwrap().push_back(response);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl NavMeshQuery for ScriptedNavMesh {
        fn compute_path(&self, from: Vec3, to: Vec3) -> Result<NavQueryResult, CollaboratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script.lock().unwrap().pop_front().unwrap_or(Ok(NavQueryResult {
                status: PathStatus::Complete,
                waypoints: vec![from, to],
            }))
        }

        fn sample_position(&self, point: Vec3, _max_distance: f32) -> Option<Vec3> {
            Some(point)
        }
    }

    fn partial() -> Result<NavQueryResult, CollaboratorError> {
        Ok(NavQueryResult {
            status: PathStatus::Partial,
            waypoints: vec![Vec3::ZERO, Vec3::X],
        })
    }

    const TARGET: Entity = Entity::PLACEHOLDER;

    fn other_target() -> Entity {
        Entity::from_raw(7)
    }

    #[test]
    fn test_requests_inside_interval_return_same_path_object() {
        let nav = ScriptedNavMesh::default();
        let mut planner = PathPlanner::new(PlannerConfig::default());

        let first = planner.request_path(1.0, Vec3::ZERO, Vec3::X * 5.0, TARGET, &nav);
        let second = planner.request_path(1.3, Vec3::ZERO, Vec3::X * 6.0, TARGET, &nav);

        assert!(first.recomputed());
        assert!(!second.recomputed());
        assert!(Arc::ptr_eq(first.path().unwrap(), second.path().unwrap()));
        assert_eq!(nav.calls(), 1);
    }

    #[test]
    fn test_recompute_after_interval() {
        let nav = ScriptedNavMesh::default();
        let mut planner = PathPlanner::new(PlannerConfig::default());

        let first = planner.request_path(1.0, Vec3::ZERO, Vec3::X * 5.0, TARGET, &nav);
        let second = planner.request_path(1.5, Vec3::ZERO, Vec3::X * 6.0, TARGET, &nav);

        assert!(second.recomputed());
        assert!(!Arc::ptr_eq(first.path().unwrap(), second.path().unwrap()));
        assert!((second.length() - 6.0).abs() < 1e-5);
        assert_eq!(nav.calls(), 2);
    }

    #[test]
    fn test_target_change_forces_immediate_recompute() {
        let nav = ScriptedNavMesh::default();
        let mut planner = PathPlanner::new(PlannerConfig::default());

        planner.request_path(1.0, Vec3::ZERO, Vec3::X, TARGET, &nav);
        let switched = planner.request_path(1.05, Vec3::ZERO, Vec3::Z, other_target(), &nav);

        assert!(switched.recomputed());
        assert_eq!(switched.waypoints().last(), Some(&Vec3::Z));
        assert_eq!(nav.calls(), 2);
    }

    #[test]
    fn test_partial_result_is_rejected_fail_closed() {
        let nav = ScriptedNavMesh::default();
        let mut planner = PathPlanner::new(PlannerConfig::default());

        planner.request_path(0.0, Vec3::ZERO, Vec3::X * 3.0, TARGET, &nav);
        nav.push(partial());
        let result = planner.request_path(1.0, Vec3::ZERO, Vec3::X * 3.0, TARGET, &nav);

        assert!(!result.is_valid());
        assert!(result.path().is_none());
        assert_eq!(result.length(), f32::INFINITY);
        assert!(planner.current_path().is_none());
    }

    #[test]
    fn test_partial_result_keeps_old_path_when_configured() {
        let nav = ScriptedNavMesh::default();
        let mut planner = PathPlanner::new(PlannerConfig {
            retain_last_path: true,
            ..default()
        });

        let good = planner.request_path(0.0, Vec3::ZERO, Vec3::X * 3.0, TARGET, &nav);
        nav.push(partial());
        let result = planner.request_path(1.0, Vec3::ZERO, Vec3::X * 3.0, TARGET, &nav);

        assert!(!result.is_valid());
        assert!(Arc::ptr_eq(good.path().unwrap(), result.path().unwrap()));
        assert_eq!(result.length(), f32::INFINITY);
    }

    #[test]
    fn test_failed_query_is_retried_on_next_interval_only() {
        let nav = ScriptedNavMesh::default();
        let mut planner = PathPlanner::new(PlannerConfig::default());

        nav.push(Err(CollaboratorError::QueryFailed("navmesh not baked".into())));
        let failed = planner.request_path(0.0, Vec3::ZERO, Vec3::X, TARGET, &nav);
        let throttled = planner.request_path(0.2, Vec3::ZERO, Vec3::X, TARGET, &nav);
        let retried = planner.request_path(0.6, Vec3::ZERO, Vec3::X, TARGET, &nav);

        assert!(!failed.is_valid());
        assert!(!throttled.is_valid());
        assert!(!throttled.recomputed());
        assert!(retried.is_valid());
        assert_eq!(nav.calls(), 2);
    }

    #[test]
    fn test_degenerate_complete_path_is_invalid() {
        let nav = ScriptedNavMesh::default();
        nav.push(Ok(NavQueryResult {
            status: PathStatus::Complete,
            waypoints: vec![Vec3::ZERO],
        }));

        let mut planner = PathPlanner::new(PlannerConfig::default());
        let result = planner.request_path(0.0, Vec3::ZERO, Vec3::ZERO, TARGET, &nav);

        assert!(!result.is_valid());
        assert!(!planner.is_valid());
    }

    #[test]
    fn test_clear_resets_throttle() {
        let nav = ScriptedNavMesh::default();
        let mut planner = PathPlanner::new(PlannerConfig::default());

        planner.request_path(0.0, Vec3::ZERO, Vec3::X, TARGET, &nav);
        planner.clear();
        let result = planner.request_path(0.1, Vec3::ZERO, Vec3::X, TARGET, &nav);

        assert!(result.recomputed());
        assert_eq!(nav.calls(), 2);
    }
}
