//! Obstacle-free navmesh для headless прогонов

use bevy::prelude::*;

use super::{CollaboratorError, NavMeshQuery, NavQueryResult};
use crate::navigation::PathStatus;

/// Плоское поле без препятствий: маршрут всегда `[from, to]`
///
/// Опционально ограничено квадратом `half_extent` вокруг начала координат
/// (точки за границей — вне navmesh).
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenFieldNavMesh {
    pub half_extent: Option<f32>,
}

impl OpenFieldNavMesh {
    pub fn bounded(half_extent: f32) -> Self {
        Self {
            half_extent: Some(half_extent),
        }
    }

    fn contains(&self, point: Vec3) -> bool {
        match self.half_extent {
            Some(extent) => point.x.abs() <= extent && point.z.abs() <= extent,
            None => true,
        }
    }
}

impl NavMeshQuery for OpenFieldNavMesh {
    fn compute_path(&self, from: Vec3, to: Vec3) -> Result<NavQueryResult, CollaboratorError> {
        if !from.is_finite() || !to.is_finite() {
            return Err(CollaboratorError::NonFiniteInput);
        }

        if !self.contains(from) {
            return Ok(NavQueryResult {
                status: PathStatus::Invalid,
                waypoints: Vec::new(),
            });
        }

        if !self.contains(to) {
            // Доходим до края поля — как navmesh, который не дотянулся до цели
            let extent = self.half_extent.unwrap_or(f32::MAX);
            let edge = Vec3::new(to.x.clamp(-extent, extent), to.y, to.z.clamp(-extent, extent));
            return Ok(NavQueryResult {
                status: PathStatus::Partial,
                waypoints: vec![from, edge],
            });
        }

        Ok(NavQueryResult {
            status: PathStatus::Complete,
            waypoints: vec![from, to],
        })
    }

    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        if !point.is_finite() {
            return None;
        }

        let Some(extent) = self.half_extent else {
            return Some(point);
        };

        let snapped = Vec3::new(
            point.x.clamp(-extent, extent),
            point.y,
            point.z.clamp(-extent, extent),
        );

        (snapped.distance(point) <= max_distance).then_some(snapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_field_is_straight_line() {
        let field = OpenFieldNavMesh::default();
        let result = field
            .compute_path(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0))
            .unwrap();

        assert_eq!(result.status, PathStatus::Complete);
        assert_eq!(result.waypoints, vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0)]);
    }

    #[test]
    fn test_bounded_field_reports_partial_outside() {
        let field = OpenFieldNavMesh::bounded(10.0);
        let result = field
            .compute_path(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0))
            .unwrap();

        assert_eq!(result.status, PathStatus::Partial);
        assert_eq!(result.waypoints[1], Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_sample_respects_max_distance() {
        let field = OpenFieldNavMesh::bounded(10.0);

        assert_eq!(
            field.sample_position(Vec3::new(10.5, 0.0, 0.0), 1.0),
            Some(Vec3::new(10.0, 0.0, 0.0))
        );
        assert_eq!(field.sample_position(Vec3::new(12.0, 0.0, 0.0), 1.0), None);
    }

    #[test]
    fn test_non_finite_input_is_an_error() {
        let field = OpenFieldNavMesh::default();
        let result = field.compute_path(Vec3::splat(f32::NAN), Vec3::ZERO);
        assert_eq!(result, Err(CollaboratorError::NonFiniteInput));
    }
}
