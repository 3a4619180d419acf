//! NavPath — неизменяемый маршрут от navmesh

use bevy::prelude::*;

/// Статус ответа navmesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PathStatus {
    /// Маршрут доходит до цели
    Complete,
    /// Маршрут обрывается раньше цели (может срезать через стену — не используем)
    Partial,
    #[default]
    Invalid,
}

/// Маршрут: упорядоченные waypoints + статус + закэшированная длина
///
/// Никогда не мутируется — planner заменяет его целиком (`Arc` swap),
/// поэтому читатели не видят полуобновлённый список точек.
#[derive(Debug, Clone, PartialEq)]
pub struct NavPath {
    waypoints: Vec<Vec3>,
    status: PathStatus,
    length: f32,
}

impl NavPath {
    pub fn new(status: PathStatus, waypoints: Vec<Vec3>) -> Self {
        let length = path_length(&waypoints);
        Self {
            waypoints,
            status,
            length,
        }
    }

    pub fn invalid() -> Self {
        Self::new(PathStatus::Invalid, Vec::new())
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn status(&self) -> PathStatus {
        self.status
    }

    /// Инвариант: валиден только Complete маршрут с ≥ 2 точками
    pub fn is_valid(&self) -> bool {
        self.status == PathStatus::Complete && self.waypoints.len() >= 2
    }

    /// Сумма длин сегментов (∞ для вырожденного маршрута)
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.waypoints.last().copied()
    }
}

/// Длина ломаной: сумма n−1 евклидовых сегментов
///
/// Меньше двух точек → `f32::INFINITY`, чтобы сравнения дистанций
/// естественно отодвигали такой маршрут в конец.
pub fn path_length(waypoints: &[Vec3]) -> f32 {
    if waypoints.len() < 2 {
        return f32::INFINITY;
    }

    waypoints
        .windows(2)
        .map(|segment| segment[0].distance(segment[1]))
        .sum()
}
