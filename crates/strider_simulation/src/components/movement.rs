//! Movement компоненты: ручной ввод и скорости

use bevy::prelude::*;

/// Ручной ввод направления за этот тик (WASD / stick)
///
/// Хост пишет каждый тик. Ненулевой ввод всегда перебивает pursuit.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    /// Направление в мировых координатах (XZ плоскость), не обязательно normalized
    pub direction: Vec3,
}

impl MovementInput {
    pub fn new(direction: Vec3) -> Self {
        Self { direction }
    }

    /// Ниже этого порога ввод считается нулевым (мёртвая зона стика)
    pub const DEAD_ZONE: f32 = 1e-4;

    pub fn is_active(&self) -> bool {
        self.direction.length_squared() > Self::DEAD_ZONE
    }
}

/// Скорости актора
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MovementStats {
    /// Метры в секунду
    pub move_speed: f32,
    /// Множитель интерполяции поворота: t = rotation_speed * dt (clamp 1.0)
    pub rotation_speed: f32,
    /// Радиус snap'а ручного движения на navmesh
    pub navmesh_sample_distance: f32,
}

impl Default for MovementStats {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotation_speed: 10.0,
            navmesh_sample_distance: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_input_is_inactive() {
        assert!(!MovementInput::default().is_active());
        assert!(MovementInput::new(Vec3::X).is_active());
    }
}
