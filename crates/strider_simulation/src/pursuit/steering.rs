//! Steering helpers: поворот к точке, шаг к точке
//!
//! Forward = -Z (bevy convention), up = +Y.

use bevy::prelude::*;

/// Rotation, у которой forward смотрит вдоль `direction`
///
/// None для нулевого/не-finite направления (смотреть некуда).
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let direction = Dir3::new(direction).ok()?;
    Some(Transform::IDENTITY.looking_to(direction, Dir3::Y).rotation)
}

/// Угол (радианы) между текущим facing и направлением на `point`
pub fn facing_error(transform: &Transform, point: Vec3) -> f32 {
    look_rotation(point - transform.translation)
        .map(|desired| transform.rotation.angle_between(desired))
        .unwrap_or(0.0)
}

/// Ограниченная интерполяция поворота к `direction`
///
/// t = rotation_speed * dt (clamp 0..1). Возвращает оставшийся угол
/// после поворота (радианы).
pub fn turn_towards(transform: &mut Transform, direction: Vec3, rotation_speed: f32, dt: f32) -> f32 {
    let Some(desired) = look_rotation(direction) else {
        return 0.0;
    };

    let t = (rotation_speed * dt).clamp(0.0, 1.0);
    transform.rotation = transform.rotation.slerp(desired, t).normalize();
    transform.rotation.angle_between(desired)
}

/// Шаг из `from` к `to` не длиннее `max_step` (без перелёта)
pub fn step_towards(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let delta = to - from;
    let distance = delta.length();

    if distance <= max_step || distance <= f32::EPSILON {
        to
    } else {
        from + delta / distance * max_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_look_rotation_points_forward_along_direction() {
        let rotation = look_rotation(Vec3::X).unwrap();
        let forward = rotation * Vec3::NEG_Z;
        assert!(forward.distance(Vec3::X) < 1e-5);
    }

    #[test]
    fn test_zero_direction_has_no_rotation() {
        assert!(look_rotation(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_facing_error_right_angle() {
        // Identity смотрит в -Z, цель по +X → 90°
        let transform = Transform::default();
        let error = facing_error(&transform, Vec3::new(5.0, 0.0, 0.0));
        assert!((error - FRAC_PI_2).abs() < 1e-4, "error = {}", error);
    }

    #[test]
    fn test_turn_towards_is_bounded() {
        let mut transform = Transform::default();

        // t = 10 * (1/60) ≈ 0.167 → поворот на 1/6 угла
        let remaining = turn_towards(&mut transform, Vec3::X, 10.0, 1.0 / 60.0);
        assert!(remaining > 1.2 && remaining < FRAC_PI_2);

        // t clamp'ится в 1.0 → сразу довернули
        let remaining = turn_towards(&mut transform, Vec3::X, 10.0, 1.0);
        assert!(remaining < 1e-3);
    }

    #[test]
    fn test_step_towards_does_not_overshoot() {
        assert_eq!(step_towards(Vec3::ZERO, Vec3::X, 5.0), Vec3::X);

        let step = step_towards(Vec3::ZERO, Vec3::X * 10.0, 2.5);
        assert!(step.distance(Vec3::X * 2.5) < 1e-5);
    }
}
