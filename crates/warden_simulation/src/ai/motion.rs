//! Общие helpers движения/анимации для AI контроллеров.

use bevy::prelude::*;

use crate::animation::AnimationSink;

/// Модуль горизонтальной скорости (Y игнорируется)
pub fn horizontal_speed(velocity: Vec3) -> f32 {
    Vec2::new(velocity.x, velocity.z).length()
}

/// Экспоненциальное сглаживание: lerp(current, target, clamp01(dt × rate))
pub fn smooth_towards(current: f32, target: f32, dt: f32, rate: f32) -> f32 {
    let t = (dt * rate).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// Плавно подтягивает float параметр аниматора к `target_speed`
pub fn blend_speed_parameter(
    animator: &mut impl AnimationSink,
    parameter: &str,
    target_speed: f32,
    dt: f32,
    rate: f32,
) -> f32 {
    let smoothed = smooth_towards(animator.get_float(parameter), target_speed, dt, rate);
    animator.set_float(parameter, smoothed);
    smoothed
}

/// Поворот "лицом" к точке (только yaw, без наклона)
pub fn look_rotation(from: Vec3, to: Vec3) -> Option<Quat> {
    let direction = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if direction.length_squared() <= f32::EPSILON {
        return None;
    }

    Some(Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation)
}

/// Плавный поворот body к цели: slerp(rotation, look, clamp01(dt × rate))
pub fn face_towards(body: &mut Transform, target: Vec3, dt: f32, rate: f32) {
    let Some(look) = look_rotation(body.translation, target) else {
        return;
    };

    let t = (dt * rate).clamp(0.0, 1.0);
    body.rotation = body.rotation.slerp(look, t);
}
