//! NavSurface: плоская walkable область для headless навигации.

use bevy::prelude::*;

/// Прямоугольник в плоскости XZ на фиксированной высоте
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct NavSurface {
    pub min: Vec2,
    pub max: Vec2,
    pub height: f32,
}

impl Default for NavSurface {
    fn default() -> Self {
        Self::square(50.0)
    }
}

impl NavSurface {
    /// Углы могут быть переданы в любом порядке
    pub fn new(a: Vec2, b: Vec2, height: f32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            height,
        }
    }

    /// Квадрат с центром в начале координат, высота 0
    pub fn square(half_extent: f32) -> Self {
        let half = half_extent.abs();
        Self::new(Vec2::splat(-half), Vec2::splat(half), 0.0)
    }

    /// Допуск по высоте для проверки "стоит на поверхности"
    const HEIGHT_TOLERANCE: f32 = 0.5;

    pub fn contains(&self, position: Vec3) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.z >= self.min.y
            && position.z <= self.max.y
            && (position.y - self.height).abs() <= Self::HEIGHT_TOLERANCE
    }

    pub fn closest_point(&self, position: Vec3) -> Vec3 {
        let xz = Vec2::new(position.x, position.z).clamp(self.min, self.max);
        Vec3::new(xz.x, self.height, xz.y)
    }
}
