//! Navigation: контракт агента навигации + headless реализация
//!
//! Архитектура:
//! - AI контроллер знает только trait NavigationAgent (high-level intent)
//! - Хост-движок (или SimNavAgent в headless режиме) считает путь и velocity

use bevy::prelude::*;

pub mod agent;
pub mod surface;

#[cfg(test)]
mod agent_tests;

pub use agent::SimNavAgent;
pub use surface::NavSurface;

/// Агент навигации на стороне хоста (NavMeshAgent, NavigationAgent3D, ...)
pub trait NavigationAgent {
    /// Максимальная скорость движения по пути (м/с)
    fn set_speed(&mut self, speed: f32);

    /// Новая цель пути (путь может считаться асинхронно: см. `path_pending`)
    fn set_destination(&mut self, destination: Vec3);

    /// true: агент стоит на месте, путь сохраняется
    fn set_stopped(&mut self, stopped: bool);

    /// Текущая фактическая скорость агента
    fn velocity(&self) -> Vec3;

    /// Стоит ли агент на навигационной поверхности
    fn is_on_navigable_surface(&self) -> bool;

    /// Оставшаяся дистанция до конца текущего пути
    fn remaining_distance(&self) -> f32;

    /// Допуск остановки: цель считается достигнутой в пределах этой дистанции
    fn stopping_distance(&self) -> f32;

    /// Путь ещё считается
    fn path_pending(&self) -> bool;

    /// Ближайшая точка поверхности в радиусе `radius` от `position`
    fn snap_to_nearest(&self, position: Vec3, radius: f32) -> Option<Vec3>;

    /// Телепорт агента (сбрасывает путь)
    fn warp(&mut self, position: Vec3);
}
