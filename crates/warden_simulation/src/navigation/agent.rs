//! SimNavAgent: headless агент навигации
//!
//! Упрощённая модель NavMeshAgent:
//! - путь = прямая к цели, зажатой на NavSurface
//! - новый путь "считается" `path_latency_ticks` тиков (path_pending == true),
//!   всё это время агент продолжает идти по старому пути
//! - advance() двигает агента без перелёта через цель

use bevy::prelude::*;

use super::{NavSurface, NavigationAgent};

#[derive(Debug, Clone)]
pub struct SimNavAgent {
    surface: NavSurface,
    position: Vec3,
    on_surface: bool,
    speed: f32,
    stopped: bool,
    stopping_distance: f32,
    velocity: Vec3,
    /// Путь, по которому агент идёт сейчас
    destination: Option<Vec3>,
    /// Новый путь, который ещё считается
    pending: Option<PendingPath>,
    path_latency_ticks: u32,
}

#[derive(Debug, Clone, Copy)]
struct PendingPath {
    destination: Vec3,
    ticks_left: u32,
}

impl SimNavAgent {
    pub const DEFAULT_STOPPING_DISTANCE: f32 = 0.5;

    pub fn new(surface: NavSurface, position: Vec3) -> Self {
        Self {
            surface,
            position,
            on_surface: surface.contains(position),
            speed: 3.5,
            stopped: false,
            stopping_distance: Self::DEFAULT_STOPPING_DISTANCE,
            velocity: Vec3::ZERO,
            destination: None,
            pending: None,
            path_latency_ticks: 1,
        }
    }

    pub fn with_stopping_distance(mut self, stopping_distance: f32) -> Self {
        self.stopping_distance = stopping_distance.max(0.0);
        self
    }

    /// 0: путь применяется сразу в set_destination
    pub fn with_path_latency(mut self, ticks: u32) -> Self {
        self.path_latency_ticks = ticks;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.pending.map(|p| p.destination).or(self.destination)
    }

    pub fn surface(&self) -> &NavSurface {
        &self.surface
    }

    /// Замена поверхности (перестроенный NavMesh); агент может оказаться вне её
    ///
    /// Путь не сбрасывается: вне поверхности advance() просто не двигает агента.
    pub fn set_surface(&mut self, surface: NavSurface) {
        self.surface = surface;
        self.on_surface = surface.contains(self.position);
    }

    /// Один шаг симуляции навигации, возвращает новую позицию
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        if let Some(mut pending) = self.pending.take() {
            pending.ticks_left = pending.ticks_left.saturating_sub(1);
            if pending.ticks_left == 0 {
                self.destination = Some(pending.destination);
            } else {
                self.pending = Some(pending);
            }
        }

        self.velocity = Vec3::ZERO;

        if self.stopped || !self.on_surface || dt <= 0.0 {
            return self.position;
        }

        let Some(destination) = self.destination else {
            return self.position;
        };

        let to_destination = destination - self.position;
        let distance = to_destination.length();
        if distance <= f32::EPSILON {
            return self.position;
        }

        let step = (self.speed * dt).min(distance);
        let direction = to_destination / distance;
        self.position += direction * step;
        self.velocity = direction * (step / dt);

        self.position
    }
}

impl NavigationAgent for SimNavAgent {
    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    fn set_destination(&mut self, destination: Vec3) {
        let destination = self.surface.closest_point(destination);

        if self.path_latency_ticks == 0 {
            self.pending = None;
            self.destination = Some(destination);
        } else {
            self.pending = Some(PendingPath {
                destination,
                ticks_left: self.path_latency_ticks,
            });
        }
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
        if stopped {
            self.velocity = Vec3::ZERO;
        }
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn is_on_navigable_surface(&self) -> bool {
        self.on_surface
    }

    fn remaining_distance(&self) -> f32 {
        self.destination
            .map(|destination| destination.distance(self.position))
            .unwrap_or(0.0)
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    fn path_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn snap_to_nearest(&self, position: Vec3, radius: f32) -> Option<Vec3> {
        let closest = self.surface.closest_point(position);
        (closest.distance(position) <= radius).then_some(closest)
    }

    fn warp(&mut self, position: Vec3) {
        self.position = position;
        self.on_surface = self.surface.contains(position);
        self.velocity = Vec3::ZERO;
        self.destination = None;
        self.pending = None;
    }
}
