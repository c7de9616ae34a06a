//! PatrolRoute: циклический обход внешних waypoints.

use bevy::prelude::*;

/// Упорядоченный список waypoints + текущий индекс
///
/// Инвариант: index < waypoints.len() (или 0 для пустого маршрута)
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct PatrolRoute {
    waypoints: Vec<Vec3>,
    index: usize,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self { waypoints, index: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn current(&self) -> Option<Vec3> {
        self.waypoints.get(self.index).copied()
    }

    /// Следующий waypoint (по кругу)
    pub fn advance(&mut self) -> Option<Vec3> {
        if self.waypoints.is_empty() {
            return None;
        }

        self.index = (self.index + 1) % self.waypoints.len();
        self.current()
    }
}
