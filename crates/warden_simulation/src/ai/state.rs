//! EnemyState FSM + статус контроллера.

use bevy::prelude::*;

use crate::error::AiError;

/// FSM состояния enemy AI
///
/// Разрешённые переходы:
/// Patrolling ⇄ Chasing ⇄ Attacking (Patrolling → Attacking напрямую нельзя)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum EnemyState {
    /// Обход waypoints (walk_speed)
    #[default]
    Patrolling,
    /// Погоня за целью (run_speed)
    Chasing,
    /// Стоим, поворачиваемся к цели, атакуем по cooldown
    Attacking,
}

impl EnemyState {
    pub fn can_transition_to(self, next: EnemyState) -> bool {
        use EnemyState::*;
        matches!(
            (self, next),
            (Patrolling, Chasing) | (Chasing, Patrolling) | (Chasing, Attacking) | (Attacking, Chasing)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnemyState::Patrolling => "Patrolling",
            EnemyState::Chasing => "Chasing",
            EnemyState::Attacking => "Attacking",
        }
    }
}

/// Переход FSM за тик
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: EnemyState,
    pub to: EnemyState,
}

/// Жизненный цикл контроллера
///
/// Pending → Active (старт прошёл) или Disabled (фатальная ошибка, навсегда)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ControllerStatus {
    #[default]
    Pending,
    Active,
    Disabled(AiError),
}

impl ControllerStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ControllerStatus::Active)
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, ControllerStatus::Disabled(_))
    }
}
