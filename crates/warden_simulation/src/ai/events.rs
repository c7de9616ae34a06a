//! AI Events: доменные события от enemy контроллеров
//!
//! Контроллеры чистые (TickReport), системы конвертируют отчёт в Bevy Events.
//! Потребители: логирование, демо, интеграционные тесты.

use bevy::prelude::*;

use super::EnemyState;

/// FSM перешла в новое состояние
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyStateChanged {
    pub entity: Entity,
    pub from: EnemyState,
    pub to: EnemyState,
}

/// Контроллер выпустил атаку (cooldown прошёл)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyAttackTriggered {
    pub attacker: Entity,
    pub target: Entity,
    /// 1-based вариант атаки
    pub variant: u32,
    /// false: триггер не ушёл в аниматор (нет sink или параметра)
    pub triggered: bool,
}

/// Анимация атаки дошла до кадра удара
///
/// Урона нет, событие служит точкой подключения для боевой системы.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AttackLanded {
    pub attacker: Entity,
    pub target: Entity,
}

/// Контроллер отключился (фатальная ошибка старта)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyControllerDisabled {
    pub entity: Entity,
    pub reason: String,
}
