//! Enemy AI module
//!
//! Patrol/Chase/Attack FSM + преследователь поверх NavigationAgent/AnimationSink.
//! Контроллеры чистые (без ECS): host вызывает `update(dt, body, actors)`.
//! EnemyAiPlugin: headless host на SimNavAgent/AnimatorParameters.

use bevy::prelude::*;

pub mod components;
pub mod config;
pub mod controller;
pub mod events;
pub mod motion;
pub mod patrol;
pub mod pursuer;
pub mod spawn;
pub mod state;
pub mod systems;
pub mod target;

#[cfg(test)]
mod config_tests;

// Re-export основных типов
pub use components::{EnemyAi, PursuerAi, SimEnemyController, SimPursuerController};
pub use config::EnemyAiConfig;
pub use controller::{AttackFired, EnemyBehaviorController, TickReport};
pub use events::{AttackLanded, EnemyAttackTriggered, EnemyControllerDisabled, EnemyStateChanged};
pub use patrol::PatrolRoute;
pub use pursuer::PursuerController;
pub use spawn::{animator_for, spawn_actor, spawn_patrolling_enemy, spawn_pursuer};
pub use state::{ControllerStatus, EnemyState, StateTransition};
pub use target::{TargetChange, TargetTracker};

/// Enemy AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. tick_enemy_controllers: FSM тик врагов
/// 2. tick_pursuers: тик преследователей
/// 3. advance_nav_agents: движение агентов → Transform
/// 4. resolve_attack_animations: кадр удара → AttackLanded
pub struct EnemyAiPlugin;

impl Plugin for EnemyAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnemyStateChanged>()
            .add_event::<EnemyAttackTriggered>()
            .add_event::<AttackLanded>()
            .add_event::<EnemyControllerDisabled>()
            .register_type::<EnemyState>()
            .register_type::<EnemyAiConfig>()
            .register_type::<crate::actor::ActorTag>()
            .add_systems(
                FixedUpdate,
                (
                    systems::tick_enemy_controllers,
                    systems::tick_pursuers,
                    systems::advance_nav_agents,
                    systems::resolve_attack_animations,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}
