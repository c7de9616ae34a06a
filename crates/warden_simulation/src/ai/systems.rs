//! AI systems (FixedUpdate, chained)
//!
//! 1. tick_enemy_controllers: FSM тик, TickReport → events
//! 2. tick_pursuers: тик преследователей
//! 3. advance_nav_agents: SimNavAgent шаг → Transform.translation
//! 4. resolve_attack_animations: латченные Attack триггеры → AttackLanded

use bevy::prelude::*;

use super::components::{EnemyAi, PursuerAi};
use super::events::{AttackLanded, EnemyAttackTriggered, EnemyControllerDisabled, EnemyStateChanged};
use super::TargetChange;
use crate::actor::{ActorRegistry, ActorTag};

fn log_target_change(kind: &str, entity: Entity, change: TargetChange) {
    match change {
        TargetChange::Acquired(target) => {
            crate::log(&format!("👁️ {} {:?}: target acquired {:?}", kind, entity, target));
        }
        TargetChange::Lost(target) => {
            crate::log_warning(&format!(
                "👻 {} {:?}: target {:?} lost, agent stopped (re-search every tick)",
                kind, entity, target
            ));
        }
    }
}

/// Система: тик Patrol/Chase/Attack контроллеров
///
/// Цели: тегированные акторы без EnemyAi (враг не целится во врага).
pub fn tick_enemy_controllers(
    mut enemies: Query<(Entity, &mut EnemyAi, &mut Transform)>,
    actors: Query<(Entity, &ActorTag, &Transform), Without<EnemyAi>>,
    time: Res<Time<Fixed>>,
    mut state_events: EventWriter<EnemyStateChanged>,
    mut attack_events: EventWriter<EnemyAttackTriggered>,
    mut disabled_events: EventWriter<EnemyControllerDisabled>,
) {
    let delta = time.delta_secs();
    let registry = ActorRegistry::collect(actors.iter());

    for (entity, mut ai, mut transform) in enemies.iter_mut() {
        let report = ai.0.update(delta, &mut transform, &registry);

        if let Some(err) = report.disabled {
            disabled_events.write(EnemyControllerDisabled {
                entity,
                reason: err.to_string(),
            });
            continue;
        }

        if let Some(change) = report.target {
            log_target_change("Enemy", entity, change);
        }

        if let Some(transition) = report.transition {
            crate::log(&format!(
                "🔄 Enemy {:?}: {} → {}",
                entity,
                transition.from.as_str(),
                transition.to.as_str()
            ));
            state_events.write(EnemyStateChanged {
                entity,
                from: transition.from,
                to: transition.to,
            });
        }

        if let Some(attack) = report.attack {
            crate::log(&format!(
                "⚔️ Enemy {:?}: {} on {:?} (animated: {})",
                entity, attack.trigger, attack.target, attack.triggered
            ));
            attack_events.write(EnemyAttackTriggered {
                attacker: entity,
                target: attack.target,
                variant: attack.variant,
                triggered: attack.triggered,
            });
        }
    }
}

/// Система: тик преследователей
pub fn tick_pursuers(
    mut pursuers: Query<(Entity, &mut PursuerAi, &mut Transform)>,
    actors: Query<(Entity, &ActorTag, &Transform), (Without<PursuerAi>, Without<EnemyAi>)>,
    time: Res<Time<Fixed>>,
    mut disabled_events: EventWriter<EnemyControllerDisabled>,
) {
    let delta = time.delta_secs();
    let registry = ActorRegistry::collect(actors.iter());

    for (entity, mut ai, mut transform) in pursuers.iter_mut() {
        match ai.0.update(delta, &mut transform, &registry) {
            Ok(Some(change)) => log_target_change("Pursuer", entity, change),
            Ok(None) => {}
            Err(err) => {
                disabled_events.write(EnemyControllerDisabled {
                    entity,
                    reason: err.to_string(),
                });
            }
        }
    }
}

/// Система: шаг навигационных агентов → позиция тела
///
/// Отключённые контроллеры не двигаются.
pub fn advance_nav_agents(
    mut enemies: Query<(&mut EnemyAi, &mut Transform)>,
    mut pursuers: Query<(&mut PursuerAi, &mut Transform), Without<EnemyAi>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut ai, mut transform) in enemies.iter_mut() {
        if !ai.0.status().is_active() {
            continue;
        }
        if let Some(agent) = ai.0.agent_mut() {
            transform.translation = agent.advance(delta);
        }
    }

    for (mut ai, mut transform) in pursuers.iter_mut() {
        if !ai.0.status().is_active() {
            continue;
        }
        if let Some(agent) = ai.0.agent_mut() {
            transform.translation = agent.advance(delta);
        }
    }
}

/// Система: кадр удара атакующей анимации
///
/// Headless аниматор не проигрывает клипы: латченный Attack триггер
/// считается доигранным до кадра удара в том же тике.
pub fn resolve_attack_animations(
    mut enemies: Query<(Entity, &mut EnemyAi)>,
    mut landed_events: EventWriter<AttackLanded>,
) {
    for (entity, mut ai) in enemies.iter_mut() {
        let target = ai.0.target();
        let prefix = ai.0.config().attack_trigger_prefix.clone();

        let Some(animator) = ai.0.animator_mut() else {
            continue;
        };

        for trigger in animator.latched_triggers() {
            if !trigger.starts_with(&prefix) || !animator.consume_trigger(&trigger) {
                continue;
            }

            let Some(target) = target else {
                continue;
            };

            crate::log(&format!("🔥 Enemy {:?}: {} hit {:?}", entity, trigger, target));
            landed_events.write(AttackLanded {
                attacker: entity,
                target,
            });
        }
    }
}
