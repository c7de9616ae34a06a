//! Spawn helpers для headless врагов.
//!
//! Seed каждого контроллера берётся из DeterministicRng: порядок спавна
//! определяет последовательность атак.

use bevy::prelude::*;

use super::components::{EnemyAi, PursuerAi};
use super::{EnemyAiConfig, EnemyBehaviorController, PursuerController};
use crate::actor::ActorTag;
use crate::animation::AnimatorParameters;
use crate::navigation::{NavSurface, SimNavAgent};
use crate::DeterministicRng;

fn next_controller_seed(world: &mut World) -> u64 {
    world
        .get_resource_mut::<DeterministicRng>()
        .map(|mut rng| rng.next_seed())
        .unwrap_or_default()
}

/// Аниматор с параметрами, которые ждёт контроллер (Speed + Attack1..N)
pub fn animator_for(config: &EnemyAiConfig) -> AnimatorParameters {
    AnimatorParameters::locomotion_with_attacks(
        &config.speed_parameter,
        &config.attack_trigger_prefix,
        config.attack_variants,
    )
}

/// Спавн патрульного врага (Transform = позиция спавна, снап на NavSurface при старте)
pub fn spawn_patrolling_enemy(
    world: &mut World,
    config: EnemyAiConfig,
    surface: NavSurface,
    position: Vec3,
    waypoints: Vec<Vec3>,
) -> Entity {
    let seed = next_controller_seed(world);
    let animator = animator_for(&config);
    let agent = SimNavAgent::new(surface, position);
    let controller =
        EnemyBehaviorController::new(config, Some(agent), Some(animator), waypoints).with_seed(seed);

    let entity = world
        .spawn((EnemyAi(controller), Transform::from_translation(position)))
        .id();

    crate::log(&format!("✅ Spawned enemy {:?} at {:?} (seed {})", entity, position, seed));
    entity
}

/// Спавн преследователя
pub fn spawn_pursuer(
    world: &mut World,
    config: EnemyAiConfig,
    surface: NavSurface,
    position: Vec3,
) -> Entity {
    let animator = AnimatorParameters::new().with_float(&config.speed_parameter, 0.0);
    let agent = SimNavAgent::new(surface, position);
    let controller = PursuerController::new(config, Some(agent), Some(animator));

    let entity = world
        .spawn((PursuerAi(controller), Transform::from_translation(position)))
        .id();

    crate::log(&format!("✅ Spawned pursuer {:?} at {:?}", entity, position));
    entity
}

/// Спавн тегированного актора-цели
pub fn spawn_actor(world: &mut World, tag: &str, position: Vec3) -> Entity {
    world
        .spawn((ActorTag::new(tag), Transform::from_translation(position)))
        .id()
}
