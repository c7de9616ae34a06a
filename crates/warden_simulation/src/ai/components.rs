//! ECS components: контроллеры с headless коллабораторами.

use bevy::prelude::*;

use super::{EnemyBehaviorController, PursuerController};
use crate::animation::AnimatorParameters;
use crate::navigation::SimNavAgent;

pub type SimEnemyController = EnemyBehaviorController<SimNavAgent, AnimatorParameters>;
pub type SimPursuerController = PursuerController<SimNavAgent, AnimatorParameters>;

/// Patrol/Chase/Attack враг
///
/// Transform сущности: тело врага; агент пишет в него позицию
/// (advance_nav_agents), контроллер: поворот.
#[derive(Component, Debug)]
pub struct EnemyAi(pub SimEnemyController);

/// Безостановочный преследователь
#[derive(Component, Debug)]
pub struct PursuerAi(pub SimPursuerController);
