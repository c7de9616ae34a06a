//! EnemyBehaviorController: Patrol/Chase/Attack FSM поверх NavigationAgent
//!
//! Порядок внутри тика (важен для визуала):
//! 1. Speed параметр аниматора ← горизонтальная скорость агента
//! 2. Проверка/перезахват цели
//! 3. FSM handler текущего состояния → команды агенту/аниматору
//!
//! Коллабораторы инжектятся при создании (оба Option):
//! - нет агента → контроллер отключается на старте (фатально для инстанса)
//! - нет аниматора → анимация no-op, логика движения работает

use std::fmt;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::motion::{blend_speed_parameter, face_towards, horizontal_speed};
use super::{
    ControllerStatus, EnemyAiConfig, EnemyState, PatrolRoute, StateTransition, TargetChange,
    TargetTracker,
};
use crate::actor::ActorLookup;
use crate::animation::AnimationSink;
use crate::error::AiError;
use crate::logger;
use crate::navigation::NavigationAgent;

/// Атака, выпущенная за тик
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackFired {
    pub target: Entity,
    /// 1-based номер варианта
    pub variant: u32,
    pub trigger: String,
    /// false: аниматора нет или параметр не объявлен
    pub triggered: bool,
}

/// Что произошло за тик (для ECS событий и логов)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub transition: Option<StateTransition>,
    pub attack: Option<AttackFired>,
    pub target: Option<TargetChange>,
    /// Контроллер отключился в этом тике
    pub disabled: Option<AiError>,
}

pub struct EnemyBehaviorController<N, A> {
    config: EnemyAiConfig,
    agent: Option<N>,
    animator: Option<A>,
    patrol: PatrolRoute,
    target: TargetTracker,
    state: EnemyState,
    status: ControllerStatus,
    /// Локальное время контроллера (сумма dt, только активные тики)
    clock: f64,
    /// Обратный отсчёт до следующей атаки; атака разрешена при <= 0
    cooldown_remaining: f32,
    /// Агент остановлен из-за отсутствия цели
    halted: bool,
    rng: ChaCha8Rng,
}

impl<N, A> fmt::Debug for EnemyBehaviorController<N, A> {
    // Только логическое состояние: агент/аниматор у хоста свои
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnemyBehaviorController")
            .field("state", &self.state)
            .field("status", &self.status)
            .field("patrol_index", &self.patrol.index())
            .field("target", &self.target.current())
            .field("clock", &self.clock)
            .field("cooldown_remaining", &self.cooldown_remaining)
            .field("halted", &self.halted)
            .finish()
    }
}

impl<N: NavigationAgent, A: AnimationSink> EnemyBehaviorController<N, A> {
    pub fn new(
        config: EnemyAiConfig,
        agent: Option<N>,
        animator: Option<A>,
        waypoints: Vec<Vec3>,
    ) -> Self {
        // Первая атака: не раньше, чем через attack_cooldown после старта
        let cooldown_remaining = config.attack_cooldown;

        Self {
            config,
            agent,
            animator,
            patrol: PatrolRoute::new(waypoints),
            target: TargetTracker::default(),
            state: EnemyState::Patrolling,
            status: ControllerStatus::Pending,
            clock: 0.0,
            cooldown_remaining,
            halted: false,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(mut self, rng: ChaCha8Rng) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &EnemyAiConfig {
        &self.config
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn status(&self) -> &ControllerStatus {
        &self.status
    }

    pub fn patrol(&self) -> &PatrolRoute {
        &self.patrol
    }

    pub fn patrol_index(&self) -> usize {
        self.patrol.index()
    }

    pub fn target(&self) -> Option<Entity> {
        self.target.current()
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    pub fn agent(&self) -> Option<&N> {
        self.agent.as_ref()
    }

    pub fn agent_mut(&mut self) -> Option<&mut N> {
        self.agent.as_mut()
    }

    pub fn animator(&self) -> Option<&A> {
        self.animator.as_ref()
    }

    pub fn animator_mut(&mut self) -> Option<&mut A> {
        self.animator.as_mut()
    }

    /// Явный старт (иначе выполняется лениво в первом update)
    ///
    /// Повторный вызов после успешного старта: no-op.
    pub fn start(&mut self, body: &mut Transform, actors: &impl ActorLookup) -> Result<(), AiError> {
        match &self.status {
            ControllerStatus::Active => Ok(()),
            ControllerStatus::Disabled(err) => Err(err.clone()),
            ControllerStatus::Pending => self.begin(body, actors).map(|_| ()),
        }
    }

    fn begin(
        &mut self,
        body: &mut Transform,
        actors: &impl ActorLookup,
    ) -> Result<Option<TargetChange>, AiError> {
        match self.initialize(body, actors) {
            Ok(change) => {
                self.status = ControllerStatus::Active;
                Ok(change)
            }
            Err(err) => {
                logger::log_error(&format!("EnemyAI: disabled on start: {}", err));
                self.status = ControllerStatus::Disabled(err.clone());
                Err(err)
            }
        }
    }

    fn initialize(
        &mut self,
        body: &mut Transform,
        actors: &impl ActorLookup,
    ) -> Result<Option<TargetChange>, AiError> {
        let Some(agent) = self.agent.as_mut() else {
            return Err(AiError::MissingComponent {
                component: "NavigationAgent",
            });
        };

        if !agent.is_on_navigable_surface() {
            let position = body.translation;
            let radius = self.config.navmesh_snap_radius;
            let snapped = agent
                .snap_to_nearest(position, radius)
                .ok_or(AiError::OffNavigationMesh { position, radius })?;

            agent.warp(snapped);
            body.translation = snapped;
            logger::log(&format!(
                "EnemyAI: snapped {:?} → {:?} onto navigation surface",
                position, snapped
            ));
        }

        if let Some(first) = self.patrol.current() {
            agent.set_speed(self.config.walk_speed);
            agent.set_destination(first);
            self.state = EnemyState::Patrolling;
        }

        if self.animator.is_none() {
            logger::log_warning("EnemyAI: no animation sink, animation updates disabled");
        }

        let change = self.target.acquire(actors, &self.config.target_tag);
        if change.is_none() {
            let missing = AiError::TargetUnavailable {
                tag: self.config.target_tag.clone(),
            };
            logger::log_warning(&format!("EnemyAI: {} (will retry every tick)", missing));
        }

        Ok(change)
    }

    /// Один тик симуляции
    pub fn update(&mut self, dt: f32, body: &mut Transform, actors: &impl ActorLookup) -> TickReport {
        let mut report = TickReport::default();

        match self.status {
            ControllerStatus::Disabled(_) => return report,
            ControllerStatus::Active => {}
            ControllerStatus::Pending => match self.begin(body, actors) {
                Ok(change) => report.target = change,
                Err(err) => {
                    report.disabled = Some(err);
                    return report;
                }
            },
        }

        match self.agent.as_ref() {
            Some(agent) if agent.is_on_navigable_surface() => {}
            _ => return report,
        }

        self.clock += f64::from(dt);
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }

        self.update_speed_animation(dt);

        let (target, change) = self.target.refresh(actors, &self.config.target_tag);
        if change.is_some() {
            report.target = change;
        }

        let Some((target, target_position)) = target else {
            self.hold_without_target();
            return report;
        };

        if self.halted {
            self.halted = false;
            if self.state != EnemyState::Attacking {
                if let Some(agent) = self.agent.as_mut() {
                    agent.set_stopped(false);
                }
            }
        }

        let distance = body.translation.distance(target_position);

        report.transition = match self.state {
            EnemyState::Patrolling => self.handle_patrol(distance, target_position),
            EnemyState::Chasing => self.handle_chase(distance, target_position),
            EnemyState::Attacking => {
                let (transition, attack) = self.handle_attack(distance, target, target_position, dt, body);
                report.attack = attack;
                transition
            }
        };

        report
    }

    fn update_speed_animation(&mut self, dt: f32) {
        let (Some(agent), Some(animator)) = (self.agent.as_ref(), self.animator.as_mut()) else {
            return;
        };

        let mut speed = horizontal_speed(agent.velocity());

        // Путь ещё считается, а агент стоит: не даём анимации "замереть"
        if speed < self.config.idle_speed_threshold && agent.path_pending() {
            speed = self.config.pending_path_speed;
        }

        blend_speed_parameter(
            animator,
            &self.config.speed_parameter,
            speed,
            dt,
            self.config.speed_blend_rate,
        );
    }

    fn hold_without_target(&mut self) {
        if let Some(agent) = self.agent.as_mut() {
            agent.set_stopped(true);
        }
        self.halted = true;

        if let Some(animator) = self.animator.as_mut() {
            animator.set_float(&self.config.speed_parameter, 0.0);
        }
    }

    fn transition_to(&mut self, next: EnemyState) -> Option<StateTransition> {
        debug_assert!(self.state.can_transition_to(next));

        let transition = StateTransition {
            from: self.state,
            to: next,
        };
        self.state = next;
        Some(transition)
    }

    fn handle_patrol(&mut self, distance: f32, target_position: Vec3) -> Option<StateTransition> {
        let agent = self.agent.as_mut()?;

        if distance <= self.config.detection_range {
            agent.set_speed(self.config.run_speed);
            agent.set_destination(target_position);
            return self.transition_to(EnemyState::Chasing);
        }

        if self.patrol.is_empty() {
            return None;
        }

        if agent.remaining_distance() <= agent.stopping_distance() && !agent.path_pending() {
            if let Some(next) = self.patrol.advance() {
                agent.set_destination(next);
            }
        }

        None
    }

    fn handle_chase(&mut self, distance: f32, target_position: Vec3) -> Option<StateTransition> {
        let agent = self.agent.as_mut()?;

        if distance > self.config.detection_range {
            agent.set_speed(self.config.walk_speed);
            if let Some(waypoint) = self.patrol.current() {
                agent.set_destination(waypoint);
            }
            return self.transition_to(EnemyState::Patrolling);
        }

        agent.set_speed(self.config.run_speed);
        agent.set_destination(target_position);

        if distance <= self.config.attack_range {
            agent.set_stopped(true);
            return self.transition_to(EnemyState::Attacking);
        }

        None
    }

    fn handle_attack(
        &mut self,
        distance: f32,
        target: Entity,
        target_position: Vec3,
        dt: f32,
        body: &mut Transform,
    ) -> (Option<StateTransition>, Option<AttackFired>) {
        if distance > self.config.attack_range {
            if let Some(agent) = self.agent.as_mut() {
                agent.set_stopped(false);
            }
            return (self.transition_to(EnemyState::Chasing), None);
        }

        face_towards(body, target_position, dt, self.config.turn_rate);

        if self.cooldown_remaining <= 0.0 {
            let attack = self.fire_attack(target);
            self.cooldown_remaining = self.config.attack_cooldown;
            return (None, Some(attack));
        }

        (None, None)
    }

    fn fire_attack(&mut self, target: Entity) -> AttackFired {
        let variant = self.rng.gen_range(1..=self.config.attack_variants.max(1));
        let trigger = self.config.attack_trigger(variant);

        let triggered = match self.animator.as_mut() {
            Some(animator) if animator.has_parameter(&trigger) => {
                animator.trigger(&trigger);
                true
            }
            Some(_) => {
                let unmapped = AiError::UnmappedAnimationParameter {
                    name: trigger.clone(),
                };
                logger::log(&format!("EnemyAI: attack skipped: {}", unmapped));
                false
            }
            None => false,
        };

        AttackFired {
            target,
            variant,
            trigger,
            triggered,
        }
    }
}
