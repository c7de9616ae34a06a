//! PursuerController: безостановочный преследователь
//!
//! Без патруля и атак. Пока цель жива, идёт к ней на run_speed
//! и поворачивается к ней, только когда реально движется.

use std::fmt;

use bevy::prelude::*;

use super::motion::{blend_speed_parameter, face_towards, horizontal_speed};
use super::{ControllerStatus, EnemyAiConfig, TargetChange, TargetTracker};
use crate::actor::ActorLookup;
use crate::animation::AnimationSink;
use crate::error::AiError;
use crate::logger;
use crate::navigation::NavigationAgent;

pub struct PursuerController<N, A> {
    config: EnemyAiConfig,
    agent: Option<N>,
    animator: Option<A>,
    target: TargetTracker,
    status: ControllerStatus,
}

impl<N, A> fmt::Debug for PursuerController<N, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PursuerController")
            .field("status", &self.status)
            .field("target", &self.target.current())
            .finish()
    }
}

impl<N: NavigationAgent, A: AnimationSink> PursuerController<N, A> {
    pub fn new(config: EnemyAiConfig, agent: Option<N>, animator: Option<A>) -> Self {
        Self {
            config,
            agent,
            animator,
            target: TargetTracker::default(),
            status: ControllerStatus::Pending,
        }
    }

    pub fn status(&self) -> &ControllerStatus {
        &self.status
    }

    pub fn target(&self) -> Option<Entity> {
        self.target.current()
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
                "Pursuer: snapped {:?} → {:?} onto navigation surface",
                position, snapped
            ));
        }

        agent.set_speed(self.config.run_speed);

        let change = self.target.acquire(actors, &self.config.target_tag);
        if change.is_none() {
            let missing = AiError::TargetUnavailable {
                tag: self.config.target_tag.clone(),
            };
            logger::log_warning(&format!("Pursuer: {} (will retry every tick)", missing));
        }

        Ok(change)
    }

    /// Один тик; возвращает ошибку только в тике, где контроллер отключился
    pub fn update(
        &mut self,
        dt: f32,
        body: &mut Transform,
        actors: &impl ActorLookup,
    ) -> Result<Option<TargetChange>, AiError> {
        let mut started = None;

        match self.status {
            ControllerStatus::Disabled(_) => return Ok(None),
            ControllerStatus::Active => {}
            ControllerStatus::Pending => match self.initialize(body, actors) {
                Ok(change) => {
                    self.status = ControllerStatus::Active;
                    started = change;
                }
                Err(err) => {
                    logger::log_error(&format!("Pursuer: disabled on start: {}", err));
                    self.status = ControllerStatus::Disabled(err.clone());
                    return Err(err);
                }
            },
        }

        let agent = match self.agent.as_mut() {
            Some(agent) if agent.is_on_navigable_surface() => agent,
            _ => return Ok(started),
        };

        let (target, refreshed) = self.target.refresh(actors, &self.config.target_tag);
        let change = refreshed.or(started);

        let Some((_, target_position)) = target else {
            agent.set_stopped(true);
            if let Some(animator) = self.animator.as_mut() {
                animator.set_float(&self.config.speed_parameter, 0.0);
            }
            return Ok(change);
        };

        let speed = horizontal_speed(agent.velocity());
        if let Some(animator) = self.animator.as_mut() {
            blend_speed_parameter(
                animator,
                &self.config.speed_parameter,
                speed,
                dt,
                self.config.speed_blend_rate,
            );
        }

        agent.set_stopped(false);
        agent.set_destination(target_position);

        if speed > self.config.idle_speed_threshold {
            face_towards(body, target_position, dt, self.config.turn_rate);
        }

        Ok(change)
    }
}
