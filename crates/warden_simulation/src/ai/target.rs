//! TargetTracker: захват цели по тегу с повторным поиском.

use bevy::prelude::*;

use crate::actor::ActorLookup;

/// Что произошло с целью за тик
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetChange {
    Acquired(Entity),
    Lost(Entity),
}

/// Non-owning handle на цель
///
/// Цель не кэшируется навсегда: если lookup не знает позицию handle'а
/// (актор уничтожен): handle сбрасывается и ищем заново по тегу.
#[derive(Debug, Clone, Default)]
pub struct TargetTracker {
    target: Option<Entity>,
}

impl TargetTracker {
    pub fn current(&self) -> Option<Entity> {
        self.target
    }

    /// Попытка захвата (старт контроллера)
    pub fn acquire(&mut self, actors: &impl ActorLookup, tag: &str) -> Option<TargetChange> {
        self.target = actors.find_by_tag(tag);
        self.target.map(TargetChange::Acquired)
    }

    /// Проверить живость цели, при необходимости перезахватить
    ///
    /// Возвращает позицию живой цели и изменение за тик (если было).
    pub fn refresh(
        &mut self,
        actors: &impl ActorLookup,
        tag: &str,
    ) -> (Option<(Entity, Vec3)>, Option<TargetChange>) {
        if let Some(target) = self.target {
            if let Some(position) = actors.position_of(target) {
                return (Some((target, position)), None);
            }
        }

        let lost = self.target.take();

        let found = actors
            .find_by_tag(tag)
            .and_then(|entity| actors.position_of(entity).map(|position| (entity, position)));

        match (lost, found) {
            (_, Some((entity, position))) => {
                self.target = Some(entity);
                (Some((entity, position)), Some(TargetChange::Acquired(entity)))
            }
            (Some(lost), None) => (None, Some(TargetChange::Lost(lost))),
            (None, None) => (None, None),
        }
    }
}
