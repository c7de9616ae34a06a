//! Actors: теги для поиска целей + lookup контракт
//!
//! Контроллер не держит ссылку на Transform цели: только Entity handle.
//! Позиция запрашивается каждый тик через ActorLookup; None = цель уничтожена.

use bevy::prelude::*;

/// Тег актора для поиска по имени ("Player", "Ally", ...)
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ActorTag(pub String);

impl ActorTag {
    pub const PLAYER: &'static str = "Player";

    pub fn player() -> Self {
        Self(Self::PLAYER.to_string())
    }

    pub fn new(tag: &str) -> Self {
        Self(tag.to_string())
    }

    pub fn is(&self, tag: &str) -> bool {
        self.0 == tag
    }
}

/// Поиск акторов на стороне хоста
pub trait ActorLookup {
    /// Первый живой актор с тегом
    fn find_by_tag(&self, tag: &str) -> Option<Entity>;

    /// Позиция актора; None если актор уничтожен
    fn position_of(&self, actor: Entity) -> Option<Vec3>;
}

#[derive(Debug, Clone, Copy)]
struct TrackedActor<'a> {
    entity: Entity,
    tag: &'a str,
    position: Vec3,
}

/// Snapshot тегированных акторов на текущий тик
#[derive(Debug, Clone, Default)]
pub struct ActorRegistry<'a> {
    actors: Vec<TrackedActor<'a>>,
}

impl<'a> ActorRegistry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сбор из ECS query; сортировка по Entity для детерминизма find_by_tag
    pub fn collect(actors: impl IntoIterator<Item = (Entity, &'a ActorTag, &'a Transform)>) -> Self {
        let mut actors: Vec<_> = actors
            .into_iter()
            .map(|(entity, tag, transform)| TrackedActor {
                entity,
                tag: tag.0.as_str(),
                position: transform.translation,
            })
            .collect();
        actors.sort_by_key(|actor| actor.entity);

        Self { actors }
    }

    pub fn insert(&mut self, entity: Entity, tag: &'a str, position: Vec3) {
        self.actors.push(TrackedActor {
            entity,
            tag,
            position,
        });
    }

    pub fn remove(&mut self, entity: Entity) {
        self.actors.retain(|actor| actor.entity != entity);
    }

    pub fn set_position(&mut self, entity: Entity, position: Vec3) {
        if let Some(actor) = self.actors.iter_mut().find(|actor| actor.entity == entity) {
            actor.position = position;
        }
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

impl ActorLookup for ActorRegistry<'_> {
    fn find_by_tag(&self, tag: &str) -> Option<Entity> {
        self.actors
            .iter()
            .find(|actor| actor.tag == tag)
            .map(|actor| actor.entity)
    }

    fn position_of(&self, actor: Entity) -> Option<Vec3> {
        self.actors
            .iter()
            .find(|tracked| tracked.entity == actor)
            .map(|tracked| tracked.position)
    }
}
