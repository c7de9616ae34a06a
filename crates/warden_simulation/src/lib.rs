//! WARDEN Simulation Core
//!
//! Enemy AI (Patrol/Chase/Attack) на Bevy 0.16, headless.
//!
//! HYBRID ARCHITECTURE:
//! - контроллеры = логика поведения (FSM, cooldown, выбор атаки)
//! - host = навигация/анимация/поиск акторов (traits NavigationAgent,
//!   AnimationSink, ActorLookup); здесь: headless реализации поверх ECS

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod actor;
pub mod ai;
pub mod animation;
pub mod error;
pub mod logger;
pub mod navigation;

// Re-export базовых типов для удобства
pub use actor::{ActorLookup, ActorRegistry, ActorTag};
pub use ai::{
    EnemyAi, EnemyAiConfig, EnemyAiPlugin, EnemyBehaviorController, EnemyState, PursuerAi,
    PursuerController, TickReport,
};
pub use animation::{AnimationSink, AnimatorParameters};
pub use error::{AiError, ConfigError};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use navigation::{NavSurface, NavigationAgent, SimNavAgent};

/// Частота simulation tick
pub const TICK_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .add_plugins(EnemyAiPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed для дочернего RNG (по одному на контроллер)
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время шагает вручную: один `app.update()` = один FixedUpdate тик
/// (кроме самого первого), независимо от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, SimulationPlugin))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick_duration()));

    app
}

/// Длительность одного simulation tick
pub fn tick_duration() -> Duration {
    Duration::from_secs_f64(1.0 / TICK_HZ)
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
