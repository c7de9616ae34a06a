//! Headless симуляция WARDEN
//!
//! `warden_simulation [seed] [ticks] [config.ron]`
//!
//! Игрок идёт по скриптовому маршруту мимо патруля: враг патрулирует,
//! замечает, догоняет, атакует; в конце игрок исчезает и враг замирает.
//! Уровень логов: env `WARDEN_LOG` (debug/info/warn/error).

use bevy::prelude::*;
use warden_simulation::ai::systems::tick_enemy_controllers;
use warden_simulation::ai::{spawn_actor, spawn_patrolling_enemy, spawn_pursuer};
use warden_simulation::logger::{self, LogLevel};
use warden_simulation::{create_headless_app, ActorTag, EnemyAi, EnemyAiConfig, NavSurface, PursuerAi};

/// Скриптовое движение игрока по точкам (без навигации)
#[derive(Component, Debug)]
struct ScriptedWalk {
    points: Vec<Vec3>,
    index: usize,
    speed: f32,
}

fn walk_scripted_actors(mut walkers: Query<(&mut ScriptedWalk, &mut Transform)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (mut walk, mut transform) in walkers.iter_mut() {
        let Some(&point) = walk.points.get(walk.index) else {
            continue;
        };

        let offset = point - transform.translation;
        let step = walk.speed * delta;
        if offset.length() <= step {
            transform.translation = point;
            walk.index += 1;
        } else {
            transform.translation += offset.normalize() * step;
        }
    }
}

fn load_config(path: Option<&String>) -> Result<EnemyAiConfig, String> {
    let Some(path) = path else {
        return Ok(EnemyAiConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    EnemyAiConfig::from_ron_str(&text).map_err(|e| format!("{}: {}", path, e))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let ticks: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1800);

    if let Some(level) = std::env::var("WARDEN_LOG").ok().and_then(|v| LogLevel::parse(&v)) {
        logger::set_log_level(level);
    }

    let config = match load_config(args.get(3)) {
        Ok(config) => config,
        Err(err) => {
            logger::init_logger();
            logger::log_error(&format!("Invalid AI config {}", err));
            std::process::exit(1);
        }
    };

    println!("Starting WARDEN headless simulation (seed: {}, ticks: {})", seed, ticks);

    let mut app = create_headless_app(seed);
    app.add_systems(FixedUpdate, walk_scripted_actors.before(tick_enemy_controllers));

    let surface = NavSurface::square(50.0);
    let world = app.world_mut();

    let player = spawn_actor(world, ActorTag::PLAYER, Vec3::new(30.0, 0.0, 30.0));
    world.entity_mut(player).insert(ScriptedWalk {
        points: vec![
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(-20.0, 0.0, 5.0),
            Vec3::new(-25.0, 0.0, -20.0),
        ],
        index: 0,
        speed: 3.0,
    });

    let enemy = spawn_patrolling_enemy(
        world,
        config.clone(),
        surface,
        Vec3::ZERO,
        vec![
            Vec3::new(8.0, 0.0, 0.0),
            Vec3::new(8.0, 0.0, -8.0),
            Vec3::new(0.0, 0.0, -8.0),
        ],
    );
    let pursuer = spawn_pursuer(world, config, surface, Vec3::new(-40.0, 0.0, 40.0));

    let despawn_at = ticks * 3 / 4;

    for tick in 0..ticks {
        app.update();

        if tick == despawn_at {
            app.world_mut().despawn(player);
            println!("Tick {}: player despawned", tick);
        }

        if tick % 100 == 0 {
            let world = app.world();
            let enemy_line = world
                .get::<EnemyAi>(enemy)
                .zip(world.get::<Transform>(enemy))
                .map(|(ai, transform)| {
                    format!(
                        "{} at {:.1?} (waypoint {})",
                        ai.0.state().as_str(),
                        transform.translation,
                        ai.0.patrol_index()
                    )
                })
                .unwrap_or_else(|| "missing".to_string());
            let pursuer_line = world
                .get::<PursuerAi>(pursuer)
                .zip(world.get::<Transform>(pursuer))
                .map(|(ai, transform)| format!("{:?} at {:.1?}", ai.0.target(), transform.translation))
                .unwrap_or_else(|| "missing".to_string());

            println!("Tick {}: enemy {} | pursuer {}", tick, enemy_line, pursuer_line);
        }
    }

    println!("Simulation complete!");
}
