//! Интеграционные тесты enemy AI поверх headless ECS
//!
//! Полный цикл: EnemyAiPlugin системы, SimNavAgent движение, события.

use bevy::prelude::*;
use warden_simulation::ai::{
    spawn_actor, spawn_patrolling_enemy, spawn_pursuer, AttackLanded, EnemyAttackTriggered,
    EnemyControllerDisabled, EnemyStateChanged,
};
use warden_simulation::{
    create_headless_app, ActorTag, AnimationSink, EnemyAi, EnemyAiConfig, EnemyState, NavSurface,
};

const SEED: u64 = 12345;

fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

fn enemy_state(app: &App, enemy: Entity) -> EnemyState {
    app.world().get::<EnemyAi>(enemy).expect("enemy alive").0.state()
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<Transform>(entity).expect("transform").translation
}

#[test]
fn test_enemy_reaches_attack_through_chase_and_lands_hits() {
    let mut app = create_headless_app(SEED);
    let world = app.world_mut();
    spawn_actor(world, ActorTag::PLAYER, Vec3::new(1.0, 0.0, 0.0));
    let enemy = spawn_patrolling_enemy(
        world,
        EnemyAiConfig::default(),
        NavSurface::square(50.0),
        Vec3::ZERO,
        vec![],
    );

    let mut transitions = Vec::new();
    let mut attacks = Vec::new();
    let mut landed = Vec::new();

    for _ in 0..400 {
        app.update();
        transitions.extend(drain::<EnemyStateChanged>(&mut app));
        attacks.extend(drain::<EnemyAttackTriggered>(&mut app));
        landed.extend(drain::<AttackLanded>(&mut app));
    }

    let path: Vec<_> = transitions.iter().map(|e| (e.from, e.to)).collect();
    assert_eq!(
        path,
        vec![
            (EnemyState::Patrolling, EnemyState::Chasing),
            (EnemyState::Chasing, EnemyState::Attacking),
        ]
    );
    assert_eq!(enemy_state(&app, enemy), EnemyState::Attacking);

    // cooldown 2s при 60Hz → 2-3 атаки за ~6.6s
    assert!(attacks.len() >= 2, "attacks: {:?}", attacks);
    for attack in &attacks {
        assert_eq!(attack.attacker, enemy);
        assert!((1..=3).contains(&attack.variant));
        assert!(attack.triggered);
    }
    assert_eq!(landed.len(), attacks.len());
}

#[test]
fn test_enemy_stops_when_player_despawned() {
    let mut app = create_headless_app(SEED);
    let world = app.world_mut();
    let player = spawn_actor(world, ActorTag::PLAYER, Vec3::new(10.0, 0.0, 0.0));
    let enemy = spawn_patrolling_enemy(
        world,
        EnemyAiConfig::default(),
        NavSurface::square(50.0),
        Vec3::ZERO,
        vec![Vec3::new(0.0, 0.0, -5.0)],
    );

    for _ in 0..30 {
        app.update();
    }
    assert_eq!(enemy_state(&app, enemy), EnemyState::Chasing);
    assert!(translation(&app, enemy).x > 0.5, "enemy moved towards player");

    app.world_mut().despawn(player);
    app.update();
    app.update();
    let halted_at = translation(&app, enemy);

    for _ in 0..60 {
        app.update();
    }

    assert_eq!(translation(&app, enemy), halted_at);
    let ai = app.world().get::<EnemyAi>(enemy).expect("enemy alive");
    assert_eq!(ai.0.target(), None);
    assert_eq!(ai.0.animator().expect("animator").get_float("Speed"), 0.0);
}

#[test]
fn test_enemy_resumes_when_new_player_spawns() {
    let mut app = create_headless_app(SEED);
    let world = app.world_mut();
    let player = spawn_actor(world, ActorTag::PLAYER, Vec3::new(10.0, 0.0, 0.0));
    let enemy = spawn_patrolling_enemy(
        world,
        EnemyAiConfig::default(),
        NavSurface::square(50.0),
        Vec3::ZERO,
        vec![],
    );

    for _ in 0..10 {
        app.update();
    }
    app.world_mut().despawn(player);
    for _ in 0..10 {
        app.update();
    }
    let halted_at = translation(&app, enemy);

    spawn_actor(app.world_mut(), ActorTag::PLAYER, Vec3::new(-10.0, 0.0, 0.0));
    for _ in 0..30 {
        app.update();
    }

    assert!(translation(&app, enemy).x < halted_at.x, "enemy chases the new player");
}

#[test]
fn test_far_off_mesh_spawn_disables_enemy() {
    let mut app = create_headless_app(SEED);
    let config = EnemyAiConfig {
        navmesh_snap_radius: 1.0,
        ..Default::default()
    };
    let world = app.world_mut();
    spawn_actor(world, ActorTag::PLAYER, Vec3::new(40.0, 0.0, 40.0));
    let spawn = Vec3::new(0.0, 0.0, 60.0);
    let enemy = spawn_patrolling_enemy(world, config, NavSurface::square(50.0), spawn, vec![]);

    let mut disabled = Vec::new();
    for _ in 0..30 {
        app.update();
        disabled.extend(drain::<EnemyControllerDisabled>(&mut app));
    }

    assert_eq!(disabled.len(), 1);
    assert_eq!(disabled[0].entity, enemy);
    assert!(app.world().get::<EnemyAi>(enemy).expect("enemy").0.status().is_disabled());
    assert_eq!(translation(&app, enemy), spawn);
    assert!(drain::<EnemyStateChanged>(&mut app).is_empty());
}

#[test]
fn test_pursuer_closes_distance() {
    let mut app = create_headless_app(SEED);
    let world = app.world_mut();
    let player = spawn_actor(world, ActorTag::PLAYER, Vec3::new(10.0, 0.0, 0.0));
    let pursuer = spawn_pursuer(
        world,
        EnemyAiConfig::default(),
        NavSurface::square(50.0),
        Vec3::new(-20.0, 0.0, 0.0),
    );

    let start = translation(&app, pursuer).distance(translation(&app, player));
    for _ in 0..120 {
        app.update();
    }
    let end = translation(&app, pursuer).distance(translation(&app, player));

    assert!(end < start - 5.0, "start {start}, end {end}");
}

#[test]
fn test_enemies_ignore_each_other() {
    let mut app = create_headless_app(SEED);
    let world = app.world_mut();
    let surface = NavSurface::square(50.0);
    let a = spawn_patrolling_enemy(world, EnemyAiConfig::default(), surface, Vec3::ZERO, vec![]);
    let b = spawn_patrolling_enemy(world, EnemyAiConfig::default(), surface, Vec3::X, vec![]);
    // Тег на враге не делает его целью
    world.entity_mut(b).insert(ActorTag::player());

    for _ in 0..30 {
        app.update();
    }

    assert_eq!(enemy_state(&app, a), EnemyState::Patrolling);
    assert_eq!(app.world().get::<EnemyAi>(a).expect("enemy").0.target(), None);
}
