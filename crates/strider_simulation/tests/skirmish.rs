//! Combat integration tests
//!
//! Проверяем:
//! - Aggressive враг идёт на игрока, Peaceful — только после попадания
//! - Попадания снарядов → Health → Dead → roster уборка
//! - Pause/resume и shutdown контекста

mod common;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use strider_simulation::roster::populate_roster;
use strider_simulation::*;

use common::*;

#[test]
fn test_aggressive_enemy_closes_in() {
    let mut app = scenario_app(scenario_config());
    let player = spawn_player(&mut app, Vec3::ZERO);
    let enemy = spawn_enemy(&mut app, Vec3::new(6.0, 0.0, 6.0), Personality::Aggressive);

    let start = position(&app, player).distance(position(&app, enemy));
    for _ in 0..30 {
        run_fixed_tick(&mut app);
    }

    let quarry = app.world().get::<EnemyBehaviour>(enemy).unwrap().quarry();
    assert_eq!(quarry, Some(player));
    assert!(position(&app, player).distance(position(&app, enemy)) < start - 1.0);
}

#[test]
fn test_peaceful_enemy_waits_until_shot() {
    let mut app = scenario_app(SimulationConfig::default());
    let player = spawn_player(&mut app, Vec3::ZERO);
    let enemy = spawn_enemy(&mut app, Vec3::new(0.0, 0.0, -8.0), Personality::Peaceful);
    let enemy_start = position(&app, enemy);

    let hit_after = tick_until(&mut app, 120, |world| {
        !world.resource::<Events<DamageDealt>>().is_empty()
    })
    .expect("projectile never hit");

    // До попадания стоял на месте
    assert!(hit_after > 1);
    let damage = events::<DamageDealt>(&app);
    assert_eq!(damage[0].attacker, player);
    assert_eq!(damage[0].target, enemy);
    assert_eq!(damage[0].damage, 10);
    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 20);
    assert_eq!(
        app.world().get::<EnemyBehaviour>(enemy).unwrap().provoked_by(),
        Some(player)
    );

    for _ in 0..10 {
        run_fixed_tick(&mut app);
    }
    assert!(position(&app, enemy).distance(enemy_start) > 0.1);
}

#[test]
fn test_killed_enemy_is_dead_and_pruned() {
    let mut app = scenario_app(SimulationConfig::default());
    let player = spawn_player(&mut app, Vec3::ZERO);
    let enemy = spawn_enemy(&mut app, Vec3::new(0.0, 0.0, -8.0), Personality::Peaceful);

    tick_until(&mut app, 600, |world| world.get::<Dead>(enemy).is_some())
        .expect("enemy never died");

    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 0);
    assert!(events::<EntityDied>(&app).contains(&EntityDied {
        entity: enemy,
        killer: Some(player)
    }));

    run_fixed_tick(&mut app);
    assert!(app.world().resource::<Roster>().enemies().is_empty());
    // Мёртвая цель = stale: слот пуст, погоня остановлена
    assert!(app.world().get::<TargetSelector>(player).unwrap().target().is_none());
    assert_eq!(
        app.world().get::<Pursuer>(player).unwrap().state(),
        PursuitState::Idle
    );
}

#[test]
fn test_populate_and_shutdown() {
    let mut app = scenario_app(SimulationConfig::default());
    app.world_mut()
        .run_system_once(populate_roster)
        .expect("populate_roster failed");

    let roster = app.world().resource::<Roster>();
    let player = roster.player().expect("no player spawned");
    let enemies = roster.enemies().to_vec();
    assert_eq!(enemies.len(), 3);

    for _ in 0..10 {
        run_fixed_tick(&mut app);
    }

    let world = app.world_mut();
    world.resource_scope(|world, mut roster: Mut<Roster>| {
        let mut commands = world.commands();
        roster.shutdown(&mut commands);
    });
    world.flush();

    assert!(world.get_entity(player).is_err());
    for enemy in enemies {
        assert!(world.get_entity(enemy).is_err());
    }
}

#[test]
fn test_pause_and_resume() {
    let mut app = scenario_app(SimulationConfig::default());

    assert!(!is_simulation_paused(app.world()));
    assert!(pause_simulation(app.world_mut()));
    assert!(is_simulation_paused(app.world()));
    assert!(resume_simulation(app.world_mut()));
    assert!(!is_simulation_paused(app.world()));

    // Без TimePlugin паузить нечего
    let mut bare = World::new();
    assert!(!pause_simulation(&mut bare));
}
