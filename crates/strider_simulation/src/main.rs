//! Headless симуляция Strider
//!
//! Запускает Bevy App без рендера: игрок в центре, кольцо врагов,
//! скриптованная стычка. Первый аргумент — опциональный RON конфиг.

use std::process::ExitCode;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use strider_simulation::roster::populate_roster;
use strider_simulation::*;

/// Максимальная длина прогона (тики)
const MAX_TICKS: u32 = 60 * 60;
/// Окно ручного ввода (показываем, что WASD перебивает pursuit)
const MANUAL_WINDOW: std::ops::Range<u32> = 600..630;

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };

    let seed = 42;
    println!("Starting Strider headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.insert_resource(NavMeshService::new(OpenFieldNavMesh::default()))
        .add_plugins((SimulationPlugin::with_config(config), HeadlessPlugin));

    if let Err(err) = app.world_mut().run_system_once(populate_roster) {
        eprintln!("Failed to populate roster: {}", err);
        return ExitCode::FAILURE;
    }

    let Some(player) = app.world().resource::<Roster>().player() else {
        eprintln!("Roster has no player");
        return ExitCode::FAILURE;
    };

    let mut ticks = 0;
    for tick in 0..MAX_TICKS {
        let direction = if MANUAL_WINDOW.contains(&tick) {
            Vec3::NEG_Z
        } else {
            Vec3::ZERO
        };
        if let Some(mut input) = app.world_mut().get_mut::<MovementInput>(player) {
            input.direction = direction;
        }

        run_fixed_tick(&mut app);
        ticks = tick + 1;

        let roster = app.world().resource::<Roster>();
        if tick % 300 == 0 {
            log_info(&format!(
                "Tick {}: {} enemies left, player alive: {}",
                tick,
                roster.enemies().len(),
                roster.player().is_some()
            ));
        }

        if roster.enemies().is_empty() || roster.player().is_none() {
            break;
        }
    }

    let world = app.world_mut();
    let enemies_left = world.resource::<Roster>().enemies().len();
    let player_health = world.get::<Health>(player).map(|health| health.current);

    world.resource_scope(|world, mut roster: Mut<Roster>| {
        let mut commands = world.commands();
        roster.shutdown(&mut commands);
    });
    world.flush();

    println!(
        "Simulation complete after {} ticks: {} enemies left, player health {:?}",
        ticks, enemies_left, player_health
    );
    ExitCode::SUCCESS
}
