//! Roster — явный контекст жизненного цикла акторов
//!
//! Заменяет глобальные менеджеры: кто заспавнен, кто жив, кого убрать
//! при shutdown. Вся tuning-информация берётся из SimulationConfig.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::components::{
    Actor, CombatStats, Dead, Health, MovementInput, MovementStats, PrefabId, ProximitySensor,
};
use crate::config::SimulationConfig;
use crate::enemy::{EnemyBehaviour, Personality};
use crate::navigation::ActivePath;
use crate::projectile::FireControl;
use crate::pursuit::Pursuer;
use crate::targeting::TargetSelector;
use crate::{DeterministicRng, SimulationSet};


/// Кто заспавнен через roster
#[derive(Resource, Debug, Default)]
pub struct Roster {
    player: Option<Entity>,
    enemies: Vec<Entity>,
}

impl Roster {
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    /// Игрок: pick/proximity targeting + pursuit + стрельба
    pub fn spawn_player(
        &mut self,
        commands: &mut Commands,
        config: &SimulationConfig,
        position: Vec3,
    ) -> Entity {
        let combat = &config.combat;

        let player = commands
            .spawn((
                Actor::player("Player"),
                Transform::from_translation(position),
                Health::new(combat.health),
                MovementStats {
                    move_speed: combat.move_speed,
                    rotation_speed: combat.rotation_speed,
                    navmesh_sample_distance: combat.navmesh_sample_distance,
                },
                CombatStats {
                    power: combat.power,
                    projectile_speed: combat.projectile_speed,
                    max_attack_distance: combat.max_attack_distance,
                    projectile_offset: combat.projectile_offset,
                },
                TargetSelector::new(config.targeting.clone()),
                Pursuer::new(config.pursuit.clone(), config.planner.clone()),
                FireControl::new(
                    combat.fire_interval,
                    config.pursuit.facing_threshold,
                    PrefabId::new(combat.projectile_prefab.as_str()),
                ),
                MovementInput::default(),
                ActivePath::default(),
                ProximitySensor::new(config.targeting.acquisition_radius),
                PrefabId::new(combat.prefab.as_str()),
            ))
            .id();

        if let Some(previous) = self.player.replace(player) {
            crate::log_warning(&format!(
                "Roster: player {:?} replaced by {:?}",
                previous, player
            ));
        }
        crate::log_info(&format!("Roster: spawned player {:?} at {:?}", player, position));
        player
    }

    pub fn spawn_enemy(
        &mut self,
        commands: &mut Commands,
        config: &SimulationConfig,
        position: Vec3,
        personality: Personality,
    ) -> Entity {
        let enemy_config = &config.enemy;
        let index = self.enemies.len();

        let enemy = commands
            .spawn((
                Actor::enemy(format!("Enemy {}", index)),
                Transform::from_translation(position),
                Health::new(enemy_config.health),
                MovementStats {
                    move_speed: enemy_config.move_speed,
                    ..default()
                },
                CombatStats {
                    power: enemy_config.power,
                    ..default()
                },
                EnemyBehaviour::new(
                    personality,
                    enemy_config.detection_radius,
                    enemy_config.move_speed,
                ),
                ProximitySensor::new(enemy_config.detection_radius),
                PrefabId::new(enemy_config.prefab.as_str()),
            ))
            .id();

        self.enemies.push(enemy);
        crate::log(&format!(
            "Roster: spawned {:?} enemy {:?} at {:?}",
            personality, enemy, position
        ));
        enemy
    }

    /// Кольцо врагов вокруг `center` (угол/радиус с jitter'ом из seeded RNG)
    pub fn spawn_initial_enemies(
        &mut self,
        commands: &mut Commands,
        config: &SimulationConfig,
        rng: &mut DeterministicRng,
        center: Vec3,
    ) -> Vec<Entity> {
        let count = config.enemy.initial_count;
        let mut spawned = Vec::with_capacity(count);

        for i in 0..count {
            let base_angle = i as f32 / count as f32 * TAU;
            let angle = base_angle + rng.rng.gen_range(-0.3..0.3);
            let radius = config.enemy.spawn_radius * rng.rng.gen_range(0.8..1.2);
            let personality = if rng.rng.gen_bool(config.enemy.aggressive_ratio.clamp(0.0, 1.0)) {
                Personality::Aggressive
            } else {
                Personality::Peaceful
            };

            let position = center + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
            spawned.push(self.spawn_enemy(commands, config, position, personality));
        }

        spawned
    }

    /// Выкинуть despawned/мёртвых. Возвращает сколько убрали.
    pub fn prune(&mut self, is_live: impl Fn(Entity) -> bool) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|&enemy| is_live(enemy));
        let mut removed = before - self.enemies.len();

        if self.player.is_some_and(|player| !is_live(player)) {
            self.player = None;
            removed += 1;
        }

        removed
    }

    /// Despawn всего, что roster заспавнил
    pub fn shutdown(&mut self, commands: &mut Commands) {
        for entity in self.enemies.drain(..).chain(self.player.take()) {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn();
            }
        }
        crate::log_info("Roster: shutdown complete");
    }
}

/// Startup система: игрок в начале координат + начальное кольцо врагов
pub fn populate_roster(
    mut commands: Commands,
    mut roster: ResMut<Roster>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
) {
    roster.spawn_player(&mut commands, &config, Vec3::ZERO);
    roster.spawn_initial_enemies(&mut commands, &config, &mut rng, Vec3::ZERO);
}

/// Система: уборка roster'а после damage
pub fn prune_roster(
    mut roster: ResMut<Roster>,
    live_actors: Query<(), (With<Actor>, Without<Dead>)>,
) {
    let removed = roster.prune(|entity| live_actors.contains(entity));
    if removed > 0 {
        crate::log_info(&format!(
            "Roster: pruned {} actor(s), {} enemies left",
            removed,
            roster.enemies().len()
        ));
    }
}

/// Roster Plugin
///
/// Только ресурс + уборка (SimulationSet::Bookkeeping). Заселение —
/// явным вызовом (populate_roster в Startup или методы Roster).
pub struct RosterPlugin;

impl Plugin for RosterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Roster>();
        app.add_systems(FixedUpdate, prune_roster.in_set(SimulationSet::Bookkeeping));
    }
}
