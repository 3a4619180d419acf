//! Damage: ProjectileHit → Health → Dead
//!
//! Урон = power стрелка (CombatStats). Модификаторов нет.

use bevy::prelude::*;

use crate::components::{CombatStats, Dead, Health};
use crate::projectile::ProjectileHit;

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Урон одного попадания
pub fn calculate_damage(attacker: Option<&CombatStats>) -> u32 {
    attacker.map(|stats| stats.power).unwrap_or(0)
}

/// Система: apply damage от ProjectileHit событий
///
/// 1. Читаем ProjectileHit (collision report движка)
/// 2. Урон = power стрелка
/// 3. Применяем к Health, health 0 → Dead marker
/// 4. Генерируем DamageDealt и EntityDied
pub fn apply_projectile_hits(
    mut commands: Commands,
    mut hit_events: EventReader<ProjectileHit>,
    mut targets: Query<&mut Health, Without<Dead>>,
    attackers: Query<&CombatStats>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
) {
    for hit in hit_events.read() {
        // Свой снаряд вылетает из собственного collider'а — не урон
        if hit.shooter == hit.target {
            continue;
        }

        let Ok(mut health) = targets.get_mut(hit.target) else {
            // Мёртв / без Health (стена, снаряд) — игнорируем
            continue;
        };

        let damage = calculate_damage(attackers.get(hit.shooter).ok());
        let was_alive = health.is_alive();
        health.take_damage(damage);
        let died = was_alive && !health.is_alive();

        crate::log(&format!(
            "Damage: {:?} → {:?} ({} damage, health: {}/{})",
            hit.shooter, hit.target, damage, health.current, health.max
        ));

        damage_dealt_events.write(DamageDealt {
            attacker: hit.shooter,
            target: hit.target,
            damage,
            target_died: died,
        });

        if died {
            commands.entity(hit.target).insert(Dead);
            entity_died_events.write(EntityDied {
                entity: hit.target,
                killer: Some(hit.shooter),
            });

            crate::log_info(&format!("Entity {:?} killed by {:?}", hit.target, hit.shooter));
        }
    }
}
