//! Tests for damage systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::damage::{apply_projectile_hits, calculate_damage};
    use crate::combat::{DamageDealt, EntityDied};
    use crate::components::{Actor, CombatStats, Dead, Health};
    use crate::projectile::ProjectileHit;

    fn damage_app() -> App {
        let mut app = App::new();
        app.add_event::<ProjectileHit>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_systems(Update, apply_projectile_hits);
        app
    }

    fn read_all<E: Event + Clone>(app: &App) -> Vec<E> {
        let events = app.world().resource::<Events<E>>();
        events.get_cursor().read(events).cloned().collect()
    }

    fn hit(app: &mut App, shooter: Entity, target: Entity) {
        app.world_mut().send_event(ProjectileHit {
            projectile: Entity::PLACEHOLDER,
            shooter,
            target,
        });
    }

    #[test]
    fn test_damage_is_shooter_power() {
        let stats = CombatStats {
            power: 7,
            ..default()
        };
        assert_eq!(calculate_damage(Some(&stats)), 7);
        assert_eq!(calculate_damage(None), 0);
    }

    #[test]
    fn test_hit_reduces_health() {
        let mut app = damage_app();
        let shooter = app.world_mut().spawn(Actor::player("hero")).id();
        let target = app
            .world_mut()
            .spawn((Actor::enemy("slime"), Health::new(30)))
            .id();

        hit(&mut app, shooter, target);
        app.update();

        assert_eq!(app.world().get::<Health>(target).unwrap().current, 20);
        assert!(app.world().get::<Dead>(target).is_none());
        assert_eq!(
            read_all::<DamageDealt>(&app),
            vec![DamageDealt {
                attacker: shooter,
                target,
                damage: 10,
                target_died: false
            }]
        );
    }

    #[test]
    fn test_lethal_hit_marks_dead_once() {
        let mut app = damage_app();
        let shooter = app.world_mut().spawn(Actor::player("hero")).id();
        let target = app
            .world_mut()
            .spawn((Actor::enemy("slime"), Health::new(10)))
            .id();

        // Два попадания в одном тике: умирает один раз
        hit(&mut app, shooter, target);
        hit(&mut app, shooter, target);
        app.update();

        assert!(app.world().get::<Dead>(target).is_some());
        assert_eq!(
            read_all::<EntityDied>(&app),
            vec![EntityDied {
                entity: target,
                killer: Some(shooter)
            }]
        );
    }

    #[test]
    fn test_self_hit_is_ignored() {
        let mut app = damage_app();
        let shooter = app.world_mut().spawn(Actor::player("hero")).id();

        hit(&mut app, shooter, shooter);
        app.update();

        assert_eq!(app.world().get::<Health>(shooter).unwrap().current, 100);
        assert!(read_all::<DamageDealt>(&app).is_empty());
    }
}
