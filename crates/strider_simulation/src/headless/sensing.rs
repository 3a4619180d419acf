//! Distance-based proximity triggers
//!
//! Заменяет trigger colliders движка: каждый тик сравниваем, кто внутри
//! радиуса ProximitySensor'а, с прошлым тиком и шлём Entered/Exited.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::components::{Actor, Dead, ProximitySensor};
use crate::targeting::ProximityEvent;

/// Кто был внутри каждого сенсора на прошлом тике
#[derive(Resource, Debug, Default)]
pub struct ProximityContacts {
    inside: HashMap<Entity, Vec<Entity>>,
}

impl ProximityContacts {
    pub fn inside(&self, sensor: Entity) -> &[Entity] {
        self.inside.get(&sensor).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Система: proximity события по дистанции
pub fn sense_proximity(
    sensors: Query<(Entity, &Transform, &ProximitySensor), Without<Dead>>,
    actors: Query<(Entity, &Transform, &Actor), Without<Dead>>,
    mut contacts: ResMut<ProximityContacts>,
    mut proximity_events: EventWriter<ProximityEvent>,
) {
    let mut next: HashMap<Entity, Vec<Entity>> = HashMap::new();

    for (observer, sensor_transform, sensor) in sensors.iter() {
        let previous = contacts.inside.remove(&observer).unwrap_or_default();
        let mut inside = Vec::new();

        for (other, other_transform, actor) in actors.iter() {
            if other == observer {
                continue;
            }

            let distance = sensor_transform.translation.distance(other_transform.translation);
            if !sensor.contains(distance) {
                continue;
            }

            inside.push(other);
            if !previous.contains(&other) {
                proximity_events.write(ProximityEvent::Entered {
                    observer,
                    other,
                    tag: actor.tag,
                });
            }
        }

        for &other in previous.iter().filter(|other| !inside.contains(*other)) {
            // Исчезнувший внутри trigger'а (despawn/смерть) не "выходит" —
            // его подберёт stale validation
            if actors.contains(other) {
                proximity_events.write(ProximityEvent::Exited { observer, other });
            }
        }

        next.insert(observer, inside);
    }

    // Сенсоры, которых больше нет (despawn/смерть), просто забываем
    contacts.inside = next;
}
