//! EnemyBehaviour — характер врага
//!
//! - Aggressive: гонится за игроком, как только тот в detection radius
//! - Peaceful: гонится только за тем, кто его атаковал

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Deserialize)]
pub enum Personality {
    #[default]
    Aggressive,
    Peaceful,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct EnemyBehaviour {
    pub personality: Personality,
    pub detection_radius: f32,
    /// Метры в секунду
    pub move_speed: f32,
    /// Игрок внутри detection radius
    quarry: Option<Entity>,
    /// Кто последним нанёс урон
    provoked_by: Option<Entity>,
}

impl Default for EnemyBehaviour {
    fn default() -> Self {
        Self::new(Personality::Aggressive, 10.0, 5.0)
    }
}

impl EnemyBehaviour {
    pub fn new(personality: Personality, detection_radius: f32, move_speed: f32) -> Self {
        Self {
            personality,
            detection_radius,
            move_speed,
            quarry: None,
            provoked_by: None,
        }
    }

    pub fn quarry(&self) -> Option<Entity> {
        self.quarry
    }

    pub fn provoked_by(&self) -> Option<Entity> {
        self.provoked_by
    }

    /// Игрок вошёл в trigger. Возвращает true, если стал quarry.
    pub fn on_player_enter(&mut self, player: Entity, distance: f32) -> bool {
        if distance > self.detection_radius || self.quarry.is_some() {
            return false;
        }
        self.quarry = Some(player);
        true
    }

    pub fn on_player_exit(&mut self, player: Entity) {
        if self.quarry == Some(player) {
            self.quarry = None;
        }
    }

    /// Урон от `attacker`
    pub fn provoke(&mut self, attacker: Entity) {
        self.provoked_by = Some(attacker);
    }

    /// Quarry пропал из мира (despawn / смерть)
    pub fn forget(&mut self, entity: Entity) {
        if self.quarry == Some(entity) {
            self.quarry = None;
        }
        if self.provoked_by == Some(entity) {
            self.provoked_by = None;
        }
    }

    /// За кем гнаться в этом тике
    pub fn chase_target(&self) -> Option<Entity> {
        let quarry = self.quarry?;
        match self.personality {
            Personality::Aggressive => Some(quarry),
            Personality::Peaceful if self.provoked_by == Some(quarry) => Some(quarry),
            Personality::Peaceful => None,
        }
    }
}
