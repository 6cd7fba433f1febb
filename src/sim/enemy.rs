//! Regular enemies and the edge spawner

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use crate::consts::ENEMY_SPAWN_MARGIN;

/// Damage of a regular enemy's bullet
pub const ENEMY_BULLET_DAMAGE: f32 = 5.0;
/// Shooters back away when the player is closer than this
pub const SHOOTER_PREFERRED_DISTANCE: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Normal,
    Fast,
    Shooter,
}

impl EnemyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Normal => "normal",
            EnemyKind::Fast => "fast",
            EnemyKind::Shooter => "shooter",
        }
    }

    /// Collision radius
    pub fn radius(&self) -> f32 {
        match self {
            EnemyKind::Normal => 17.5,
            EnemyKind::Fast => 12.5,
            EnemyKind::Shooter => 15.0,
        }
    }

    pub fn base_speed(&self) -> f32 {
        match self {
            EnemyKind::Normal => 120.0,
            EnemyKind::Fast => 180.0,
            EnemyKind::Shooter => 100.0,
        }
    }

    pub fn base_health(&self) -> f32 {
        match self {
            EnemyKind::Normal => 30.0,
            EnemyKind::Fast => 20.0,
            EnemyKind::Shooter => 40.0,
        }
    }

    /// Seconds between aimed shots
    pub fn base_fire_interval(&self) -> f32 {
        match self {
            EnemyKind::Normal => 2.0,
            EnemyKind::Fast => 2.5,
            EnemyKind::Shooter => 3.0,
        }
    }

    /// Base score for a kill
    pub fn value(&self) -> u64 {
        match self {
            EnemyKind::Shooter => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub radius: f32,
    pub health: f32,
    pub speed: f32,
    pub fire_interval: f32,
    /// Counts down to the next shot
    pub fire_timer: f32,
    pub value: u64,
    pub active: bool,
}

impl Enemy {
    /// Enemy with unscaled base stats
    pub fn new(pos: Vec2, kind: EnemyKind) -> Self {
        Self {
            pos,
            kind,
            radius: kind.radius(),
            health: kind.base_health(),
            speed: kind.base_speed(),
            fire_interval: kind.base_fire_interval(),
            fire_timer: 0.0,
            value: kind.value(),
            active: true,
        }
    }

    /// Enemy with stats scaled for `level`
    pub fn for_level(pos: Vec2, kind: EnemyKind, level: u32) -> Self {
        let level = level as f32;
        let mut enemy = Self::new(pos, kind);
        enemy.speed *= 1.0 + level * 0.1;
        enemy.health *= 1.0 + level * 0.15;
        enemy.fire_interval *= (1.0 - level * 0.05).max(0.5);
        enemy
    }

    /// Move relative to the player and return a bullet when the fire timer elapses
    pub fn update(&mut self, dt: f32, player_pos: Vec2) -> Option<Bullet> {
        let to_player = player_pos - self.pos;
        let dist = to_player.length();

        if dist > 0.0 {
            let dir = to_player / dist;
            if self.kind == EnemyKind::Shooter && dist < SHOOTER_PREFERRED_DISTANCE {
                self.pos -= dir * self.speed * dt * 0.5;
            } else {
                self.pos += dir * self.speed * dt;
            }
        }

        self.fire_timer -= dt;
        if self.fire_timer <= 0.0 {
            self.fire_timer = self.fire_interval;
            let angle = crate::angle_between(self.pos, player_pos);
            return Some(Bullet::enemy(self.pos, angle, ENEMY_BULLET_DAMAGE));
        }
        None
    }
}

/// Roll an enemy type; faster and shooting types grow more common with level
pub fn roll_enemy_kind<R: Rng>(rng: &mut R, level: u32) -> EnemyKind {
    let level = level as f32;
    let fast_share = (0.3 + level * 0.05).min(0.5);
    let shooter_share = (0.2 + level * 0.03).min(0.35);
    let roll: f32 = rng.random();

    if roll < 1.0 - fast_share - shooter_share {
        EnemyKind::Normal
    } else if roll < 1.0 - shooter_share {
        EnemyKind::Fast
    } else {
        EnemyKind::Shooter
    }
}

/// Random point just outside one of the four arena edges
pub fn edge_spawn_point<R: Rng>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    let margin = ENEMY_SPAWN_MARGIN;
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random::<f32>() * width, -margin),
        1 => Vec2::new(width + margin, rng.random::<f32>() * height),
        2 => Vec2::new(rng.random::<f32>() * width, height + margin),
        _ => Vec2::new(-margin, rng.random::<f32>() * height),
    }
}

/// Spawn one level-scaled enemy at a random arena edge
pub fn spawn_enemy<R: Rng>(rng: &mut R, width: f32, height: f32, level: u32) -> Enemy {
    let pos = edge_spawn_point(rng, width, height);
    let kind = roll_enemy_kind(rng, level);
    Enemy::for_level(pos, kind, level)
}

/// Enemies per spawn wave
pub fn spawn_count(level: u32) -> usize {
    (1 + level as usize / 3).min(3)
}

/// Seconds between spawn waves
pub fn spawn_interval(level: u32) -> f32 {
    (1.5 - level as f32 * 0.08).max(0.3)
}
