//! Per-tick output consumed by the presentation layer

use serde::{Deserialize, Serialize};

/// Named sound cues; the core never produces audio itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundEvent {
    Shoot,
    Hit,
    Powerup,
    BossSpawn,
    EnemyDeath,
    BossDeath,
}

impl SoundEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEvent::Shoot => "shoot",
            SoundEvent::Hit => "hit",
            SoundEvent::Powerup => "powerup",
            SoundEvent::BossSpawn => "bossSpawn",
            SoundEvent::EnemyDeath => "enemyDeath",
            SoundEvent::BossDeath => "bossDeath",
        }
    }
}

/// Something the presentation layer should react to after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Sound(SoundEvent),
    ScoreChanged(u64),
    LevelChanged(u32),
    HealthChanged(f32),
    /// Emitted once, on the tick the player dies
    GameOver,
}
