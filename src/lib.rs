//! Beam Me Up - twin-stick arena shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, firing, collisions, scoring)
//! - `engine`: Presentation-facing wrapper that dispatches per-frame events
//! - `tuning`: Data-driven game balance
//! - `highscores`: Local leaderboard and the game-over run record

pub mod engine;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use engine::{Engine, EngineHooks};
pub use highscores::{HighScores, RunRecord};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation will integrate in one tick
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Step used by the headless runner (60 Hz)
    pub const FIXED_DT: f32 = 1.0 / 60.0;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 260.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_RADIUS: f32 = 15.0;
    /// Seconds between shots
    pub const PLAYER_FIRE_INTERVAL: f32 = 0.14;
    pub const RAPID_FIRE_INTERVAL: f32 = 0.05;

    /// Dash burst
    pub const DASH_DURATION: f32 = 0.2;
    pub const DASH_COOLDOWN: f32 = 2.0;
    pub const DASH_SPEED_MULTIPLIER: f32 = 3.0;

    /// Laser energy pool (units, units/s)
    pub const LASER_MAX_ENERGY: f32 = 100.0;
    pub const LASER_DRAIN_RATE: f32 = 20.0;
    pub const LASER_RECHARGE_RATE: f32 = 10.0;
    pub const LASER_RANGE: f32 = 2000.0;
    /// Extra slack added to a target's radius for the beam test
    pub const LASER_HIT_SLACK: f32 = 10.0;
    pub const LASER_BEAM_LIFESPAN: f32 = 0.2;

    pub const MAX_MISSILES: u32 = 10;

    /// Projectile defaults
    pub const PLAYER_BULLET_SPEED: f32 = 600.0;
    pub const PLAYER_BULLET_RADIUS: f32 = 4.0;
    pub const ENEMY_BULLET_SPEED: f32 = 300.0;
    pub const ENEMY_BULLET_RADIUS: f32 = 6.0;

    /// Distance of the twin-stick crosshair from the player
    pub const CROSSHAIR_DISTANCE: f32 = 250.0;

    /// Off-screen margin for enemy spawns
    pub const ENEMY_SPAWN_MARGIN: f32 = 50.0;
    /// Off-screen margin for boss entrances
    pub const BOSS_SPAWN_MARGIN: f32 = 100.0;

    pub const POWERUP_RADIUS: f32 = 18.0;
    pub const POWERUP_LIFETIME: f32 = 10.0;
}

/// Heading (radians) from `from` toward `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for a heading in radians
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Shortest distance from `p` to the segment `a`-`b`
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
