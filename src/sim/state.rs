//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. Two states built from the same
//! seed and fed the same inputs evolve identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::boss::Boss;
use super::bullet::Bullet;
use super::effects::{Background, Particle, ScreenShake};
use super::enemy::{Enemy, spawn_interval};
use super::pickup::Powerup;
use super::player::Player;
use super::stats::RunStats;
use crate::consts::CROSSHAIR_DISTANCE;
use crate::tuning::Tuning;

/// Stream selector for the cosmetic RNG
const FX_STREAM: u64 = 0x5eed_f00d;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay (waves or boss fight)
    Playing,
    /// Between-level pause; only cosmetics advance
    LevelTransition,
    /// Run ended
    GameOver,
}

/// A live target for aiming and homing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Enemy(usize),
    Boss(usize),
}

pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Seconds left in the level transition
    pub transition_timer: f32,

    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub bosses: Vec<Boss>,
    pub powerups: Vec<Powerup>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,

    pub score: u64,
    pub level: u32,
    pub kills_this_level: u32,
    pub kill_quota: u32,
    pub combo: u32,
    /// Seconds until the combo lapses
    pub combo_timer: f32,

    /// Simulation clock that drives every time-based pattern
    pub time: f32,
    /// Seconds of play, including level transitions
    pub play_time: f32,
    /// Seconds until the next enemy wave
    pub spawn_timer: f32,
    pub spawn_interval: f32,
    /// Seconds until the next aid powerup during a boss fight
    pub boss_powerup_timer: f32,

    pub shake: ScreenShake,
    pub background: Background,
    /// Where the reticle is drawn
    pub crosshair: Vec2,
    /// Heading of the most recent shot
    pub aim_angle: f32,

    pub stats: RunStats,
    /// Gameplay randomness (spawns, drops, bosses)
    pub rng: Pcg32,
    /// Cosmetic randomness (particles, starfield, shake)
    pub fx_rng: Pcg32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self::with_tuning(width, height, seed, Tuning::default())
    }

    pub fn with_tuning(width: f32, height: f32, seed: u64, tuning: Tuning) -> Self {
        let width = if width.is_finite() { width.max(1.0) } else { 1.0 };
        let height = if height.is_finite() { height.max(1.0) } else { 1.0 };

        let rng = Pcg32::seed_from_u64(seed);
        let mut fx_rng = Pcg32::new(seed, FX_STREAM);
        let background = Background::new(&mut fx_rng, width, height);
        let player = Player::new(width, height);
        let crosshair = player.pos + Vec2::new(0.0, -CROSSHAIR_DISTANCE);
        let kill_quota = tuning.kill_quota(1);

        log::debug!("New game: seed {seed}, arena {width}x{height}");

        Self {
            seed,
            width,
            height,
            tuning,
            phase: GamePhase::Playing,
            transition_timer: 0.0,
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            bosses: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            score: 0,
            level: 1,
            kills_this_level: 0,
            kill_quota,
            combo: 0,
            combo_timer: 0.0,
            time: 0.0,
            play_time: 0.0,
            spawn_timer: 0.0,
            spawn_interval: spawn_interval(1),
            boss_powerup_timer: 0.0,
            shake: ScreenShake::default(),
            background,
            crosshair,
            aim_angle: -std::f32::consts::FRAC_PI_2,
            stats: RunStats::default(),
            rng,
            fx_rng,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn in_level_transition(&self) -> bool {
        self.phase == GamePhase::LevelTransition
    }

    /// A boss fight is in progress
    pub fn boss_active(&self) -> bool {
        !self.bosses.is_empty()
    }

    /// Kill quota for the current level has been met
    pub fn quota_met(&self) -> bool {
        self.kills_this_level >= self.kill_quota
    }

    /// Nearest live enemy or boss to `from`. Enemies win ties.
    pub fn nearest_target(&self, from: Vec2) -> Option<(Target, Vec2)> {
        let enemies = self
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.active)
            .map(|(i, e)| (Target::Enemy(i), e.pos));
        let bosses = self
            .bosses
            .iter()
            .enumerate()
            .filter(|(_, b)| b.active)
            .map(|(i, b)| (Target::Boss(i), b.pos));

        let mut best: Option<(Target, Vec2, f32)> = None;
        for (target, pos) in enemies.chain(bosses) {
            let d = from.distance_squared(pos);
            if best.is_none_or(|(_, _, best_d)| d < best_d) {
                best = Some((target, pos, d));
            }
        }
        best.map(|(target, pos, _)| (target, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyKind;

    #[test]
    fn test_new_game_defaults() {
        let state = GameState::new(800.0, 600.0, 42);
        assert_eq!(state.level, 1);
        assert_eq!(state.kill_quota, 15);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!(!state.boss_active());
    }

    #[test]
    fn test_degenerate_arena_is_sanitised() {
        let state = GameState::new(f32::NAN, -5.0, 1);
        assert_eq!(state.width, 1.0);
        assert_eq!(state.height, 1.0);
    }

    #[test]
    fn test_nearest_target() {
        let mut state = GameState::new(800.0, 600.0, 1);
        let from = Vec2::new(400.0, 300.0);
        assert!(state.nearest_target(from).is_none());

        state.enemies.push(Enemy::new(Vec2::new(500.0, 300.0), EnemyKind::Normal));
        state.enemies.push(Enemy::new(Vec2::new(420.0, 300.0), EnemyKind::Fast));
        let (target, pos) = state.nearest_target(from).unwrap();
        assert_eq!(target, Target::Enemy(1));
        assert_eq!(pos, Vec2::new(420.0, 300.0));

        state.enemies[1].active = false;
        assert_eq!(state.nearest_target(from).unwrap().0, Target::Enemy(0));
    }
}
