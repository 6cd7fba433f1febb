//! Cosmetic systems: particles, screen shake and the scrolling backdrop
//!
//! Nothing here feeds back into gameplay. Randomness comes from the state's
//! effects RNG so visual output never perturbs the gameplay stream.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum particles alive at once; the oldest are dropped first
pub const MAX_PARTICLES: usize = 512;
pub const STAR_COUNT: usize = 150;

/// Particle tints (0xRRGGBB)
pub mod palette {
    pub const SPARK: u32 = 0xffff00;
    pub const PLAYER_HIT: u32 = 0xff0000;
    pub const KAMIKAZE: u32 = 0xffffff;
    pub const NORMAL_ENEMY: u32 = 0xff3366;
    pub const FAST_ENEMY: u32 = 0xffaa00;
    pub const SHOOTER_ENEMY: u32 = 0xaa33ff;
    pub const BOSS: u32 = 0xff0066;
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per 1/60 s
    pub vel: Vec2,
    pub color: u32,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    /// Size lost per update
    pub decay: f32,
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt * 60.0;
        self.life -= dt;
        self.size = (self.size - self.decay).max(0.0);
    }

    /// Remaining opacity in [0, 1]
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Burst of `count` particles flying out from `pos`
pub fn spawn_explosion<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    color: u32,
    count: usize,
) {
    // Drop the oldest to make room
    let count = count.min(MAX_PARTICLES);
    let excess = (particles.len() + count).saturating_sub(MAX_PARTICLES);
    particles.drain(..excess.min(particles.len()));
    for _ in 0..count {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = rng.random::<f32>() * (2.0 + rng.random::<f32>() * 3.0);
        let life = 0.5 + rng.random::<f32>() * 0.5;
        particles.push(Particle {
            pos,
            vel: crate::unit_from_angle(angle) * speed,
            color,
            life,
            max_life: life,
            size: 2.0 + rng.random::<f32>() * 3.0,
            decay: 0.02 + rng.random::<f32>() * 0.05,
        });
    }
}

pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.update(dt);
    }
    particles.retain(|p| p.life > 0.0);
}

/// Camera shake requested by impacts
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenShake {
    pub time: f32,
    pub magnitude: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self, time: f32, magnitude: f32) {
        self.time = time;
        self.magnitude = magnitude;
    }

    pub fn is_active(&self) -> bool {
        self.time > 0.0
    }

    pub fn update(&mut self, dt: f32) {
        if self.time > 0.0 {
            self.time -= dt;
            if self.time <= 0.0 {
                self.time = 0.0;
                self.magnitude = 0.0;
            }
        }
    }

    /// Random camera offset for this frame
    pub fn offset<R: Rng>(&self, rng: &mut R) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * self.magnitude
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundTheme {
    #[default]
    Space,
    Nebula,
    Cosmic,
    Void,
    Galaxy,
}

impl BackgroundTheme {
    pub const ALL: [BackgroundTheme; 5] = [
        BackgroundTheme::Space,
        BackgroundTheme::Nebula,
        BackgroundTheme::Cosmic,
        BackgroundTheme::Void,
        BackgroundTheme::Galaxy,
    ];

    /// Theme for a level; later levels stay on the last theme
    pub fn for_level(level: u32) -> Self {
        let index = (level.max(1) as usize - 1).min(Self::ALL.len() - 1);
        Self::ALL[index]
    }
}

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per 1/60 s
    pub speed: f32,
    pub brightness: f32,
}

/// Scrolling starfield with a themed tint that cross-fades between levels
#[derive(Debug, Clone)]
pub struct Background {
    pub stars: Vec<Star>,
    pub theme: BackgroundTheme,
    pub next_theme: Option<BackgroundTheme>,
    /// Cross-fade progress toward `next_theme` in [0, 1]
    pub transition: f32,
    width: f32,
    height: f32,
}

impl Background {
    pub fn new<R: Rng>(rng: &mut R, width: f32, height: f32) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
                size: rng.random::<f32>() * 2.0,
                speed: 0.1 + rng.random::<f32>() * 0.5,
                brightness: rng.random::<f32>(),
            })
            .collect();
        Self {
            stars,
            theme: BackgroundTheme::Space,
            next_theme: None,
            transition: 0.0,
            width,
            height,
        }
    }

    pub fn set_theme(&mut self, level: u32) {
        let theme = BackgroundTheme::for_level(level);
        if theme != self.theme {
            self.next_theme = Some(theme);
            self.transition = 0.0;
        }
    }

    pub fn update<R: Rng>(&mut self, dt: f32, time: f32, rng: &mut R) {
        for star in self.stars.iter_mut() {
            star.pos.y += star.speed * 60.0 * dt;
            if star.pos.y > self.height {
                star.pos.y = 0.0;
                star.pos.x = rng.random::<f32>() * self.width;
            }
            star.brightness = (time + star.pos.x).sin() * 0.5 + 0.5;
        }

        if let Some(next) = self.next_theme {
            self.transition += dt * 0.5;
            if self.transition >= 1.0 {
                self.theme = next;
                self.next_theme = None;
                self.transition = 0.0;
            }
        }
    }
}
