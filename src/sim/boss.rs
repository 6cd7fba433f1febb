//! Bosses: entrance, per-type movement and attack patterns
//!
//! A boss starts `Entering`, glides toward an on-screen anchor picked from its
//! spawn edge, then switches to `Idle` for the rest of its life. Only idle
//! bosses move by type and attack. Removal on death is the tick's job.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use crate::consts::BOSS_SPAWN_MARGIN;
use crate::unit_from_angle;

/// Damage of every boss bullet
pub const BOSS_BULLET_DAMAGE: f32 = 20.0;
/// Distance at which an entering boss snaps onto its anchor
pub const BOSS_ARRIVAL_DISTANCE: f32 = 5.0;
pub const SPIRAL_BULLET_COUNT: u32 = 16;
/// Spiral rotation (radians per second of simulation time)
pub const SPIRAL_SPIN_RATE: f32 = 10.0;
pub const TANK_SPREAD_STEP: f32 = 0.15;
pub const SHOOTER_BURST_OFFSETS: [f32; 5] = [0.0, 0.1, -0.1, 0.2, -0.2];
pub const SHOOTER_ORBIT_RADIUS: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BossKind {
    Teleporter,
    Tank,
    Shooter,
}

impl BossKind {
    pub const ALL: [BossKind; 3] = [BossKind::Teleporter, BossKind::Tank, BossKind::Shooter];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BossKind::Teleporter => "teleporter",
            BossKind::Tank => "tank",
            BossKind::Shooter => "shooter",
        }
    }

    /// Square footprint (px)
    pub fn size(&self) -> f32 {
        match self {
            BossKind::Teleporter => 70.0,
            BossKind::Tank => 100.0,
            BossKind::Shooter => 80.0,
        }
    }

    pub fn health_multiplier(&self) -> f32 {
        match self {
            BossKind::Teleporter => 1.2,
            BossKind::Tank => 2.5,
            BossKind::Shooter => 1.5,
        }
    }

    pub fn speed(&self, level: u32) -> f32 {
        let level = level as f32;
        match self {
            BossKind::Teleporter => 100.0 + level * 8.0,
            BossKind::Tank => 40.0 + level * 3.0,
            BossKind::Shooter => 70.0 + level * 5.0,
        }
    }

    pub fn base_attack_interval(&self) -> f32 {
        match self {
            BossKind::Teleporter => 1.0,
            BossKind::Tank => 1.8,
            BossKind::Shooter => 0.6,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            BossKind::Teleporter => "TELEPORTER",
            BossKind::Tank => "TANK",
            BossKind::Shooter => "SHOOTER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossState {
    Entering,
    Idle,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub kind: BossKind,
    pub name: String,
    pub level: u32,
    pub pos: Vec2,
    /// Anchor the entrance glides toward
    pub target: Vec2,
    pub size: f32,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub state: BossState,
    pub attack_interval: f32,
    pub attack_timer: f32,
    pub teleport_interval: f32,
    pub teleport_timer: f32,
    /// Tank patrol direction (+1 right, -1 left)
    pub move_dir: f32,
    pub active: bool,
}

/// Base health for a boss at `level`
pub fn boss_base_health(level: u32) -> f32 {
    300.0 * 1.5_f32.powi(level.max(1) as i32 - 1)
}

impl Boss {
    /// Boss entering from the given edge (0 top, 1 right, 2 bottom, 3 left)
    pub fn new(kind: BossKind, level: u32, edge: u8, width: f32, height: f32) -> Self {
        let margin = BOSS_SPAWN_MARGIN;
        let (pos, target) = match edge {
            0 => (
                Vec2::new(width / 2.0, -margin),
                Vec2::new(width / 2.0, 100.0),
            ),
            1 => (
                Vec2::new(width + margin, height / 2.0),
                Vec2::new(width - 150.0, height / 2.0),
            ),
            2 => (
                Vec2::new(width / 2.0, height + margin),
                Vec2::new(width / 2.0, height - 150.0),
            ),
            _ => (
                Vec2::new(-margin, height / 2.0),
                Vec2::new(150.0, height / 2.0),
            ),
        };

        let health = boss_base_health(level) * kind.health_multiplier();
        let attack_speedup = (1.0 - level as f32 * 0.08).max(0.4);
        let size = kind.size();

        Self {
            kind,
            name: format!("{} MK-{}", kind.title(), level),
            level,
            pos,
            target,
            size,
            radius: size / 2.0,
            health,
            max_health: health,
            speed: kind.speed(level),
            state: BossState::Entering,
            attack_interval: kind.base_attack_interval() * attack_speedup,
            attack_timer: 0.0,
            teleport_interval: (3.0 - level as f32 * 0.25).max(0.8),
            teleport_timer: 0.0,
            move_dir: 1.0,
            active: true,
        }
    }

    /// Random type and entrance edge
    pub fn spawn<R: Rng>(rng: &mut R, level: u32, width: f32, height: f32) -> Self {
        let kind = BossKind::random(rng);
        let edge = rng.random_range(0..4u8);
        Self::new(kind, level, edge, width, height)
    }

    pub fn is_entering(&self) -> bool {
        self.state == BossState::Entering
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Advance one tick. `time` is the simulation clock. Returns the bullets
    /// of an attack fired this tick (empty otherwise).
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        time: f32,
        player_pos: Vec2,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Vec<Bullet> {
        if self.state == BossState::Entering {
            let to_target = self.target - self.pos;
            let dist = to_target.length();
            if dist > BOSS_ARRIVAL_DISTANCE {
                let step = (self.speed * dt).min(dist);
                self.pos += to_target / dist * step;
            } else {
                self.pos = self.target;
                self.state = BossState::Idle;
            }
            return Vec::new();
        }

        match self.kind {
            BossKind::Teleporter => {
                self.teleport_timer -= dt;
                if self.teleport_timer <= 0.0 {
                    self.teleport(rng, width, height);
                    self.teleport_timer = self.teleport_interval;
                }
                // Gentle hover
                self.pos.y += (time * 2.0).sin() * 30.0 * dt;
            }
            BossKind::Tank => {
                self.pos.x += self.speed * self.move_dir * dt;
                if self.pos.x > width - 120.0 {
                    self.pos.x = width - 120.0;
                    self.move_dir = -1.0;
                } else if self.pos.x < 120.0 {
                    self.pos.x = 120.0;
                    self.move_dir = 1.0;
                }
            }
            BossKind::Shooter => {
                self.pos = player_pos + unit_from_angle(time) * SHOOTER_ORBIT_RADIUS;
                self.pos.x = self.pos.x.clamp(100.0, (width - 100.0).max(100.0));
                self.pos.y = self.pos.y.clamp(100.0, (height - 100.0).max(100.0));
            }
        }

        self.attack_timer -= dt;
        if self.attack_timer <= 0.0 {
            self.attack_timer = self.attack_interval;
            return self.attack(time, player_pos);
        }
        Vec::new()
    }

    fn teleport<R: Rng>(&mut self, rng: &mut R, width: f32, height: f32) {
        self.pos.x = 150.0 + rng.random::<f32>() * (width - 300.0).max(0.0);
        self.pos.y = 100.0 + rng.random::<f32>() * (height - 200.0).max(0.0);
    }

    /// The type's attack pattern from the current position
    pub fn attack(&self, time: f32, player_pos: Vec2) -> Vec<Bullet> {
        match self.kind {
            BossKind::Teleporter => {
                let offset = time * SPIRAL_SPIN_RATE;
                let step = std::f32::consts::TAU / SPIRAL_BULLET_COUNT as f32;
                (0..SPIRAL_BULLET_COUNT)
                    .map(|i| Bullet::enemy(self.pos, step * i as f32 + offset, BOSS_BULLET_DAMAGE))
                    .collect()
            }
            BossKind::Tank => {
                let base = crate::angle_between(self.pos, player_pos);
                (-4..=4)
                    .map(|i| {
                        Bullet::enemy(self.pos, base + i as f32 * TANK_SPREAD_STEP, BOSS_BULLET_DAMAGE)
                    })
                    .collect()
            }
            BossKind::Shooter => {
                let base = crate::angle_between(self.pos, player_pos);
                SHOOTER_BURST_OFFSETS
                    .iter()
                    .map(|offset| Bullet::enemy(self.pos, base + offset, BOSS_BULLET_DAMAGE))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const W: f32 = 1280.0;
    const H: f32 = 720.0;

    fn run_until_idle(boss: &mut Boss, rng: &mut Pcg32) -> u32 {
        let mut ticks = 0;
        while boss.is_entering() {
            let shots = boss.update(1.0 / 60.0, ticks as f32 / 60.0, Vec2::new(640.0, 360.0), W, H, rng);
            assert!(shots.is_empty(), "boss attacked while entering");
            ticks += 1;
            assert!(ticks < 10_000, "boss never arrived");
        }
        ticks
    }

    #[test]
    fn test_entering_then_idle_before_first_attack() {
        let mut rng = Pcg32::seed_from_u64(1);
        for kind in BossKind::ALL {
            for edge in 0..4 {
                let mut boss = Boss::new(kind, 1, edge, W, H);
                let target = boss.target;
                run_until_idle(&mut boss, &mut rng);
                assert_eq!(boss.pos, target);
                assert_eq!(boss.state, BossState::Idle);
            }
        }
    }

    #[test]
    fn test_attack_patterns() {
        let player = Vec2::new(640.0, 600.0);
        let mut boss = Boss::new(BossKind::Teleporter, 1, 0, W, H);
        assert_eq!(boss.attack(0.0, player).len(), 16);
        boss.kind = BossKind::Tank;
        assert_eq!(boss.attack(0.0, player).len(), 9);
        boss.kind = BossKind::Shooter;
        let burst = boss.attack(0.0, player);
        assert_eq!(burst.len(), 5);
        assert!(burst.iter().all(|b| b.damage == BOSS_BULLET_DAMAGE && !b.is_player_aligned()));
    }

    #[test]
    fn test_spiral_rotates_with_simulation_time() {
        let boss = Boss::new(BossKind::Teleporter, 1, 0, W, H);
        let a = boss.attack(0.0, Vec2::ZERO);
        let b = boss.attack(0.05, Vec2::ZERO);
        assert!((b[0].angle - a[0].angle - 0.5).abs() < 1e-4);
        // Same time, same pattern
        let c = boss.attack(0.05, Vec2::ZERO);
        assert_eq!(b[3].angle, c[3].angle);
    }

    #[test]
    fn test_health_scales_with_level() {
        let l1 = Boss::new(BossKind::Tank, 1, 0, W, H);
        let l3 = Boss::new(BossKind::Tank, 3, 0, W, H);
        assert!((l1.max_health - 750.0).abs() < 1e-2);
        assert!((l3.max_health - 750.0 * 2.25).abs() < 1e-1);
        assert_eq!(l3.name, "TANK MK-3");
    }

    #[test]
    fn test_tank_patrol_stays_in_lane() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut boss = Boss::new(BossKind::Tank, 1, 3, W, H);
        run_until_idle(&mut boss, &mut rng);
        for i in 0..5000 {
            boss.update(1.0 / 60.0, i as f32 / 60.0, Vec2::new(640.0, 360.0), W, H, &mut rng);
            assert!(boss.pos.x >= 120.0 && boss.pos.x <= W - 120.0);
        }
    }

    #[test]
    fn test_shooter_orbit_clamped() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut boss = Boss::new(BossKind::Shooter, 1, 0, W, H);
        run_until_idle(&mut boss, &mut rng);
        for i in 0..600 {
            boss.update(1.0 / 60.0, i as f32 / 60.0, Vec2::new(20.0, 20.0), W, H, &mut rng);
            assert!(boss.pos.x >= 100.0 && boss.pos.y >= 100.0);
        }
    }
}
