//! Projectiles

use glam::Vec2;

use super::weapon::WeaponKind;
use crate::consts::*;
use crate::unit_from_angle;

/// What fired a bullet and how it behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletKind {
    /// Plain player shot (normal, double, shotgun)
    Standard,
    Pulse,
    Missile,
    /// Visual trace of a hit-scan shot; never collides
    LaserBeam,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    pub damage: f32,
    pub kind: BulletKind,
    /// Remaining seconds for timed projectiles (laser beams)
    pub lifespan: Option<f32>,
    pub active: bool,
}

impl Bullet {
    fn launch(pos: Vec2, angle: f32, speed: f32, radius: f32, damage: f32, kind: BulletKind) -> Self {
        Self {
            pos,
            vel: unit_from_angle(angle) * speed,
            angle,
            speed,
            radius,
            damage,
            kind,
            lifespan: None,
            active: true,
        }
    }

    /// A projectile fired by the player's current weapon
    pub fn player(pos: Vec2, angle: f32, weapon: WeaponKind) -> Self {
        let kind = match weapon {
            WeaponKind::Missile => BulletKind::Missile,
            WeaponKind::Pulse => BulletKind::Pulse,
            _ => BulletKind::Standard,
        };
        Self::launch(
            pos,
            angle,
            weapon.projectile_speed(),
            PLAYER_BULLET_RADIUS,
            weapon.damage(),
            kind,
        )
    }

    /// A hostile projectile aimed at the player
    pub fn enemy(pos: Vec2, angle: f32, damage: f32) -> Self {
        Self::launch(
            pos,
            angle,
            ENEMY_BULLET_SPEED,
            ENEMY_BULLET_RADIUS,
            damage,
            BulletKind::Enemy,
        )
    }

    /// Short-lived beam trace drawn after a laser shot
    pub fn laser_beam(pos: Vec2, angle: f32) -> Self {
        Self {
            lifespan: Some(LASER_BEAM_LIFESPAN),
            ..Self::launch(pos, angle, 0.0, PLAYER_BULLET_RADIUS, 0.0, BulletKind::LaserBeam)
        }
    }

    pub fn is_player_aligned(&self) -> bool {
        self.kind != BulletKind::Enemy
    }

    /// Whether the bullet takes part in collision checks
    pub fn collides(&self) -> bool {
        self.active && self.kind != BulletKind::LaserBeam
    }

    pub fn is_homing(&self) -> bool {
        self.kind == BulletKind::Missile
    }

    /// Point the bullet at `target`, keeping its speed
    pub fn steer_toward(&mut self, target: Vec2) {
        self.angle = crate::angle_between(self.pos, target);
        self.vel = unit_from_angle(self.angle) * self.speed;
    }

    /// Integrate position or count down the beam; deactivates when out of bounds
    pub fn update(&mut self, dt: f32, width: f32, height: f32) {
        if let Some(ref mut lifespan) = self.lifespan {
            *lifespan -= dt;
            if *lifespan <= 0.0 {
                self.active = false;
            }
            return;
        }

        self.pos += self.vel * dt;
        if self.pos.x < 0.0 || self.pos.x > width || self.pos.y < 0.0 || self.pos.y > height {
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_leaves_arena() {
        let mut b = Bullet::player(Vec2::new(5.0, 50.0), std::f32::consts::PI, WeaponKind::Normal);
        b.update(0.1, 100.0, 100.0);
        assert!(!b.active);
    }

    #[test]
    fn test_laser_beam_expires_without_moving() {
        let mut beam = Bullet::laser_beam(Vec2::new(50.0, 50.0), 0.0);
        beam.update(0.1, 100.0, 100.0);
        assert!(beam.active);
        assert_eq!(beam.pos, Vec2::new(50.0, 50.0));
        beam.update(0.15, 100.0, 100.0);
        assert!(!beam.active);
        assert!(!beam.collides());
    }

    #[test]
    fn test_weapon_stats_flow_into_bullet() {
        let missile = Bullet::player(Vec2::ZERO, 0.0, WeaponKind::Missile);
        assert!(missile.is_homing());
        assert_eq!(missile.damage, 50.0);
        assert!((missile.vel.x - 250.0).abs() < 1e-3);
        let enemy = Bullet::enemy(Vec2::ZERO, 0.0, 5.0);
        assert!(!enemy.is_player_aligned());
    }
}
