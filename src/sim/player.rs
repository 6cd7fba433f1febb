//! The player ship: movement, dash, weapon and powerup timers

use glam::Vec2;

use super::weapon::{ResourceCost, WeaponKind};
use crate::consts::*;

pub const SHIELD_DURATION: f32 = 5.0;
pub const RAPID_FIRE_DURATION: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,

    pub weapon: WeaponKind,
    /// Seconds until the weapon reverts to `Normal`
    pub weapon_time: f32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,

    pub shield_active: bool,
    pub shield_time: f32,
    pub rapid_fire_active: bool,
    pub rapid_fire_time: f32,

    pub dash_cooldown: f32,
    pub dashing: bool,
    pub dash_time: f32,
    /// Velocity captured when the dash started
    pub dash_dir: Vec2,

    pub laser_energy: f32,
    pub max_laser_energy: f32,
    pub missiles: u32,
    pub max_missiles: u32,
}

impl Player {
    /// Spawn in the middle of the arena
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(width / 2.0, height / 2.0),
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            weapon: WeaponKind::Normal,
            weapon_time: 0.0,
            fire_cooldown: 0.0,
            shield_active: false,
            shield_time: 0.0,
            rapid_fire_active: false,
            rapid_fire_time: 0.0,
            dash_cooldown: 0.0,
            dashing: false,
            dash_time: 0.0,
            dash_dir: Vec2::ZERO,
            laser_energy: LASER_MAX_ENERGY,
            max_laser_energy: LASER_MAX_ENERGY,
            missiles: 0,
            max_missiles: MAX_MISSILES,
        }
    }

    /// Seconds between shots, shortened by rapid fire
    pub fn fire_interval(&self) -> f32 {
        if self.rapid_fire_active {
            RAPID_FIRE_INTERVAL
        } else {
            PLAYER_FIRE_INTERVAL
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Advance timers and movement. `movement` is a unit (or zero) direction.
    /// Returns true when a dash started this tick.
    pub fn update(
        &mut self,
        movement: Vec2,
        dash_requested: bool,
        firing: bool,
        dt: f32,
        width: f32,
        height: f32,
    ) -> bool {
        if self.shield_active {
            self.shield_time -= dt;
            if self.shield_time <= 0.0 {
                self.shield_active = false;
                self.shield_time = 0.0;
            }
        }
        if self.rapid_fire_active {
            self.rapid_fire_time -= dt;
            if self.rapid_fire_time <= 0.0 {
                self.rapid_fire_active = false;
                self.rapid_fire_time = 0.0;
            }
        }

        if self.weapon_time > 0.0 {
            self.weapon_time -= dt;
            if self.weapon_time <= 0.0 {
                self.weapon_time = 0.0;
                self.weapon = WeaponKind::Normal;
            }
        }

        // Holding the laser trigger never recharges, even when empty
        if self.weapon.cost() == ResourceCost::Energy && firing {
            self.laser_energy -= LASER_DRAIN_RATE * dt;
        } else {
            self.laser_energy += LASER_RECHARGE_RATE * dt;
        }
        self.laser_energy = self.laser_energy.clamp(0.0, self.max_laser_energy);

        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);

        let mut dashed = false;
        if self.dashing {
            self.dash_time -= dt;
            if self.dash_time <= 0.0 {
                self.dashing = false;
                self.dash_time = 0.0;
                self.vel = Vec2::ZERO;
            } else {
                self.pos += self.dash_dir * DASH_SPEED_MULTIPLIER * dt;
            }
        } else {
            self.vel = movement * self.speed;
            self.pos += self.vel * dt;

            if dash_requested && self.dash_cooldown <= 0.0 && movement != Vec2::ZERO {
                self.dashing = true;
                self.dash_time = DASH_DURATION;
                self.dash_cooldown = DASH_COOLDOWN;
                self.dash_dir = self.vel;
                dashed = true;
            }
        }

        self.clamp_to_arena(width, height);
        dashed
    }

    /// Keep the whole ship inside the arena
    pub fn clamp_to_arena(&mut self, width: f32, height: f32) {
        let r = self.radius;
        self.pos.x = self.pos.x.clamp(r, (width - r).max(r));
        self.pos.y = self.pos.y.clamp(r, (height - r).max(r));
    }

    /// Subtract health, clamped at zero. Returns the damage actually applied.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
        before - self.health
    }

    /// Restore health, capped at max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health + amount.max(0.0)).clamp(0.0, self.max_health);
        self.health - before
    }

    /// Switch weapon and refresh its countdown; laser and missile refill
    pub fn equip(&mut self, weapon: WeaponKind) {
        self.weapon = weapon;
        self.weapon_time = weapon.duration();
        match weapon.cost() {
            ResourceCost::Energy => self.laser_energy = self.max_laser_energy,
            ResourceCost::Ammo => self.missiles = self.max_missiles,
            ResourceCost::Free => {}
        }
    }

    pub fn activate_shield(&mut self) {
        self.shield_active = true;
        self.shield_time = SHIELD_DURATION;
    }

    pub fn activate_rapid_fire(&mut self) {
        self.rapid_fire_active = true;
        self.rapid_fire_time = RAPID_FIRE_DURATION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    #[test]
    fn test_weapon_reverts_to_normal() {
        let mut p = Player::new(W, H);
        p.equip(WeaponKind::Double);
        assert_eq!(p.weapon_time, 8.0);
        for _ in 0..100 {
            p.update(Vec2::ZERO, false, false, 0.1, W, H);
        }
        assert_eq!(p.weapon, WeaponKind::Normal);
        assert_eq!(p.weapon_time, 0.0);
    }

    #[test]
    fn test_laser_energy_drains_and_recharges_within_bounds() {
        let mut p = Player::new(W, H);
        p.equip(WeaponKind::Laser);
        for _ in 0..80 {
            p.update(Vec2::ZERO, false, true, 0.1, W, H);
        }
        assert_eq!(p.laser_energy, 0.0);
        for _ in 0..200 {
            p.update(Vec2::ZERO, false, false, 0.1, W, H);
        }
        assert_eq!(p.laser_energy, p.max_laser_energy);
    }

    #[test]
    fn test_dash_requires_movement_and_cooldown() {
        let mut p = Player::new(W, H);
        assert!(!p.update(Vec2::ZERO, true, false, 0.016, W, H));
        assert!(p.update(Vec2::X, true, false, 0.016, W, H));
        assert!(p.dashing);
        let start = p.pos.x;
        p.update(Vec2::X, true, false, 0.05, W, H);
        // Dash moves at three times walking speed
        assert!((p.pos.x - start - PLAYER_SPEED * 3.0 * 0.05).abs() < 1e-2);
        // Still cooling down once the burst ends
        for _ in 0..10 {
            p.update(Vec2::X, false, false, 0.05, W, H);
        }
        assert!(!p.dashing);
        assert!(!p.update(Vec2::X, true, false, 0.016, W, H));
    }

    #[test]
    fn test_position_clamped() {
        let mut p = Player::new(W, H);
        for _ in 0..100 {
            p.update(Vec2::new(-1.0, 0.0), false, false, 0.1, W, H);
        }
        assert_eq!(p.pos.x, p.radius);
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut p = Player::new(W, H);
        assert_eq!(p.take_damage(150.0), 100.0);
        assert_eq!(p.health, 0.0);
        assert_eq!(p.heal(500.0), 100.0);
        assert_eq!(p.health, p.max_health);
    }

    #[test]
    fn test_rapid_fire_shortens_interval() {
        let mut p = Player::new(W, H);
        p.activate_rapid_fire();
        assert_eq!(p.fire_interval(), RAPID_FIRE_INTERVAL);
        for _ in 0..60 {
            p.update(Vec2::ZERO, false, false, 0.1, W, H);
        }
        assert_eq!(p.fire_interval(), PLAYER_FIRE_INTERVAL);
    }

    proptest! {
        #[test]
        fn prop_laser_energy_bounded(
            steps in prop::collection::vec((any::<bool>(), 0.0f32..0.2), 1..300),
        ) {
            let mut p = Player::new(W, H);
            p.equip(WeaponKind::Laser);
            for (firing, dt) in steps {
                p.update(Vec2::ZERO, false, firing, dt, W, H);
                prop_assert!(p.laser_energy >= 0.0);
                prop_assert!(p.laser_energy <= p.max_laser_energy);
            }
        }
    }
}
