//! Powerups dropped by enemies or summoned during boss fights

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::weapon::WeaponKind;
use crate::consts::{POWERUP_LIFETIME, POWERUP_RADIUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerupKind {
    Rapid,
    Double,
    Shield,
    Shotgun,
    Laser,
    Missile,
    Health,
    Pulse,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 8] = [
        PowerupKind::Rapid,
        PowerupKind::Double,
        PowerupKind::Shield,
        PowerupKind::Shotgun,
        PowerupKind::Laser,
        PowerupKind::Missile,
        PowerupKind::Health,
        PowerupKind::Pulse,
    ];

    /// Uniformly random kind
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Rapid => "rapid",
            PowerupKind::Double => "double",
            PowerupKind::Shield => "shield",
            PowerupKind::Shotgun => "shotgun",
            PowerupKind::Laser => "laser",
            PowerupKind::Missile => "missile",
            PowerupKind::Health => "health",
            PowerupKind::Pulse => "pulse",
        }
    }

    /// The weapon this powerup equips, if any
    pub fn weapon(&self) -> Option<WeaponKind> {
        match self {
            PowerupKind::Double => Some(WeaponKind::Double),
            PowerupKind::Shotgun => Some(WeaponKind::Shotgun),
            PowerupKind::Laser => Some(WeaponKind::Laser),
            PowerupKind::Missile => Some(WeaponKind::Missile),
            PowerupKind::Pulse => Some(WeaponKind::Pulse),
            PowerupKind::Rapid | PowerupKind::Shield | PowerupKind::Health => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Powerup {
    pub pos: Vec2,
    pub kind: PowerupKind,
    pub radius: f32,
    /// Seconds until it expires uncollected
    pub lifetime: f32,
    /// Cosmetic pulse phase
    pub pulse: f32,
    pub active: bool,
}

impl Powerup {
    pub fn new(pos: Vec2, kind: PowerupKind) -> Self {
        Self {
            pos,
            kind,
            radius: POWERUP_RADIUS,
            lifetime: POWERUP_LIFETIME,
            pulse: 0.0,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.active = false;
        }
        self.pulse += dt * 5.0;
    }
}

/// Powerup of a random kind at `pos`
pub fn spawn_powerup<R: Rng>(rng: &mut R, pos: Vec2) -> Powerup {
    Powerup::new(pos, PowerupKind::random(rng))
}

/// Aid drop during a boss fight: random position inside the arena, biased
/// toward health when the player is hurt
pub fn spawn_aid_powerup<R: Rng>(
    rng: &mut R,
    width: f32,
    height: f32,
    low_health: bool,
    health_bias: f64,
) -> Powerup {
    let margin = 50.0;
    let x = margin + rng.random::<f32>() * (width - 2.0 * margin).max(0.0);
    let y = margin + rng.random::<f32>() * (height - 2.0 * margin).max(0.0);
    let kind = if low_health && rng.random_bool(health_bias.clamp(0.0, 1.0)) {
        PowerupKind::Health
    } else {
        PowerupKind::random(rng)
    };
    Powerup::new(Vec2::new(x, y), kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_powerup_expires() {
        let mut p = Powerup::new(Vec2::ZERO, PowerupKind::Shield);
        p.update(9.9);
        assert!(p.active);
        p.update(0.2);
        assert!(!p.active);
    }

    #[test]
    fn test_random_kind_covers_all() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            seen.insert(PowerupKind::random(&mut rng));
        }
        assert_eq!(seen.len(), PowerupKind::ALL.len());
    }

    #[test]
    fn test_aid_drop_favours_health_when_low() {
        let mut rng = Pcg32::seed_from_u64(9);
        let health = (0..1000)
            .map(|_| spawn_aid_powerup(&mut rng, 800.0, 600.0, true, 0.6))
            .filter(|p| p.kind == PowerupKind::Health)
            .count();
        // 60% forced plus an eighth of the remainder
        assert!(health > 580 && health < 730, "got {health}");

        for _ in 0..200 {
            let p = spawn_aid_powerup(&mut rng, 800.0, 600.0, false, 0.6);
            assert!(p.pos.x >= 50.0 && p.pos.x <= 750.0);
            assert!(p.pos.y >= 50.0 && p.pos.y <= 550.0);
        }
    }

    #[test]
    fn test_weapon_mapping() {
        assert_eq!(PowerupKind::Laser.weapon(), Some(WeaponKind::Laser));
        assert_eq!(PowerupKind::Health.weapon(), None);
    }
}
