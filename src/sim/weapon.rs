//! Weapon kinds and their behaviour table

use serde::{Deserialize, Serialize};

/// The weapon currently equipped by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    #[default]
    Normal,
    Double,
    Shotgun,
    Laser,
    Missile,
    Pulse,
}

/// How a weapon turns one trigger pull into damage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FirePattern {
    /// One bullet along the aim
    Single,
    /// Center bullet plus one on each side, offset perpendicular to the aim
    Parallel { offset: f32 },
    /// Center bullet plus extra bullets at fixed angular offsets
    Fan { offsets: &'static [f32] },
    /// Instant ray test along the aim
    HitScan,
    /// One projectile that retargets every tick
    Homing,
    /// Evenly spaced bullets in every direction
    Ring { count: u32 },
}

/// What a shot consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourceCost {
    Free,
    /// Laser energy drained per second of firing
    Energy,
    /// One missile per shot
    Ammo,
}

pub const SHOTGUN_SPREAD: [f32; 4] = [-0.3, -0.15, 0.15, 0.3];

impl WeaponKind {
    pub const ALL: [WeaponKind; 6] = [
        WeaponKind::Normal,
        WeaponKind::Double,
        WeaponKind::Shotgun,
        WeaponKind::Laser,
        WeaponKind::Missile,
        WeaponKind::Pulse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Normal => "normal",
            WeaponKind::Double => "double",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Laser => "laser",
            WeaponKind::Missile => "missile",
            WeaponKind::Pulse => "pulse",
        }
    }

    pub fn pattern(&self) -> FirePattern {
        match self {
            WeaponKind::Normal => FirePattern::Single,
            WeaponKind::Double => FirePattern::Parallel { offset: 10.0 },
            WeaponKind::Shotgun => FirePattern::Fan {
                offsets: &SHOTGUN_SPREAD,
            },
            WeaponKind::Laser => FirePattern::HitScan,
            WeaponKind::Missile => FirePattern::Homing,
            WeaponKind::Pulse => FirePattern::Ring { count: 12 },
        }
    }

    /// Damage per projectile (or per beam contact)
    pub fn damage(&self) -> f32 {
        match self {
            WeaponKind::Normal | WeaponKind::Double | WeaponKind::Shotgun => 10.0,
            WeaponKind::Laser => 25.0,
            WeaponKind::Missile => 50.0,
            WeaponKind::Pulse => 15.0,
        }
    }

    /// Projectile speed (px/s); zero for hit-scan
    pub fn projectile_speed(&self) -> f32 {
        match self {
            WeaponKind::Laser => 0.0,
            WeaponKind::Missile => 250.0,
            WeaponKind::Pulse => 300.0,
            _ => crate::consts::PLAYER_BULLET_SPEED,
        }
    }

    pub fn cost(&self) -> ResourceCost {
        match self {
            WeaponKind::Laser => ResourceCost::Energy,
            WeaponKind::Missile => ResourceCost::Ammo,
            _ => ResourceCost::Free,
        }
    }

    /// Seconds a pickup keeps this weapon equipped
    pub fn duration(&self) -> f32 {
        match self {
            WeaponKind::Normal => 0.0,
            WeaponKind::Double => 8.0,
            WeaponKind::Shotgun | WeaponKind::Pulse => 10.0,
            WeaponKind::Laser | WeaponKind::Missile => 12.0,
        }
    }
}
