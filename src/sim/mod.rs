//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each entity list)
//! - No rendering or audio

pub mod autopilot;
pub mod boss;
pub mod bullet;
pub mod collision;
pub mod effects;
pub mod enemy;
pub mod events;
pub mod pickup;
pub mod player;
pub mod state;
pub mod stats;
pub mod tick;
pub mod weapon;

pub use boss::{Boss, BossKind, BossState};
pub use bullet::{Bullet, BulletKind};
pub use collision::{Aabb, circles_overlap};
pub use effects::{Background, BackgroundTheme, Particle, ScreenShake};
pub use enemy::{Enemy, EnemyKind};
pub use events::{GameEvent, SoundEvent};
pub use pickup::{Powerup, PowerupKind};
pub use player::Player;
pub use state::{GamePhase, GameState, Target};
pub use stats::RunStats;
pub use tick::{Joystick, Key, TickInput, aim_angle, tick};
pub use weapon::{FirePattern, ResourceCost, WeaponKind};
