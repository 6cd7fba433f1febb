//! Game balance tuning
//!
//! Loaded from JSON when a file is supplied; any missing field keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Balance knobs read by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Progression ===
    /// Kills required to summon the level 1 boss
    pub base_kill_quota: u32,
    /// Quota after a level up is `quota_base + level * quota_per_level`
    pub quota_base: u32,
    pub quota_per_level: u32,
    /// Seconds gameplay stays frozen between levels
    pub level_transition_duration: f32,
    /// Health restored on level up is `heal_base + level * heal_per_level`
    pub level_heal_base: f32,
    pub level_heal_per_level: f32,

    // === Scoring ===
    /// Seconds without a kill before the combo resets
    pub combo_timeout: f32,
    /// Kills per multiplier step
    pub combo_step: u32,
    /// Highest score multiplier
    pub combo_max_multiplier: u32,
    pub boss_bonus_score: u64,

    // === Damage ===
    /// Damage from an enemy ramming the player
    pub enemy_contact_damage: f32,
    /// Damage per second while touching a boss
    pub boss_contact_dps: f32,

    // === Powerups ===
    /// Chance an enemy kill drops a powerup
    pub powerup_drop_chance: f64,
    /// Delay before the first aid powerup of a boss fight
    pub boss_powerup_first_delay: f32,
    pub boss_powerup_interval: f32,
    /// Below this health the aid powerup favours health
    pub low_health_threshold: f32,
    pub low_health_bias: f64,
    pub health_pickup_amount: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_kill_quota: 15,
            quota_base: 10,
            quota_per_level: 5,
            level_transition_duration: 3.0,
            level_heal_base: 40.0,
            level_heal_per_level: 10.0,

            combo_timeout: 2.5,
            combo_step: 5,
            combo_max_multiplier: 10,
            boss_bonus_score: 50,

            enemy_contact_damage: 5.0,
            boss_contact_dps: 50.0,

            powerup_drop_chance: 0.28,
            boss_powerup_first_delay: 10.0,
            boss_powerup_interval: 12.0,
            low_health_threshold: 50.0,
            low_health_bias: 0.6,
            health_pickup_amount: 50.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Kill quota for the given level
    pub fn kill_quota(&self, level: u32) -> u32 {
        if level <= 1 {
            self.base_kill_quota
        } else {
            self.quota_base
                .saturating_add(level.saturating_mul(self.quota_per_level))
        }
    }

    /// Health restored when reaching `level`
    pub fn level_heal(&self, level: u32) -> f32 {
        self.level_heal_base + level as f32 * self.level_heal_per_level
    }

    /// Score multiplier at the given combo count
    pub fn combo_multiplier(&self, combo: u32) -> u32 {
        (combo / self.combo_step.max(1) + 1).min(self.combo_max_multiplier)
    }
}
