//! Cumulative run statistics handed to persistence at game over

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::boss::BossKind;
use super::enemy::EnemyKind;
use super::pickup::PowerupKind;
use super::weapon::WeaponKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub kills: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
    pub bosses_defeated: u32,
    pub boss_types_defeated: BTreeSet<BossKind>,
    pub powerups_collected: u32,
    pub powerup_counts: BTreeMap<PowerupKind, u32>,
    pub health_pickups: u32,
    pub weapon_usage: BTreeMap<WeaponKind, u32>,
    pub dashes_used: u32,
    pub max_combo: u32,
    pub enemy_types_killed: BTreeSet<EnemyKind>,
    /// Levels cleared without taking damage
    pub perfect_levels: u32,
    /// Damage taken since the current level began
    #[serde(skip)]
    pub level_damage_taken: f32,
}

impl RunStats {
    pub fn record_shot(&mut self, weapon: WeaponKind) {
        self.shots_fired += 1;
        *self.weapon_usage.entry(weapon).or_insert(0) += 1;
    }

    pub fn record_hit(&mut self, damage: f32) {
        self.shots_hit += 1;
        self.damage_dealt += damage;
    }

    pub fn record_damage_taken(&mut self, amount: f32) {
        self.damage_taken += amount;
        self.level_damage_taken += amount;
    }

    pub fn record_kill(&mut self, kind: EnemyKind, combo: u32) {
        self.kills += 1;
        self.enemy_types_killed.insert(kind);
        self.max_combo = self.max_combo.max(combo);
    }

    pub fn record_boss_defeat(&mut self, kind: BossKind) {
        self.bosses_defeated += 1;
        self.boss_types_defeated.insert(kind);
    }

    pub fn record_powerup(&mut self, kind: PowerupKind) {
        self.powerups_collected += 1;
        *self.powerup_counts.entry(kind).or_insert(0) += 1;
        if kind == PowerupKind::Health {
            self.health_pickups += 1;
        }
    }

    /// Close out a level, crediting it as perfect when no damage was taken
    pub fn finish_level(&mut self) {
        if self.level_damage_taken <= 0.0 {
            self.perfect_levels += 1;
        }
        self.level_damage_taken = 0.0;
    }

    /// Hit percentage in [0, 100]
    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            return 0.0;
        }
        (self.shots_hit as f32 / self.shots_fired as f32 * 100.0).min(100.0)
    }

    /// Most fired weapon; ties go to the earlier weapon in declaration order
    pub fn favorite_weapon(&self) -> Option<WeaponKind> {
        self.weapon_usage
            .iter()
            .filter(|(_, count)| **count > 0)
            .fold(None, |best: Option<(WeaponKind, u32)>, (weapon, count)| match best {
                Some((_, best_count)) if best_count >= *count => best,
                _ => Some((*weapon, *count)),
            })
            .map(|(weapon, _)| weapon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        let mut stats = RunStats::default();
        assert_eq!(stats.accuracy(), 0.0);
        for _ in 0..4 {
            stats.record_shot(WeaponKind::Normal);
        }
        stats.record_hit(10.0);
        assert_eq!(stats.accuracy(), 25.0);
        // Multi-hit weapons can't push accuracy past 100
        for _ in 0..10 {
            stats.record_hit(10.0);
        }
        assert_eq!(stats.accuracy(), 100.0);
    }

    #[test]
    fn test_favorite_weapon() {
        let mut stats = RunStats::default();
        assert_eq!(stats.favorite_weapon(), None);
        stats.record_shot(WeaponKind::Laser);
        stats.record_shot(WeaponKind::Shotgun);
        stats.record_shot(WeaponKind::Shotgun);
        assert_eq!(stats.favorite_weapon(), Some(WeaponKind::Shotgun));
        stats.record_shot(WeaponKind::Laser);
        // Tie goes to declaration order
        assert_eq!(stats.favorite_weapon(), Some(WeaponKind::Shotgun));
    }

    #[test]
    fn test_perfect_levels() {
        let mut stats = RunStats::default();
        stats.finish_level();
        stats.record_damage_taken(5.0);
        stats.finish_level();
        stats.finish_level();
        assert_eq!(stats.perfect_levels, 2);
        assert_eq!(stats.damage_taken, 5.0);
    }

    #[test]
    fn test_serializes_with_lowercase_keys() {
        let mut stats = RunStats::default();
        stats.record_powerup(PowerupKind::Health);
        stats.record_kill(EnemyKind::Fast, 3);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["powerup_counts"]["health"], 1);
        assert_eq!(json["enemy_types_killed"][0], "fast");
        assert_eq!(stats.health_pickups, 1);
        assert_eq!(stats.max_combo, 3);
    }
}
