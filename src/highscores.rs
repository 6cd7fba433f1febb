//! High score leaderboard and the game-over run record
//!
//! Persisted as JSON on disk, tracks the top 10 scores.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::sim::{BossKind, EnemyKind, GameState, PowerupKind, WeaponKind};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Unix timestamp in milliseconds
pub fn now_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Everything worth keeping about a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub player_name: String,
    pub seed: u64,
    pub score: u64,
    pub level: u32,
    pub kills: u32,
    /// Seconds
    pub play_time: f32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    /// Percent
    pub accuracy: f32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
    pub bosses_defeated: u32,
    pub boss_types_defeated: Vec<BossKind>,
    pub powerups_collected: u32,
    pub powerup_counts: BTreeMap<PowerupKind, u32>,
    pub health_pickups: u32,
    pub weapon_usage: BTreeMap<WeaponKind, u32>,
    pub favorite_weapon: Option<WeaponKind>,
    pub dashes_used: u32,
    pub max_combo: u32,
    pub enemy_types_killed: Vec<EnemyKind>,
    pub perfect_levels: u32,
    /// Unix timestamp (ms)
    pub timestamp: f64,
}

impl RunRecord {
    /// Shape the record from the current state of a run
    pub fn from_state(state: &GameState) -> Self {
        let stats = &state.stats;
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            seed: state.seed,
            score: state.score,
            level: state.level,
            kills: stats.kills,
            play_time: state.play_time,
            shots_fired: stats.shots_fired,
            shots_hit: stats.shots_hit,
            accuracy: stats.accuracy(),
            damage_dealt: stats.damage_dealt,
            damage_taken: stats.damage_taken,
            bosses_defeated: stats.bosses_defeated,
            boss_types_defeated: stats.boss_types_defeated.iter().copied().collect(),
            powerups_collected: stats.powerups_collected,
            powerup_counts: stats.powerup_counts.clone(),
            health_pickups: stats.health_pickups,
            weapon_usage: stats.weapon_usage.clone(),
            favorite_weapon: stats.favorite_weapon(),
            dashes_used: stats.dashes_used,
            max_combo: stats.max_combo,
            enemy_types_killed: stats.enemy_types_killed.iter().copied().collect(),
            perfect_levels: stats.perfect_levels,
            timestamp: now_millis(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub player_name: String,
    pub score: u64,
    /// Level reached
    pub level: u32,
    pub kills: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl From<&RunRecord> for HighScoreEntry {
    fn from(record: &RunRecord) -> Self {
        Self {
            player_name: record.player_name.clone(),
            score: record.score,
            level: record.level,
            kills: record.kills,
            timestamp: record.timestamp,
        }
    }
}

/// Aggregate over one player's leaderboard entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub games_played: usize,
    pub best_score: u64,
    pub total_kills: u64,
    pub average_score: f64,
    pub max_level: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add an entry (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Sorted descending by score; ties keep the older entry first
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record a finished run
    pub fn add_run(&mut self, record: &RunRecord) -> Option<usize> {
        self.add_score(HighScoreEntry::from(record))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Best entry for a player (names compare case-insensitively)
    pub fn player_best(&self, name: &str) -> Option<&HighScoreEntry> {
        self.entries_for(name).max_by_key(|e| e.score)
    }

    pub fn player_summary(&self, name: &str) -> Option<PlayerSummary> {
        let entries: Vec<_> = self.entries_for(name).collect();
        if entries.is_empty() {
            return None;
        }
        let total_score: u64 = entries.iter().map(|e| e.score).sum();
        Some(PlayerSummary {
            games_played: entries.len(),
            best_score: entries.iter().map(|e| e.score).max().unwrap_or(0),
            total_kills: entries.iter().map(|e| e.kills as u64).sum(),
            average_score: total_score as f64 / entries.len() as f64,
            max_level: entries.iter().map(|e| e.level).max().unwrap_or(0),
        })
    }

    fn entries_for<'a, 'b>(
        &'a self,
        name: &'b str,
    ) -> impl Iterator<Item = &'a HighScoreEntry> + use<'a, 'b> {
        self.entries
            .iter()
            .filter(move |e| e.player_name.eq_ignore_ascii_case(name))
    }

    /// Read a leaderboard file
    pub fn read_from(path: &Path) -> io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut scores: HighScores = serde_json::from_str(&json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }

    /// Load high scores, starting fresh when the file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match Self::read_from(path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Failed to load high scores from {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Save high scores as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
