use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The first level never needs unlocking
pub const FIRST_LEVEL_ID: u32 = 1;

/// Best result recorded for a level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelScore {
    pub time_secs: u64,
    pub stars: u8,
}

/// A player's level progress.
///
/// All operations are pure: they return a new `Progress` and leave `self`
/// untouched, so the owner decides when and where the new state is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    pub completed: BTreeSet<u32>,
    pub unlocked: BTreeSet<u32>,
    pub scores: BTreeMap<u32, LevelScore>,
}

impl Progress {
    /// Level 1 is always open; any other level opens once explicitly
    /// unlocked or once the level before it is completed
    pub fn is_unlocked(&self, level_id: u32) -> bool {
        level_id == FIRST_LEVEL_ID
            || self.unlocked.contains(&level_id)
            || self.completed.contains(&level_id)
            || (level_id > FIRST_LEVEL_ID && self.completed.contains(&(level_id - 1)))
    }

    pub fn is_completed(&self, level_id: u32) -> bool {
        self.completed.contains(&level_id)
    }

    pub fn best_score(&self, level_id: u32) -> Option<LevelScore> {
        self.scores.get(&level_id).copied()
    }

    pub fn with_unlocked(&self, level_id: u32) -> Progress {
        let mut next = self.clone();
        next.unlocked.insert(level_id);
        next
    }

    /// Mark a level completed, keep the fastest time seen so far and open
    /// the following level
    pub fn with_completion(&self, level_id: u32, time_secs: u64, stars: u8) -> Progress {
        let mut next = self.clone();
        next.completed.insert(level_id);

        let improved = next
            .scores
            .get(&level_id)
            .map_or(true, |best| time_secs < best.time_secs);
        if improved {
            next.scores.insert(level_id, LevelScore { time_secs, stars });
        }

        next.unlocked.insert(level_id + 1);
        next
    }
}

/// One stored row per (player, level) the player has touched
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LevelProgressRow {
    pub player_id: String,
    pub level_id: i32,
    pub completed: bool,
    pub unlocked: bool,
    pub best_time_secs: Option<i64>,
    pub stars: Option<i16>,
    pub updated_at: DateTime<Utc>,
}
