//! Per-player level progress.
//!
//! Callers own progress through a [`ProgressStore`]; the engine never reads
//! or writes it. Unlock and completion rules live on [`Progress`] as pure
//! functions, and each store only decides where the result is kept.

pub mod postgres;

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

use crate::models::Progress;

pub use postgres::PgProgressStore;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt progress record: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Current progress; a player never seen before gets the default
    async fn load(&self, player_id: &str) -> Result<Progress, ProgressError>;

    async fn save(&self, player_id: &str, progress: &Progress) -> Result<(), ProgressError>;

    /// Forget everything stored for the player
    async fn reset(&self, player_id: &str) -> Result<(), ProgressError>;

    async fn is_unlocked(&self, player_id: &str, level_id: u32) -> Result<bool, ProgressError> {
        Ok(self.load(player_id).await?.is_unlocked(level_id))
    }

    async fn unlock(&self, player_id: &str, level_id: u32) -> Result<Progress, ProgressError> {
        let next = self.load(player_id).await?.with_unlocked(level_id);
        self.save(player_id, &next).await?;
        Ok(next)
    }

    /// Record a finished level, keeping the best time and opening the next
    /// level
    async fn record_completion(
        &self,
        player_id: &str,
        level_id: u32,
        time_secs: u64,
        stars: u8,
    ) -> Result<Progress, ProgressError> {
        let next = self
            .load(player_id)
            .await?
            .with_completion(level_id, time_secs, stars);
        self.save(player_id, &next).await?;

        tracing::info!(
            "Player {} completed level {} in {}s ({} stars)",
            player_id,
            level_id,
            time_secs,
            stars
        );

        Ok(next)
    }
}

/// Process-local store; progress is lost on restart
#[derive(Debug, Default)]
pub struct InMemoryProgressStore {
    players: DashMap<String, Progress>,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn load(&self, player_id: &str) -> Result<Progress, ProgressError> {
        Ok(self
            .players
            .get(player_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn save(&self, player_id: &str, progress: &Progress) -> Result<(), ProgressError> {
        self.players.insert(player_id.to_string(), progress.clone());
        Ok(())
    }

    async fn reset(&self, player_id: &str) -> Result<(), ProgressError> {
        self.players.remove(player_id);
        Ok(())
    }

    async fn record_completion(
        &self,
        player_id: &str,
        level_id: u32,
        time_secs: u64,
        stars: u8,
    ) -> Result<Progress, ProgressError> {
        // Hold the entry so two finishes for one player cannot interleave
        let mut entry = self.players.entry(player_id.to_string()).or_default();
        let next = entry.with_completion(level_id, time_secs, stars);
        *entry = next.clone();

        tracing::info!(
            "Player {} completed level {} in {}s ({} stars)",
            player_id,
            level_id,
            time_secs,
            stars
        );

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LevelScore;

    #[test]
    fn test_unknown_player_starts_at_level_one() {
        let store = InMemoryProgressStore::new();

        tokio_test::block_on(async {
            assert!(store.is_unlocked("ada", 1).await.unwrap());
            assert!(!store.is_unlocked("ada", 2).await.unwrap());
        });
    }

    #[test]
    fn test_record_completion_unlocks_next_level() {
        let store = InMemoryProgressStore::new();

        tokio_test::block_on(async {
            let progress = store.record_completion("ada", 1, 42, 3).await.unwrap();
            assert_eq!(
                progress.best_score(1),
                Some(LevelScore {
                    time_secs: 42,
                    stars: 3
                })
            );
            assert!(store.is_unlocked("ada", 2).await.unwrap());
            // Other players are unaffected
            assert!(!store.is_unlocked("grace", 2).await.unwrap());
        });
    }

    #[test]
    fn test_explicit_unlock() {
        let store = InMemoryProgressStore::new();

        tokio_test::block_on(async {
            store.unlock("ada", 5).await.unwrap();
            assert!(store.is_unlocked("ada", 5).await.unwrap());
            assert!(!store.is_unlocked("ada", 4).await.unwrap());
        });
    }

    #[test]
    fn test_reset_clears_progress() {
        let store = InMemoryProgressStore::new();

        tokio_test::block_on(async {
            store.record_completion("ada", 1, 42, 3).await.unwrap();
            store.reset("ada").await.unwrap();

            assert_eq!(store.load("ada").await.unwrap(), Progress::default());
        });
    }
}
