use async_trait::async_trait;
use sqlx::PgPool;

use super::{ProgressError, ProgressStore};
use crate::{
    db::queries,
    models::{LevelProgressRow, LevelScore, Progress},
};

/// Progress kept in the `level_progress` table
pub struct PgProgressStore {
    pool: PgPool,
}

impl PgProgressStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressStore for PgProgressStore {
    async fn load(&self, player_id: &str) -> Result<Progress, ProgressError> {
        let rows = queries::get_level_progress(&self.pool, player_id).await?;
        progress_from_rows(&rows)
    }

    async fn save(&self, player_id: &str, progress: &Progress) -> Result<(), ProgressError> {
        queries::save_level_progress(&self.pool, player_id, progress).await?;
        Ok(())
    }

    async fn unlock(&self, player_id: &str, level_id: u32) -> Result<Progress, ProgressError> {
        queries::unlock_level(&self.pool, player_id, level_id).await?;
        self.load(player_id).await
    }

    async fn record_completion(
        &self,
        player_id: &str,
        level_id: u32,
        time_secs: u64,
        stars: u8,
    ) -> Result<Progress, ProgressError> {
        queries::record_level_completion(&self.pool, player_id, level_id, time_secs, stars)
            .await?;

        tracing::info!(
            "Player {} completed level {} in {}s ({} stars)",
            player_id,
            level_id,
            time_secs,
            stars
        );

        self.load(player_id).await
    }

    async fn reset(&self, player_id: &str) -> Result<(), ProgressError> {
        let removed = queries::delete_level_progress(&self.pool, player_id).await?;
        tracing::info!("Reset progress for player {} ({} rows)", player_id, removed);
        Ok(())
    }
}

pub fn progress_from_rows(rows: &[LevelProgressRow]) -> Result<Progress, ProgressError> {
    let mut progress = Progress::default();

    for row in rows {
        let level_id = u32::try_from(row.level_id)
            .map_err(|_| ProgressError::Corrupt(format!("negative level id {}", row.level_id)))?;

        if row.completed {
            progress.completed.insert(level_id);
        }
        if row.unlocked {
            progress.unlocked.insert(level_id);
        }

        if let (Some(time), Some(stars)) = (row.best_time_secs, row.stars) {
            let score = LevelScore {
                time_secs: u64::try_from(time).map_err(|_| {
                    ProgressError::Corrupt(format!("negative time for level {}", level_id))
                })?,
                stars: u8::try_from(stars).map_err(|_| {
                    ProgressError::Corrupt(format!("bad star count for level {}", level_id))
                })?,
            };
            progress.scores.insert(level_id, score);
        }
    }

    Ok(progress)
}
