use std::collections::BTreeSet;

use sqlx::{PgPool, Postgres, Result, Transaction};

use crate::models::{LevelProgressRow, Progress};

// Level progress queries

pub async fn get_level_progress(pool: &PgPool, player_id: &str) -> Result<Vec<LevelProgressRow>> {
    sqlx::query_as::<_, LevelProgressRow>(
        r#"
        SELECT player_id, level_id, completed, unlocked, best_time_secs, stars, updated_at
        FROM level_progress
        WHERE player_id = $1
        ORDER BY level_id
        "#,
    )
    .bind(player_id)
    .fetch_all(pool)
    .await
}

/// Replace everything stored for a player with `progress`
pub async fn save_level_progress(pool: &PgPool, player_id: &str, progress: &Progress) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM level_progress WHERE player_id = $1")
        .bind(player_id)
        .execute(&mut *tx)
        .await?;

    let level_ids: BTreeSet<u32> = progress
        .completed
        .iter()
        .chain(progress.unlocked.iter())
        .chain(progress.scores.keys())
        .copied()
        .collect();

    for level_id in level_ids {
        let score = progress.best_score(level_id);

        sqlx::query(
            r#"
            INSERT INTO level_progress
                (player_id, level_id, completed, unlocked, best_time_secs, stars, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            "#,
        )
        .bind(player_id)
        .bind(level_id as i32)
        .bind(progress.is_completed(level_id))
        .bind(progress.unlocked.contains(&level_id))
        .bind(score.map(|s| s.time_secs as i64))
        .bind(score.map(|s| s.stars as i16))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!("Saved progress for player {}", player_id);

    Ok(())
}

/// Mark a level completed and open the next one in a single transaction.
///
/// Each row is upserted in place so concurrent completions for one player
/// never overwrite each other; the stored score only changes when the new
/// time is faster.
pub async fn record_level_completion(
    pool: &PgPool,
    player_id: &str,
    level_id: u32,
    time_secs: u64,
    stars: u8,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO level_progress
            (player_id, level_id, completed, unlocked, best_time_secs, stars, updated_at)
        VALUES ($1, $2, TRUE, FALSE, $3, $4, NOW())
        ON CONFLICT (player_id, level_id) DO UPDATE SET
            completed = TRUE,
            stars = CASE
                WHEN level_progress.best_time_secs IS NULL
                  OR EXCLUDED.best_time_secs < level_progress.best_time_secs
                THEN EXCLUDED.stars
                ELSE level_progress.stars
            END,
            best_time_secs = CASE
                WHEN level_progress.best_time_secs IS NULL
                  OR EXCLUDED.best_time_secs < level_progress.best_time_secs
                THEN EXCLUDED.best_time_secs
                ELSE level_progress.best_time_secs
            END,
            updated_at = NOW()
        "#,
    )
    .bind(player_id)
    .bind(level_id as i32)
    .bind(time_secs as i64)
    .bind(stars as i16)
    .execute(&mut *tx)
    .await?;

    upsert_unlocked(&mut tx, player_id, level_id + 1).await?;

    tx.commit().await?;

    tracing::debug!("Recorded completion of level {} for player {}", level_id, player_id);

    Ok(())
}

pub async fn unlock_level(pool: &PgPool, player_id: &str, level_id: u32) -> Result<()> {
    let mut tx = pool.begin().await?;
    upsert_unlocked(&mut tx, player_id, level_id).await?;
    tx.commit().await
}

async fn upsert_unlocked(
    tx: &mut Transaction<'_, Postgres>,
    player_id: &str,
    level_id: u32,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO level_progress (player_id, level_id, completed, unlocked, updated_at)
        VALUES ($1, $2, FALSE, TRUE, NOW())
        ON CONFLICT (player_id, level_id) DO UPDATE SET
            unlocked = TRUE,
            updated_at = NOW()
        "#,
    )
    .bind(player_id)
    .bind(level_id as i32)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete_level_progress(pool: &PgPool, player_id: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM level_progress WHERE player_id = $1")
        .bind(player_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
