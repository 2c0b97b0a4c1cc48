use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::PlayerQuery;
use crate::{
    errors::{AppError, AppResult},
    levels,
    models::{Difficulty, LevelDefinition, LevelScore, Progress},
    AppState,
};

/// A catalog level as seen by one player. Word lists are left out so the
/// menu does not give the answers away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSummary {
    pub id: u32,
    pub title: String,
    pub grid_size: usize,
    pub difficulty: Difficulty,
    pub description: String,
    pub word_count: usize,
    pub unlocked: bool,
    pub completed: bool,
    pub best: Option<LevelScore>,
}

impl LevelSummary {
    pub fn new(level: &LevelDefinition, progress: &Progress) -> Self {
        Self {
            id: level.id,
            title: level.title.clone(),
            grid_size: level.grid_size,
            difficulty: level.difficulty,
            description: level.description.clone(),
            word_count: level.words.len(),
            unlocked: progress.is_unlocked(level.id),
            completed: progress.is_completed(level.id),
            best: progress.best_score(level.id),
        }
    }
}

pub async fn list_levels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlayerQuery>,
) -> AppResult<Json<Vec<LevelSummary>>> {
    let player_id = query.player_id()?;
    let progress = state.progress.load(&player_id).await?;

    let summaries = levels::all_levels()
        .iter()
        .map(|level| LevelSummary::new(level, &progress))
        .collect();

    Ok(Json(summaries))
}

pub async fn get_level(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Query(query): Query<PlayerQuery>,
) -> AppResult<Json<LevelSummary>> {
    let player_id = query.player_id()?;
    let level = levels::get_level_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("level {}", id)))?;
    let progress = state.progress.load(&player_id).await?;

    Ok(Json(LevelSummary::new(level, &progress)))
}
