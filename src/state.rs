use std::{collections::HashSet, sync::Arc};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    game::{GeneratedPuzzle, GridGenerator},
    models::WordSpec,
    progress::ProgressStore,
    utils::letters::RandomLetterSource,
};

/// Most words a custom puzzle may ask for
pub const MAX_CUSTOM_WORDS: usize = 40;

/// Bookkeeping for a puzzle someone is playing right now
#[derive(Debug, Clone)]
pub struct ActivePuzzle {
    /// The socket that owns the puzzle
    pub connection_id: Uuid,
    pub player_id: String,
    pub level_id: Option<u32>,
    pub started_at: DateTime<Utc>,
}

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub progress: Arc<dyn ProgressStore>,
    pub letters: Box<dyn RandomLetterSource + Send + Sync>,
    pub active_puzzles: DashMap<Uuid, ActivePuzzle>,
}

impl AppState {
    pub fn new(config: Config, progress: Arc<dyn ProgressStore>) -> Self {
        let letters = config.game.fill_mode.letter_source();
        Self {
            config,
            progress,
            letters,
            active_puzzles: DashMap::new(),
        }
    }

    /// Generate a fresh grid with the configured trial budget and filler
    pub fn generate_puzzle(&self, size: usize, words: &[WordSpec]) -> AppResult<GeneratedPuzzle> {
        let game = &self.config.game;

        if size < game.min_grid_size || size > game.max_grid_size {
            return Err(AppError::Validation(format!(
                "grid size must be between {} and {}, got {}",
                game.min_grid_size, game.max_grid_size, size
            )));
        }
        if words.is_empty() {
            return Err(AppError::Validation("word list is empty".to_string()));
        }
        if words.len() > MAX_CUSTOM_WORDS {
            return Err(AppError::Validation(format!(
                "at most {} words per puzzle",
                MAX_CUSTOM_WORDS
            )));
        }
        if let Some(bad) = words
            .iter()
            .find(|spec| !spec.word.chars().all(|c| c.is_ascii_uppercase()))
        {
            return Err(AppError::Validation(format!(
                "word {:?} must contain only letters A-Z",
                bad.word
            )));
        }

        // Found words are tracked by text, so each word has to be told apart
        // from every other word read in either direction
        let mut seen: HashSet<&str> = HashSet::with_capacity(words.len());
        for spec in words {
            let reversed: String = spec.word.chars().rev().collect();
            if seen.contains(spec.word.as_str()) {
                return Err(AppError::Validation(format!(
                    "word {:?} is listed more than once",
                    spec.word
                )));
            }
            if reversed != spec.word && seen.contains(reversed.as_str()) {
                return Err(AppError::Validation(format!(
                    "word {:?} is the reverse of another listed word",
                    spec.word
                )));
            }
            seen.insert(&spec.word);
        }

        let puzzle = GridGenerator::generate_with(
            size,
            words,
            game.placement_trials,
            self.letters.as_ref(),
            &mut rand::rng(),
        );

        if !puzzle.is_complete() {
            tracing::warn!(
                "{} of {} words did not fit a {}x{} grid",
                puzzle.dropped.len(),
                words.len(),
                size,
                size
            );
        }

        Ok(puzzle)
    }

    /// Drop every puzzle registered by a closed connection
    pub fn release_connection(&self, connection_id: Uuid) {
        self.active_puzzles
            .retain(|_, puzzle| puzzle.connection_id != connection_id);
    }
}

/// State with default game settings and an in-memory progress store
#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::{
        config::{GameConfig, ServerConfig},
        progress::InMemoryProgressStore,
    };

    let config = Config {
        database: None,
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        game: GameConfig::default(),
    };
    AppState::new(config, Arc::new(InMemoryProgressStore::new()))
}
