use serde::{Deserialize, Serialize};

use crate::{
    game::PuzzleStatus,
    models::{Cell, Difficulty, Direction, Grid, LevelScore, PlacedWord, WordSpec},
};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    StartLevel {
        level_id: u32,
    },
    StartCustom {
        grid_size: usize,
        words: Vec<WordSpec>,
    },
    SelectStart {
        row: usize,
        col: usize,
    },
    SelectMove {
        row: usize,
        col: usize,
    },
    SelectEnd,
    RequestHint,
    ResetPuzzle,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    PuzzleStarted {
        puzzle_id: String,
        level_id: Option<u32>,
        title: Option<String>,
        difficulty: Option<Difficulty>,
        grid: Grid,
        words: Vec<WordInfo>,
        /// Words that could not be placed and are not part of this puzzle
        dropped: Vec<String>,
    },
    SelectionUpdated {
        cells: Vec<Cell>,
    },
    WordFound {
        word: String,
        cells: Vec<Cell>,
        found_count: usize,
        total: usize,
    },
    AlreadyFound {
        word: String,
    },
    NoMatch,
    PuzzleSolved {
        elapsed_secs: u64,
        stars: Option<u8>,
        best: Option<LevelScore>,
    },
    Hint {
        word: String,
        cells: Vec<Cell>,
    },
    PuzzleReset {
        status: PuzzleStatus,
    },
    Error {
        code: String,
        message: String,
    },
}

/// A placed word as the renderer sees it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    pub clue: String,
    pub start: Cell,
    pub direction: Direction,
    pub length: usize,
}

impl From<&PlacedWord> for WordInfo {
    fn from(placed: &PlacedWord) -> Self {
        Self {
            word: placed.word.clone(),
            clue: placed.clue.clone(),
            start: placed.start(),
            direction: placed.direction,
            length: placed.word.chars().count(),
        }
    }
}
