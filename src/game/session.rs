use std::{
    collections::BTreeSet,
    time::{Duration, Instant},
};

use rand::{seq::IndexedRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    game::{grid::GeneratedPuzzle, matcher::WordMatcher, tracer::SelectionTracer},
    models::{Cell, Grid, PlacedWord},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleStatus {
    Unsolved,
    Solved,
}

/// What happened when a drag gesture ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// A word not found before, with the cells the player dragged over
    Found { word: String, cells: Vec<Cell> },
    /// A word already in the found set; nothing changes
    AlreadyFound(String),
    NoMatch,
    /// No gesture was in progress
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub word: String,
    pub cells: Vec<Cell>,
}

/// One attempt at one generated puzzle: the found set, the drag in progress
/// and the clock.
///
/// The grid and word list never change for the life of a session; `reset`
/// only clears the attempt.
#[derive(Debug)]
pub struct PuzzleSession {
    puzzle: GeneratedPuzzle,
    found: BTreeSet<String>,
    anchor: Option<Cell>,
    selection: Vec<Cell>,
    started_at: Option<Instant>,
    solved_after: Option<Duration>,
}

impl PuzzleSession {
    pub fn new(puzzle: GeneratedPuzzle) -> Self {
        Self {
            puzzle,
            found: BTreeSet::new(),
            anchor: None,
            selection: Vec::new(),
            started_at: None,
            solved_after: None,
        }
    }

    pub fn puzzle(&self) -> &GeneratedPuzzle {
        &self.puzzle
    }

    pub fn grid(&self) -> &Grid {
        &self.puzzle.grid
    }

    pub fn placed_words(&self) -> &[PlacedWord] {
        &self.puzzle.placed_words
    }

    pub fn found_words(&self) -> &BTreeSet<String> {
        &self.found
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.contains(word)
    }

    pub fn selection(&self) -> &[Cell] {
        &self.selection
    }

    pub fn is_selecting(&self) -> bool {
        self.anchor.is_some()
    }

    /// Start a drag at `cell`; the clock starts on the first one
    pub fn begin_selection(&mut self, cell: Cell) -> &[Cell] {
        if !cell.in_bounds(self.puzzle.size) {
            return &self.selection;
        }

        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }

        self.anchor = Some(cell);
        self.selection = vec![cell];
        &self.selection
    }

    /// Re-trace from the anchor to `cell`. A cell off the grid or off any
    /// straight line keeps the previous selection.
    pub fn extend_selection(&mut self, cell: Cell) -> &[Cell] {
        let Some(anchor) = self.anchor else {
            return &self.selection;
        };
        if !cell.in_bounds(self.puzzle.size) {
            return &self.selection;
        }

        let traced = SelectionTracer::trace(anchor, cell);
        if !traced.is_empty() {
            self.selection = traced;
        }

        &self.selection
    }

    /// Finish the drag and check the selection against the word list
    pub fn end_selection(&mut self) -> SelectionOutcome {
        if self.anchor.take().is_none() {
            return SelectionOutcome::Idle;
        }

        let selection = std::mem::take(&mut self.selection);
        let Some(matched) =
            WordMatcher::find_match(&selection, &self.puzzle.placed_words, &self.puzzle.grid)
        else {
            return SelectionOutcome::NoMatch;
        };

        let word = matched.word.clone();
        if self.record_found(&word) {
            SelectionOutcome::Found {
                word,
                cells: selection,
            }
        } else {
            SelectionOutcome::AlreadyFound(word)
        }
    }

    /// Add a word to the found set. Returns false if it was already there or
    /// is not one of this puzzle's placed words.
    pub fn record_found(&mut self, word: &str) -> bool {
        if !self.puzzle.placed_words.iter().any(|p| p.word == word) {
            return false;
        }
        if !self.found.insert(word.to_string()) {
            return false;
        }

        if self.is_solved() && self.solved_after.is_none() {
            self.solved_after = Some(self.elapsed());
            tracing::info!(
                "Puzzle solved: {} words in {}s",
                self.found.len(),
                self.elapsed().as_secs()
            );
        }

        true
    }

    /// Solved once every placed word is found. A puzzle where nothing could
    /// be placed is never solved.
    pub fn is_solved(&self) -> bool {
        !self.puzzle.placed_words.is_empty() && self.found.len() == self.puzzle.placed_words.len()
    }

    pub fn status(&self) -> PuzzleStatus {
        if self.is_solved() {
            PuzzleStatus::Solved
        } else {
            PuzzleStatus::Unsolved
        }
    }

    /// Time since the first interaction, frozen once solved
    pub fn elapsed(&self) -> Duration {
        if let Some(solved_after) = self.solved_after {
            return solved_after;
        }
        self.started_at
            .map(|started| started.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// The found word covering `cell`, for highlighting
    pub fn found_word_at(&self, cell: Cell) -> Option<&str> {
        self.puzzle
            .placed_words
            .iter()
            .filter(|placed| self.found.contains(&placed.word))
            .find(|placed| placed.contains(cell))
            .map(|placed| placed.word.as_str())
    }

    /// Pick a random word still to be found
    pub fn hint<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Hint> {
        let unfound: Vec<&PlacedWord> = self
            .puzzle
            .placed_words
            .iter()
            .filter(|placed| !self.found.contains(&placed.word))
            .collect();

        unfound.choose(rng).map(|placed| Hint {
            word: placed.word.clone(),
            cells: placed.cells(),
        })
    }

    /// Start the attempt over on the same grid
    pub fn reset(&mut self) {
        self.found.clear();
        self.anchor = None;
        self.selection.clear();
        self.started_at = None;
        self.solved_after = None;
    }
}
