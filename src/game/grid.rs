use rand::Rng;
use serde::Serialize;

use crate::{
    game::placer::{empty_draft, DraftGrid, GridPlacer},
    models::{Cell, Direction, Grid, PlacedWord, WordSpec},
    utils::letters::{RandomLetterSource, UniformLetters},
};

/// Randomized attempts per word before falling back to a plain scan
pub const DEFAULT_PLACEMENT_TRIALS: usize = 500;

/// Output of a generation run.
///
/// `dropped` lists the words that fit nowhere; a puzzle with dropped words
/// is still playable, its win condition just covers `placed_words` only.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPuzzle {
    pub size: usize,
    pub grid: Grid,
    pub placed_words: Vec<PlacedWord>,
    pub dropped: Vec<WordSpec>,
}

impl GeneratedPuzzle {
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

pub struct GridGenerator;

impl GridGenerator {
    /// Generate a `size`×`size` puzzle with the default trial budget and
    /// uniformly random filler letters
    pub fn generate(size: usize, words: &[WordSpec]) -> GeneratedPuzzle {
        Self::generate_with(
            size,
            words,
            DEFAULT_PLACEMENT_TRIALS,
            &UniformLetters,
            &mut rand::rng(),
        )
    }

    pub fn generate_with<R: Rng>(
        size: usize,
        words: &[WordSpec],
        trials: usize,
        letters: &dyn RandomLetterSource,
        rng: &mut R,
    ) -> GeneratedPuzzle {
        let mut draft = empty_draft(size);
        let mut placed_words = Vec::with_capacity(words.len());
        let mut dropped = Vec::new();

        // Longest first; stable so equal lengths keep their input order
        let mut sorted: Vec<&WordSpec> = words.iter().collect();
        sorted.sort_by(|a, b| b.len().cmp(&a.len()));

        for spec in sorted {
            if spec.is_empty() {
                tracing::warn!("Skipping empty word (clue: {:?})", spec.clue);
                continue;
            }

            match Self::place_word(&mut draft, spec, trials, rng) {
                Some(placed) => placed_words.push(placed),
                None => {
                    tracing::warn!(
                        "Dropped word {} from {}x{} grid: no room left",
                        spec.word,
                        size,
                        size
                    );
                    dropped.push(spec.clone());
                }
            }
        }

        let grid = Self::fill_empty_cells(draft, letters, rng);

        tracing::debug!(
            "Generated {}x{} grid with {}/{} words placed",
            size,
            size,
            placed_words.len(),
            words.len()
        );

        GeneratedPuzzle {
            size,
            grid,
            placed_words,
            dropped,
        }
    }

    fn place_word<R: Rng>(
        draft: &mut DraftGrid,
        spec: &WordSpec,
        trials: usize,
        rng: &mut R,
    ) -> Option<PlacedWord> {
        let size = draft.len();
        if size == 0 {
            return None;
        }
        let len = spec.len();

        for _ in 0..trials {
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            let row = rng.random_range(0..size);
            let col = rng.random_range(0..size);
            let (row, col) = Self::clamp_anchor(row, col, len, size, direction);

            if GridPlacer::try_place(draft, &spec.word, row, col, direction) {
                tracing::debug!(
                    "Placed {} at ({}, {}) {:?}",
                    spec.word,
                    row,
                    col,
                    direction
                );
                return Some(PlacedWord::new(spec, Cell::new(row, col), direction));
            }
        }

        tracing::warn!(
            "Could not place {} after {} trials, falling back to horizontal scan",
            spec.word,
            trials
        );

        let start = GridPlacer::find_free_run(draft, len)?;
        if GridPlacer::try_place(draft, &spec.word, start.row, start.col, Direction::Horizontal) {
            Some(PlacedWord::new(spec, start, Direction::Horizontal))
        } else {
            None
        }
    }

    /// Pull a random anchor back so the whole word fits in `direction`.
    /// Words longer than the grid still come out of bounds and are rejected
    /// by the placer.
    fn clamp_anchor(
        row: usize,
        col: usize,
        len: usize,
        size: usize,
        direction: Direction,
    ) -> (usize, usize) {
        let max_start = size.saturating_sub(len);

        match direction {
            Direction::Horizontal => (row, col.min(max_start)),
            Direction::Vertical => (row.min(max_start), col),
            Direction::DiagonalDown => (row.min(max_start), col.min(max_start)),
            Direction::DiagonalUp => (
                row.min(size.saturating_sub(1)).max(len.saturating_sub(1)),
                col.min(max_start),
            ),
        }
    }

    fn fill_empty_cells<R: Rng>(
        draft: DraftGrid,
        letters: &dyn RandomLetterSource,
        rng: &mut R,
    ) -> Grid {
        draft
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.unwrap_or_else(|| letters.next_letter(&mut *rng)))
                    .collect()
            })
            .collect()
    }
}
