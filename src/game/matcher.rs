use crate::{
    game::tracer::SelectionTracer,
    models::{Cell, Grid, PlacedWord},
};

/// Shortest selection that can spell a word
pub const MIN_SELECTION_LEN: usize = 2;

pub struct WordMatcher;

impl WordMatcher {
    /// Find the placed word a selection spells, forwards or backwards.
    ///
    /// The selection has to cover exactly the word's length and run in a
    /// contiguous straight line; these are checked here as well as in the
    /// tracer so selections built elsewhere get the same treatment. Found
    /// state is left to the caller.
    pub fn find_match<'a>(
        selection: &[Cell],
        placed_words: &'a [PlacedWord],
        grid: &Grid,
    ) -> Option<&'a PlacedWord> {
        if selection.len() < MIN_SELECTION_LEN {
            return None;
        }

        let candidate = Self::extract_word(grid, selection)?;
        let reversed: String = candidate.chars().rev().collect();

        // A forward reading wins over a reversed one, so a word and its
        // reversal can both be found
        let matched = placed_words
            .iter()
            .find(|placed| placed.word == candidate)
            .or_else(|| placed_words.iter().find(|placed| placed.word == reversed))?;

        if selection.len() != matched.word.chars().count() {
            return None;
        }

        if !Self::is_contiguous_line(selection) {
            return None;
        }

        Some(matched)
    }

    /// Letters under the selection in order, or `None` if any cell is off
    /// the grid
    pub fn extract_word(grid: &Grid, selection: &[Cell]) -> Option<String> {
        selection
            .iter()
            .map(|cell| grid.get(cell.row).and_then(|row| row.get(cell.col)).copied())
            .collect()
    }

    fn is_contiguous_line(selection: &[Cell]) -> bool {
        let (Some(&first), Some(&last)) = (selection.first(), selection.last()) else {
            return false;
        };

        SelectionTracer::is_straight_line(first, last)
            && SelectionTracer::trace(first, last) == selection
    }
}
