use serde::{Deserialize, Serialize};

/// A fully generated letter grid, indexed `grid[row][col]`
pub type Grid = Vec<Vec<char>>;

/// A grid coordinate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `i` times by `(d_row, d_col)`, returning `None` when the result
    /// leaves a `size`×`size` grid
    pub fn offset(&self, d_row: isize, d_col: isize, i: usize, size: usize) -> Option<Cell> {
        let i = isize::try_from(i).ok()?;
        let row = isize::try_from(self.row).ok()?.checked_add(d_row.checked_mul(i)?)?;
        let col = isize::try_from(self.col).ok()?.checked_add(d_col.checked_mul(i)?)?;

        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < size && col < size).then_some(Cell { row, col })
    }

    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

/// Orientation a word is laid out in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Horizontal,
    Vertical,
    DiagonalDown,
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// Unit step `(d_row, d_col)` for this direction
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }
}

/// A word to hide in the grid together with its clue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordSpec {
    pub word: String,
    pub clue: String,
}

impl WordSpec {
    /// Build a spec, uppercasing the word and dropping any whitespace
    pub fn new(word: &str, clue: &str) -> Self {
        Self {
            word: word
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_uppercase)
                .collect(),
            clue: clue.to_string(),
        }
    }

    /// Number of grid cells the word occupies
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// A word that made it onto the grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacedWord {
    pub word: String,
    pub clue: String,
    pub start_row: usize,
    pub start_col: usize,
    pub direction: Direction,
}

impl PlacedWord {
    pub fn new(spec: &WordSpec, start: Cell, direction: Direction) -> Self {
        Self {
            word: spec.word.clone(),
            clue: spec.clue.clone(),
            start_row: start.row,
            start_col: start.col,
            direction,
        }
    }

    pub fn start(&self) -> Cell {
        Cell::new(self.start_row, self.start_col)
    }

    /// Cells covered by the word, first letter first
    pub fn cells(&self) -> Vec<Cell> {
        let (d_row, d_col) = self.direction.delta();
        let start = self.start();
        (0..self.word.chars().count())
            .filter_map(|i| start.offset(d_row, d_col, i, usize::MAX))
            .collect()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells().contains(&cell)
    }
}
