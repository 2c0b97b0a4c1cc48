use crate::models::{Cell, Direction};

/// A grid under construction; `None` marks a cell no word has claimed yet
pub type DraftGrid = Vec<Vec<Option<char>>>;

/// Create an empty `size`×`size` draft
pub fn empty_draft(size: usize) -> DraftGrid {
    vec![vec![None; size]; size]
}

pub struct GridPlacer;

impl GridPlacer {
    /// Try to lay `word` out from `(start_row, start_col)` in `direction`.
    ///
    /// Fails if any letter would leave the grid or land on a cell holding a
    /// different letter. Crossing words may share a cell when the letters
    /// agree. The grid is only written once every letter has been checked, so
    /// a failed attempt leaves it untouched.
    pub fn try_place(
        grid: &mut DraftGrid,
        word: &str,
        start_row: usize,
        start_col: usize,
        direction: Direction,
    ) -> bool {
        let size = grid.len();
        let (d_row, d_col) = direction.delta();
        let start = Cell::new(start_row, start_col);

        let mut targets = Vec::with_capacity(word.len());
        for (i, letter) in word.chars().enumerate() {
            let Some(cell) = start.offset(d_row, d_col, i, size) else {
                return false;
            };

            match grid[cell.row][cell.col] {
                Some(existing) if existing != letter => return false,
                _ => targets.push((cell, letter)),
            }
        }

        for (cell, letter) in targets {
            grid[cell.row][cell.col] = Some(letter);
        }

        true
    }

    /// Find the first horizontal run of `len` unclaimed cells, scanning rows
    /// top to bottom and columns left to right
    pub fn find_free_run(grid: &DraftGrid, len: usize) -> Option<Cell> {
        let size = grid.len();
        if len == 0 || len > size {
            return None;
        }

        for (row, cells) in grid.iter().enumerate() {
            for col in 0..=size - len {
                if cells[col..col + len].iter().all(Option::is_none) {
                    return Some(Cell::new(row, col));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(grid: &DraftGrid, start: Cell, direction: Direction, len: usize) -> String {
        let (d_row, d_col) = direction.delta();
        (0..len)
            .filter_map(|i| start.offset(d_row, d_col, i, grid.len()))
            .map(|cell| grid[cell.row][cell.col].unwrap_or('.'))
            .collect()
    }

    #[test]
    fn test_places_in_every_direction() {
        let mut grid = empty_draft(8);

        assert!(GridPlacer::try_place(&mut grid, "FAITH", 0, 0, Direction::Horizontal));
        assert!(GridPlacer::try_place(&mut grid, "GRACE", 1, 7, Direction::Vertical));
        assert!(GridPlacer::try_place(&mut grid, "LOVE", 2, 0, Direction::DiagonalDown));
        assert!(GridPlacer::try_place(&mut grid, "HOPE", 7, 0, Direction::DiagonalUp));

        assert_eq!(read(&grid, Cell::new(0, 0), Direction::Horizontal, 5), "FAITH");
        assert_eq!(read(&grid, Cell::new(1, 7), Direction::Vertical, 5), "GRACE");
        assert_eq!(read(&grid, Cell::new(2, 0), Direction::DiagonalDown, 4), "LOVE");
        assert_eq!(read(&grid, Cell::new(7, 0), Direction::DiagonalUp, 4), "HOPE");
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let mut grid = empty_draft(8);

        assert!(!GridPlacer::try_place(&mut grid, "PRAYER", 0, 3, Direction::Horizontal));
        assert!(!GridPlacer::try_place(&mut grid, "PRAYER", 4, 0, Direction::Vertical));
        assert!(!GridPlacer::try_place(&mut grid, "PRAYER", 2, 0, Direction::DiagonalUp));
        assert_eq!(grid, empty_draft(8));
    }

    #[test]
    fn test_allows_matching_overlap() {
        let mut grid = empty_draft(8);

        assert!(GridPlacer::try_place(&mut grid, "CAT", 0, 0, Direction::Horizontal));
        // "ARK" shares the A at (0, 1)
        assert!(GridPlacer::try_place(&mut grid, "ARK", 0, 1, Direction::Vertical));

        assert_eq!(read(&grid, Cell::new(0, 0), Direction::Horizontal, 3), "CAT");
        assert_eq!(read(&grid, Cell::new(0, 1), Direction::Vertical, 3), "ARK");
    }

    #[test]
    fn test_conflict_leaves_grid_untouched() {
        let mut grid = empty_draft(8);
        assert!(GridPlacer::try_place(&mut grid, "CAT", 0, 0, Direction::Horizontal));
        let before = grid.clone();

        // "DOG" would write D, O into free cells before hitting the T at (0, 2)
        assert!(!GridPlacer::try_place(&mut grid, "DOG", 2, 0, Direction::DiagonalUp));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_find_free_run_skips_claimed_cells() {
        let mut grid = empty_draft(4);
        assert!(GridPlacer::try_place(&mut grid, "AB", 0, 1, Direction::Horizontal));

        // Row 0 has no run of three free cells, row 1 does
        assert_eq!(GridPlacer::find_free_run(&grid, 3), Some(Cell::new(1, 0)));
        assert_eq!(GridPlacer::find_free_run(&grid, 1), Some(Cell::new(0, 0)));
        assert_eq!(GridPlacer::find_free_run(&grid, 5), None);
    }
}
